pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    analytics_service::AnalyticsService, candidate_service::CandidateService,
    role_service::RoleService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub candidate_service: CandidateService,
    pub role_service: RoleService,
    pub user_service: UserService,
    pub analytics_service: AnalyticsService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let candidate_service = CandidateService::new(pool.clone());
        let role_service = RoleService::new(pool.clone());
        let user_service = UserService::new(pool.clone());
        let analytics_service = AnalyticsService::new(pool.clone());

        Self {
            pool,
            candidate_service,
            role_service,
            user_service,
            analytics_service,
        }
    }
}
