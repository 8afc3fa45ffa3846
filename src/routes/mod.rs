pub mod analytics;
pub mod candidate_routes;
pub mod health;
pub mod role_routes;
pub mod session;
