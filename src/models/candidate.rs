use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::stage::{CandidateStatus, Stage};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub candidate_id: Uuid,
    pub organization_id: Uuid,
    pub role_id: Option<Uuid>,
    pub recruiter_id: Option<Uuid>,
    pub source: Option<String>,
    pub location: Option<String>,
    pub current_stage: Stage,
    pub status: CandidateStatus,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
