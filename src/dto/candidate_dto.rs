use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::candidate::Candidate;
use crate::models::stage::{ActionType, ReasonCode, Stage};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCandidateRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub location: Option<String>,
    pub role_id: Option<Uuid>,
}

/// One requested stage move. `reason_text` is only honored when
/// `reason_code` is `Other`; for any other code it is discarded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MoveStageRequest {
    pub to_stage: Stage,
    pub action_type: ActionType,
    pub reason_code: ReasonCode,
    pub reason_text: Option<String>,
}

/// One kanban column: a stage and every candidate currently sitting in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardColumn {
    pub stage: Stage,
    pub candidates: Vec<Candidate>,
}
