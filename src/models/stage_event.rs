use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::stage::{ActionType, ReasonCode, Stage};

/// One immutable entry in a candidate's transition history. `from_stage` is
/// NULL only on the creation event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateStageEvent {
    pub event_id: Uuid,
    pub candidate_id: Uuid,
    pub organization_id: Uuid,
    pub from_stage: Option<Stage>,
    pub to_stage: Stage,
    pub action_type: ActionType,
    pub reason_code: ReasonCode,
    pub reason_text: Option<String>,
    pub moved_by: Uuid,
    pub moved_at: DateTime<Utc>,
}
