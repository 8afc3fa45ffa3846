use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::stage::{ReasonCode, Stage};

/// Event visits per stage. Counts occurrences, not distinct candidates: a
/// candidate that entered a stage twice is counted twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FunnelEntry {
    pub stage: Stage,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DropoffEntry {
    pub reason: ReasonCode,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SourcePerformance {
    pub source: String,
    pub total: i64,
    pub hired: i64,
    /// Whole-number percentage, 0 when the source has no candidates.
    pub hire_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StageDuration {
    pub stage: Stage,
    pub avg_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total_candidates: i64,
    pub active_candidates: i64,
    pub hired_candidates: i64,
    /// Stage events recorded over the trailing 30 days.
    pub recent_activity: i64,
}
