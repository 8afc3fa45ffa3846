use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The nine pipeline stages, in the order candidates move through them.
/// The human-readable labels are also the storage and wire representation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "pipeline_stage")]
pub enum Stage {
    #[serde(rename = "Application Submitted")]
    #[sqlx(rename = "Application Submitted")]
    ApplicationSubmitted,
    #[serde(rename = "Recruiter Screening")]
    #[sqlx(rename = "Recruiter Screening")]
    RecruiterScreening,
    #[serde(rename = "Hiring Manager Review")]
    #[sqlx(rename = "Hiring Manager Review")]
    HiringManagerReview,
    #[serde(rename = "Interview Round 1")]
    #[sqlx(rename = "Interview Round 1")]
    InterviewRound1,
    #[serde(rename = "Interview Round 2")]
    #[sqlx(rename = "Interview Round 2")]
    InterviewRound2,
    #[serde(rename = "Offer Extended")]
    #[sqlx(rename = "Offer Extended")]
    OfferExtended,
    #[serde(rename = "Offer Accepted")]
    #[sqlx(rename = "Offer Accepted")]
    OfferAccepted,
    #[serde(rename = "Background Check")]
    #[sqlx(rename = "Background Check")]
    BackgroundCheck,
    #[serde(rename = "Joined")]
    #[sqlx(rename = "Joined")]
    Joined,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::ApplicationSubmitted,
        Stage::RecruiterScreening,
        Stage::HiringManagerReview,
        Stage::InterviewRound1,
        Stage::InterviewRound2,
        Stage::OfferExtended,
        Stage::OfferAccepted,
        Stage::BackgroundCheck,
        Stage::Joined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ApplicationSubmitted => "Application Submitted",
            Stage::RecruiterScreening => "Recruiter Screening",
            Stage::HiringManagerReview => "Hiring Manager Review",
            Stage::InterviewRound1 => "Interview Round 1",
            Stage::InterviewRound2 => "Interview Round 2",
            Stage::OfferExtended => "Offer Extended",
            Stage::OfferAccepted => "Offer Accepted",
            Stage::BackgroundCheck => "Background Check",
            Stage::Joined => "Joined",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a stage transition.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "action_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Advance,
    Reject,
    Withdraw,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "candidate_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Active,
    Rejected,
    Withdrawn,
    Hired,
}

impl CandidateStatus {
    /// Status projection of one transition. Reject and withdraw always win
    /// regardless of the target stage; an advance only changes the status
    /// when it lands on the final stage.
    pub fn after(self, action: ActionType, to_stage: Stage) -> CandidateStatus {
        match action {
            ActionType::Reject => CandidateStatus::Rejected,
            ActionType::Withdraw => CandidateStatus::Withdrawn,
            ActionType::Advance if to_stage == Stage::Joined => CandidateStatus::Hired,
            ActionType::Advance => self,
        }
    }
}

/// Closed vocabulary explaining a transition. `Other` is the only code that
/// carries free text with it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "reason_code")]
pub enum ReasonCode {
    #[serde(rename = "Compensation mismatch")]
    #[sqlx(rename = "Compensation mismatch")]
    CompensationMismatch,
    #[serde(rename = "Role mismatch")]
    #[sqlx(rename = "Role mismatch")]
    RoleMismatch,
    #[serde(rename = "Interview feedback")]
    #[sqlx(rename = "Interview feedback")]
    InterviewFeedback,
    #[serde(rename = "Candidate withdrew")]
    #[sqlx(rename = "Candidate withdrew")]
    CandidateWithdrew,
    #[serde(rename = "Ghosted")]
    #[sqlx(rename = "Ghosted")]
    Ghosted,
    #[serde(rename = "Failed background check")]
    #[sqlx(rename = "Failed background check")]
    FailedBackgroundCheck,
    #[serde(rename = "Other")]
    #[sqlx(rename = "Other")]
    Other,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 7] = [
        ReasonCode::CompensationMismatch,
        ReasonCode::RoleMismatch,
        ReasonCode::InterviewFeedback,
        ReasonCode::CandidateWithdrew,
        ReasonCode::Ghosted,
        ReasonCode::FailedBackgroundCheck,
        ReasonCode::Other,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_is_terminal_regardless_of_target() {
        for stage in Stage::ALL {
            assert_eq!(
                CandidateStatus::Active.after(ActionType::Reject, stage),
                CandidateStatus::Rejected
            );
        }
    }

    #[test]
    fn withdraw_is_terminal_regardless_of_target() {
        for stage in Stage::ALL {
            assert_eq!(
                CandidateStatus::Active.after(ActionType::Withdraw, stage),
                CandidateStatus::Withdrawn
            );
        }
    }

    #[test]
    fn advancing_to_joined_hires() {
        assert_eq!(
            CandidateStatus::Active.after(ActionType::Advance, Stage::Joined),
            CandidateStatus::Hired
        );
    }

    #[test]
    fn advancing_elsewhere_keeps_status() {
        assert_eq!(
            CandidateStatus::Active.after(ActionType::Advance, Stage::OfferExtended),
            CandidateStatus::Active
        );
        // No transition legality check: a rejected candidate moved forward
        // stays rejected unless the move itself re-derives a terminal status.
        assert_eq!(
            CandidateStatus::Rejected.after(ActionType::Advance, Stage::InterviewRound1),
            CandidateStatus::Rejected
        );
    }

    #[test]
    fn stage_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&Stage::InterviewRound1).unwrap();
        assert_eq!(json, "\"Interview Round 1\"");
        let back: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Stage::InterviewRound1);
    }

    #[test]
    fn pipeline_has_nine_ordered_stages() {
        assert_eq!(Stage::ALL.len(), 9);
        assert_eq!(Stage::ALL[0], Stage::ApplicationSubmitted);
        assert_eq!(Stage::ALL[8], Stage::Joined);
    }
}
