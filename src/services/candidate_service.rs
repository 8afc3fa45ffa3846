use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::candidate_dto::{BoardColumn, CreateCandidateRequest, MoveStageRequest};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::stage::{ActionType, ReasonCode, Stage};
use crate::models::stage_event::CandidateStageEvent;

/// Reason text recorded on the event that accompanies candidate creation.
const INITIAL_REASON_TEXT: &str = "Initial application";

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT * FROM candidates
            WHERE organization_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    pub async fn get(&self, organization_id: Uuid, candidate_id: Uuid) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT * FROM candidates
            WHERE organization_id = $1 AND candidate_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    /// Creates the candidate together with its first stage event
    /// (`from_stage` NULL, landing on the first stage) in one transaction,
    /// so a candidate never exists without its creation event.
    pub async fn create(
        &self,
        organization_id: Uuid,
        recruiter_id: Uuid,
        payload: CreateCandidateRequest,
    ) -> Result<Candidate> {
        let mut tx = self.pool.begin().await?;

        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates
                (organization_id, role_id, recruiter_id, source, location,
                 current_stage, status, first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6, 'active', $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(payload.role_id)
        .bind(recruiter_id)
        .bind(payload.source)
        .bind(payload.location)
        .bind(Stage::ApplicationSubmitted)
        .bind(payload.first_name)
        .bind(payload.last_name)
        .bind(payload.email)
        .bind(payload.phone)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO candidate_stage_events
                (candidate_id, organization_id, from_stage, to_stage,
                 action_type, reason_code, reason_text, moved_by)
            VALUES ($1, $2, NULL, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(candidate.candidate_id)
        .bind(organization_id)
        .bind(Stage::ApplicationSubmitted)
        .bind(ActionType::Advance)
        .bind(ReasonCode::Other)
        .bind(INITIAL_REASON_TEXT)
        .bind(recruiter_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(candidate)
    }

    /// The stage transition: append one event and re-point the candidate's
    /// `current_stage`/`status`, committed atomically so history and current
    /// state cannot diverge. Any target stage is accepted regardless of the
    /// candidate's status, and resubmitting the same move appends a
    /// duplicate event.
    pub async fn move_stage(
        &self,
        organization_id: Uuid,
        candidate_id: Uuid,
        moved_by: Uuid,
        payload: MoveStageRequest,
    ) -> Result<Candidate> {
        let candidate = self
            .get(organization_id, candidate_id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate not found".into()))?;

        let reason_text = reason_text_for(payload.reason_code, payload.reason_text)?;
        let status = candidate.status.after(payload.action_type, payload.to_stage);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO candidate_stage_events
                (candidate_id, organization_id, from_stage, to_stage,
                 action_type, reason_code, reason_text, moved_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(candidate_id)
        .bind(organization_id)
        .bind(candidate.current_stage)
        .bind(payload.to_stage)
        .bind(payload.action_type)
        .bind(payload.reason_code)
        .bind(reason_text)
        .bind(moved_by)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates
            SET current_stage = $1, status = $2, updated_at = NOW()
            WHERE candidate_id = $3
            RETURNING *
            "#,
        )
        .bind(payload.to_stage)
        .bind(status)
        .bind(candidate_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn events(
        &self,
        organization_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Vec<CandidateStageEvent>> {
        let events = sqlx::query_as::<_, CandidateStageEvent>(
            r#"
            SELECT * FROM candidate_stage_events
            WHERE organization_id = $1 AND candidate_id = $2
            ORDER BY moved_at
            "#,
        )
        .bind(organization_id)
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }
}

/// Free text only travels with the `Other` code; any other code drops it.
fn reason_text_for(code: ReasonCode, text: Option<String>) -> Result<Option<String>> {
    if code != ReasonCode::Other {
        return Ok(None);
    }
    match text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        Some(t) => Ok(Some(t)),
        None => Err(Error::BadRequest(
            "reason_text is required when reason_code is Other".into(),
        )),
    }
}

/// Groups a flat candidate list into the nine kanban columns, preserving the
/// incoming (newest-first) order within each column.
pub fn board_columns(candidates: Vec<Candidate>) -> Vec<BoardColumn> {
    Stage::ALL
        .iter()
        .map(|stage| BoardColumn {
            stage: *stage,
            candidates: candidates
                .iter()
                .filter(|c| c.current_stage == *stage)
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stage::CandidateStatus;
    use chrono::Utc;

    fn candidate(stage: Stage) -> Candidate {
        Candidate {
            candidate_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            role_id: None,
            recruiter_id: None,
            source: None,
            location: None,
            current_stage: stage,
            status: CandidateStatus::Active,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: None,
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn reason_text_kept_only_for_other() {
        let kept = reason_text_for(ReasonCode::Other, Some("details".into())).unwrap();
        assert_eq!(kept.as_deref(), Some("details"));

        let dropped =
            reason_text_for(ReasonCode::Ghosted, Some("still supplied".into())).unwrap();
        assert_eq!(dropped, None);
    }

    #[test]
    fn other_without_text_is_rejected() {
        assert!(reason_text_for(ReasonCode::Other, None).is_err());
        assert!(reason_text_for(ReasonCode::Other, Some("   ".into())).is_err());
    }

    #[test]
    fn board_has_a_column_per_stage() {
        let candidates = vec![
            candidate(Stage::ApplicationSubmitted),
            candidate(Stage::ApplicationSubmitted),
            candidate(Stage::Joined),
        ];
        let board = board_columns(candidates);

        assert_eq!(board.len(), 9);
        assert_eq!(board[0].stage, Stage::ApplicationSubmitted);
        assert_eq!(board[0].candidates.len(), 2);
        assert_eq!(board[8].candidates.len(), 1);
        assert!(board[3].candidates.is_empty());
    }
}
