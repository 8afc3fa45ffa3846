use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::analytics_dto::{
    DashboardStats, DropoffEntry, FunnelEntry, SourcePerformance, StageDuration,
};
use crate::error::Result;
use crate::models::stage::{ActionType, CandidateStatus, ReasonCode, Stage};

/// Read side of the pipeline: fetches flat row projections for one
/// organization and folds them into chart-ready counts. Everything is
/// recomputed from scratch on every request; there is no caching.
#[derive(Clone)]
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn funnel(&self, organization_id: Uuid) -> Result<Vec<FunnelEntry>> {
        let visits = sqlx::query_scalar::<_, Stage>(
            "SELECT to_stage FROM candidate_stage_events WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(funnel_counts(&visits))
    }

    pub async fn dropoff(&self, organization_id: Uuid) -> Result<Vec<DropoffEntry>> {
        let events = sqlx::query_as::<_, (ActionType, ReasonCode)>(
            "SELECT action_type, reason_code FROM candidate_stage_events WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(dropoff_counts(&events))
    }

    pub async fn source_performance(&self, organization_id: Uuid) -> Result<Vec<SourcePerformance>> {
        let rows = sqlx::query_as::<_, (Option<String>, CandidateStatus)>(
            "SELECT source, status FROM candidates WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(source_performance(&rows))
    }

    pub async fn time_in_stage(&self, organization_id: Uuid) -> Result<Vec<StageDuration>> {
        let stamps = sqlx::query_as::<_, (Uuid, Stage, DateTime<Utc>)>(
            r#"
            SELECT candidate_id, to_stage, moved_at
            FROM candidate_stage_events
            WHERE organization_id = $1
            ORDER BY candidate_id, moved_at
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(time_in_stage(&stamps))
    }

    pub async fn dashboard_stats(&self, organization_id: Uuid) -> Result<DashboardStats> {
        let statuses = sqlx::query_scalar::<_, CandidateStatus>(
            "SELECT status FROM candidates WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        let since = Utc::now() - Duration::days(30);
        let recent_activity = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM candidate_stage_events WHERE organization_id = $1 AND moved_at >= $2",
        )
        .bind(organization_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(dashboard_counts(&statuses, recent_activity))
    }
}

/// Event visits per stage, reported for all nine stages in pipeline order.
/// The entries always sum to the length of the input.
pub fn funnel_counts(visits: &[Stage]) -> Vec<FunnelEntry> {
    let mut counts: HashMap<Stage, i64> = HashMap::new();
    for stage in visits {
        *counts.entry(*stage).or_insert(0) += 1;
    }
    Stage::ALL
        .iter()
        .map(|stage| FunnelEntry {
            stage: *stage,
            count: counts.get(stage).copied().unwrap_or(0),
        })
        .collect()
}

/// Reject/withdraw events grouped by reason code. Advances carry reason
/// codes too but are not drop-offs; reasons nobody hit are omitted.
pub fn dropoff_counts(events: &[(ActionType, ReasonCode)]) -> Vec<DropoffEntry> {
    let mut counts: HashMap<ReasonCode, i64> = HashMap::new();
    for (action, reason) in events {
        if matches!(action, ActionType::Reject | ActionType::Withdraw) {
            *counts.entry(*reason).or_insert(0) += 1;
        }
    }
    ReasonCode::ALL
        .iter()
        .filter_map(|reason| {
            counts.get(reason).map(|count| DropoffEntry {
                reason: *reason,
                count: *count,
            })
        })
        .collect()
}

/// Hires per source. Candidates with no recorded source are skipped.
pub fn source_performance(rows: &[(Option<String>, CandidateStatus)]) -> Vec<SourcePerformance> {
    let mut stats: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
    for (source, status) in rows {
        let Some(source) = source.as_deref() else {
            continue;
        };
        let entry = stats.entry(source).or_insert((0, 0));
        entry.0 += 1;
        if *status == CandidateStatus::Hired {
            entry.1 += 1;
        }
    }
    stats
        .into_iter()
        .map(|(source, (total, hired))| SourcePerformance {
            source: source.to_string(),
            total,
            hired,
            hire_rate: hire_rate(hired, total),
        })
        .collect()
}

fn hire_rate(hired: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    ((hired as f64 / total as f64) * 100.0).round() as i64
}

/// Average days spent in each stage, from consecutive event pairs per
/// candidate: the gap between arriving somewhere and the next move is
/// attributed to the arrived-at stage. The input must be sorted by
/// candidate and then by `moved_at`. Stages with no completed interval
/// (including wherever a candidate currently sits) are omitted.
pub fn time_in_stage(stamps: &[(Uuid, Stage, DateTime<Utc>)]) -> Vec<StageDuration> {
    let mut totals: HashMap<Stage, (f64, i64)> = HashMap::new();
    for pair in stamps.windows(2) {
        let (candidate, stage, entered) = &pair[0];
        let (next_candidate, _, left) = &pair[1];
        if candidate != next_candidate {
            continue;
        }
        let days = (*left - *entered).num_seconds() as f64 / 86_400.0;
        let entry = totals.entry(*stage).or_insert((0.0, 0));
        entry.0 += days;
        entry.1 += 1;
    }
    Stage::ALL
        .iter()
        .filter_map(|stage| {
            totals.get(stage).map(|(total_days, intervals)| StageDuration {
                stage: *stage,
                avg_days: round_tenth(total_days / *intervals as f64),
            })
        })
        .collect()
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn dashboard_counts(statuses: &[CandidateStatus], recent_activity: i64) -> DashboardStats {
    DashboardStats {
        total_candidates: statuses.len() as i64,
        active_candidates: statuses
            .iter()
            .filter(|s| **s == CandidateStatus::Active)
            .count() as i64,
        hired_candidates: statuses
            .iter()
            .filter(|s| **s == CandidateStatus::Hired)
            .count() as i64,
        recent_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn funnel_counts_sum_to_event_total() {
        let visits = vec![
            Stage::ApplicationSubmitted,
            Stage::ApplicationSubmitted,
            Stage::RecruiterScreening,
            Stage::Joined,
            Stage::RecruiterScreening,
        ];
        let funnel = funnel_counts(&visits);

        assert_eq!(funnel.len(), 9);
        let total: i64 = funnel.iter().map(|e| e.count).sum();
        assert_eq!(total, visits.len() as i64);
        assert_eq!(funnel[0].count, 2);
        assert_eq!(funnel[1].count, 2);
        assert_eq!(funnel[8].count, 1);
    }

    #[test]
    fn funnel_counts_visits_not_candidates() {
        // The same candidate re-entering a stage counts twice.
        let visits = vec![Stage::InterviewRound1, Stage::InterviewRound1];
        let funnel = funnel_counts(&visits);
        assert_eq!(funnel[3].count, 2);
    }

    #[test]
    fn dropoff_ignores_advances() {
        let events = vec![
            (ActionType::Advance, ReasonCode::Other),
            (ActionType::Reject, ReasonCode::InterviewFeedback),
            (ActionType::Withdraw, ReasonCode::CandidateWithdrew),
            (ActionType::Reject, ReasonCode::InterviewFeedback),
        ];
        let dropoffs = dropoff_counts(&events);

        assert_eq!(dropoffs.len(), 2);
        assert_eq!(
            dropoffs[0],
            DropoffEntry {
                reason: ReasonCode::InterviewFeedback,
                count: 2
            }
        );
        assert_eq!(
            dropoffs[1],
            DropoffEntry {
                reason: ReasonCode::CandidateWithdrew,
                count: 1
            }
        );
    }

    #[test]
    fn source_performance_skips_unsourced_and_rounds() {
        let rows = vec![
            (Some("LinkedIn".to_string()), CandidateStatus::Hired),
            (Some("LinkedIn".to_string()), CandidateStatus::Active),
            (Some("LinkedIn".to_string()), CandidateStatus::Rejected),
            (Some("Referral".to_string()), CandidateStatus::Hired),
            (None, CandidateStatus::Hired),
        ];
        let perf = source_performance(&rows);

        assert_eq!(perf.len(), 2);
        let linkedin = perf.iter().find(|p| p.source == "LinkedIn").unwrap();
        assert_eq!(linkedin.total, 3);
        assert_eq!(linkedin.hired, 1);
        assert_eq!(linkedin.hire_rate, 33);
        let referral = perf.iter().find(|p| p.source == "Referral").unwrap();
        assert_eq!(referral.hire_rate, 100);
    }

    #[test]
    fn hire_rate_of_empty_source_is_zero() {
        assert_eq!(hire_rate(0, 0), 0);
    }

    #[test]
    fn time_in_stage_pairs_within_one_candidate() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let t = |day: u32| Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap();

        let mut stamps = vec![
            (a, Stage::ApplicationSubmitted, t(1)),
            (a, Stage::RecruiterScreening, t(3)),
            (a, Stage::InterviewRound1, t(4)),
            (b, Stage::ApplicationSubmitted, t(10)),
        ];
        stamps.sort_by_key(|(candidate, _, at)| (*candidate, *at));

        let durations = time_in_stage(&stamps);

        // Candidate b has no second event and a's final stage is still open,
        // so only two intervals exist.
        assert_eq!(durations.len(), 2);
        assert_eq!(durations[0].stage, Stage::ApplicationSubmitted);
        assert_eq!(durations[0].avg_days, 2.0);
        assert_eq!(durations[1].stage, Stage::RecruiterScreening);
        assert_eq!(durations[1].avg_days, 1.0);
    }

    #[test]
    fn dashboard_counts_by_status() {
        let statuses = vec![
            CandidateStatus::Active,
            CandidateStatus::Active,
            CandidateStatus::Hired,
            CandidateStatus::Withdrawn,
        ];
        let stats = dashboard_counts(&statuses, 7);

        assert_eq!(stats.total_candidates, 4);
        assert_eq!(stats.active_candidates, 2);
        assert_eq!(stats.hired_candidates, 1);
        assert_eq!(stats.recent_activity, 7);
    }
}
