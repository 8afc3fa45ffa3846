use axum::{extract::State, response::IntoResponse, Extension, Json};

use crate::dto::analytics_dto::{
    DashboardStats, DropoffEntry, FunnelEntry, SourcePerformance, StageDuration,
};
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/analytics/funnel",
    responses(
        (status = 200, description = "Event visits per stage, all nine stages in pipeline order", body = Vec<FunnelEntry>),
    ),
)]
pub async fn funnel(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let funnel = state.analytics_service.funnel(user.organization_id).await?;
    Ok(Json(funnel))
}

#[utoipa::path(
    get,
    path = "/api/analytics/dropoff",
    responses(
        (status = 200, description = "Reject/withdraw events grouped by reason code", body = Vec<DropoffEntry>),
    ),
)]
pub async fn dropoff(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let dropoffs = state.analytics_service.dropoff(user.organization_id).await?;
    Ok(Json(dropoffs))
}

#[utoipa::path(
    get,
    path = "/api/analytics/sources",
    responses(
        (status = 200, description = "Per-source totals, hires and hire rate", body = Vec<SourcePerformance>),
    ),
)]
pub async fn source_performance(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let sources = state
        .analytics_service
        .source_performance(user.organization_id)
        .await?;
    Ok(Json(sources))
}

#[utoipa::path(
    get,
    path = "/api/analytics/time-in-stage",
    responses(
        (status = 200, description = "Average days per stage computed from the event history", body = Vec<StageDuration>),
    ),
)]
pub async fn time_in_stage(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let durations = state
        .analytics_service
        .time_in_stage(user.organization_id)
        .await?;
    Ok(Json(durations))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Headline pipeline counts", body = DashboardStats),
    ),
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let stats = state
        .analytics_service
        .dashboard_stats(user.organization_id)
        .await?;
    Ok(Json(stats))
}
