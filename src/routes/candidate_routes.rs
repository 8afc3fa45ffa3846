use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::candidate_dto::{CreateCandidateRequest, MoveStageRequest};
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::services::candidate_service::board_columns;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let candidates = state.candidate_service.list(user.organization_id).await?;
    Ok(Json(candidates))
}

/// The kanban view: every candidate of the organization grouped into the
/// nine stage columns in pipeline order.
pub async fn candidate_board(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let candidates = state.candidate_service.list(user.organization_id).await?;
    Ok(Json(board_columns(candidates)))
}

#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateCandidateRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.current(&claims).await?;
    let candidate = state
        .candidate_service
        .create(user.organization_id, user.user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

pub async fn get_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let candidate = state.candidate_service.get(user.organization_id, id).await?;
    match candidate {
        Some(c) => Ok(Json(c)),
        None => Err(crate::error::Error::NotFound("Candidate not found".into())),
    }
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/move",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    request_body = MoveStageRequest,
    responses(
        (status = 200, description = "Candidate after the move"),
        (status = 400, description = "Missing reason_text for reason_code Other"),
        (status = 404, description = "Candidate not found in the caller's organization"),
    ),
)]
pub async fn move_candidate_stage(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MoveStageRequest>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let candidate = state
        .candidate_service
        .move_stage(user.organization_id, id, user.user_id, payload)
        .await?;
    Ok(Json(candidate))
}

pub async fn list_candidate_events(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let events = state.candidate_service.events(user.organization_id, id).await?;
    Ok(Json(events))
}
