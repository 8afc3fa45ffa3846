use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use validator::Validate;

use crate::dto::role_dto::CreateRoleRequest;
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::AppState;

pub async fn list_roles(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let roles = state.role_service.list(user.organization_id).await?;
    Ok(Json(roles))
}

#[axum::debug_handler]
pub async fn create_role(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateRoleRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.current(&claims).await?;
    let role = state.role_service.create(user.organization_id, payload).await?;
    Ok((StatusCode::CREATED, Json(role)))
}
