use axum::{extract::State, response::IntoResponse, Extension, Json};

use crate::dto::session_dto::SessionResponse;
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::AppState;

/// Resolves the caller to a user row, provisioning user and organization on
/// first login, and returns both.
pub async fn get_session(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.current(&claims).await?;
    let organization = state.user_service.organization(user.organization_id).await?;
    Ok(Json(SessionResponse { user, organization }))
}
