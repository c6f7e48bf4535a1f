// handlers/users.rs - POST /users

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::TokensBody;
use crate::app::AppState;
use crate::error::ApiError;
use crate::format::FormattedUser;
use crate::services::DirectoryService;

/// POST /users - every complete GLPI user, ordered by first name
pub async fn users_post(
    State(state): State<AppState>,
    payload: Result<Json<TokensBody>, JsonRejection>,
) -> Result<Json<Vec<FormattedUser>>, ApiError> {
    let Json(body) = payload?;
    let credentials = DirectoryService::credentials(body.session_token.as_deref(), body.app_token.as_deref())?;

    let users = state.directory.list_users(&credentials).await?;
    Ok(Json(users))
}
