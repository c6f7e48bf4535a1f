// handlers/session.rs - POST /initSession

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct InitSessionBody {
    #[serde(rename = "Authorization", default)]
    pub authorization: Option<String>,
    #[serde(rename = "AppToken", default)]
    pub app_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InitSessionResponse {
    pub message: String,
    #[serde(rename = "sessionToken")]
    pub session_token: String,
}

/**
 * POST /initSession - open a GLPI session on behalf of the caller
 *
 * Input: `{ "Authorization": "user_token ...", "AppToken": "..." }`
 * Output: `{ "message": "Sessão iniciada com sucesso", "sessionToken": "..." }`
 */
pub async fn init_session_post(
    State(state): State<AppState>,
    payload: Result<Json<InitSessionBody>, JsonRejection>,
) -> Result<Json<InitSessionResponse>, ApiError> {
    let Json(body) = payload?;

    let session_token = state
        .directory
        .open_session(body.authorization.as_deref(), body.app_token.as_deref())
        .await?;

    Ok(Json(InitSessionResponse {
        message: "Sessão iniciada com sucesso".to_string(),
        session_token,
    }))
}
