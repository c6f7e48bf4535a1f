use axum::response::{IntoResponse, Json};
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "GLPI Adapter",
            "version": version,
            "description": "Paginated GLPI user and ticket listings in a client-friendly format",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "session": "POST /initSession { Authorization, AppToken }",
                "users": "POST /users { sessionToken, AppToken }",
                "tickets": "POST /tickets { sessionToken, AppToken }",
            }
        }
    }))
}

/// Liveness only; the upstream is not contacted since every call needs caller tokens
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
