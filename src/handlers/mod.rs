// handlers/mod.rs - HTTP handlers over the directory service
//
// Public: /, /health
// Session: POST /initSession (caller supplies GLPI Authorization + App-Token)
// Directory: POST /users, POST /tickets (caller supplies Session-Token + App-Token)

pub mod session;
pub mod system;
pub mod tickets;
pub mod users;

use serde::Deserialize;

pub use session::init_session_post;
pub use system::{health, root};
pub use tickets::tickets_post;
pub use users::users_post;

/// Body accepted by the directory endpoints
#[derive(Debug, Default, Deserialize)]
pub struct TokensBody {
    #[serde(rename = "sessionToken", default)]
    pub session_token: Option<String>,
    #[serde(rename = "AppToken", default)]
    pub app_token: Option<String>,
}
