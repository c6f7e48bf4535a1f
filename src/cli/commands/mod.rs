pub mod fetch;
pub mod session;
pub mod tickets;
pub mod users;

use clap::Args;

use crate::glpi::SessionCredentials;
use crate::services::DirectoryService;

pub use fetch::fetch;
pub use session::session;
pub use tickets::tickets;
pub use users::users;

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[arg(long, help = "GLPI session token (see `glpi session`)")]
    pub session_token: String,
    #[arg(long, help = "GLPI application token")]
    pub app_token: String,
}

impl TokenArgs {
    pub fn credentials(&self) -> anyhow::Result<SessionCredentials> {
        Ok(DirectoryService::credentials(
            Some(self.session_token.as_str()),
            Some(self.app_token.as_str()),
        )?)
    }
}
