use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::services::DirectoryService;

pub async fn session(
    directory: &DirectoryService,
    authorization: &str,
    app_token: &str,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let token = directory.open_session(Some(authorization), Some(app_token)).await?;

    match output_format {
        OutputFormat::Json => output_success(
            output_format,
            "Sessão iniciada com sucesso",
            Some(json!({ "sessionToken": token })),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
