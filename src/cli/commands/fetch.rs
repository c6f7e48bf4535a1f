use super::TokenArgs;
use crate::cli::utils::{output_collection, output_empty_collection};
use crate::cli::OutputFormat;
use crate::glpi::ItemType;
use crate::services::DirectoryService;

pub async fn fetch(
    directory: &DirectoryService,
    item_type: &str,
    tokens: &TokenArgs,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let item_type: ItemType = item_type.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let credentials = tokens.credentials()?;

    let records = directory.fetch_raw(&item_type, &credentials).await?;
    if records.is_empty() {
        return output_empty_collection(output_format, "records", &format!("No {} records", item_type));
    }

    output_collection(output_format, "records", &records, |r| {
        serde_json::to_string(r).unwrap_or_default()
    })
}
