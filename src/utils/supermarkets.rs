//! One-time startup download of the supermarket reference-data file.

use crate::utils::config::Config;
use tracing::{error, info};

/// Fetches the checkjebon supermarket list and drops it next to the data
/// files as `supermarkets.json`.
///
/// Best-effort: a failed download is logged and the server starts anyway.
pub async fn download(config: &Config) {
    let target = config.storage.data_dir.join("supermarkets.json");

    let body = match fetch(&config.storage.supermarkets_url).await {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "Error downloading supermarkets file");
            return;
        }
    };

    match tokio::fs::write(&target, body).await {
        Ok(()) => info!("Supermarkets file downloaded successfully"),
        Err(e) => error!(error = %e, "Failed to write supermarkets file"),
    }
}

async fn fetch(url: &str) -> Result<String, reqwest::Error> {
    reqwest::get(url).await?.error_for_status()?.text().await
}
