//! Uploads the newest city-index file to the WordPress import endpoint.
//!
//! One POST, pass or fail: no retries, no partial-success handling. The
//! response body is logged verbatim either way so failures can be diagnosed
//! from the log alone.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::json;
use tracing::{info, Level};

use leilao_scout::config::Config;
use leilao_scout::output;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = Config::from_env();
    let base_url = config.import_url.context("WP_URL is not set")?;
    let token = config.import_token.context("WP_TOKEN is not set")?;

    let path = output::latest_index_file(Path::new("."))?
        .context("No urls_*_por_cidade.json file found in the current directory")?;
    info!("Uploading {}", path.display());

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let index: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let endpoint = format!("{}/wp-json/imoveis/v1/import", base_url.trim_end_matches('/'));
    let client = reqwest::Client::new();
    let response = client
        .post(&endpoint)
        .bearer_auth(&token)
        .json(&json!({ "urlsPorCidade": index }))
        .send()
        .await
        .with_context(|| format!("POST to {} failed", endpoint))?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    info!("Import endpoint answered {}: {}", status, body);

    if !status.is_success() {
        bail!("Import rejected with status {}: {}", status, body);
    }

    Ok(())
}
