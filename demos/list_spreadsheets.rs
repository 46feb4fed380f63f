/// Example listing the spreadsheets visible to a Google account
///
/// This example shows how to:
/// 1. Build a client from a bearer token
/// 2. List team drives and optionally switch to one
/// 3. List spreadsheets and print each sheet with its grid size
///
/// Run with:
/// ```bash
/// GOOGLE_ACCESS_TOKEN=ya29.a0Af... \
/// TEAM_DRIVE=Finance \
/// cargo run --example list_spreadsheets
/// ```
///
/// Note: obtaining the token (OAuth consent, service account) is out of scope;
/// `gcloud auth print-access-token` works for local experiments.
use anyhow::{Context, Result};
use gapi_sheets::{GapiConfig, GoogleApi};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing; RUST_LOG=gapi_sheets=debug shows every request
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let token = env::var("GOOGLE_ACCESS_TOKEN")
        .context("GOOGLE_ACCESS_TOKEN environment variable not set")?;
    let team_drive = env::var("TEAM_DRIVE").ok();

    let api = GoogleApi::with_token(GapiConfig::default(), token)?;

    let drives = api.team_drives().await?;
    info!(count = drives.len(), "Team drives visible");

    if let Some(name) = team_drive {
        let drive = api
            .open_team_drive(&name)
            .await
            .with_context(|| format!("Failed to open team drive '{name}'"))?;
        info!(id = %drive.id, name = %drive.name, "Opened team drive");
    }

    let names = api.spreadsheets().await?;
    println!("\n=== Spreadsheets ({}) ===", names.len());

    for name in names {
        let spreadsheet = api.open_spreadsheet(&name).await?;
        let metadata = spreadsheet.metadata().await?;
        println!("{name} ({} cells)", metadata.total_cells());
        for sheet in &metadata.sheets {
            let (columns, rows) = sheet.properties.dimensions();
            println!("  - {}: {columns} x {rows}", sheet.properties.title);
        }
    }

    Ok(())
}
