/// Example appending rows to a sheet and reading them back
///
/// This example shows how to:
/// 1. Configure a bounded exponential retry policy
/// 2. Open a spreadsheet and sheet by name
/// 3. Append rows, read the last row and update one of its cells
///
/// Run with:
/// ```bash
/// GOOGLE_ACCESS_TOKEN=ya29.a0Af... \
/// SPREADSHEET=Budget \
/// SHEET=Log \
/// cargo run --example append_rows
/// ```
use anyhow::{Context, Result};
use chrono::Utc;
use gapi_sheets::{AppendOutcome, GapiConfigBuilder, GoogleApi, RetryPolicy};
use serde_json::json;
use std::env;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    dotenvy::dotenv().ok();

    let token = env::var("GOOGLE_ACCESS_TOKEN")
        .context("GOOGLE_ACCESS_TOKEN environment variable not set")?;
    let spreadsheet_name = env::var("SPREADSHEET").unwrap_or_else(|_| "Budget".to_string());
    let sheet_name = env::var("SHEET").unwrap_or_else(|_| "Log".to_string());

    let config = GapiConfigBuilder::new()
        .retry_policy(RetryPolicy::exponential())
        .build();
    let api = GoogleApi::with_token(config, token)?;

    let spreadsheet = api
        .open_spreadsheet(&spreadsheet_name)
        .await
        .with_context(|| format!("Failed to open spreadsheet '{spreadsheet_name}'"))?;

    let sheet = if spreadsheet.sheet_titles().await?.contains(&sheet_name) {
        spreadsheet.sheet(&sheet_name).await?
    } else {
        info!(sheet = %sheet_name, "Sheet missing, creating it");
        spreadsheet
            .replace_sheet(&sheet_name, vec![vec![json!("timestamp"), json!("event"), json!("value")]])
            .await?
    };

    let now = Utc::now().to_rfc3339();
    let outcome = sheet
        .append_rows(
            "A1",
            vec![
                vec![json!(now), json!("start"), json!(1)],
                vec![json!(now), json!("stop"), json!(2)],
            ],
        )
        .await?;

    match &outcome {
        AppendOutcome::Range(range) => info!(range = %range, "Rows appended"),
        AppendOutcome::Raw(body) => warn!(body = %body, "Append response without updated range"),
    }

    // Grid metadata is cached; refresh so the new rows are counted
    spreadsheet.refresh_metadata().await?;
    let mut last = sheet.row(-1).await?;
    println!("\n=== Last row (index {}) ===", last.index());
    println!("{:?}", last.values());

    last.set(2, 3).await?;
    println!("After update: {:?}", last.values());

    Ok(())
}
