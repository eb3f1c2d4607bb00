//! Demo 1: Server Clock Check
//!
//! Showcases: public envelope handling, server time used for signing
//!
//! Run: cargo run --bin server_time

use bitkub_rest::BitkubRestClient;
use chrono::{TimeZone, Utc};
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  SERVER CLOCK CHECK".cyan().bold());
    println!("{}", "  Bitkub SDK Demo - Timestamp Skew".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = BitkubRestClient::from_env()?;

    for (i, status) in client.market().get_status().await?.iter().enumerate() {
        let marker = if status.is_ok() { "✓".green() } else { "✗".red() };
        println!("  {} [{}] {} ({})", marker, i + 1, status.name, status.status);
    }
    println!();

    let local_before = Utc::now().timestamp_millis();
    let server_ms = client.get_server_time().await?;
    let local_after = Utc::now().timestamp_millis();

    let local_mid = (local_before + local_after) / 2;
    let skew = server_ms - local_mid;

    let server_time = Utc
        .timestamp_millis_opt(server_ms)
        .single()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| server_ms.to_string());

    println!("  {} {}", "Server time:".yellow(), server_time);
    println!("  {} {} ms", "Round trip: ".yellow(), local_after - local_before);

    let skew_text = format!("{:+} ms", skew);
    let skew_text = if skew.abs() > 5_000 { skew_text.red() } else { skew_text.green() };
    println!("  {} {}", "Local skew: ".yellow(), skew_text);

    Ok(())
}
