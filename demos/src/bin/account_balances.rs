//! Demo 3: Account Balances
//!
//! Showcases: signed requests, typed private endpoints, API error codes
//!
//! Run: BITKUB_API_KEY=... BITKUB_API_SECRET=... cargo run --bin account_balances

use bitkub_rest::{BitkubRestClient, RestError};
use colored::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT BALANCES".cyan().bold());
    println!("{}", "  Bitkub SDK Demo - Signed Requests".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = BitkubRestClient::from_env()?;
    if !client.has_credentials() {
        println!(
            "  {} set BITKUB_API_KEY and BITKUB_API_SECRET to run this demo",
            "✗".red()
        );
        return Ok(());
    }

    let balances = match client.get_balances().await {
        Ok(balances) => balances,
        Err(e @ RestError::Api { .. }) if e.is_auth_error() => {
            println!("  {} credentials rejected: {}", "✗".red(), e);
            return Ok(());
        }
        Err(e) if e.is_timestamp_error() => {
            println!("  {} request timestamp rejected: {}", "✗".red(), e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut held: Vec<_> = balances
        .iter()
        .filter(|(_, b)| b.total() > Decimal::ZERO)
        .collect();
    held.sort_by(|a, b| a.0.cmp(b.0));

    println!(
        "  {:<8}  {:>20}  {:>20}",
        "ASSET".white().bold(),
        "AVAILABLE".white().bold(),
        "RESERVED".white().bold()
    );
    println!("  {}", "─".repeat(52));

    for (currency, balance) in &held {
        println!(
            "  {:<8}  {:>20}  {:>20}",
            currency.yellow(),
            balance.available,
            balance.reserved
        );
    }

    if held.is_empty() {
        println!("  {}", "(no funds)".dimmed());
    }

    println!();
    match client.account()?.get_trading_credits().await {
        Ok(credits) => println!("  {} {}", "Trading credits:".yellow(), credits),
        Err(e) => println!("  {} trading credits unavailable: {}", "✗".red(), e),
    }

    Ok(())
}
