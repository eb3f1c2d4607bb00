//! Demo 2: Market Snapshot
//!
//! Showcases: typed public endpoints (ticker, depth), symbol validation
//!
//! Run: cargo run --bin market_snapshot -- [SYMBOL]

use bitkub_rest::BitkubRestClient;
use bitkub_types::Symbol;
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let symbol: Symbol = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Symbol::BTC_THB.to_string())
        .parse()?;

    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  MARKET SNAPSHOT: {}", symbol).cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = BitkubRestClient::from_env()?;

    match client.get_ticker(Some(symbol.as_str())).await?.first() {
        Some(ticker) => {
            println!("  {} {}", "Last:     ".yellow(), ticker.last);
            println!("  {} {}", "Best bid: ".yellow(), ticker.highest_bid);
            println!("  {} {}", "Best ask: ".yellow(), ticker.lowest_ask);
            println!("  {} {}", "Mid:      ".yellow(), ticker.mid_price());
            if let Some(bps) = ticker.spread_bps() {
                println!("  {} {:.2} bps", "Spread:   ".yellow(), bps);
            }
            let change = format!("{}%", ticker.percent_change);
            let change = if ticker.percent_change.is_sign_negative() {
                change.red()
            } else {
                change.green()
            };
            println!("  {} {}", "24h:      ".yellow(), change);
        }
        None => println!("  {} no ticker for {}", "✗".red(), symbol),
    }
    println!();

    let depth = client.market().get_depth(symbol.as_str(), Some(5)).await?;

    println!(
        "  {:>18}  {:>14}  │  {:>18}  {:>14}",
        "BID".white().bold(),
        "AMOUNT".white().bold(),
        "ASK".white().bold(),
        "AMOUNT".white().bold()
    );
    println!("  {}", "─".repeat(72));

    let rows = depth.bids.len().max(depth.asks.len());
    for i in 0..rows {
        let (bid, bid_amt) = depth
            .bids
            .get(i)
            .map(|l| (l[0].to_string(), l[1].to_string()))
            .unwrap_or_default();
        let (ask, ask_amt) = depth
            .asks
            .get(i)
            .map(|l| (l[0].to_string(), l[1].to_string()))
            .unwrap_or_default();
        println!(
            "  {:>18}  {:>14}  │  {:>18}  {:>14}",
            bid.green(),
            bid_amt,
            ask.red(),
            ask_amt
        );
    }

    if let Some(spread) = depth.spread() {
        println!();
        println!("  {} {}", "Book spread:".yellow(), spread);
    }

    Ok(())
}
