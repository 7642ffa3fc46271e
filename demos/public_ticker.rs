//! Example: Fetch a public ticker, optionally through a proxy.
//!
//! Run with: cargo run --example public_ticker -- [pair] [proxy_url]

use bitfinex_api_client::rest::PublicClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let pair = args.next().unwrap_or_else(|| "btcusd".to_string());

    let mut builder = PublicClient::builder();
    if let Some(proxy) = args.next() {
        builder = builder.proxy(proxy);
    }
    let client = builder.build()?;

    let ticker = client.get_ticker(&pair).await?;
    println!("{pair}:");
    println!("  bid        {}", ticker.bid);
    println!("  ask        {}", ticker.ask);
    println!("  mid        {}", ticker.mid);
    println!("  last price {}", ticker.last_price);
    println!("  24h range  {} - {}", ticker.low, ticker.high);
    println!("  24h volume {}", ticker.volume);
    println!("  as of      {}", ticker.timestamp);

    Ok(())
}
