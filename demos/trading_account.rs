//! Example: Authenticated account queries.
//!
//! Run with: cargo run --example trading_account
//!
//! Requires BITFINEX_API_KEY and BITFINEX_API_SECRET (a `.env` file works too).

use std::sync::Arc;

use bitfinex_api_client::BitfinexError;
use bitfinex_api_client::auth::EnvCredentials;
use bitfinex_api_client::rest::TradingClient;
use bitfinex_api_client::rest::private::UserTransactionsRequest;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(credentials) = EnvCredentials::try_from_env() else {
        println!("Set BITFINEX_API_KEY and BITFINEX_API_SECRET to run this example.");
        return Ok(());
    };
    let client = TradingClient::new(Arc::new(credentials));

    for info in client.get_account_infos().await? {
        for tier in &info.fees {
            println!(
                "{}: maker {}% taker {}%",
                tier.pairs, tier.maker_fees, tier.taker_fees
            );
        }
    }

    let request = UserTransactionsRequest::new(0, 10, true);
    match client.get_user_transactions(&request).await {
        Ok(transactions) => {
            for tx in transactions {
                println!("#{} {} type {} fee {}", tx.id, tx.datetime, tx.kind, tx.fee);
            }
        }
        Err(BitfinexError::Api(err)) if err.is_invalid_nonce() => {
            println!("Nonce rejected; another client is using this key: {err}");
        }
        Err(err) => return Err(err.into()),
    }

    let orders = client.get_open_orders().await?;
    println!("{} open orders", orders.len());

    Ok(())
}
