//! Async account overview: balance, a price quote and the first page of proxies.
//!
//! ```bash
//! PROXY6_API_KEY=... cargo run --example account_overview
//! ```
//!
//! Env vars:
//! - `PROXY6_API_KEY`
//! - `PROXY6_BASE_URL` (optional)

use proxy6_sdk::{Client, ListProxies, ProxyState, ProxyVersion};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let key = env_opt("PROXY6_API_KEY").ok_or_else(|| anyhow::anyhow!("set PROXY6_API_KEY"))?;

    let mut builder = Client::builder(key)
        .no_system_proxy()
        .timeout(Duration::from_secs(30));
    if let Some(base) = env_opt("PROXY6_BASE_URL") {
        builder = builder.base_url(base);
    }
    let client = builder.build()?;

    let quote = client.catalog().price(10, 30, ProxyVersion::Ipv6).await?;
    println!(
        "10 x IPv6 for {} days: {} ({} each)",
        quote.period, quote.price, quote.price_single
    );

    if let (Some(balance), Some(currency)) = (client.balance(), client.currency()) {
        println!("balance: {balance} {currency}");
    }

    let list = client
        .proxies()
        .list(&ListProxies::new().state(ProxyState::Active).limit(20))
        .await?;
    println!("{} active proxies", list.count);
    for proxy in &list.proxies {
        println!(
            "  #{} {} {} expires {}",
            proxy.id,
            proxy.country,
            proxy.uri(),
            proxy.expires.local()
        );
    }
    Ok(())
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
