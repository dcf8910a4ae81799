//! Blocking variant: countries on sale and stock per country.
//!
//! ```bash
//! PROXY6_API_KEY=... cargo run --example blocking_overview --no-default-features --features blocking,rustls
//! ```

use proxy6_sdk::{BlockingClient, ProxyVersion};

fn main() -> anyhow::Result<()> {
    let key = std::env::var("PROXY6_API_KEY")?;
    let client = BlockingClient::builder(key).no_system_proxy().build()?;

    let catalog = client.catalog();
    for country in catalog.countries(ProxyVersion::Ipv4)? {
        let stock = catalog.count(country, ProxyVersion::Ipv4)?;
        println!("{country}: {stock}");
    }

    if let Some(balance) = client.balance() {
        println!("balance: {balance}");
    }
    Ok(())
}
