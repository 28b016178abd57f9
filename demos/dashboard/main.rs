//! Payments Dashboard Example
//!
//! Serves the seeded payment store over HTTP, simulating a slow backend that
//! occasionally fails to create payments.
//!
//! ```text
//! cargo run --example dashboard -- config/dashboard.yaml
//! ```

use anyhow::Result;
use paydesk::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("paydesk=info,tower_http=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::from_yaml_file(&path)?,
        None => DashboardConfig::default(),
    };
    let bind = config.server.bind.clone();

    let store = InMemoryPaymentStore::from_config(&config.simulation);
    let stats = store.get_stats().await;

    println!("🚀 Starting paydesk v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "📦 {} payments, balance {}",
        stats.payment_count,
        format_currency(stats.balance, "COP")
    );
    println!("\n🌐 Server running on http://{}", bind);
    println!("\n📚 Routes:");
    println!("    GET    /payments?q=&sort=&order=&from=&to=&page=");
    println!("    POST   /payments");
    println!("    GET    /payments/search?q=");
    println!("    GET    /payments/stats");
    println!("    GET    /payments/{{id}}");
    println!("    GET    /payments/{{id}}/invoice");
    println!("    GET    /health");

    ServerBuilder::new()
        .with_config(config)
        .with_repository(store)
        .serve(&bind)
        .await
}
