//! ToneShift - tone-adjusted message rewriting over HTTP

#![forbid(unsafe_code)]

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // log クレート経由のコアのログもここに流れる
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toneshift=info,ts_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ToneShift v{}", env!("CARGO_PKG_VERSION"));

    let config = toneshift::config::load_config()?;
    toneshift::serve(config).await
}
