pub mod api;
pub mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use ts_core::infra::generator::{GeminiGenerator, NoopGenerator, TextGenerator};
use ts_core::usecase::rewrite_service::RewriteService;

use crate::config::{AppConfig, GeneratorChoice};

/// 生成器を構築する（起動時に一度だけ。以後は共有して読み取り専用で使う）
pub fn create_generator(config: &AppConfig) -> Result<Arc<dyn TextGenerator>> {
    match config.generator.provider {
        GeneratorChoice::Gemini => {
            let generator = GeminiGenerator::new(config.gemini.clone())
                .context("Failed to initialise Gemini generator")?;
            if !generator.has_api_key() {
                warn!("Gemini API key is not set; every rewrite will fail until it is configured");
            }
            info!("Gemini generator selected (model={})", config.gemini.model);
            Ok(Arc::new(generator))
        }
        GeneratorChoice::Noop => {
            warn!("Using noop generator: rewrites echo the input message");
            Ok(Arc::new(NoopGenerator))
        }
    }
}

pub fn create_service(config: &AppConfig) -> Result<Arc<RewriteService>> {
    let generator = create_generator(config)?;
    Ok(Arc::new(RewriteService::new(generator, config.rewrite.clone())))
}

/// HTTP サーバーを起動し、Ctrl+C で停止する
pub async fn serve(config: AppConfig) -> Result<()> {
    let service = create_service(&config)?;
    let app = api::router(service);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("ToneShift shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
