use std::sync::Arc;

use anyhow::Context;

use artisanhome_api::{
    app::{AppServices, build_app},
    config::AppConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    artisanhome_observability::init(config.log.format);

    if config.auth.uses_dev_secret() {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
    }

    let services = Arc::new(AppServices::bootstrap(&config)?);
    let app = build_app(services);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
