//! cardgate HTTP gate entry point.

use anyhow::Context;
use cardgate_api::{
    config::ApiConfig,
    router::{build_router, AppState},
};
use cardgate_crypto::config::TrustConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = ApiConfig::from_env()?;
    let trust = TrustConfig::load(&config.trust_policy_file).with_context(|| {
        format!("loading trust policy {}", config.trust_policy_file.display())
    })?;
    let validator = trust
        .build_validator()
        .context("building the card validator")?;
    let state = AppState::new(
        validator,
        config.access_token.as_deref(),
        config.validation_timeout,
    );
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
