//! AWS Lambda entry point for the community digest.
//!
//! Deploy with `cargo lambda build --release --features lambda`.
//!
//! ## Environment Variables
//!
//! - `DIGEST_CONFIG`: Path to a TOML config file (default: `config.toml`)
//! - `PORTAL_BASE_URL`: Finance portal origin
//! - `PORTAL_TIMEOUT_SECS`: HTTP request timeout
//! - `REQUEST_DELAY_MS`: Delay between page requests
//! - `CACHE_TTL_SECS`: Digest cache lifetime
//! - `RUST_LOG`: Log level (e.g., `info`, `debug`)

use std::sync::Arc;

use community_digest::{
    lambda::{CommunityRequest, handler},
    models::Config,
    pipeline::DigestPipeline,
};
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config_path = std::env::var("DIGEST_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let mut config = Config::load_or_default(&config_path);
    config.apply_env_overrides();
    config.validate()?;

    // Built once so warm invocations share the digest cache.
    let pipeline = Arc::new(DigestPipeline::from_config(&config)?);

    info!("Community digest Lambda starting...");
    lambda_runtime::run(service_fn(move |event: LambdaEvent<CommunityRequest>| {
        let pipeline = Arc::clone(&pipeline);
        async move { handler(&pipeline, event).await }
    }))
    .await
}
