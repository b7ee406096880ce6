use std::error::Error;

use ai_llm_service::telemetry::{self, TARGET_PREFIX};
use tracing_subscriber::{
    EnvFilter, Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine: production sets variables directly.
    let dotenv = dotenvy::dotenv();

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_filter(filter::filter_fn(|meta| {
                    !meta.target().starts_with(TARGET_PREFIX)
                })),
        )
        .with(telemetry::layer())
        .try_init()?;

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to read .env");
        }
    }

    api::start().await?;

    Ok(())
}
