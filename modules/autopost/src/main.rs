use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use autopost::{Pipeline, RunOutcome};
use autopost_common::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("autopost=info".parse()?)
                .add_directive("ai_client=info".parse()?)
                .add_directive("facebook_client=info".parse()?),
        )
        .init();

    info!("Autopost run starting...");

    let config = Config::from_env();
    config.log_keys();

    let mut pipeline = Pipeline::from_config(&config);

    // Stage failures are logged by the pipeline; exit status stays 0.
    match pipeline.run().await {
        RunOutcome::Published { receipt, .. } => {
            info!(post_id = %receipt.post_id, "Autopost run finished: published");
        }
        RunOutcome::Halted { stage, .. } => {
            info!(%stage, "Autopost run finished: stopped early");
        }
    }

    Ok(())
}
