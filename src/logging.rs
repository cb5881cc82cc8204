use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins over `default_level`.
pub fn init(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid log filter {:?}: {}", default_level, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {}", e))
}
