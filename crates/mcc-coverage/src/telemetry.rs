//! Log Subscriber Setup
//!
//! The library only emits `tracing` events; hosts that don't install their
//! own subscriber can call [`init_tracing`] once at startup.

use crate::config::{LogFormat, MccConfig};
use crate::result::{MccError, MccResult};
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` when set, else the configured directive
pub fn env_filter(config: &MccConfig) -> MccResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_filter)
        .map_err(|e| MccError::config(format!("invalid log filter {:?}: {e}", config.log_filter)))
}

/// Install a global fmt subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &MccConfig) -> MccResult<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match config.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| MccError::config(format!("failed to install log subscriber: {e}")))
}
