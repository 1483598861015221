//! Logging initialisation via tracing-subscriber.
//!
//! Logs always go to stderr so the stdio transport keeps stdout for
//! JSON-RPC traffic.

use tracing_subscriber::EnvFilter;

use crate::error::BridgeError;

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `level` is the fallback.
pub fn init(level: &str) -> Result<(), BridgeError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| BridgeError::Logger(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| BridgeError::Logger(format!("failed to set subscriber: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_info_succeeds_or_already_init() {
        match init("info") {
            Ok(()) => {}
            Err(BridgeError::Logger(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
