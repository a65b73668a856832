//! Tracing setup for the binary
//!
//! Library code only emits `tracing` events; installing a subscriber is
//! left to the binary. Events go to stderr so that stdout stays clean for
//! tables and exports.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Default filter directive, overridden by `RUST_LOG`
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "bizledger=debug"
    } else {
        "bizledger=warn"
    }
}

/// Install the global fmt subscriber. Calls after the first are no-ops.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "bizledger=warn");
        assert_eq!(default_directive(true), "bizledger=debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(false);
        init_tracing(true);
        tracing::debug!("still fine");
    }
}
