//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Returns false if a
/// global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        init_tracing("warpd=debug");
        assert!(!init_tracing("warpd=debug"));
    }
}
