//! Tracing subscriber setup

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

/// `explicit` wins over RUST_LOG, which wins over [`DEFAULT_FILTER`].
pub fn build_filter(explicit: Option<&str>) -> Result<EnvFilter> {
    match explicit {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| anyhow!("Invalid log filter {:?}: {}", directives, e)),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

pub fn init(explicit: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(explicit)?)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filter_is_used() {
        let filter = build_filter(Some("fontview_core=debug")).unwrap();
        assert_eq!(filter.to_string(), "fontview_core=debug");
    }

    #[test]
    fn test_bad_filter_is_rejected() {
        assert!(build_filter(Some("fontview=loud")).is_err());
    }
}
