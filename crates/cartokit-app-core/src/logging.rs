// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tracing subscriber setup for CartoKit hosts.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "CARTOKIT_LOG";

const FALLBACK_DIRECTIVE: &str = "info";

/// Failure installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive did not parse.
    #[error("invalid log filter {directive:?}: {reason}")]
    Filter {
        /// Offending directive.
        directive: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber was already set.
    #[error("tracing subscriber already installed: {0}")]
    Install(String),
}

/// Pick the filter directive: `CARTOKIT_LOG`, then `RUST_LOG`, then `info`.
/// Blank values are skipped.
pub fn directive(cartokit_log: Option<String>, rust_log: Option<String>) -> String {
    [cartokit_log, rust_log]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_DIRECTIVE.to_owned())
}

/// Install a fmt subscriber filtered by the environment.
pub fn init_tracing() -> Result<(), LoggingError> {
    let chosen = directive(std::env::var(LOG_ENV).ok(), std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&chosen).map_err(|e| LoggingError::Filter {
        directive: chosen.clone(),
        reason: e.to_string(),
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cartokit_log_wins() {
        assert_eq!(
            directive(Some("cartokit_core=debug".into()), Some("warn".into())),
            "cartokit_core=debug"
        );
    }

    #[test]
    fn rust_log_then_info() {
        assert_eq!(directive(None, Some("warn".into())), "warn");
        assert_eq!(directive(Some("  ".into()), None), "info");
    }

    #[test]
    fn second_install_is_refused() {
        let first = init_tracing();
        assert!(!matches!(first, Err(LoggingError::Install(_))));
        assert!(init_tracing().is_err());
    }
}
