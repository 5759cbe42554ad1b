// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for CartoKit tools (config, logging).
//! Keeps editor hosts thin and framework-agnostic.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigService, ConfigStore, EDITOR_CONFIG_KEY};
pub use logging::{init_tracing, LoggingError, LOG_ENV};
