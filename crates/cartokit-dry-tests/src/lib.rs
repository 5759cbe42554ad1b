// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for CartoKit crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`geojson`] - Feature and collection builders plus canned datasets
//! - [`layers`] - Layer builders and [`IrBuilder`]

pub mod config;
pub mod geojson;
pub mod layers;

pub use config::InMemoryConfigStore;
pub use geojson::{counties, props, rivers, square, stations};
pub use layers::{line_layer, point_layer, polygon_layer, sample_ir, IrBuilder};
