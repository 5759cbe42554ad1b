// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless test harness for cartokit-map-port.
//!
//! [`MockMap`] tracks sources, primitives, handlers and camera state in
//! plain collections and records every port call, so tests can assert both
//! the resulting surface and how cheaply it was reached.

mod mock_map;

pub use mock_map::*;
