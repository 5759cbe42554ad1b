// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rendering-surface port for CartoKit.
//!
//! This crate defines the contract between the document-change engine and a
//! live map renderer. It contains no document logic.
//!
//! # Design Principles
//!
//! - **The surface is dumb**: it receives sources, primitives and paint
//!   values. Choosing what to draw is the engine's job.
//! - **Sources are keyed by layer id**: each document layer owns exactly one
//!   source and one or more primitives drawn from it.

use thiserror::Error;

/// Error type for rendering-surface calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// No source with the given id exists.
    #[error("source not found: {0}")]
    SourceNotFound(String),
    /// A source with the given id already exists.
    #[error("source already exists: {0}")]
    DuplicateSource(String),
    /// No primitive with the given id exists.
    #[error("layer not found: {0}")]
    LayerNotFound(String),
    /// A primitive with the given id already exists.
    #[error("layer already exists: {0}")]
    DuplicateLayer(String),
    /// The renderer rejected the call.
    #[error("backend error: {0}")]
    Backend(String),
}

mod port;
mod types;

pub use port::MapPort;
pub use types::{FeatureState, Interaction, LayerSpec, PrimitiveKind};
