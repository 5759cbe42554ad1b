// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CartoKit document-change engine.
//!
//! Every edit to a map document is a [`Diff`]. The [`Editor`] runs each one
//! through four steps:
//!
//! 1. [`invert`] computes the diff that undoes it, against the current IR.
//! 2. [`patch`] produces the next IR, copy-on-write.
//! 3. [`reconcile`] brings the rendering surface in line with the next IR.
//! 4. The next IR is committed and `(diff, inverse)` goes on the undo stack.
//!
//! Failures in steps 1-3 leave the document untouched.
#![forbid(unsafe_code)]

pub mod attribute;
pub mod classify;
pub mod color;
pub mod config;
pub mod diff;
pub mod dots;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod invert;
pub mod patch;
pub mod reconcile;
pub mod transform;

pub use config::{EditorConfig, HistoryConfig, StyleDefaults};
pub use diff::{payload, Diff, DiffFamily, LayerDiff, MapDiff};
pub use editor::Editor;
pub use error::{EditorError, PatchError, ReconcileError, TransformError};
pub use history::{History, HistoryEntry};
pub use invert::invert;
pub use patch::layer_type::{derivation, transition, Derivation};
pub use patch::{patch, patch_with};
pub use reconcile::{reconcile, render, render_document};
