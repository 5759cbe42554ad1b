// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for the change pipeline.

use cartokit_ir::{GeometryClass, LayerType};
use cartokit_map_port::MapError;
use thiserror::Error;

/// Failure while executing a transformation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// An argument was missing or had the wrong JSON type.
    #[error("transformation {name}: bad argument {index}")]
    BadArgument {
        /// Transformation name.
        name: String,
        /// Zero-based argument position.
        index: usize,
    },
    /// Dot value must be positive.
    #[error("dot value must be positive, got {0}")]
    NonPositiveDotValue(f64),
    /// The dot value would place more dots than a layer may hold.
    #[error("dot value asks for {requested} dots; at most {limit} allowed")]
    TooManyDots {
        /// Dots the value would produce.
        requested: f64,
        /// Cap that was exceeded.
        limit: usize,
    },
}

/// Failure computing an invert or a patched IR.
///
/// Any of these aborts the whole diff application; nothing is committed and
/// reconcile never runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatchError {
    /// The diff names a layer the IR does not contain.
    #[error("layer not found: {0}")]
    LayerNotFound(String),
    /// `add-layer` names an id already in use.
    #[error("layer already exists: {0}")]
    DuplicateLayer(String),
    /// The layer's geometry cannot be drawn as the target type.
    #[error("cannot convert {from} layer to {to}: unsupported geometry {geometry:?}")]
    IllegalTransition {
        /// Current layer type.
        from: LayerType,
        /// Requested layer type.
        to: LayerType,
        /// Class of the layer's source geometry, if any.
        geometry: Option<GeometryClass>,
    },
    /// The target representation needs an attribute the data lacks.
    #[error("layer {layer_id} has no {kind} attribute for {to}")]
    NoAttribute {
        /// Layer being converted or restyled.
        layer_id: String,
        /// Target layer type.
        to: LayerType,
        /// `"quantitative"` or `"categorical"`.
        kind: &'static str,
    },
    /// The diff targets a style shape the layer does not currently have.
    #[error("{diff} does not apply to {layer_type} layer {layer_id}")]
    StyleMismatch {
        /// Wire tag of the diff.
        diff: &'static str,
        /// Layer id.
        layer_id: String,
        /// Current layer type.
        layer_type: LayerType,
    },
    /// `remove-transformation` names a transformation the layer lacks.
    #[error("transformation {name} not found on layer {layer_id}")]
    TransformationNotFound {
        /// Layer id.
        layer_id: String,
        /// Requested name.
        name: String,
    },
    /// `add-transformation` names a transformation the layer already has.
    #[error("transformation {name} already exists on layer {layer_id}")]
    DuplicateTransformation {
        /// Layer id.
        layer_id: String,
        /// Conflicting name.
        name: String,
    },
    /// A payload value is out of range.
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        /// Payload field name.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },
    /// A transformation failed while re-deriving layer data.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Failure while updating the rendering surface.
///
/// These indicate the surface and the IR have diverged; callers should
/// treat them as bugs rather than user errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconcileError {
    /// The map port rejected a call.
    #[error("map port: {0}")]
    Map(#[from] MapError),
    /// The target IR lacks a layer the diff refers to.
    #[error("layer {0} missing from target document")]
    MissingLayer(String),
}

/// Failure applying a diff through the editor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// Invert or patch failed; nothing changed.
    #[error(transparent)]
    Patch(#[from] PatchError),
    /// The surface could not be updated; the document was not committed.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}
