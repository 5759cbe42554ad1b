// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Map port trait defining the renderer contract.

use cartokit_ir::{FeatureCollection, LngLat, Projection};
use serde_json::Value;

use crate::{FeatureState, Interaction, LayerSpec, MapError};

/// Live map rendering surface.
///
/// Implementors wrap a concrete renderer (MapLibre, Mapbox GL, a test double).
/// The engine only calls these methods from reconcile, one diff at a time.
pub trait MapPort {
    /// Register a GeoJSON source.
    fn add_source(&mut self, id: &str, data: &FeatureCollection) -> Result<(), MapError>;

    /// Replace the data of an existing source.
    fn set_source_data(&mut self, id: &str, data: &FeatureCollection) -> Result<(), MapError>;

    /// Remove a source. Primitives drawing from it must already be removed.
    fn remove_source(&mut self, id: &str) -> Result<(), MapError>;

    /// Add a primitive, drawn below `before` when given, else on top.
    fn add_layer(&mut self, spec: LayerSpec, before: Option<&str>) -> Result<(), MapError>;

    /// Remove a primitive.
    fn remove_layer(&mut self, id: &str) -> Result<(), MapError>;

    /// Re-order a primitive below `before`, or to the top.
    fn move_layer(&mut self, id: &str, before: Option<&str>) -> Result<(), MapError>;

    /// Whether a primitive exists.
    fn has_layer(&self, id: &str) -> bool;

    /// Set one paint property on a primitive.
    fn set_paint_property(&mut self, layer: &str, name: &str, value: Value)
        -> Result<(), MapError>;

    /// Set one layout property on a primitive.
    fn set_layout_property(
        &mut self,
        layer: &str,
        name: &str,
        value: Value,
    ) -> Result<(), MapError>;

    /// Set feature state in a source. `None` addresses every feature.
    fn set_feature_state(
        &mut self,
        source: &str,
        feature: Option<u64>,
        state: FeatureState,
    ) -> Result<(), MapError>;

    /// Register an interaction handler on a primitive.
    fn on(&mut self, layer: &str, interaction: Interaction) -> Result<(), MapError>;

    /// Unregister an interaction handler.
    fn off(&mut self, layer: &str, interaction: Interaction) -> Result<(), MapError>;

    /// Move the camera center.
    fn set_center(&mut self, center: LngLat);

    /// Set the zoom level.
    fn set_zoom(&mut self, zoom: f64);

    /// Switch projection.
    fn set_projection(&mut self, projection: Projection);

    /// Load a basemap style. Drops every user source and primitive.
    fn set_style(&mut self, url: &str) -> Result<(), MapError>;
}
