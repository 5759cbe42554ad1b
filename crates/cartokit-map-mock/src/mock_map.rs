// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mock map for headless testing of reconcile logic.
//!
//! MockMap keeps the surface in ordinary collections without drawing
//! anything. Use it to verify which primitives exist after a diff and which
//! port calls produced them.

use std::collections::{BTreeSet, HashMap};

use cartokit_ir::{FeatureCollection, LngLat, Projection};
use cartokit_map_port::{FeatureState, Interaction, LayerSpec, MapError, MapPort};
use serde_json::Value;

/// One recorded port call.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    /// `add_source(id, ..)`.
    AddSource(String),
    /// `set_source_data(id, ..)`.
    SetSourceData(String),
    /// `remove_source(id)`.
    RemoveSource(String),
    /// `add_layer(spec, ..)` with the spec's id.
    AddLayer(String),
    /// `remove_layer(id)`.
    RemoveLayer(String),
    /// `move_layer(id, ..)`.
    MoveLayer(String),
    /// `set_paint_property(layer, name, ..)`.
    SetPaint(String, String),
    /// `set_layout_property(layer, name, ..)`.
    SetLayout(String, String),
    /// `set_feature_state(source, ..)`.
    SetFeatureState(String),
    /// `on(layer, interaction)`.
    On(String, Interaction),
    /// `off(layer, interaction)`.
    Off(String, Interaction),
    /// `set_center(..)`.
    SetCenter,
    /// `set_zoom(..)`.
    SetZoom,
    /// `set_projection(..)`.
    SetProjection,
    /// `set_style(url)`.
    SetStyle(String),
}

impl MapCall {
    /// Whether the call adds or removes a primitive or source.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::AddSource(_) | Self::RemoveSource(_) | Self::AddLayer(_) | Self::RemoveLayer(_)
        )
    }
}

/// Mock map surface.
#[derive(Debug, Default)]
pub struct MockMap {
    /// Sources by id.
    pub sources: HashMap<String, FeatureCollection>,
    /// Primitives bottom to top, with paint/layout updated in place.
    pub layers: Vec<LayerSpec>,
    /// Registered `(layer, interaction)` handlers.
    pub handlers: BTreeSet<(String, Interaction)>,
    /// Feature state by `(source, feature)`.
    pub feature_state: HashMap<(String, u64), FeatureState>,
    /// Camera center.
    pub center: LngLat,
    /// Zoom level.
    pub zoom: f64,
    /// Projection.
    pub projection: Projection,
    /// Last loaded style URL.
    pub style: Option<String>,
    /// Every call in order.
    pub calls: Vec<MapCall>,
}

impl MockMap {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Primitive ids bottom to top.
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    /// Primitive by id.
    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Current paint value.
    pub fn paint(&self, layer: &str, name: &str) -> Option<&Value> {
        self.layer(layer).and_then(|l| l.paint.get(name))
    }

    /// Current layout value.
    pub fn layout(&self, layer: &str, name: &str) -> Option<&Value> {
        self.layer(layer).and_then(|l| l.layout.get(name))
    }

    /// Source data by id.
    pub fn source(&self, id: &str) -> Option<&FeatureCollection> {
        self.sources.get(id)
    }

    /// Handlers registered on a primitive.
    pub fn handlers_on(&self, layer: &str) -> Vec<Interaction> {
        self.handlers
            .iter()
            .filter(|(l, _)| l == layer)
            .map(|(_, i)| *i)
            .collect()
    }

    /// Handlers whose primitive no longer exists.
    pub fn orphaned_handlers(&self) -> Vec<&(String, Interaction)> {
        self.handlers
            .iter()
            .filter(|(l, _)| self.layer(l).is_none())
            .collect()
    }

    /// Number of recorded structural calls.
    pub fn structural_call_count(&self) -> usize {
        self.calls.iter().filter(|c| c.is_structural()).count()
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<MapCall> {
        std::mem::take(&mut self.calls)
    }

    fn position(&self, id: &str) -> Result<usize, MapError> {
        self.layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| MapError::LayerNotFound(id.to_owned()))
    }

    fn insert_at(&self, before: Option<&str>) -> Result<usize, MapError> {
        match before {
            Some(id) => self.position(id),
            None => Ok(self.layers.len()),
        }
    }

    fn layer_mut(&mut self, id: &str) -> Result<&mut LayerSpec, MapError> {
        self.layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| MapError::LayerNotFound(id.to_owned()))
    }
}

impl MapPort for MockMap {
    fn add_source(&mut self, id: &str, data: &FeatureCollection) -> Result<(), MapError> {
        self.calls.push(MapCall::AddSource(id.to_owned()));
        if self.sources.contains_key(id) {
            return Err(MapError::DuplicateSource(id.to_owned()));
        }
        self.sources.insert(id.to_owned(), data.clone());
        Ok(())
    }

    fn set_source_data(&mut self, id: &str, data: &FeatureCollection) -> Result<(), MapError> {
        self.calls.push(MapCall::SetSourceData(id.to_owned()));
        let source = self
            .sources
            .get_mut(id)
            .ok_or_else(|| MapError::SourceNotFound(id.to_owned()))?;
        *source = data.clone();
        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> Result<(), MapError> {
        self.calls.push(MapCall::RemoveSource(id.to_owned()));
        if self.layers.iter().any(|l| l.source == id) {
            return Err(MapError::Backend(format!("source {id} is still in use")));
        }
        self.sources
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| MapError::SourceNotFound(id.to_owned()))
    }

    fn add_layer(&mut self, spec: LayerSpec, before: Option<&str>) -> Result<(), MapError> {
        self.calls.push(MapCall::AddLayer(spec.id.clone()));
        if self.layer(&spec.id).is_some() {
            return Err(MapError::DuplicateLayer(spec.id));
        }
        if !self.sources.contains_key(&spec.source) {
            return Err(MapError::SourceNotFound(spec.source));
        }
        let at = self.insert_at(before)?;
        self.layers.insert(at, spec);
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> Result<(), MapError> {
        self.calls.push(MapCall::RemoveLayer(id.to_owned()));
        let at = self.position(id)?;
        self.layers.remove(at);
        Ok(())
    }

    fn move_layer(&mut self, id: &str, before: Option<&str>) -> Result<(), MapError> {
        self.calls.push(MapCall::MoveLayer(id.to_owned()));
        let from = self.position(id)?;
        let spec = self.layers.remove(from);
        let at = match self.insert_at(before) {
            Ok(at) => at,
            Err(err) => {
                self.layers.insert(from, spec);
                return Err(err);
            }
        };
        self.layers.insert(at, spec);
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layer(id).is_some()
    }

    fn set_paint_property(
        &mut self,
        layer: &str,
        name: &str,
        value: Value,
    ) -> Result<(), MapError> {
        self.calls
            .push(MapCall::SetPaint(layer.to_owned(), name.to_owned()));
        self.layer_mut(layer)?.paint.insert(name.to_owned(), value);
        Ok(())
    }

    fn set_layout_property(
        &mut self,
        layer: &str,
        name: &str,
        value: Value,
    ) -> Result<(), MapError> {
        self.calls
            .push(MapCall::SetLayout(layer.to_owned(), name.to_owned()));
        self.layer_mut(layer)?.layout.insert(name.to_owned(), value);
        Ok(())
    }

    fn set_feature_state(
        &mut self,
        source: &str,
        feature: Option<u64>,
        state: FeatureState,
    ) -> Result<(), MapError> {
        self.calls.push(MapCall::SetFeatureState(source.to_owned()));
        let count = self
            .sources
            .get(source)
            .ok_or_else(|| MapError::SourceNotFound(source.to_owned()))?
            .len() as u64;
        let ids: Vec<u64> = match feature {
            Some(id) => vec![id],
            None => (0..count).collect(),
        };
        for id in ids {
            if state == FeatureState::default() {
                self.feature_state.remove(&(source.to_owned(), id));
            } else {
                self.feature_state.insert((source.to_owned(), id), state);
            }
        }
        Ok(())
    }

    fn on(&mut self, layer: &str, interaction: Interaction) -> Result<(), MapError> {
        self.calls.push(MapCall::On(layer.to_owned(), interaction));
        if self.layer(layer).is_none() {
            return Err(MapError::LayerNotFound(layer.to_owned()));
        }
        self.handlers.insert((layer.to_owned(), interaction));
        Ok(())
    }

    fn off(&mut self, layer: &str, interaction: Interaction) -> Result<(), MapError> {
        self.calls.push(MapCall::Off(layer.to_owned(), interaction));
        self.handlers.remove(&(layer.to_owned(), interaction));
        Ok(())
    }

    fn set_center(&mut self, center: LngLat) {
        self.calls.push(MapCall::SetCenter);
        self.center = center;
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.calls.push(MapCall::SetZoom);
        self.zoom = zoom;
    }

    fn set_projection(&mut self, projection: Projection) {
        self.calls.push(MapCall::SetProjection);
        self.projection = projection;
    }

    fn set_style(&mut self, url: &str) -> Result<(), MapError> {
        self.calls.push(MapCall::SetStyle(url.to_owned()));
        self.style = Some(url.to_owned());
        self.layers.clear();
        self.sources.clear();
        self.handlers.clear();
        self.feature_state.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartokit_map_port::PrimitiveKind;
    use serde_json::json;

    fn with_source() -> MockMap {
        let mut map = MockMap::new();
        map.add_source("a", &FeatureCollection::default()).unwrap();
        map
    }

    #[test]
    fn add_layer_requires_source() {
        let mut map = MockMap::new();
        let err = map
            .add_layer(LayerSpec::new("a", "a", PrimitiveKind::Fill), None)
            .unwrap_err();
        assert_eq!(err, MapError::SourceNotFound("a".into()));
    }

    #[test]
    fn add_layer_before_inserts_below() {
        let mut map = with_source();
        map.add_layer(LayerSpec::new("top", "a", PrimitiveKind::Fill), None)
            .unwrap();
        map.add_layer(LayerSpec::new("low", "a", PrimitiveKind::Line), Some("top"))
            .unwrap();
        assert_eq!(map.layer_ids(), ["low", "top"]);
        map.move_layer("low", None).unwrap();
        assert_eq!(map.layer_ids(), ["top", "low"]);
    }

    #[test]
    fn remove_source_in_use_is_rejected() {
        let mut map = with_source();
        map.add_layer(LayerSpec::new("l", "a", PrimitiveKind::Circle), None)
            .unwrap();
        assert!(map.remove_source("a").is_err());
        map.remove_layer("l").unwrap();
        map.remove_source("a").unwrap();
        assert!(map.sources.is_empty());
    }

    #[test]
    fn paint_updates_in_place() {
        let mut map = with_source();
        map.add_layer(
            LayerSpec::new("l", "a", PrimitiveKind::Circle).paint("circle-radius", json!(3)),
            None,
        )
        .unwrap();
        map.take_calls();
        map.set_paint_property("l", "circle-radius", json!(5))
            .unwrap();
        assert_eq!(map.paint("l", "circle-radius"), Some(&json!(5)));
        assert_eq!(map.structural_call_count(), 0);
    }

    #[test]
    fn set_style_drops_user_layers() {
        let mut map = with_source();
        map.add_layer(LayerSpec::new("l", "a", PrimitiveKind::Circle), None)
            .unwrap();
        map.on("l", Interaction::Hover).unwrap();
        map.set_style("mapbox://styles/mapbox/dark-v11").unwrap();
        assert!(map.layers.is_empty());
        assert!(map.handlers.is_empty());
        assert!(map.orphaned_handlers().is_empty());
    }
}
