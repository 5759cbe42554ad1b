// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Value types passed across the map port.

use std::collections::BTreeMap;

use serde_json::Value;

/// Renderer primitive class.
///
/// Changing a layer between classes always requires a structural redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Filled polygons.
    Fill,
    /// Stroked lines and outlines.
    Line,
    /// Circles at points.
    Circle,
    /// Kernel density surface.
    Heatmap,
}

impl PrimitiveKind {
    /// Renderer type string (`"fill"`, `"line"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Heatmap => "heatmap",
        }
    }
}

/// Description of one primitive to add.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpec {
    /// Primitive id.
    pub id: String,
    /// Source the primitive draws from.
    pub source: String,
    /// Primitive class.
    pub kind: PrimitiveKind,
    /// Paint properties by name.
    pub paint: BTreeMap<String, Value>,
    /// Layout properties by name.
    pub layout: BTreeMap<String, Value>,
    /// Optional feature filter expression.
    pub filter: Option<Value>,
}

impl LayerSpec {
    /// A primitive with no properties set.
    pub fn new(id: impl Into<String>, source: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            kind,
            paint: BTreeMap::new(),
            layout: BTreeMap::new(),
            filter: None,
        }
    }

    /// Builder-style paint property.
    pub fn paint(mut self, name: &str, value: Value) -> Self {
        self.paint.insert(name.to_owned(), value);
        self
    }

    /// Builder-style layout property.
    pub fn layout(mut self, name: &str, value: Value) -> Self {
        self.layout.insert(name.to_owned(), value);
        self
    }

    /// Builder-style filter.
    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Interaction handlers the engine instruments primitives with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interaction {
    /// Pointer hover highlighting.
    Hover,
    /// Click selection.
    Select,
    /// Property tooltip on hover.
    Tooltip,
}

/// Per-feature interaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FeatureState {
    /// Pointer is over the feature.
    pub hover: bool,
    /// Feature is selected.
    pub selected: bool,
}
