// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Root document: map view settings plus the keyed layer collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::layer::{CartoKitLayer, LayerId};

/// A `[longitude, latitude]` map center.
pub type LngLat = [f64; 2];

/// Map projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Web Mercator.
    #[default]
    Mercator,
    /// 3D globe.
    Globe,
}

/// Tile provider serving a basemap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasemapProvider {
    /// Mapbox styles.
    Mapbox,
    /// MapTiler styles.
    Maptiler,
    /// Stadia Maps styles.
    Stadia,
    /// A user-supplied style URL.
    Custom,
}

/// Basemap selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basemap {
    /// Style URL.
    pub url: String,
    /// Who serves `url`.
    pub provider: BasemapProvider,
}

impl Default for Basemap {
    fn default() -> Self {
        Self {
            url: "mapbox://styles/mapbox/light-v11".into(),
            provider: BasemapProvider::Mapbox,
        }
    }
}

/// The whole map document.
///
/// `layers` is keyed by id; its ordering carries no meaning, draw order is
/// each layer's `layout.z`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartoKitIR {
    /// Map center.
    pub center: LngLat,
    /// Zoom level.
    pub zoom: f64,
    /// Projection.
    pub projection: Projection,
    /// Basemap style.
    pub basemap: Basemap,
    /// Layers by id.
    pub layers: BTreeMap<LayerId, CartoKitLayer>,
}

impl CartoKitIR {
    /// Look up a layer.
    pub fn layer(&self, id: &str) -> Option<&CartoKitLayer> {
        self.layers.get(id)
    }

    /// Mutable lookup.
    pub fn layer_mut(&mut self, id: &str) -> Option<&mut CartoKitLayer> {
        self.layers.get_mut(id)
    }

    /// Layers sorted by ascending `layout.z`, ties broken by id.
    pub fn layers_by_z(&self) -> Vec<&CartoKitLayer> {
        let mut layers: Vec<_> = self.layers.values().collect();
        layers.sort_by(|a, b| {
            a.layout()
                .z
                .cmp(&b.layout().z)
                .then_with(|| a.id().cmp(b.id()))
        });
        layers
    }
}
