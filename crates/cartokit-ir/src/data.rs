// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Layer data: source GeoJSON, derived GeoJSON and the pipeline between them.

use serde::{Deserialize, Serialize};

use crate::geojson::FeatureCollection;
use crate::transformation::Transformations;

/// Data backing one layer.
///
/// Invariant: `geojson` equals `transformations` folded over `source_geojson`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerData {
    /// Remote origin of the data, if fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Original file name, if uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Data as currently rendered.
    pub geojson: FeatureCollection,
    /// Data as ingested.
    pub source_geojson: FeatureCollection,
    /// Ordered derivation steps from `source_geojson` to `geojson`.
    #[serde(default)]
    pub transformations: Transformations,
}

impl LayerData {
    /// Untransformed data: `geojson` and `source_geojson` are the same collection.
    pub fn from_geojson(geojson: FeatureCollection) -> Self {
        Self {
            url: None,
            file_name: None,
            source_geojson: geojson.clone(),
            geojson,
            transformations: Transformations::new(),
        }
    }
}
