// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CartoKit intermediate representation.
//!
//! The IR is the canonical, serializable description of a map and its
//! layers. It is pure data: edits are computed by `cartokit-core`, and code
//! generators read it directly, so every value reachable from
//! [`CartoKitIR`] must be valid on its own.
#![forbid(unsafe_code)]

pub mod data;
pub mod geojson;
pub mod layer;
pub mod map;
pub mod style;
pub mod transformation;

pub use data::LayerData;
pub use geojson::{Feature, FeatureCollection, Geometry, GeometryClass, Position, Properties};
pub use layer::{
    CartoKitLayer, ChoroplethStyle, DotDensityStyle, HeatmapLayerStyle, Layer, LayerId, LayerType,
    Layout, LineStyle, PointStyle, PolygonStyle, ProportionalSymbolStyle, Tooltip, Visibility,
};
pub use map::{Basemap, BasemapProvider, CartoKitIR, LngLat, Projection};
pub use style::{
    CategoricalFill, CategoricalScheme, CategoryColor, ChoroplethFill, ClassificationMethod,
    Color, ColorScheme, ConstantFill, ConstantStroke, DotDensityDots, Fill,
    FillVisualizationType, HeatmapRamp, HeatmapStyle, HeatmapWeight, HeatmapWeightType,
    ProportionalSymbolSize, QuantitativeFill, QuantitativeScheme, SchemeDirection,
};
pub use transformation::{
    Transformation, TransformationDefinitions, TransformationKind, TransformationParam,
    Transformations, DERIVE_CENTROIDS, GENERATE_DOT_DENSITY_POINTS,
};
