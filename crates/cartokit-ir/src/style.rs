// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Style value kinds shared by the layer variants.
//!
//! Each layer variant picks the subset it supports (see [`crate::layer`]);
//! the shapes here carry no behaviour beyond small accessors.

use serde::{Deserialize, Serialize};

/// Hex color string, e.g. `"#ff0000"`.
pub type Color = String;

/// Ordering applied to a color scheme's colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SchemeDirection {
    /// Scheme order as published.
    #[default]
    Forward,
    /// Reversed scheme order.
    Reverse,
}

/// Sequential color schemes for quantitative data and heatmap ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantitativeScheme {
    /// Light to dark blue.
    Blues,
    /// Light to dark green.
    Greens,
    /// Light to dark grey.
    Greys,
    /// Light to dark orange.
    Oranges,
    /// Light to dark purple.
    Purples,
    /// Light to dark red.
    Reds,
    /// Yellow, green, blue.
    YlGnBu,
    /// Yellow, orange, red.
    YlOrRd,
    /// Perceptually uniform purple to yellow.
    Viridis,
    /// Perceptually uniform black to cream.
    Magma,
}

/// Qualitative color schemes for categorical data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalScheme {
    /// D3's ten-color palette.
    Category10,
    /// Tableau's ten-color palette.
    Tableau10,
    /// ColorBrewer Set1.
    Set1,
    /// ColorBrewer Set2.
    Set2,
    /// ColorBrewer Dark2.
    Dark2,
    /// ColorBrewer Pastel1.
    Pastel1,
}

/// Either kind of color scheme, as carried by a `color-scheme` edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorScheme {
    /// A sequential scheme.
    Quantitative(QuantitativeScheme),
    /// A qualitative scheme.
    Categorical(CategoricalScheme),
}

/// Classification methods used to derive quantitative thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationMethod {
    /// Equal-width classes between min and max.
    #[serde(rename = "Equal Interval")]
    EqualInterval,
    /// Classes holding equal feature counts.
    Quantile,
    /// Natural breaks (optimal 1D k-means).
    Jenks,
    /// Thresholds edited by hand.
    Manual,
}

/// A single color applied to every feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantFill {
    /// Fill color.
    pub color: Color,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Color assigned to one category value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryColor {
    /// The attribute value, stringified.
    pub category: String,
    /// Color drawn for features with this value.
    pub color: Color,
}

/// Fill colored by a categorical attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalFill {
    /// Attribute whose values select the color.
    pub attribute: String,
    /// Enumerated categories in first-seen order.
    pub categories: Vec<CategoryColor>,
    /// Palette the category colors are drawn from.
    pub scheme: CategoricalScheme,
    /// Palette direction.
    pub direction: SchemeDirection,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Fill colored by classifying a numeric attribute.
///
/// Invariant: `thresholds.len() == count - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitativeFill {
    /// Numeric attribute being classified.
    pub attribute: String,
    /// How thresholds are derived.
    pub method: ClassificationMethod,
    /// Sequential palette.
    pub scheme: QuantitativeScheme,
    /// Palette direction.
    pub direction: SchemeDirection,
    /// Number of classes.
    pub count: usize,
    /// Class break values, ascending.
    pub thresholds: Vec<f64>,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Discriminant of [`Fill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillVisualizationType {
    /// [`ConstantFill`].
    Constant,
    /// [`CategoricalFill`].
    Categorical,
    /// [`QuantitativeFill`].
    Quantitative,
}

/// Any fill kind. Used by point-like layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Fill {
    /// Single color.
    Constant(ConstantFill),
    /// Color by category.
    Categorical(CategoricalFill),
    /// Color by class.
    Quantitative(QuantitativeFill),
}

impl Fill {
    /// Discriminant of this fill.
    pub fn visualization_type(&self) -> FillVisualizationType {
        match self {
            Self::Constant(_) => FillVisualizationType::Constant,
            Self::Categorical(_) => FillVisualizationType::Categorical,
            Self::Quantitative(_) => FillVisualizationType::Quantitative,
        }
    }

    /// Opacity regardless of kind.
    pub fn opacity(&self) -> f64 {
        match self {
            Self::Constant(f) => f.opacity,
            Self::Categorical(f) => f.opacity,
            Self::Quantitative(f) => f.opacity,
        }
    }

    /// Overwrite opacity regardless of kind.
    pub fn set_opacity(&mut self, opacity: f64) {
        match self {
            Self::Constant(f) => f.opacity = opacity,
            Self::Categorical(f) => f.opacity = opacity,
            Self::Quantitative(f) => f.opacity = opacity,
        }
    }

    /// The data-driven attribute, if any.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::Constant(_) => None,
            Self::Categorical(f) => Some(&f.attribute),
            Self::Quantitative(f) => Some(&f.attribute),
        }
    }
}

/// Data-driven fill used by choropleth layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChoroplethFill {
    /// Color by category.
    Categorical(CategoricalFill),
    /// Color by class.
    Quantitative(QuantitativeFill),
}

impl From<ChoroplethFill> for Fill {
    fn from(fill: ChoroplethFill) -> Self {
        match fill {
            ChoroplethFill::Categorical(f) => Self::Categorical(f),
            ChoroplethFill::Quantitative(f) => Self::Quantitative(f),
        }
    }
}

impl TryFrom<Fill> for ChoroplethFill {
    type Error = Fill;

    fn try_from(fill: Fill) -> Result<Self, Self::Error> {
        match fill {
            Fill::Categorical(f) => Ok(Self::Categorical(f)),
            Fill::Quantitative(f) => Ok(Self::Quantitative(f)),
            other @ Fill::Constant(_) => Err(other),
        }
    }
}

impl From<ConstantFill> for Fill {
    fn from(fill: ConstantFill) -> Self {
        Self::Constant(fill)
    }
}

impl TryFrom<Fill> for ConstantFill {
    type Error = Fill;

    fn try_from(fill: Fill) -> Result<Self, Self::Error> {
        match fill {
            Fill::Constant(f) => Ok(f),
            other => Err(other),
        }
    }
}

/// Stroke shared by every stroked layer type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantStroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
    /// Stroke opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Radius scaling for proportional symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProportionalSymbolSize {
    /// Numeric attribute driving the radius.
    pub attribute: String,
    /// Radius drawn for the minimum value.
    pub min: f64,
    /// Radius drawn for the maximum value.
    pub max: f64,
}

/// Dot-density parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotDensityDots {
    /// Numeric attribute counted by dots.
    pub attribute: String,
    /// Attribute units represented by one dot.
    pub value: f64,
    /// Dot radius in pixels.
    pub size: f64,
}

/// Discriminant of [`HeatmapWeight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeatmapWeightType {
    /// Every point weighs the same.
    Constant,
    /// Points weigh by an attribute.
    Quantitative,
}

/// Per-point heatmap weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HeatmapWeight {
    /// Uniform weight.
    Constant {
        /// The weight of every point.
        value: f64,
    },
    /// Weight interpolated from an attribute's range.
    Quantitative {
        /// Numeric attribute.
        attribute: String,
        /// Smallest attribute value in the data.
        min: f64,
        /// Largest attribute value in the data.
        max: f64,
    },
}

impl HeatmapWeight {
    /// Discriminant of this weight.
    pub fn weight_type(&self) -> HeatmapWeightType {
        match self {
            Self::Constant { .. } => HeatmapWeightType::Constant,
            Self::Quantitative { .. } => HeatmapWeightType::Quantitative,
        }
    }
}

/// Color ramp applied to heatmap density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRamp {
    /// Sequential palette.
    pub scheme: QuantitativeScheme,
    /// Palette direction.
    pub direction: SchemeDirection,
}

/// Heatmap styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapStyle {
    /// Per-point weight.
    pub weight: HeatmapWeight,
    /// Density color ramp.
    pub ramp: HeatmapRamp,
    /// Kernel radius in pixels.
    pub radius: f64,
    /// Global intensity multiplier.
    pub intensity: f64,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f64,
}
