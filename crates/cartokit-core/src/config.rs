// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Editor configuration: style defaults and history policy.
//!
//! Every field has a default so partial JSON documents load cleanly.

use cartokit_ir::{
    CategoricalScheme, ClassificationMethod, ConstantFill, ConstantStroke, QuantitativeScheme,
};
use serde::{Deserialize, Serialize};

/// Smallest supported class count.
pub const MIN_STEP_COUNT: usize = 2;
/// Largest supported class count.
pub const MAX_STEP_COUNT: usize = 9;
/// Default class count.
pub const DEFAULT_COUNT: usize = 5;

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Defaults used when styles are synthesized.
    pub styles: StyleDefaults,
    /// Undo/redo policy.
    pub history: HistoryConfig,
}

/// Undo/redo policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum undo entries kept; oldest are dropped. `None` is unbounded.
    pub limit: Option<usize>,
    /// Whether applying a fresh diff discards the redo stack.
    pub clear_redo_on_new_diff: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: Some(500),
            clear_redo_on_new_diff: true,
        }
    }
}

/// Values used when a transition or edit has to invent a style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDefaults {
    /// Constant fill color.
    pub fill_color: String,
    /// Fill opacity.
    pub fill_opacity: f64,
    /// Stroke color.
    pub stroke_color: String,
    /// Stroke width.
    pub stroke_width: f64,
    /// Stroke opacity.
    pub stroke_opacity: f64,
    /// Point layer radius.
    pub point_size: f64,
    /// Proportional symbol minimum radius.
    pub min_size: f64,
    /// Proportional symbol maximum radius.
    pub max_size: f64,
    /// Dot radius.
    pub dot_size: f64,
    /// Classification method for new quantitative fills.
    pub method: ClassificationMethod,
    /// Class count for new quantitative fills.
    pub count: usize,
    /// Scheme for new quantitative fills.
    pub quantitative_scheme: QuantitativeScheme,
    /// Scheme for new categorical fills.
    pub categorical_scheme: CategoricalScheme,
    /// Heatmap ramp scheme.
    pub heatmap_scheme: QuantitativeScheme,
    /// Heatmap kernel radius.
    pub heatmap_radius: f64,
    /// Heatmap intensity.
    pub heatmap_intensity: f64,
    /// Heatmap opacity.
    pub heatmap_opacity: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            fill_color: "#f58a4b".into(),
            fill_opacity: 0.75,
            stroke_color: "#000000".into(),
            stroke_width: 0.5,
            stroke_opacity: 1.0,
            point_size: 3.0,
            min_size: 1.0,
            max_size: 50.0,
            dot_size: 1.0,
            method: ClassificationMethod::Quantile,
            count: DEFAULT_COUNT,
            quantitative_scheme: QuantitativeScheme::Oranges,
            categorical_scheme: CategoricalScheme::Tableau10,
            heatmap_scheme: QuantitativeScheme::Viridis,
            heatmap_radius: 10.0,
            heatmap_intensity: 1.0,
            heatmap_opacity: 0.8,
        }
    }
}

impl StyleDefaults {
    /// Default constant fill.
    pub fn constant_fill(&self) -> ConstantFill {
        ConstantFill {
            color: self.fill_color.clone(),
            opacity: self.fill_opacity,
        }
    }

    /// Default stroke.
    pub fn stroke(&self) -> ConstantStroke {
        ConstantStroke {
            color: self.stroke_color.clone(),
            width: self.stroke_width,
            opacity: self.stroke_opacity,
        }
    }
}
