// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Paint properties and renderer expressions.
//!
//! Each function returns `(property, value)` pairs for one concern of one
//! primitive. Reconcile sets exactly the pairs of the concern a diff touched.

use cartokit_ir::{
    CartoKitLayer, CategoricalFill, ConstantStroke, FeatureCollection, Fill, HeatmapStyle,
    HeatmapWeight, ProportionalSymbolSize, QuantitativeFill,
};
use cartokit_map_port::PrimitiveKind;
use serde_json::{json, Value};

use super::primitives::Role;
use crate::classify::extent;
use crate::color::{quantitative_colors, FALLBACK_COLOR};

/// A paint property and its value.
pub type Paint = (&'static str, Value);

const HIGHLIGHT_COLOR: &str = "#000000";
const HIGHLIGHT_WIDTH: f64 = 2.0;
/// Density stops of the heatmap ramp; density 0 is transparent.
const RAMP_STOPS: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

/// `match` on the stringified attribute, falling back for unknown values.
pub fn categorical_expression(fill: &CategoricalFill) -> Value {
    if fill.categories.is_empty() {
        return json!(FALLBACK_COLOR);
    }
    let mut expr = vec![json!("match"), json!(["to-string", ["get", fill.attribute]])];
    for entry in &fill.categories {
        expr.push(json!(entry.category));
        expr.push(json!(entry.color));
    }
    expr.push(json!(FALLBACK_COLOR));
    Value::Array(expr)
}

/// `step` over the attribute: one color per class.
pub fn quantitative_expression(fill: &QuantitativeFill) -> Value {
    let colors = quantitative_colors(fill.scheme, fill.direction, fill.count);
    let mut expr = vec![json!("step"), json!(["get", fill.attribute])];
    let mut colors = colors.into_iter();
    expr.push(json!(colors.next().unwrap_or_else(|| FALLBACK_COLOR.to_owned())));
    for (threshold, color) in fill.thresholds.iter().zip(colors) {
        expr.push(json!(threshold));
        expr.push(json!(color));
    }
    Value::Array(expr)
}

/// Color value for any fill kind.
pub fn fill_color(fill: &Fill) -> Value {
    match fill {
        Fill::Constant(c) => json!(c.color),
        Fill::Categorical(c) => categorical_expression(c),
        Fill::Quantitative(q) => quantitative_expression(q),
    }
}

/// Fill color and opacity for a fill or circle primitive. A missing fill is
/// drawn at zero opacity with its color left alone.
pub fn fill_paint(fill: Option<&Fill>, kind: PrimitiveKind) -> Vec<Paint> {
    let (color, opacity) = match kind {
        PrimitiveKind::Circle => ("circle-color", "circle-opacity"),
        _ => ("fill-color", "fill-opacity"),
    };
    match fill {
        Some(fill) => vec![(color, fill_color(fill)), (opacity, json!(fill.opacity()))],
        None => vec![(opacity, json!(0.0))],
    }
}

/// Stroke properties for a line or circle primitive. A missing stroke is
/// drawn at zero opacity.
pub fn stroke_paint(stroke: Option<&ConstantStroke>, kind: PrimitiveKind) -> Vec<Paint> {
    let (color, width, opacity) = match kind {
        PrimitiveKind::Circle => (
            "circle-stroke-color",
            "circle-stroke-width",
            "circle-stroke-opacity",
        ),
        _ => ("line-color", "line-width", "line-opacity"),
    };
    match stroke {
        Some(s) => vec![
            (color, json!(s.color)),
            (width, json!(s.width)),
            (opacity, json!(s.opacity)),
        ],
        None => vec![(opacity, json!(0.0))],
    }
}

/// Radius interpolated linearly over the attribute's extent.
pub fn size_expression(size: &ProportionalSymbolSize, fc: &FeatureCollection) -> Value {
    match extent(&fc.numbers(&size.attribute)) {
        Some((lo, hi)) if lo < hi => json!([
            "interpolate",
            ["linear"],
            ["get", size.attribute],
            lo,
            size.min,
            hi,
            size.max
        ]),
        _ => json!(size.min),
    }
}

/// `circle-radius` for circle layers.
pub fn radius_paint(layer: &CartoKitLayer) -> Vec<Paint> {
    let radius = match layer {
        CartoKitLayer::Point(l) => json!(l.style.size),
        CartoKitLayer::ProportionalSymbol(l) => size_expression(&l.style.size, &l.data.geojson),
        CartoKitLayer::DotDensity(l) => json!(l.style.dots.size),
        _ => return Vec::new(),
    };
    vec![("circle-radius", radius)]
}

/// Heatmap weight, ramp and scalars.
pub fn heatmap_paint(style: &HeatmapStyle) -> Vec<Paint> {
    let weight = match &style.weight {
        HeatmapWeight::Constant { value } => json!(value),
        HeatmapWeight::Quantitative { attribute, min, max } if min < max => json!([
            "interpolate",
            ["linear"],
            ["get", attribute],
            min,
            0,
            max,
            1
        ]),
        HeatmapWeight::Quantitative { .. } => json!(1),
    };
    let colors = quantitative_colors(style.ramp.scheme, style.ramp.direction, RAMP_STOPS.len());
    let mut ramp = vec![
        json!("interpolate"),
        json!(["linear"]),
        json!(["heatmap-density"]),
        json!(0),
        json!("rgba(0,0,0,0)"),
    ];
    for (stop, color) in RAMP_STOPS.iter().zip(colors) {
        ramp.push(json!(stop));
        ramp.push(json!(color));
    }
    vec![
        ("heatmap-weight", weight),
        ("heatmap-color", Value::Array(ramp)),
        ("heatmap-radius", json!(style.radius)),
        ("heatmap-intensity", json!(style.intensity)),
        ("heatmap-opacity", json!(style.opacity)),
    ]
}

fn highlight(state: &str) -> Vec<Paint> {
    vec![
        ("line-color", json!(HIGHLIGHT_COLOR)),
        ("line-width", json!(HIGHLIGHT_WIDTH)),
        (
            "line-opacity",
            json!(["case", ["boolean", ["feature-state", state], false], 1, 0]),
        ),
    ]
}

/// Every paint property of `layer`'s `role` primitive.
pub fn paint(layer: &CartoKitLayer, role: Role) -> Vec<Paint> {
    match (layer, role) {
        (CartoKitLayer::Polygon(_) | CartoKitLayer::Choropleth(_), Role::Main) => {
            fill_paint(layer.fill().as_ref(), PrimitiveKind::Fill)
        }
        (CartoKitLayer::Polygon(_) | CartoKitLayer::Choropleth(_), Role::Stroke)
        | (CartoKitLayer::Line(_), Role::Main) => {
            stroke_paint(layer.stroke(), PrimitiveKind::Line)
        }
        (
            CartoKitLayer::Point(_)
            | CartoKitLayer::ProportionalSymbol(_)
            | CartoKitLayer::DotDensity(_),
            Role::Main,
        ) => {
            let mut paint = radius_paint(layer);
            paint.extend(fill_paint(layer.fill().as_ref(), PrimitiveKind::Circle));
            paint.extend(stroke_paint(layer.stroke(), PrimitiveKind::Circle));
            paint
        }
        (CartoKitLayer::Heatmap(l), Role::Main) => heatmap_paint(&l.style.heatmap),
        (_, Role::Hover) => highlight("hover"),
        (_, Role::Select) => highlight("selected"),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartokit_ir::{
        CategoryColor, CategoricalScheme, ClassificationMethod, QuantitativeScheme,
        SchemeDirection,
    };

    #[test]
    fn categorical_falls_back_when_empty() {
        let mut fill = CategoricalFill {
            attribute: "kind".into(),
            categories: Vec::new(),
            scheme: CategoricalScheme::Set1,
            direction: SchemeDirection::Forward,
            opacity: 1.0,
        };
        assert_eq!(categorical_expression(&fill), json!(FALLBACK_COLOR));

        fill.categories.push(CategoryColor {
            category: "a".into(),
            color: "#ff0000".into(),
        });
        assert_eq!(
            categorical_expression(&fill),
            json!([
                "match",
                ["to-string", ["get", "kind"]],
                "a",
                "#ff0000",
                FALLBACK_COLOR
            ])
        );
    }

    #[test]
    fn step_has_one_color_per_class() {
        let fill = QuantitativeFill {
            attribute: "pop".into(),
            method: ClassificationMethod::Manual,
            scheme: QuantitativeScheme::Blues,
            direction: SchemeDirection::Forward,
            count: 3,
            thresholds: vec![10.0, 20.0],
            opacity: 1.0,
        };
        let Value::Array(expr) = quantitative_expression(&fill) else {
            panic!("expected an array");
        };
        // "step", input, c0, then (threshold, color) per break.
        assert_eq!(expr.len(), 3 + 2 * 2);
        assert_eq!(expr[3], json!(10.0));
        assert_eq!(expr[5], json!(20.0));
    }

    #[test]
    fn removed_fill_only_zeroes_opacity() {
        assert_eq!(
            fill_paint(None, PrimitiveKind::Circle),
            vec![("circle-opacity", json!(0.0))]
        );
    }
}
