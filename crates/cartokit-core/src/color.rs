// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Color scheme palettes.
//!
//! Sequential schemes are stored as nine anchors and resampled to any class
//! count by linear interpolation in RGB; categorical schemes cycle.

use cartokit_ir::{CategoricalScheme, QuantitativeScheme, SchemeDirection};

const BLUES: [&str; 9] = [
    "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
    "#08306b",
];
const GREENS: [&str; 9] = [
    "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c",
    "#00441b",
];
const GREYS: [&str; 9] = [
    "#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525",
    "#000000",
];
const ORANGES: [&str; 9] = [
    "#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#a63603",
    "#7f2704",
];
const PURPLES: [&str; 9] = [
    "#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#54278f",
    "#3f007d",
];
const REDS: [&str; 9] = [
    "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15",
    "#67000d",
];
const YL_GN_BU: [&str; 9] = [
    "#ffffd9", "#edf8b1", "#c7e9b4", "#7fcdbb", "#41b6c4", "#1d91c0", "#225ea8", "#253494",
    "#081d58",
];
const YL_OR_RD: [&str; 9] = [
    "#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026",
    "#800026",
];
const VIRIDIS: [&str; 9] = [
    "#440154", "#472d7b", "#3b528b", "#2c728e", "#21918c", "#28ae80", "#5ec962", "#addc30",
    "#fde725",
];
const MAGMA: [&str; 9] = [
    "#000004", "#1c1044", "#4f127b", "#812581", "#b5367a", "#e55964", "#fb8761", "#fec287",
    "#fcfdbf",
];

const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];
const TABLEAU10: &[&str] = &[
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];
const SET1: &[&str] = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];
const SET2: &[&str] = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];
const DARK2: &[&str] = &[
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
];
const PASTEL1: &[&str] = &[
    "#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6", "#ffffcc", "#e5d8bd", "#fddaec",
    "#f2f2f2",
];

/// Color drawn for features with no matching category.
pub const FALLBACK_COLOR: &str = "#cccccc";

fn anchors(scheme: QuantitativeScheme) -> &'static [&'static str; 9] {
    match scheme {
        QuantitativeScheme::Blues => &BLUES,
        QuantitativeScheme::Greens => &GREENS,
        QuantitativeScheme::Greys => &GREYS,
        QuantitativeScheme::Oranges => &ORANGES,
        QuantitativeScheme::Purples => &PURPLES,
        QuantitativeScheme::Reds => &REDS,
        QuantitativeScheme::YlGnBu => &YL_GN_BU,
        QuantitativeScheme::YlOrRd => &YL_OR_RD,
        QuantitativeScheme::Viridis => &VIRIDIS,
        QuantitativeScheme::Magma => &MAGMA,
    }
}

fn palette(scheme: CategoricalScheme) -> &'static [&'static str] {
    match scheme {
        CategoricalScheme::Category10 => CATEGORY10,
        CategoricalScheme::Tableau10 => TABLEAU10,
        CategoricalScheme::Set1 => SET1,
        CategoricalScheme::Set2 => SET2,
        CategoricalScheme::Dark2 => DARK2,
        CategoricalScheme::Pastel1 => PASTEL1,
    }
}

fn parse_hex(hex: &str) -> [u8; 3] {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    [channel(0), channel(2), channel(4)]
}

fn format_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn lerp(a: [u8; 3], b: [u8; 3], t: f64) -> [u8; 3] {
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// `count` colors sampled evenly from a sequential scheme, light to dark
/// unless reversed.
pub fn quantitative_colors(
    scheme: QuantitativeScheme,
    direction: SchemeDirection,
    count: usize,
) -> Vec<String> {
    let stops = anchors(scheme);
    let last = stops.len() - 1;
    let mut colors: Vec<String> = (0..count)
        .map(|i| {
            let t = if count <= 1 {
                0.5
            } else {
                i as f64 / (count - 1) as f64
            };
            let pos = t * last as f64;
            let lo = pos.floor() as usize;
            let hi = (lo + 1).min(last);
            let rgb = lerp(parse_hex(stops[lo]), parse_hex(stops[hi]), pos - lo as f64);
            format_hex(rgb)
        })
        .collect();
    if direction == SchemeDirection::Reverse {
        colors.reverse();
    }
    colors
}

/// `count` colors from a categorical scheme, cycling when it runs out.
pub fn categorical_colors(
    scheme: CategoricalScheme,
    direction: SchemeDirection,
    count: usize,
) -> Vec<String> {
    let mut base: Vec<&str> = palette(scheme).to_vec();
    if direction == SchemeDirection::Reverse {
        base.reverse();
    }
    base.iter()
        .cycle()
        .take(count)
        .map(|c| (*c).to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_classes_reproduce_anchors() {
        let colors = quantitative_colors(QuantitativeScheme::Blues, SchemeDirection::Forward, 9);
        assert_eq!(colors, BLUES.map(String::from).to_vec());
    }

    #[test]
    fn endpoints_are_preserved_for_any_count() {
        for count in 2..=9 {
            let colors =
                quantitative_colors(QuantitativeScheme::Reds, SchemeDirection::Forward, count);
            assert_eq!(colors.len(), count);
            assert_eq!(colors[0], "#fff5f0");
            assert_eq!(colors[count - 1], "#67000d");
        }
    }

    #[test]
    fn reverse_flips_order() {
        let fwd = quantitative_colors(QuantitativeScheme::Viridis, SchemeDirection::Forward, 4);
        let mut rev = quantitative_colors(QuantitativeScheme::Viridis, SchemeDirection::Reverse, 4);
        rev.reverse();
        assert_eq!(fwd, rev);
    }

    #[test]
    fn categorical_cycles() {
        let colors = categorical_colors(CategoricalScheme::Set2, SchemeDirection::Forward, 10);
        assert_eq!(colors[8], colors[0]);
        assert_eq!(colors[9], colors[1]);
    }
}
