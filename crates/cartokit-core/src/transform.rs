// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Transformation records and their execution.
//!
//! Constructors build the records stored on a layer (including the function
//! bodies emitted into generated programs); [`fold`] replays a pipeline over
//! source data to produce the rendered collection.

use cartokit_ir::{
    FeatureCollection, Geometry, LayerData, Transformation, TransformationDefinitions,
    TransformationKind, TransformationParam, Transformations, DERIVE_CENTROIDS,
    GENERATE_DOT_DENSITY_POINTS,
};
use serde_json::Value;

use crate::dots::generate_dots;
use crate::error::TransformError;
use crate::geometry::centroid;

fn param(name: &str, ty: &str) -> TransformationParam {
    TransformationParam {
        name: name.to_owned(),
        ty: ty.to_owned(),
    }
}

fn definitions(javascript: &str, typescript: &str) -> TransformationDefinitions {
    TransformationDefinitions {
        javascript: javascript.to_owned(),
        typescript: typescript.to_owned(),
    }
}

const DERIVE_CENTROIDS_JS: &str = "function deriveCentroids(geojson) {
  return turf.featureCollection(
    geojson.features.map((feature) => turf.centroid(feature, { properties: feature.properties }))
  );
}";

const DERIVE_CENTROIDS_TS: &str = "function deriveCentroids(
  geojson: FeatureCollection
): FeatureCollection<Point> {
  return turf.featureCollection(
    geojson.features.map((feature) => turf.centroid(feature, { properties: feature.properties }))
  );
}";

const GENERATE_DOTS_JS: &str = "function generateDotDensityPoints(geojson, attribute, value, seed) {
  const random = seededRandom(seed);
  return turf.featureCollection(
    geojson.features.flatMap((feature) => {
      const count = Math.floor((feature.properties[attribute] ?? 0) / value);
      return randomPointsInPolygon(feature, count, random);
    })
  );
}";

const GENERATE_DOTS_TS: &str = "function generateDotDensityPoints(
  geojson: FeatureCollection<Polygon | MultiPolygon>,
  attribute: string,
  value: number,
  seed: number
): FeatureCollection<Point> {
  const random = seededRandom(seed);
  return turf.featureCollection(
    geojson.features.flatMap((feature) => {
      const count = Math.floor((feature.properties?.[attribute] ?? 0) / value);
      return randomPointsInPolygon(feature, count, random);
    })
  );
}";

/// Replace every feature's geometry with its centroid.
pub fn derive_centroids() -> Transformation {
    Transformation {
        name: DERIVE_CENTROIDS.to_owned(),
        kind: TransformationKind::DeriveCentroids,
        params: vec![param("geojson", "FeatureCollection")],
        args: Vec::new(),
        definitions: definitions(DERIVE_CENTROIDS_JS, DERIVE_CENTROIDS_TS),
    }
}

/// Replace polygons with `floor(attribute / value)` seeded random dots each.
pub fn generate_dot_density_points(attribute: &str, value: f64, seed: u64) -> Transformation {
    Transformation {
        name: GENERATE_DOT_DENSITY_POINTS.to_owned(),
        kind: TransformationKind::GenerateDotDensityPoints,
        params: vec![
            param("geojson", "FeatureCollection"),
            param("attribute", "string"),
            param("value", "number"),
            param("seed", "number"),
        ],
        args: vec![Value::from(attribute), Value::from(value), Value::from(seed)],
        definitions: definitions(GENERATE_DOTS_JS, GENERATE_DOTS_TS),
    }
}

fn tabular(
    name: String,
    kind: TransformationKind,
    params: Vec<TransformationParam>,
    args: Vec<Value>,
    body: &str,
) -> Transformation {
    let fn_name = name.clone();
    let js_params: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    let ts_params: Vec<String> = params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ty))
        .collect();
    let javascript = format!(
        "function {fn_name}({}) {{\n  return {{\n    ...geojson,\n    features: geojson.features.map((feature) => {{\n{body}\n      return feature;\n    }})\n  }};\n}}",
        js_params.join(", ")
    );
    let typescript = format!(
        "function {fn_name}({}): FeatureCollection {{\n  return {{\n    ...geojson,\n    features: geojson.features.map((feature) => {{\n{body}\n      return feature;\n    }})\n  }};\n}}",
        ts_params.join(", ")
    );
    Transformation {
        name,
        kind,
        params,
        args,
        definitions: TransformationDefinitions {
            javascript,
            typescript,
        },
    }
}

/// Rename property `from` to `to` on every feature.
pub fn rename_attribute(from: &str, to: &str) -> Transformation {
    tabular(
        format!("rename_{from}_to_{to}"),
        TransformationKind::RenameAttribute,
        vec![
            param("geojson", "FeatureCollection"),
            param("from", "string"),
            param("to", "string"),
        ],
        vec![Value::from(from), Value::from(to)],
        "      feature.properties[to] = feature.properties[from];\n      delete feature.properties[from];",
    )
}

/// Remove property `name` from every feature.
pub fn drop_attribute(name: &str) -> Transformation {
    tabular(
        format!("drop_{name}"),
        TransformationKind::DropAttribute,
        vec![param("geojson", "FeatureCollection"), param("name", "string")],
        vec![Value::from(name)],
        "      delete feature.properties[name];",
    )
}

/// Multiply numeric property `name` by `factor`.
pub fn scale_attribute(name: &str, factor: f64) -> Transformation {
    tabular(
        format!("scale_{name}"),
        TransformationKind::ScaleAttribute,
        vec![
            param("geojson", "FeatureCollection"),
            param("name", "string"),
            param("factor", "number"),
        ],
        vec![Value::from(name), Value::from(factor)],
        "      if (typeof feature.properties[name] === 'number') {\n        feature.properties[name] *= factor;\n      }",
    )
}

/// Write `numerator / denominator` into `output`.
pub fn normalize_attribute(numerator: &str, denominator: &str, output: &str) -> Transformation {
    tabular(
        format!("normalize_{numerator}_by_{denominator}"),
        TransformationKind::NormalizeAttribute,
        vec![
            param("geojson", "FeatureCollection"),
            param("numerator", "string"),
            param("denominator", "string"),
            param("output", "string"),
        ],
        vec![
            Value::from(numerator),
            Value::from(denominator),
            Value::from(output),
        ],
        "      const d = feature.properties[denominator];\n      feature.properties[output] = d ? feature.properties[numerator] / d : null;",
    )
}

fn bad(t: &Transformation, index: usize) -> TransformError {
    TransformError::BadArgument {
        name: t.name.clone(),
        index,
    }
}

fn str_arg(t: &Transformation, index: usize) -> Result<&str, TransformError> {
    t.args
        .get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| bad(t, index))
}

fn f64_arg(t: &Transformation, index: usize) -> Result<f64, TransformError> {
    t.args
        .get(index)
        .and_then(Value::as_f64)
        .ok_or_else(|| bad(t, index))
}

fn u64_arg(t: &Transformation, index: usize) -> Result<u64, TransformError> {
    t.args
        .get(index)
        .and_then(Value::as_u64)
        .ok_or_else(|| bad(t, index))
}

/// Decoded arguments of a `generateDotDensityPoints` record.
#[derive(Debug, Clone, PartialEq)]
pub struct DotArgs {
    /// Attribute counted.
    pub attribute: String,
    /// Units per dot.
    pub value: f64,
    /// Placement seed.
    pub seed: u64,
}

/// Decode `[attribute, value, seed]`.
pub fn dot_args(t: &Transformation) -> Result<DotArgs, TransformError> {
    Ok(DotArgs {
        attribute: str_arg(t, 0)?.to_owned(),
        value: f64_arg(t, 1)?,
        seed: u64_arg(t, 2)?,
    })
}

/// Run one transformation.
pub fn apply(
    t: &Transformation,
    input: &FeatureCollection,
) -> Result<FeatureCollection, TransformError> {
    let mut out = input.clone();
    match t.kind {
        TransformationKind::DeriveCentroids => {
            for feature in &mut out.features {
                if let Some(coordinates) = feature.geometry.as_ref().and_then(centroid) {
                    feature.geometry = Some(Geometry::Point { coordinates });
                }
            }
        }
        TransformationKind::GenerateDotDensityPoints => {
            let args = dot_args(t)?;
            if args.value <= 0.0 {
                return Err(TransformError::NonPositiveDotValue(args.value));
            }
            out = generate_dots(input, &args.attribute, args.value, args.seed)?;
        }
        TransformationKind::RenameAttribute => {
            let (from, to) = (str_arg(t, 0)?, str_arg(t, 1)?);
            for feature in &mut out.features {
                if let Some(value) = feature.properties.shift_remove(from) {
                    feature.properties.insert(to.to_owned(), value);
                }
            }
        }
        TransformationKind::DropAttribute => {
            let name = str_arg(t, 0)?;
            for feature in &mut out.features {
                feature.properties.shift_remove(name);
            }
        }
        TransformationKind::ScaleAttribute => {
            let (name, factor) = (str_arg(t, 0)?, f64_arg(t, 1)?);
            for feature in &mut out.features {
                if let Some(v) = feature.number(name) {
                    feature.properties.insert(name.to_owned(), Value::from(v * factor));
                }
            }
        }
        TransformationKind::NormalizeAttribute => {
            let (num, den, output) = (str_arg(t, 0)?, str_arg(t, 1)?, str_arg(t, 2)?);
            for feature in &mut out.features {
                let ratio = match (feature.number(num), feature.number(den)) {
                    (Some(n), Some(d)) if d != 0.0 => Value::from(n / d),
                    _ => Value::Null,
                };
                feature.properties.insert(output.to_owned(), ratio);
            }
        }
    }
    Ok(out)
}

/// Replay `transformations` over `source` in order.
pub fn fold(
    source: &FeatureCollection,
    transformations: &Transformations,
) -> Result<FeatureCollection, TransformError> {
    transformations
        .iter()
        .try_fold(source.clone(), |acc, t| apply(t, &acc))
}

/// Source data with only the non-geometric steps applied: the attributes a
/// geometry derivation sees.
pub fn attribute_view(data: &LayerData) -> Result<FeatureCollection, TransformError> {
    data.transformations
        .iter()
        .filter(|t| !t.kind.derives_geometry())
        .try_fold(data.source_geojson.clone(), |acc, t| apply(t, &acc))
}

/// Recompute `data.geojson` from its source and pipeline.
pub fn refold(data: &mut LayerData) -> Result<(), TransformError> {
    data.geojson = fold(&data.source_geojson, &data.transformations)?;
    Ok(())
}
