// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Transformation pipeline patchers.
//!
//! Records are spliced by name. Geometry-deriving records belong to the
//! layer type and are only ever swapped through [`replace_derivation`].

use cartokit_ir::{LayerData, Transformation, Transformations};

use super::Target;
use crate::diff::payload;
use crate::error::PatchError;
use crate::transform::refold;

/// Swap the pipeline's geometry-deriving record for `record`, keeping its
/// position. With no existing record the new one is appended; with no new
/// record the old one is dropped.
pub(crate) fn replace_derivation(
    layer_id: &str,
    transformations: &mut Transformations,
    record: Option<Transformation>,
) -> Result<(), PatchError> {
    let slot = transformations
        .geometry_deriving()
        .map(|(index, t)| (index, t.name.clone()));
    if let Some((_, name)) = &slot {
        transformations.remove(name);
    }
    if let Some(record) = record {
        transformations
            .insert(slot.map(|(index, _)| index), record)
            .map_err(|t| PatchError::DuplicateTransformation {
                layer_id: layer_id.to_owned(),
                name: t.name,
            })?;
    }
    Ok(())
}

fn reject_derivation(t: &Transformation) -> Result<(), PatchError> {
    if t.kind.derives_geometry() {
        return Err(PatchError::InvalidValue {
            field: "transformation",
            reason: format!("{} is managed by the layer type", t.name),
        });
    }
    Ok(())
}

fn data_mut<'a>(t: &'a mut Target<'_>) -> (&'a mut LayerData, String) {
    let id = t.layer.id().to_owned();
    (t.layer.data_mut(), id)
}

pub(super) fn add(mut t: Target<'_>, p: &payload::AddTransformation) -> Result<(), PatchError> {
    reject_derivation(&p.transformation)?;
    let (data, layer_id) = data_mut(&mut t);
    data.transformations
        .insert(p.index, p.transformation.clone())
        .map_err(|t| PatchError::DuplicateTransformation {
            layer_id,
            name: t.name,
        })?;
    match &p.geojson {
        Some(geojson) => data.geojson = geojson.clone(),
        None => refold(data)?,
    }
    Ok(())
}

pub(super) fn remove(
    mut t: Target<'_>,
    p: &payload::RemoveTransformation,
) -> Result<(), PatchError> {
    let (data, layer_id) = data_mut(&mut t);
    let Some(existing) = data.transformations.get(&p.name) else {
        return Err(PatchError::TransformationNotFound {
            layer_id,
            name: p.name.clone(),
        });
    };
    reject_derivation(existing)?;
    data.transformations.remove(&p.name);
    refold(data)?;
    Ok(())
}
