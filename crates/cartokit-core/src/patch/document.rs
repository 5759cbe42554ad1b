// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Document-level edits: camera, basemap and the layer collection.

use cartokit_ir::{Basemap, CartoKitIR, CartoKitLayer};

use super::non_negative;
use crate::diff::payload;
use crate::error::PatchError;

pub(super) fn zoom(ir: &mut CartoKitIR, zoom: f64) -> Result<(), PatchError> {
    ir.zoom = non_negative("zoom", zoom)?;
    Ok(())
}

pub(super) fn basemap(ir: &mut CartoKitIR, p: &payload::Basemap) {
    ir.basemap = Basemap {
        url: p.url.clone(),
        provider: p.provider,
    };
}

pub(super) fn add_layer(
    ir: &mut CartoKitIR,
    id: &str,
    layer: &CartoKitLayer,
) -> Result<(), PatchError> {
    if layer.id() != id {
        return Err(PatchError::InvalidValue {
            field: "layer",
            reason: format!("layer id {} does not match diff layer id {id}", layer.id()),
        });
    }
    if ir.layers.contains_key(id) {
        return Err(PatchError::DuplicateLayer(id.to_owned()));
    }
    ir.layers.insert(id.to_owned(), layer.clone());
    Ok(())
}

pub(super) fn remove_layer(ir: &mut CartoKitIR, id: &str) -> Result<(), PatchError> {
    ir.layers
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| PatchError::LayerNotFound(id.to_owned()))
}
