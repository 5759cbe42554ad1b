// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The editor: the one place diffs enter the system.
//!
//! Applying a diff runs invert, patch and reconcile in that order, then
//! commits the new document and records history. Any failure before the
//! commit leaves the document and history as they were. `&mut self` on
//! every mutating call serializes application.

use cartokit_ir::CartoKitIR;
use cartokit_map_port::MapPort;
use tracing::{debug, error, instrument};

use crate::config::EditorConfig;
use crate::diff::Diff;
use crate::error::EditorError;
use crate::history::{History, HistoryEntry};
use crate::invert::invert;
use crate::patch::patch_with;
use crate::reconcile::{reconcile, render_document};

/// A document bound to a rendering surface, with undo/redo.
#[derive(Debug)]
pub struct Editor<M: MapPort> {
    ir: CartoKitIR,
    map: M,
    history: History,
    config: EditorConfig,
}

impl<M: MapPort> Editor<M> {
    /// Draw `ir` onto `map` and start editing it.
    pub fn new(ir: CartoKitIR, mut map: M, config: EditorConfig) -> Result<Self, EditorError> {
        render_document(&mut map, &ir)?;
        Ok(Self {
            ir,
            map,
            history: History::new(config.history.clone()),
            config,
        })
    }

    /// Current document.
    pub fn ir(&self) -> &CartoKitIR {
        &self.ir
    }

    /// The rendering surface.
    pub fn map(&self) -> &M {
        &self.map
    }

    /// Mutable access to the surface, for callers driving it outside diffs.
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// Undo/redo state.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Apply `diff` and record it for undo.
    #[instrument(level = "debug", skip_all, fields(diff = diff.tag()))]
    pub fn apply_diff(&mut self, diff: Diff) -> Result<(), EditorError> {
        let inverse = invert(&diff, &self.ir)?;
        self.commit(&diff)?;
        self.history.record(HistoryEntry { diff, inverse });
        Ok(())
    }

    /// Apply `diff` without recording it.
    pub fn apply_untracked(&mut self, diff: &Diff) -> Result<(), EditorError> {
        self.commit(diff)
    }

    /// Undo the most recent diff. `Ok(false)` when there is nothing to undo.
    #[instrument(level = "debug", skip_all)]
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let Some(entry) = self.history.pop_undo() else {
            return Ok(false);
        };
        if let Err(err) = self.commit(&entry.inverse) {
            self.history.push_undo(entry);
            return Err(err);
        }
        debug!(diff = entry.diff.tag(), "undone");
        self.history.push_redo(entry);
        Ok(true)
    }

    /// Re-apply the most recently undone diff. `Ok(false)` when there is
    /// nothing to redo.
    #[instrument(level = "debug", skip_all)]
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let Some(entry) = self.history.pop_redo() else {
            return Ok(false);
        };
        if let Err(err) = self.commit(&entry.diff) {
            self.history.push_redo(entry);
            return Err(err);
        }
        debug!(diff = entry.diff.tag(), "redone");
        self.history.push_undo(entry);
        Ok(true)
    }

    /// Replace the document, redraw the surface and forget history.
    pub fn load(&mut self, ir: CartoKitIR) -> Result<(), EditorError> {
        render_document(&mut self.map, &ir)?;
        self.ir = ir;
        self.history.clear();
        Ok(())
    }

    /// Take the document and surface back.
    pub fn into_parts(self) -> (CartoKitIR, M) {
        (self.ir, self.map)
    }

    /// Patch, reconcile, then swap in the new document.
    fn commit(&mut self, diff: &Diff) -> Result<(), EditorError> {
        let next = patch_with(diff, &self.ir, &self.config.styles)?;
        if let Err(err) = reconcile(diff, &self.ir, &next, &mut self.map) {
            error!(%err, diff = diff.tag(), "surface update failed; document not committed");
            return Err(err.into());
        }
        self.ir = next;
        Ok(())
    }
}
