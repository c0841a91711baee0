//! Layer store: the canonical ordered layer sequence plus selection and
//! checked sets.
//!
//! Every mutation of the document goes through here. Structural mutations
//! (add, patch, delete, reorder, nudge) checkpoint the history first;
//! visibility and checkbox toggles deliberately do not, and drags checkpoint
//! once at drag entry via [`LayerStore::begin_drag`].

use crate::history::History;
use crate::import::DecodedImage;
use crate::layer::{Layer, LayerId, LayerPatch};
use kurbo::{Point, Vec2};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct LayerStore {
    /// Ordered sequence; index is z-order, later entries render on top.
    layers: Vec<Layer>,
    /// Layers selected for editing/dragging.
    selection: HashSet<LayerId>,
    /// Layers marked for export. Empty means "export all".
    checked: HashSet<LayerId>,
    history: History,
}

impl LayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- reads ---

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    pub fn selection(&self) -> &HashSet<LayerId> {
        &self.selection
    }

    pub fn checked(&self) -> &HashSet<LayerId> {
        &self.checked
    }

    pub fn is_selected(&self, id: LayerId) -> bool {
        self.selection.contains(&id)
    }

    pub fn is_checked(&self, id: LayerId) -> bool {
        self.checked.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Topmost visible layer whose bounding box contains the given world
    /// point. Invisible layers are not hit-testable.
    pub fn topmost_visible_at(&self, point: Point) -> Option<LayerId> {
        self.layers
            .iter()
            .rev()
            .find(|l| l.visible && l.bounds().contains(point))
            .map(|l| l.id)
    }

    // --- structural mutations (checkpointed) ---

    /// Append decoded images as new layers at the top of the z-order, in the
    /// order they finished decoding. If nothing was selected, the first new
    /// layer becomes the selection.
    pub fn add_layers(&mut self, decoded: Vec<DecodedImage>) -> Vec<LayerId> {
        if decoded.is_empty() {
            return Vec::new();
        }
        self.checkpoint();

        let select_first = self.selection.is_empty();
        let mut ids = Vec::with_capacity(decoded.len());
        for image in decoded {
            let layer = Layer::new(image.handle, image.name, image.width, image.height);
            log::debug!("added layer {} ({})", layer.id, layer.name);
            ids.push(layer.id);
            self.layers.push(layer);
        }
        if select_first {
            self.selection.insert(ids[0]);
        }
        ids
    }

    /// Patch a single layer. One undo step per call.
    pub fn update_layer(&mut self, id: LayerId, patch: &LayerPatch) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.checkpoint();
        self.layers[index].apply_patch(patch);
    }

    /// Patch every selected layer with the same changes. Each layer is
    /// recentered independently around its own bounding-box center. One undo
    /// step for the whole batch.
    pub fn update_selected(&mut self, patch: &LayerPatch) {
        if self.selection.is_empty() {
            return;
        }
        self.checkpoint();
        for layer in &mut self.layers {
            if self.selection.contains(&layer.id) {
                layer.apply_patch(patch);
            }
        }
    }

    /// Translate every selected layer by `delta` world units. One undo step
    /// per call, so each arrow-key press undoes individually.
    pub fn nudge_selected(&mut self, delta: Vec2) {
        if self.selection.is_empty() {
            return;
        }
        self.checkpoint();
        for layer in &mut self.layers {
            if self.selection.contains(&layer.id) {
                layer.position += delta;
            }
        }
    }

    /// Remove all selected layers, prune them from the checked set, and
    /// clear the selection. Silent no-op when nothing is selected.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.checkpoint();
        let selection = std::mem::take(&mut self.selection);
        self.layers.retain(|l| !selection.contains(&l.id));
        self.checked.retain(|id| !selection.contains(id));
    }

    /// Move one layer to a new position in the sequence; everything else
    /// shifts to fill the gap. The sole z-order mutation.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to || from >= self.layers.len() || to >= self.layers.len() {
            return;
        }
        self.checkpoint();
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
    }

    /// Record one pre-drag snapshot. The interaction controller calls this
    /// when a drag starts; the per-move position writes that follow are not
    /// individually undoable.
    pub fn begin_drag(&mut self) {
        self.checkpoint();
    }

    /// Direct position write for the drag path. No checkpoint, no
    /// recentering: rotation and scale are untouched.
    pub fn move_layer_to(&mut self, id: LayerId, position: Point) {
        if let Some(index) = self.index_of(id) {
            self.layers[index].position = position;
        }
    }

    // --- non-undoable mutations ---

    /// Toggle layer visibility. Deliberately not checkpointed.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(index) = self.index_of(id) {
            self.layers[index].visible = visible;
        }
    }

    // --- selection ---

    /// `additive` XORs the layer in or out of the selection; otherwise the
    /// selection becomes the singleton `{id}`.
    pub fn toggle_selection(&mut self, id: LayerId, additive: bool) {
        if self.layer(id).is_none() {
            return;
        }
        if additive {
            if !self.selection.remove(&id) {
                self.selection.insert(id);
            }
        } else {
            self.selection.clear();
            self.selection.insert(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Replace the selection wholesale (marquee updates).
    pub fn replace_selection(&mut self, selection: HashSet<LayerId>) {
        self.selection = selection;
    }

    // --- checked set ---

    pub fn toggle_checked(&mut self, id: LayerId) {
        if self.layer(id).is_none() {
            return;
        }
        if !self.checked.remove(&id) {
            self.checked.insert(id);
        }
    }

    /// Check everything, unless everything is already checked, in which case
    /// clear.
    pub fn toggle_all_checked(&mut self) {
        if !self.layers.is_empty() && self.checked.len() == self.layers.len() {
            self.checked.clear();
        } else {
            self.checked = self.layers.iter().map(|l| l.id).collect();
        }
    }

    // --- history ---

    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.layers.clone()) {
            Some(snapshot) => {
                self.layers = snapshot;
                self.prune_dangling();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.layers.clone()) {
            Some(snapshot) => {
                self.layers = snapshot;
                self.prune_dangling();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn checkpoint(&mut self) {
        self.history.record(self.layers.clone());
    }

    /// Drop selection/checked entries whose layer no longer exists in the
    /// sequence (after an undo/redo swap).
    fn prune_dangling(&mut self) {
        let ids: HashSet<LayerId> = self.layers.iter().map(|l| l.id).collect();
        self.selection.retain(|id| ids.contains(id));
        self.checked.retain(|id| ids.contains(id));
    }
}
