//! Pointer and keyboard interaction state machine.
//!
//! Translates raw pointer/keyboard events into pan, drag, and
//! marquee-selection operations on the [`LayerStore`] and [`Viewport`].
//! Exactly one of four modes is active at a time; a mode is entered on
//! pointer-down and exited on pointer-up (or on space key-up for a
//! space-initiated pan). The embedding UI is expected to keep move/up
//! handlers attached at window scope for the duration of a drag so the
//! gesture survives the pointer leaving the canvas.

use crate::layer::LayerId;
use crate::store::LayerStore;
use crate::viewport::Viewport;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Any modifier that makes a layer click toggle instead of replace.
    fn toggles_selection(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Keys the controller reacts to. Everything else is the embedding UI's
/// business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Delete,
    Backspace,
    Space,
    Z,
    Y,
}

/// The four mutually exclusive interaction modes.
#[derive(Debug, Clone)]
enum Mode {
    Idle,
    PanCanvas {
        /// Space-initiated pans also end on space key-up.
        via_space: bool,
    },
    DragLayer {
        /// Screen position of the initiating pointer-down.
        pointer_start: Point,
        /// Drag-start position of every selected layer.
        origins: Vec<(LayerId, Point)>,
    },
    BoxSelect {
        /// Screen position where the marquee was anchored.
        anchor: Point,
        /// Current opposite corner of the marquee.
        cursor: Point,
        /// Selection the marquee adds to (pre-drag selection with shift,
        /// empty otherwise). Members are never removed by the marquee.
        base: HashSet<LayerId>,
    },
}

/// Pointer/keyboard state machine driving store and viewport mutations.
#[derive(Debug)]
pub struct Controller {
    mode: Mode,
    space_held: bool,
    text_input_focused: bool,
    last_pointer: Point,
    /// World-unit step for arrow-key nudges without shift.
    pub nudge_step: f64,
    /// World-unit step for arrow-key nudges with shift.
    pub nudge_step_large: f64,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            mode: Mode::Idle,
            space_held: false,
            text_input_focused: false,
            last_pointer: Point::ZERO,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tell the controller whether a text input currently has focus. All
    /// keyboard handling is suppressed while it does, so typing a layer name
    /// never deletes layers.
    pub fn set_text_input_focus(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.mode, Mode::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.mode, Mode::PanCanvas { .. })
    }

    pub fn is_dragging_layers(&self) -> bool {
        matches!(self.mode, Mode::DragLayer { .. })
    }

    /// Current marquee rectangle in screen pixels, if a box-select is
    /// active. Read by the rendering layer to paint the rubber band.
    pub fn marquee(&self) -> Option<Rect> {
        match &self.mode {
            Mode::BoxSelect { anchor, cursor, .. } => Some(Rect::from_points(*anchor, *cursor)),
            _ => None,
        }
    }

    /// Handle pointer-down at `position` (screen coordinates).
    pub fn pointer_down(
        &mut self,
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
        store: &mut LayerStore,
        viewport: &Viewport,
    ) {
        self.last_pointer = position;
        if !self.is_idle() {
            return;
        }

        let world = viewport.screen_to_world(position);
        let hit = store.topmost_visible_at(world);

        let wants_pan = self.space_held
            || button == MouseButton::Middle
            || (modifiers.command() && hit.is_none());
        if wants_pan {
            self.mode = Mode::PanCanvas {
                via_space: self.space_held && button != MouseButton::Middle,
            };
            return;
        }

        if button != MouseButton::Left {
            return;
        }

        match hit {
            Some(id) => {
                if modifiers.toggles_selection() {
                    store.toggle_selection(id, true);
                } else if !store.is_selected(id) {
                    // Clicking inside an existing multi-selection keeps the
                    // group so the whole group drags together.
                    store.toggle_selection(id, false);
                }

                // Only drag if the clicked layer ended up selected; a
                // modifier click that removed it from the selection starts
                // nothing.
                if store.is_selected(id) {
                    store.begin_drag();
                    let origins = store
                        .layers()
                        .iter()
                        .filter(|l| store.is_selected(l.id))
                        .map(|l| (l.id, l.position))
                        .collect();
                    self.mode = Mode::DragLayer {
                        pointer_start: position,
                        origins,
                    };
                }
            }
            None => {
                let base = if modifiers.shift {
                    store.selection().clone()
                } else {
                    HashSet::new()
                };
                store.replace_selection(base.clone());
                self.mode = Mode::BoxSelect {
                    anchor: position,
                    cursor: position,
                    base,
                };
            }
        }
    }

    /// Handle pointer movement to `position` (screen coordinates).
    pub fn pointer_move(
        &mut self,
        position: Point,
        store: &mut LayerStore,
        viewport: &mut Viewport,
    ) {
        let delta = position - self.last_pointer;
        self.last_pointer = position;

        match &mut self.mode {
            Mode::Idle => {}
            Mode::PanCanvas { .. } => {
                viewport.pan_by(delta);
            }
            Mode::DragLayer {
                pointer_start,
                origins,
            } => {
                // Screen delta over the whole gesture, converted to world
                // units; each layer offsets from its own start position.
                let drag = (position - *pointer_start) / viewport.zoom;
                for (id, origin) in origins.iter() {
                    store.move_layer_to(*id, *origin + drag);
                }
            }
            Mode::BoxSelect {
                anchor,
                cursor,
                base,
            } => {
                *cursor = position;
                let marquee = Rect::from_points(*anchor, *cursor);

                // Axis-aligned intersection against the zoom-and-pan
                // transformed bounding box. Rotated layers are tested by
                // their AABB, which over-selects near corners; that
                // looseness is a deliberate trade-off, not a bug.
                let mut next = base.clone();
                for layer in store.layers() {
                    if !layer.visible {
                        continue;
                    }
                    let screen_bounds = viewport.world_rect_to_screen(layer.bounds());
                    if marquee.intersect(screen_bounds).area() > 0.0 {
                        next.insert(layer.id);
                    }
                }
                store.replace_selection(next);
            }
        }
    }

    /// Handle pointer-up. Ends whatever mode is active.
    pub fn pointer_up(&mut self, position: Point) {
        self.last_pointer = position;
        self.mode = Mode::Idle;
    }

    /// Handle a key press.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers, store: &mut LayerStore) {
        if self.text_input_focused {
            return;
        }
        match key {
            Key::Space => {
                self.space_held = true;
            }
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                let step = if modifiers.shift {
                    self.nudge_step_large
                } else {
                    self.nudge_step
                };
                let delta = match key {
                    Key::ArrowUp => Vec2::new(0.0, -step),
                    Key::ArrowDown => Vec2::new(0.0, step),
                    Key::ArrowLeft => Vec2::new(-step, 0.0),
                    Key::ArrowRight => Vec2::new(step, 0.0),
                    _ => unreachable!(),
                };
                store.nudge_selected(delta);
            }
            Key::Delete | Key::Backspace => {
                store.delete_selected();
            }
            Key::Z if modifiers.command() => {
                if modifiers.shift {
                    store.redo();
                } else {
                    store.undo();
                }
            }
            Key::Y if modifiers.command() => {
                store.redo();
            }
            _ => {}
        }
    }

    /// Handle a key release.
    pub fn key_up(&mut self, key: Key) {
        if key == Key::Space {
            self.space_held = false;
            if matches!(self.mode, Mode::PanCanvas { via_space: true }) {
                self.mode = Mode::Idle;
            }
        }
    }
}
