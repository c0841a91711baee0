//! StackAlign Core Library
//!
//! Platform-agnostic state and geometry for the StackAlign image aligner:
//! an ordered stack of raster layers, the rotated-bounding-box coordinate
//! model that keeps layers visually centered through rotation and scale
//! changes, snapshot undo/redo, the pointer interaction state machine, and
//! deterministic placement export for the downstream affine-warp routine.
//!
//! Rendering and window plumbing live outside this crate; the core only
//! hands out bounding boxes, transforms, and opaque image handles.

pub mod edit_buffer;
pub mod export;
pub mod geometry;
pub mod history;
pub mod import;
pub mod interaction;
pub mod layer;
#[cfg(not(target_arch = "wasm32"))]
pub mod prefs;
pub mod store;
pub mod viewport;

pub use edit_buffer::EditBuffer;
pub use export::{ExportRecord, can_export, export_records, to_csv, to_json};
pub use history::{History, MAX_UNDO_HISTORY, Snapshot};
pub use import::{DecodeError, DecodedImage, ImportBatch};
pub use interaction::{Controller, Key, Modifiers, MouseButton};
pub use layer::{ImageHandle, Layer, LayerId, LayerPatch};
#[cfg(not(target_arch = "wasm32"))]
pub use prefs::Preferences;
pub use store::LayerStore;
pub use viewport::Viewport;
