//! Layer data model.

use crate::geometry;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A unique identifier for a layer. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to decoded pixel data. The pixels themselves are owned by
/// the rendering collaborator; the core only carries the handle around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(Uuid);

impl ImageHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ImageHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// One imported image placed on the canvas.
///
/// `position` is the top-left of the *rotated bounding box*, not of the
/// unrotated image. `rotation` is in degrees and unrestricted: callers may
/// store values past 360 and we only normalize when computing the box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub image: ImageHandle,
    /// Display name; doubles as the `filename` field on export.
    pub name: String,
    /// Bounding-box top-left in world coordinates.
    pub position: Point,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Uniform scale applied before rotation.
    pub scale: f64,
    /// Opacity in [0, 1].
    pub opacity: f64,
    pub visible: bool,
    /// Intrinsic (unrotated, unscaled) pixel width. Immutable after creation.
    width: f64,
    /// Intrinsic pixel height. Immutable after creation.
    height: f64,
}

impl Layer {
    /// Create a layer with default placement: origin, no rotation, unit
    /// scale, fully opaque, visible. Non-finite dimensions are coerced to 0.
    pub fn new(image: ImageHandle, name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: LayerId::new(),
            image,
            name: name.into(),
            position: Point::ZERO,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
            visible: true,
            width: if width.is_finite() { width } else { 0.0 },
            height: if height.is_finite() { height } else { 0.0 },
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Axis-aligned bounding box of the scaled, rotated image in world
    /// coordinates.
    pub fn bounds(&self) -> Rect {
        let size = geometry::bounding_box(self.width, self.height, self.rotation, self.scale);
        Rect::from_origin_size(self.position, size)
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Shallow-merge a patch into this layer. A rotation or scale change
    /// re-anchors the layer so its bounding-box center stays put.
    pub fn apply_patch(&mut self, patch: &LayerPatch) {
        if patch.rotation.is_some() || patch.scale.is_some() {
            let new_rotation = patch.rotation.unwrap_or(self.rotation);
            let new_scale = sanitize_scale(patch.scale.unwrap_or(self.scale));
            self.position = geometry::recenter_for_transform(
                self.position,
                self.width,
                self.height,
                self.rotation,
                self.scale,
                new_rotation,
                new_scale,
            );
            self.rotation = new_rotation;
            self.scale = new_scale;
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
    }
}

/// Degenerate scale entries (non-finite or non-positive) fall back to 1.
fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// A partial update to one or more layers. All fields optional; `None`
/// leaves the current value alone.
///
/// Visibility is deliberately absent: visibility toggles bypass the undo
/// history and go through [`crate::store::LayerStore::set_visible`] instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerPatch {
    pub name: Option<String>,
    pub rotation: Option<f64>,
    pub scale: Option<f64>,
    pub opacity: Option<f64>,
}

impl LayerPatch {
    pub fn rotation(rotation: f64) -> Self {
        Self {
            rotation: Some(rotation),
            ..Self::default()
        }
    }

    pub fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn opacity(opacity: f64) -> Self {
        Self {
            opacity: Some(opacity),
            ..Self::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// True if applying this patch moves the layer through the recentering
    /// path.
    pub fn changes_transform(&self) -> bool {
        self.rotation.is_some() || self.scale.is_some()
    }
}
