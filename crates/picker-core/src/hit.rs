//! Hit testing: scene point → picker item lookup.
//!
//! Walks the scene front-to-back so the topmost item under the cursor wins.

use crate::id::ItemId;
use crate::model::PickerItem;
use crate::scene::Scene;
use kurbo::{Point, Rect};

/// Radius of the disc drawn for each handle in edit mode.
pub const HANDLE_RADIUS: f64 = 4.0;

/// Something that can answer "is this scene point on me?".
pub trait Hoverable {
    fn hit(&self, scene_point: Point) -> bool;
}

impl Hoverable for PickerItem {
    /// The shape outline, plus the handle discs while handles are shown.
    fn hit(&self, scene_point: Point) -> bool {
        if self.geometry.contains(self.to_local(scene_point)) {
            return true;
        }
        self.edit_status && self.handle_at(scene_point, HANDLE_RADIUS).is_some()
    }
}

/// Find the topmost item at `point`.
/// Returns `None` if no item is hit (background).
pub fn hit_test(scene: &Scene, point: Point) -> Option<ItemId> {
    let hit = scene
        .iter_front_to_back()
        .find(|(_, item)| item.hit(point))
        .map(|(id, _)| id);
    log::trace!("hit_test ({}, {}) -> {:?}", point.x, point.y, hit);
    hit
}

/// Every item whose bounds intersect `rect`, back to front.
/// Used for marquee (box) selection.
pub fn hit_test_rect(scene: &Scene, rect: Rect) -> Vec<ItemId> {
    scene
        .iter()
        .filter(|(_, item)| item.bounding_box().overlaps(rect))
        .map(|(id, _)| id)
        .collect()
}
