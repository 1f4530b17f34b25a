//! Z-ordered item arena for one picker tab.
//!
//! The scene owns its items by value. Each item carries an explicit
//! z-index drawn from a monotonically increasing counter: adding an item or
//! bringing it to the front stamps it with the current counter value.
//! Removing an item from the scene destroys it.

use crate::id::ItemId;
use crate::model::PickerItem;
use crate::transform::{ControlResolver, ControlRename, RenameReport};
use kurbo::Rect;

// ─── Config ───────────────────────────────────────────────────────────────

/// Default scene extent, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 600.0,
        }
    }
}

impl SceneConfig {
    pub fn scene_rect(&self) -> Rect {
        Rect::new(
            -self.width / 2.0,
            -self.height / 2.0,
            self.width / 2.0,
            self.height / 2.0,
        )
    }
}

// ─── Scene ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct SceneEntry {
    id: ItemId,
    z_index: u64,
    item: PickerItem,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Insertion order; paint order comes from `z_index`.
    entries: Vec<SceneEntry>,
    z_counter: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item on top of every other item.
    pub fn add(&mut self, item: PickerItem) -> ItemId {
        let id = ItemId::next();
        let z_index = self.next_z();
        self.entries.push(SceneEntry { id, z_index, item });
        id
    }

    /// Remove and return an item.
    pub fn remove(&mut self, id: ItemId) -> Option<PickerItem> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).item)
    }

    pub fn get(&self, id: ItemId) -> Option<&PickerItem> {
        self.entry(id).map(|e| &e.item)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut PickerItem> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.item)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.entry(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn z_index(&self, id: ItemId) -> Option<u64> {
        self.entry(id).map(|e| e.z_index)
    }

    /// Drop every item and reset the z counter.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.z_counter = 0;
    }

    /// Replace the scene content; `items` are stacked back to front.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = PickerItem>) -> Vec<ItemId> {
        self.clear();
        items.into_iter().map(|item| self.add(item)).collect()
    }

    // ── Z-order ──

    /// Restamp `id` with the current counter so it sits above everything.
    /// Returns false if the item is not in this scene.
    pub fn move_to_front(&mut self, id: ItemId) -> bool {
        let z = self.z_counter;
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.z_index = z;
                self.z_counter += 1;
                true
            }
            None => false,
        }
    }

    /// Put `id` behind every sibling, keeping the others' relative order.
    ///
    /// Rebuilds the stack by bringing each item to the front in the new
    /// order, `id` first. Running it twice gives the same ordering.
    pub fn move_to_back(&mut self, id: ItemId) -> bool {
        let mut order = self.back_to_front();
        let Some(pos) = order.iter().position(|&i| i == id) else {
            return false;
        };
        order.remove(pos);
        order.insert(0, id);
        for item_id in order {
            self.move_to_front(item_id);
        }
        true
    }

    /// Item ids sorted by ascending z-index.
    pub fn back_to_front(&self) -> Vec<ItemId> {
        self.sorted_entries().into_iter().map(|e| e.id).collect()
    }

    /// Items in paint order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &PickerItem)> {
        self.sorted_entries().into_iter().map(|e| (e.id, &e.item))
    }

    /// Items front to back, the order hit testing walks them.
    pub fn iter_front_to_back(&self) -> impl Iterator<Item = (ItemId, &PickerItem)> {
        self.sorted_entries()
            .into_iter()
            .rev()
            .map(|e| (e.id, &e.item))
    }

    // ── Duplication ──

    /// Add an independent copy of `id` on top of the scene.
    pub fn duplicate(&mut self, id: ItemId) -> Option<ItemId> {
        let copy = self.get(id)?.duplicate();
        Some(self.add(copy))
    }

    /// Add a mirrored copy of `id`, renaming its controls with `rename`.
    pub fn duplicate_and_mirror(
        &mut self,
        id: ItemId,
        rename: Option<&ControlRename>,
        namespace: Option<&str>,
        resolver: &dyn ControlResolver,
    ) -> Option<(ItemId, RenameReport)> {
        let (copy, report) = self
            .get(id)?
            .duplicate_and_mirror(rename, namespace, resolver);
        Some((self.add(copy), report))
    }

    // ── Queries ──

    /// Union of every item's bounds grown by `margin` on each side.
    /// `None` for an empty scene.
    pub fn items_bounding_rect(&self, margin: f64) -> Option<Rect> {
        self.entries
            .iter()
            .map(|e| e.item.bounding_box())
            .reduce(|acc, r| acc.union(r))
            .map(|r| r.inflate(margin, margin))
    }

    /// Item bounds grown by `margin`, or the default scene rect when the
    /// scene is empty.
    pub fn bounding_rect(&self, margin: f64, config: &SceneConfig) -> Rect {
        self.items_bounding_rect(margin)
            .unwrap_or_else(|| config.scene_rect())
    }

    /// Every stored control name in paint order, duplicates removed.
    pub fn all_controls(&self) -> Vec<String> {
        let mut controls: Vec<String> = Vec::new();
        for (_, item) in self.iter() {
            for ctrl in item.controls() {
                if !controls.contains(ctrl) {
                    controls.push(ctrl.clone());
                }
            }
        }
        controls
    }

    /// Show or hide handles on every item.
    pub fn set_edit_status(&mut self, status: bool) {
        for entry in &mut self.entries {
            entry.item.edit_status = status;
        }
    }

    fn entry(&self, id: ItemId) -> Option<&SceneEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn sorted_entries(&self) -> Vec<&SceneEntry> {
        let mut sorted: Vec<&SceneEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.z_index);
        sorted
    }

    fn next_z(&mut self) -> u64 {
        let z = self.z_counter;
        self.z_counter += 1;
        z
    }
}
