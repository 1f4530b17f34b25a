//! Editing session.
//!
//! One `Session` per picker window. It owns the process-wide editing state
//! (edit mode, copy buffer and mask, last used colors) and is the entry
//! point for every item mutation a front end triggers. Shape and z-order
//! changes are refused outside edit mode.

use crate::clipboard::ItemClipboard;
use crate::controls::{NodeSelector, SelectModifier, SelectionProvider, item_is_selected, select_item_controls};
use crate::error::{EditorError, Result};
use crate::mode::EditMode;
use crate::script::{ScriptSandbox, run_custom_action};
use picker_core::kurbo::{Point, Rect, Vec2};
use picker_core::{
    ControlRename, ControlResolver, ItemId, PickerItem, RenameReport, Rgba, Scene, SceneConfig,
    StyleContext, hit_test,
};

/// What a click in the picker view did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing under the cursor.
    Background,
    /// Edit mode: the item was picked for editing, the host was not touched.
    Picked(ItemId),
    /// The item's custom action ran.
    ActionRun(ItemId),
    /// The item's controls were selected on the host.
    Selected { item: ItemId, nodes: Vec<String> },
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub edit_mode: EditMode,
    pub clipboard: ItemClipboard,
    pub style: StyleContext,
    pub scene_config: SceneConfig,
}

impl Session {
    pub fn new(edit_mode: bool) -> Self {
        Self {
            edit_mode: EditMode::new(edit_mode),
            ..Self::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode.get()
    }

    fn require_edit_mode(&self) -> Result<()> {
        if self.is_editing() {
            Ok(())
        } else {
            Err(EditorError::EditModeRequired)
        }
    }

    /// Scene rect in edit mode, item bounds plus `margin` otherwise.
    pub fn scene_bounds(&self, scene: &Scene, margin: f64) -> Rect {
        if self.is_editing() {
            self.scene_config.scene_rect()
        } else {
            scene.bounding_rect(margin, &self.scene_config)
        }
    }

    /// Show or hide handles on every item of `scene` to match edit mode.
    pub fn apply_edit_status(&self, scene: &mut Scene) {
        scene.set_edit_status(self.is_editing());
    }

    // ─── Item creation & style ──────────────────────────────────────────

    /// Add a default item styled with the last used colors.
    pub fn new_item(&self, scene: &mut Scene) -> Result<ItemId> {
        self.require_edit_mode()?;
        let mut item = PickerItem::with_style(&self.style);
        item.set_edit_status(true);
        Ok(scene.add(item))
    }

    /// Set the fill and remember it for the next new item.
    pub fn set_item_color(&mut self, scene: &mut Scene, id: ItemId, color: Rgba) -> Result<()> {
        self.require_edit_mode()?;
        item_mut(scene, id)?.set_color(color);
        self.style.remember_fill(color);
        Ok(())
    }

    /// Set the label color and remember it for the next new item.
    pub fn set_item_text_color(&mut self, scene: &mut Scene, id: ItemId, color: Rgba) -> Result<()> {
        self.require_edit_mode()?;
        item_mut(scene, id)?.set_text_color(color);
        self.style.remember_text_color(color);
        Ok(())
    }

    // ─── Transforms ─────────────────────────────────────────────────────

    pub fn move_item(&self, scene: &mut Scene, id: ItemId, delta: Vec2) -> Result<()> {
        self.require_edit_mode()?;
        item_mut(scene, id)?.translate(delta);
        Ok(())
    }

    pub fn move_handle(&self, scene: &mut Scene, id: ItemId, index: usize, delta: Vec2) -> Result<()> {
        self.require_edit_mode()?;
        item_mut(scene, id)?.move_handle(index, delta)?;
        Ok(())
    }

    pub fn mirror(&self, scene: &mut Scene, id: ItemId) -> Result<()> {
        self.require_edit_mode()?;
        item_mut(scene, id)?.mirror();
        Ok(())
    }

    pub fn scale(&self, scene: &mut Scene, id: ItemId, x: f64, y: f64, world: bool) -> Result<()> {
        self.require_edit_mode()?;
        item_mut(scene, id)?.scale(x, y, world);
        Ok(())
    }

    pub fn set_handle_count(&self, scene: &mut Scene, id: ItemId, count: usize) -> Result<()> {
        self.require_edit_mode()?;
        item_mut(scene, id)?.set_handle_count(count)?;
        Ok(())
    }

    /// Copy `id` on top of the scene with its handles showing.
    pub fn duplicate(&self, scene: &mut Scene, id: ItemId) -> Result<ItemId> {
        self.require_edit_mode()?;
        let copy = scene.duplicate(id).ok_or(EditorError::ItemNotFound(id))?;
        item_mut(scene, copy)?.set_edit_status(true);
        Ok(copy)
    }

    /// Mirrored copy of `id`; `search_replace` renames the copy's controls.
    pub fn duplicate_and_mirror(
        &self,
        scene: &mut Scene,
        id: ItemId,
        search_replace: Option<(&str, &str)>,
        namespace: Option<&str>,
        resolver: &dyn ControlResolver,
    ) -> Result<(ItemId, RenameReport)> {
        self.require_edit_mode()?;
        let rename = search_replace
            .map(|(search, replace)| ControlRename::new(search, replace))
            .transpose()?;
        let (copy, report) = scene
            .duplicate_and_mirror(id, rename.as_ref(), namespace, resolver)
            .ok_or(EditorError::ItemNotFound(id))?;
        item_mut(scene, copy)?.set_edit_status(true);
        Ok((copy, report))
    }

    pub fn move_to_front(&self, scene: &mut Scene, id: ItemId) -> Result<()> {
        self.require_edit_mode()?;
        found(scene.move_to_front(id), id)
    }

    pub fn move_to_back(&self, scene: &mut Scene, id: ItemId) -> Result<()> {
        self.require_edit_mode()?;
        found(scene.move_to_back(id), id)
    }

    pub fn remove(&self, scene: &mut Scene, id: ItemId) -> Result<PickerItem> {
        self.require_edit_mode()?;
        scene.remove(id).ok_or(EditorError::ItemNotFound(id))
    }

    // ─── Copy / paste ───────────────────────────────────────────────────

    /// Store the item's data for a later paste. Allowed in either mode.
    pub fn copy(&mut self, scene: &Scene, id: ItemId) -> Result<()> {
        let item = scene.get(id).ok_or(EditorError::ItemNotFound(id))?;
        self.clipboard.copy(item);
        Ok(())
    }

    pub fn paste(&self, scene: &mut Scene, id: ItemId) -> Result<()> {
        self.require_edit_mode()?;
        self.clipboard.paste(item_mut(scene, id)?)
    }

    // ─── Animation mode interaction ─────────────────────────────────────

    /// Handle a left click at `point`.
    ///
    /// Outside edit mode an item with a custom action runs it; any other
    /// item selects its controls with `modifier`. A click on the
    /// background without modifier clears the host selection.
    pub fn click(
        &self,
        scene: &Scene,
        point: Point,
        modifier: SelectModifier,
        namespace: Option<&str>,
        selector: &mut dyn NodeSelector,
        sandbox: &mut dyn ScriptSandbox,
    ) -> Result<ClickOutcome> {
        let Some(id) = hit_test(scene, point) else {
            if modifier == SelectModifier::Replace && !self.is_editing() {
                selector.clear_selection();
            }
            return Ok(ClickOutcome::Background);
        };

        if self.is_editing() {
            return Ok(ClickOutcome::Picked(id));
        }

        let item = scene.get(id).ok_or(EditorError::ItemNotFound(id))?;
        if item.action().enabled {
            run_custom_action(item, namespace, &*selector, sandbox)?;
            return Ok(ClickOutcome::ActionRun(id));
        }

        let nodes = select_item_controls(item, namespace, modifier, selector);
        Ok(ClickOutcome::Selected { item: id, nodes })
    }

    /// Items whose single control is selected on the host, back to front.
    pub fn selected_items(
        &self,
        scene: &Scene,
        namespace: Option<&str>,
        selection: &mut dyn SelectionProvider,
    ) -> Vec<ItemId> {
        selection.update();
        scene
            .iter()
            .filter(|(_, item)| item_is_selected(item, namespace, &*selection))
            .map(|(id, _)| id)
            .collect()
    }
}

fn item_mut(scene: &mut Scene, id: ItemId) -> Result<&mut PickerItem> {
    scene.get_mut(id).ok_or(EditorError::ItemNotFound(id))
}

fn found(ok: bool, id: ItemId) -> Result<()> {
    if ok { Ok(()) } else { Err(EditorError::ItemNotFound(id)) }
}
