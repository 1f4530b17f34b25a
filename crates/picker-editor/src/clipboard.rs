//! Item copy/paste with a field mask.
//!
//! Copy stores an item's full record. Paste filters that record through the
//! mask and merges what is left onto the target, so unchecked fields keep
//! the target's own values.

use crate::error::{EditorError, Result};
use picker_core::{ItemRecord, PickerItem};

/// Item fields the paste mask can switch on or off, in dialog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyField {
    Position,
    Color,
    ActionMode,
    ActionScript,
    Handles,
    Text,
    TextSize,
    TextColor,
    Controls,
    Menus,
}

impl CopyField {
    pub const ALL: [CopyField; 10] = [
        CopyField::Position,
        CopyField::Color,
        CopyField::ActionMode,
        CopyField::ActionScript,
        CopyField::Handles,
        CopyField::Text,
        CopyField::TextSize,
        CopyField::TextColor,
        CopyField::Controls,
        CopyField::Menus,
    ];

    /// Record key the field maps to.
    pub fn key(self) -> &'static str {
        match self {
            CopyField::Position => "position",
            CopyField::Color => "color",
            CopyField::ActionMode => "action_mode",
            CopyField::ActionScript => "action_script",
            CopyField::Handles => "handles",
            CopyField::Text => "text",
            CopyField::TextSize => "text_size",
            CopyField::TextColor => "text_color",
            CopyField::Controls => "controls",
            CopyField::Menus => "menus",
        }
    }

    /// Dialog label, e.g. "Text size".
    pub fn label(self) -> String {
        let spaced = self.key().replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Which fields a paste applies. Everything but position is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyMask {
    enabled: [bool; 10],
}

impl Default for CopyMask {
    fn default() -> Self {
        let mut enabled = [true; 10];
        enabled[CopyField::Position.index()] = false;
        Self { enabled }
    }
}

impl CopyMask {
    pub fn is_enabled(&self, field: CopyField) -> bool {
        self.enabled[field.index()]
    }

    pub fn set(&mut self, field: CopyField, enabled: bool) {
        self.enabled[field.index()] = enabled;
    }

    /// Enabled fields in dialog order.
    pub fn enabled_fields(&self) -> impl Iterator<Item = CopyField> + '_ {
        CopyField::ALL
            .into_iter()
            .filter(|field| self.is_enabled(*field))
    }

    /// Keep only the enabled keys of `data`.
    pub fn filter(&self, data: &ItemRecord) -> ItemRecord {
        let keep = |field: CopyField| self.is_enabled(field);
        ItemRecord {
            position: data.position.filter(|_| keep(CopyField::Position)),
            handles: data.handles.clone().filter(|_| keep(CopyField::Handles)),
            color: data.color.filter(|_| keep(CopyField::Color)),
            text: data.text.clone().filter(|_| keep(CopyField::Text)),
            text_size: data.text_size.filter(|_| keep(CopyField::TextSize)),
            text_color: data.text_color.filter(|_| keep(CopyField::TextColor)),
            controls: data.controls.clone().filter(|_| keep(CopyField::Controls)),
            menus: data.menus.clone().filter(|_| keep(CopyField::Menus)),
            action_mode: data.action_mode.filter(|_| keep(CopyField::ActionMode)),
            action_script: data
                .action_script
                .clone()
                .filter(|_| keep(CopyField::ActionScript)),
        }
    }
}

/// Copy buffer shared by every item of a session.
#[derive(Debug, Clone, Default)]
pub struct ItemClipboard {
    data: Option<ItemRecord>,
    pub mask: CopyMask,
}

impl ItemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `item`'s full record, defaults included, replacing any
    /// previous copy.
    pub fn copy(&mut self, item: &PickerItem) {
        self.data = Some(item.get_full_data());
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&ItemRecord> {
        self.data.as_ref()
    }

    pub fn clear(&mut self) {
        self.data = None;
    }

    /// Merge the masked copy onto `target`.
    ///
    /// # Errors
    /// `EmptyClipboard` if nothing was copied yet.
    pub fn paste(&self, target: &mut PickerItem) -> Result<()> {
        let data = self.data.as_ref().ok_or(EditorError::EmptyClipboard)?;
        target.set_data(&self.mask.filter(data))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picker_core::kurbo::Point;
    use picker_core::{CustomMenu, Rgba};
    use pretty_assertions::assert_eq;

    fn source() -> PickerItem {
        let mut item = PickerItem::new();
        item.set_position(Point::new(80.0, 10.0));
        item.set_handle_count(3).unwrap();
        item.set_color(Rgba::new(255, 0, 0, 255));
        item.set_text(Some("IK".into()));
        item.set_controls(vec!["foot_IK_L".into()]);
        item.set_menus(vec![CustomMenu::new("snap", "snap()")]);
        item
    }

    #[test]
    fn default_mask_skips_position() {
        let mask = CopyMask::default();
        assert!(!mask.is_enabled(CopyField::Position));
        assert_eq!(mask.enabled_fields().count(), 9);
    }

    #[test]
    fn paste_applies_everything_but_position() {
        let mut clipboard = ItemClipboard::new();
        clipboard.copy(&source());

        let mut target = PickerItem::new();
        target.set_position(Point::new(-5.0, -5.0));
        clipboard.paste(&mut target).unwrap();

        assert_eq!(target.position(), Point::new(-5.0, -5.0));
        assert_eq!(target.color(), Rgba::new(255, 0, 0, 255));
        assert_eq!(target.handle_count(), 3);
        assert_eq!(target.text(), Some("IK"));
        assert_eq!(target.controls(), &["foot_IK_L"]);
    }

    #[test]
    fn disabled_fields_keep_target_values() {
        let mut clipboard = ItemClipboard::new();
        clipboard.copy(&source());
        clipboard.mask.set(CopyField::Color, false);
        clipboard.mask.set(CopyField::Controls, false);
        clipboard.mask.set(CopyField::Position, true);

        let mut target = PickerItem::new();
        target.set_controls(vec!["hip".into()]);
        clipboard.paste(&mut target).unwrap();

        assert_eq!(target.color(), Rgba::DEFAULT_FILL);
        assert_eq!(target.controls(), &["hip"]);
        assert_eq!(target.position(), Point::new(80.0, 10.0));
    }

    #[test]
    fn default_source_resets_target_fields() {
        let mut clipboard = ItemClipboard::new();
        clipboard.copy(&PickerItem::new());

        let mut target = source();
        target.set_text_size(3.0);
        target.set_action_mode(true);
        target.set_action_script(Some("go()".into()));
        clipboard.paste(&mut target).unwrap();

        assert_eq!(target.color(), Rgba::DEFAULT_FILL);
        assert_eq!(target.text_size(), 1.0);
        assert_eq!(target.text(), None);
        assert!(target.controls().is_empty());
        assert!(target.menus().is_empty());
        assert!(!target.action().enabled);
        assert_eq!(target.action().script, None);
        assert_eq!(target.position(), Point::new(80.0, 10.0));
    }

    #[test]
    fn paste_without_copy_fails() {
        let clipboard = ItemClipboard::new();
        let mut target = PickerItem::new();
        assert!(matches!(
            clipboard.paste(&mut target),
            Err(EditorError::EmptyClipboard)
        ));
    }

    #[test]
    fn field_labels() {
        assert_eq!(CopyField::TextSize.label(), "Text size");
        assert_eq!(CopyField::Position.label(), "Position");
        assert_eq!(CopyField::ALL.len(), 10);
    }
}
