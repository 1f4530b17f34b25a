//! Serialized record shapes and the item ↔ record conversion.
//!
//! Records are the plain nested structure written to host attributes and
//! data files:
//!
//! ```text
//! Character: { snapshot?, tabs?: [Tab] }
//! Tab:       { name, background?, controls?: [Item] }
//! Item:      { position, handles, color?, text?, text_size?, text_color?,
//!              controls?, menus?, action_mode?, action_script? }
//! ```
//!
//! Fields equal to their default are left out on encode and read back as
//! the default on decode, which keeps payloads small and lets older and
//! newer records load each other.

use crate::geometry::{GeometryError, ShapeGeometry};
use crate::model::{CustomMenu, DEFAULT_TEXT_SIZE, PickerItem, Rgba, qualify_control};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Tab name used when a record carries none.
pub const DEFAULT_TAB_NAME: &str = "default";

// ─── Records ─────────────────────────────────────────────────────────────

/// Serialized picker item. Every key is optional so a record can also
/// carry a partial update (see paste-with-mask).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handles: Option<Vec<[f64; 2]>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Rgba>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menus: Option<Vec<CustomMenu>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_mode: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_script: Option<String>,
}

/// Serialized tab. Items are listed back to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabRecord {
    #[serde(default = "default_tab_name")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default, rename = "controls", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemRecord>,
}

impl TabRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: None,
            items: Vec::new(),
        }
    }
}

fn default_tab_name() -> String {
    DEFAULT_TAB_NAME.to_string()
}

/// Serialized character: the root of one persisted picker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tabs: Vec<TabRecord>,
}

impl CharacterRecord {
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_none() && self.tabs.is_empty()
    }

    /// Whether any item of any tab lists `control` once its stored names
    /// are prefixed with `namespace`.
    pub fn references(&self, control: &str, namespace: Option<&str>) -> bool {
        self.tabs
            .iter()
            .flat_map(|tab| &tab.items)
            .filter_map(|item| item.controls.as_ref())
            .flatten()
            .any(|stored| qualify_control(stored, namespace) == control)
    }
}

// ─── Item conversion ──────────────────────────────────────────────────────

impl PickerItem {
    /// Encode the item, leaving out every field still at its default.
    /// Position and handles are always written.
    pub fn get_data(&self) -> ItemRecord {
        let mut data = ItemRecord {
            position: Some([self.position.x, self.position.y]),
            handles: Some(
                self.geometry
                    .points()
                    .iter()
                    .map(|pt| [pt.x, pt.y])
                    .collect(),
            ),
            ..ItemRecord::default()
        };

        if self.color != Rgba::DEFAULT_FILL {
            data.color = Some(self.color);
        }
        if let Some(text) = self.text.as_ref().filter(|t| !t.is_empty()) {
            data.text = Some(text.clone());
        }
        if self.text_size != DEFAULT_TEXT_SIZE {
            data.text_size = Some(self.text_size);
        }
        if self.text_color != Rgba::DEFAULT_TEXT {
            data.text_color = Some(self.text_color);
        }
        if !self.controls.is_empty() {
            data.controls = Some(self.controls.clone());
        }
        if !self.menus.is_empty() {
            data.menus = Some(self.menus.clone());
        }
        if self.action.enabled {
            data.action_mode = Some(true);
            data.action_script = self.action.script.clone();
        }

        data
    }

    /// Encode every field, defaults included. Merging the result with
    /// `set_data` reproduces the item whatever the target held before.
    pub fn get_full_data(&self) -> ItemRecord {
        ItemRecord {
            color: Some(self.color),
            text: Some(self.text.clone().unwrap_or_default()),
            text_size: Some(self.text_size),
            text_color: Some(self.text_color),
            controls: Some(self.controls.clone()),
            menus: Some(self.menus.clone()),
            action_mode: Some(self.action.enabled),
            action_script: Some(self.action.script.clone().unwrap_or_default()),
            ..self.get_data()
        }
    }

    /// Apply every key present in `data`; absent keys leave the current
    /// value untouched. The item is unchanged if the handles are invalid.
    ///
    /// # Errors
    /// Returns `TooFewPoints` when `handles` holds fewer than two points.
    pub fn set_data(&mut self, data: &ItemRecord) -> Result<(), GeometryError> {
        let geometry = data
            .handles
            .as_ref()
            .map(|handles| ShapeGeometry::new(handles.iter().map(|&[x, y]| Point::new(x, y))))
            .transpose()?;

        if let Some(geometry) = geometry {
            self.geometry = geometry;
        }
        if let Some([x, y]) = data.position {
            self.position = Point::new(x, y);
        }
        if let Some(color) = data.color {
            self.color = color;
        }
        if let Some(text) = &data.text {
            self.text = Some(text.clone()).filter(|t| !t.is_empty());
        }
        if let Some(size) = data.text_size {
            self.text_size = size;
        }
        if let Some(color) = data.text_color {
            self.text_color = color;
        }
        if let Some(controls) = &data.controls {
            self.controls = controls.clone();
        }
        if let Some(menus) = &data.menus {
            self.menus = menus.clone();
        }
        if let Some(enabled) = data.action_mode {
            self.action.enabled = enabled;
        }
        if let Some(script) = &data.action_script {
            self.action.script = Some(script.clone()).filter(|s| !s.is_empty());
        }

        Ok(())
    }

    /// Build an item from a record; absent keys fall back to defaults.
    pub fn from_data(data: &ItemRecord) -> Result<Self, GeometryError> {
        let mut item = PickerItem::new();
        item.set_data(data)?;
        Ok(item)
    }
}
