//! Character → tab → item hierarchy.
//!
//! A `CharacterData` is the root of one persisted picker. It owns its tabs;
//! each tab owns a z-ordered `Scene` of picker items plus an optional
//! background image. Tab names are expected to be unique but that is not
//! enforced here (see `lint.rs`).

use crate::geometry::GeometryError;
use crate::id::ItemId;
use crate::model::PickerItem;
use crate::record::{CharacterRecord, TabRecord};
use crate::scene::Scene;

// ─── Tab ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct TabData {
    pub name: String,
    /// Background image path.
    pub background: Option<String>,
    pub scene: Scene,
}

impl TabData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: None,
            scene: Scene::new(),
        }
    }

    pub fn add_item(&mut self, item: PickerItem) -> ItemId {
        self.scene.add(item)
    }

    /// Encode the tab with its items listed back to front.
    pub fn get_data(&self) -> TabRecord {
        TabRecord {
            name: self.name.clone(),
            background: self.background.clone().filter(|b| !b.is_empty()),
            items: self.scene.iter().map(|(_, item)| item.get_data()).collect(),
        }
    }

    /// Replace the tab's content with `data`. On error the tab is left
    /// as it was.
    pub fn set_data(&mut self, data: &TabRecord) -> Result<(), GeometryError> {
        let items = data
            .items
            .iter()
            .map(PickerItem::from_data)
            .collect::<Result<Vec<_>, _>>()?;

        self.name = data.name.clone();
        self.background = data.background.clone();
        self.scene.set_items(items);
        Ok(())
    }

    pub fn from_data(data: &TabRecord) -> Result<Self, GeometryError> {
        let mut tab = TabData::default();
        tab.set_data(data)?;
        Ok(tab)
    }
}

// ─── Character ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CharacterData {
    /// Snapshot image path shown in the character selector.
    pub snapshot: Option<String>,
    pub tabs: Vec<TabData>,
}

impl CharacterData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_data(&self) -> CharacterRecord {
        CharacterRecord {
            snapshot: self.snapshot.clone().filter(|s| !s.is_empty()),
            tabs: self.tabs.iter().map(TabData::get_data).collect(),
        }
    }

    /// Replace every tab with the content of `data`. On error the
    /// character is left as it was.
    pub fn set_data(&mut self, data: &CharacterRecord) -> Result<(), GeometryError> {
        let tabs = data
            .tabs
            .iter()
            .map(TabData::from_data)
            .collect::<Result<Vec<_>, _>>()?;

        self.snapshot = data.snapshot.clone();
        self.tabs = tabs;
        Ok(())
    }

    pub fn from_data(data: &CharacterRecord) -> Result<Self, GeometryError> {
        let mut character = CharacterData::new();
        character.set_data(data)?;
        Ok(character)
    }

    /// Append a tab and return its index.
    pub fn add_tab(&mut self, tab: TabData) -> usize {
        self.tabs.push(tab);
        self.tabs.len() - 1
    }

    /// Remove the tab at `index`, destroying its items.
    pub fn remove_tab(&mut self, index: usize) -> Option<TabData> {
        (index < self.tabs.len()).then(|| self.tabs.remove(index))
    }

    pub fn rename_tab(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.tabs.get_mut(index) {
            Some(tab) => {
                tab.name = name.into();
                true
            }
            None => false,
        }
    }

    /// First tab called `name`.
    pub fn tab(&self, name: &str) -> Option<&TabData> {
        self.tabs.iter().find(|t| t.name == name)
    }

    pub fn tab_mut(&mut self, name: &str) -> Option<&mut TabData> {
        self.tabs.iter_mut().find(|t| t.name == name)
    }

    /// Every item of every tab, tab by tab, back to front.
    pub fn all_items(&self) -> impl Iterator<Item = &PickerItem> {
        self.tabs
            .iter()
            .flat_map(|tab| tab.scene.iter().map(|(_, item)| item))
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
        self.tabs.clear();
    }
}
