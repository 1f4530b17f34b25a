//! Picker item data model.
//!
//! A `PickerItem` is one clickable shape on a picker tab: a handle-based
//! outline placed at a single 2D position, a fill color, an optional text
//! label, and the host controls it selects. Control names are stored
//! without namespace; the owning character supplies the namespace when
//! names are resolved against the host.

use crate::geometry::{GeometryError, ShapeGeometry};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color with integer channels in `0..=255`.
/// Serialized as a `[r, g, b, a]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Default picker item fill.
    pub const DEFAULT_FILL: Rgba = Rgba::new(200, 200, 200, 180);
    /// Default picker item label color.
    pub const DEFAULT_TEXT: Rgba = Rgba::new(30, 30, 30, 180);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Red and blue swapped, the left/right color convention.
    pub const fn mirrored(self) -> Self {
        Self::new(self.b, self.g, self.r, self.a)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Colors handed to newly created items.
///
/// Carries the "last used color" explicitly instead of sharing it
/// between every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleContext {
    pub fill: Rgba,
    pub text_color: Rgba,
}

impl StyleContext {
    pub fn remember_fill(&mut self, color: Rgba) {
        self.fill = color;
    }

    pub fn remember_text_color(&mut self, color: Rgba) {
        self.text_color = color;
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            fill: Rgba::DEFAULT_FILL,
            text_color: Rgba::DEFAULT_TEXT,
        }
    }
}

// ─── Menus & actions ─────────────────────────────────────────────────────

/// Entry of an item's right-click menu.
/// Serialized as a `[name, script]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct CustomMenu {
    pub name: String,
    pub script: String,
}

impl CustomMenu {
    pub fn new(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
        }
    }
}

impl From<(String, String)> for CustomMenu {
    fn from((name, script): (String, String)) -> Self {
        Self { name, script }
    }
}

impl From<CustomMenu> for (String, String) {
    fn from(menu: CustomMenu) -> Self {
        (menu.name, menu.script)
    }
}

/// Script run on click in place of selecting the item's controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomAction {
    pub enabled: bool,
    pub script: Option<String>,
}

/// Expand a stored control name with `namespace`. Already qualified
/// names (`other:ctrl`) point outside the character and stay as they are.
pub fn qualify_control(ctrl: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() && !ctrl.contains(':') => format!("{ns}:{ctrl}"),
        _ => ctrl.to_string(),
    }
}

// ─── Picker item ─────────────────────────────────────────────────────────

/// Text size multiplier of an item without an override.
pub const DEFAULT_TEXT_SIZE: f64 = 1.0;

/// One clickable shape of a picker tab.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerItem {
    /// Handle outline in item-local coordinates.
    pub(crate) geometry: ShapeGeometry,
    /// Offset applied to the whole item.
    pub(crate) position: Point,
    pub(crate) color: Rgba,
    pub(crate) text: Option<String>,
    pub(crate) text_color: Rgba,
    pub(crate) text_size: f64,
    /// Host control names, without namespace.
    pub(crate) controls: Vec<String>,
    pub(crate) menus: Vec<CustomMenu>,
    pub(crate) action: CustomAction,
    /// Handles are shown and count toward hit testing.
    pub(crate) edit_status: bool,
}

impl Default for PickerItem {
    fn default() -> Self {
        Self::with_style(&StyleContext::default())
    }
}

impl PickerItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// New item with the default four-handle shape and colors taken from
    /// `style`.
    pub fn with_style(style: &StyleContext) -> Self {
        Self {
            geometry: ShapeGeometry::default(),
            position: Point::ORIGIN,
            color: style.fill,
            text: None,
            text_color: style.text_color,
            text_size: DEFAULT_TEXT_SIZE,
            controls: Vec::new(),
            menus: Vec::new(),
            action: CustomAction::default(),
            edit_status: false,
        }
    }

    // ── Shape ──

    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: ShapeGeometry) {
        self.geometry = geometry;
    }

    pub fn handle_count(&self) -> usize {
        self.geometry.len()
    }

    /// Replace the shape with the default layout for `count` handles.
    /// Previous handle positions are discarded.
    pub fn set_handle_count(&mut self, count: usize) -> Result<(), GeometryError> {
        self.geometry = ShapeGeometry::with_point_count(count)?;
        Ok(())
    }

    pub fn set_handle(&mut self, index: usize, local: Point) -> Result<(), GeometryError> {
        self.geometry.set_point(index, local)
    }

    pub fn move_handle(&mut self, index: usize, delta: Vec2) -> Result<(), GeometryError> {
        self.geometry.translate_point(index, delta)
    }

    /// Index of the handle whose disc of `radius` contains `scene_point`.
    /// Later handles win, matching their paint order.
    pub fn handle_at(&self, scene_point: Point, radius: f64) -> Option<usize> {
        let local = self.to_local(scene_point);
        self.geometry
            .points()
            .iter()
            .rposition(|h| (local - *h).hypot2() <= radius * radius)
    }

    /// Shape bounds in scene coordinates.
    pub fn bounding_box(&self) -> Rect {
        self.geometry.bounding_box() + self.position.to_vec2()
    }

    /// Convert a scene-space point into item-local space.
    pub fn to_local(&self, scene_point: Point) -> Point {
        scene_point - self.position.to_vec2()
    }

    // ── Placement ──

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn move_to_center(&mut self) {
        self.position = Point::ORIGIN;
    }

    // ── Style ──

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Empty strings clear the label.
    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text.filter(|t| !t.is_empty());
    }

    pub fn text_color(&self) -> Rgba {
        self.text_color
    }

    pub fn set_text_color(&mut self, color: Rgba) {
        self.text_color = color;
    }

    pub fn text_size(&self) -> f64 {
        self.text_size
    }

    pub fn set_text_size(&mut self, factor: f64) {
        self.text_size = factor;
    }

    pub fn edit_status(&self) -> bool {
        self.edit_status
    }

    pub fn set_edit_status(&mut self, status: bool) {
        self.edit_status = status;
    }

    // ── Controls ──

    /// Stored control names, without namespace.
    pub fn controls(&self) -> &[String] {
        &self.controls
    }

    /// Control names as the host knows them: each prefixed with
    /// `"<namespace>:"` when a namespace is given. Names that already
    /// carry a namespace are kept as stored.
    pub fn controls_with_namespace(&self, namespace: Option<&str>) -> Vec<String> {
        self.controls
            .iter()
            .map(|ctrl| qualify_control(ctrl, namespace))
            .collect()
    }

    pub fn set_controls(&mut self, controls: Vec<String>) {
        self.controls = controls;
    }

    /// Append unless already present. Returns whether the list changed.
    pub fn append_control(&mut self, control: impl Into<String>) -> bool {
        let control = control.into();
        if self.controls.contains(&control) {
            return false;
        }
        self.controls.push(control);
        true
    }

    pub fn remove_control(&mut self, control: &str) -> bool {
        let before = self.controls.len();
        self.controls.retain(|c| c != control);
        before != self.controls.len()
    }

    // ── Menus & action ──

    pub fn menus(&self) -> &[CustomMenu] {
        &self.menus
    }

    pub fn set_menus(&mut self, menus: Vec<CustomMenu>) {
        self.menus = menus;
    }

    pub fn action(&self) -> &CustomAction {
        &self.action
    }

    pub fn set_action_mode(&mut self, enabled: bool) {
        self.action.enabled = enabled;
    }

    pub fn set_action_script(&mut self, script: Option<String>) {
        self.action.script = script;
    }
}
