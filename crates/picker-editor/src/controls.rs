//! Item ↔ host control association.
//!
//! Selecting an item selects its controls on the host; the host selection
//! in turn drives the item's highlighted state. Control names are stored
//! without namespace and expanded with the character namespace whenever
//! they reach the host.

use crate::error::Result;
use picker_core::{ControlRename, ControlResolver, PickerItem, RenameReport};

/// How a click combines with the current host selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectModifier {
    /// No modifier key.
    #[default]
    Replace,
    /// Control key.
    Toggle,
    /// Alt key.
    Remove,
    /// Shift key.
    Add,
}

/// Snapshot of the host selection.
pub trait SelectionProvider {
    /// Refresh the snapshot from the host.
    fn update(&mut self);

    fn is_selected(&self, name: &str) -> bool;

    /// Selected names, namespace included.
    fn selected(&self) -> Vec<String>;
}

/// Host-side selection commands.
pub trait NodeSelector: ControlResolver {
    fn select(&mut self, nodes: &[String], modifier: SelectModifier);

    fn clear_selection(&mut self);

    /// Expand sets into their members. Plain nodes map to themselves.
    fn flatten(&self, nodes: &[String]) -> Vec<String>;
}

/// True only when the item drives exactly one control and that control
/// is selected.
pub fn item_is_selected(
    item: &PickerItem,
    namespace: Option<&str>,
    selection: &dyn SelectionProvider,
) -> bool {
    match item.controls_with_namespace(namespace).as_slice() {
        [single] => selection.is_selected(single),
        _ => false,
    }
}

/// Select the item's controls on the host.
///
/// Missing controls are skipped with a warning. Sets are flattened and
/// duplicates dropped. Returns the names handed to the selector; nothing
/// is selected when that list is empty.
pub fn select_item_controls(
    item: &PickerItem,
    namespace: Option<&str>,
    modifier: SelectModifier,
    selector: &mut dyn NodeSelector,
) -> Vec<String> {
    let mut existing = Vec::new();
    for ctrl in item.controls_with_namespace(namespace) {
        if selector.exists(&ctrl) {
            existing.push(ctrl);
        } else {
            log::warn!("node \"{ctrl}\" not found, skipping");
        }
    }

    let mut nodes: Vec<String> = Vec::new();
    for node in selector.flatten(&existing) {
        if !nodes.contains(&node) {
            nodes.push(node);
        }
    }

    if !nodes.is_empty() {
        selector.select(&nodes, modifier);
    }
    nodes
}

/// Append the host selection to the item's controls, skipping names it
/// already has. Names inside `namespace` are stored without it; names
/// from other namespaces keep their prefix.
pub fn add_selected_controls(
    item: &mut PickerItem,
    namespace: Option<&str>,
    selection: &dyn SelectionProvider,
) -> usize {
    let mut added = 0;
    for name in selection.selected() {
        if item.append_control(strip_namespace(&name, namespace)) {
            added += 1;
        }
    }
    added
}

/// Replace the item's controls with the host selection.
pub fn replace_controls_with_selection(
    item: &mut PickerItem,
    namespace: Option<&str>,
    selection: &dyn SelectionProvider,
) -> usize {
    item.set_controls(Vec::new());
    add_selected_controls(item, namespace, selection)
}

/// Regex search & replace over the item's control names.
///
/// # Errors
/// `Rename` when `search` is not a valid pattern.
pub fn search_and_replace_controls(
    item: &mut PickerItem,
    search: &str,
    replace: &str,
    namespace: Option<&str>,
    resolver: &dyn ControlResolver,
) -> Result<RenameReport> {
    let rename = ControlRename::new(search, replace)?;
    Ok(item.rename_controls(&rename, namespace, resolver))
}

fn strip_namespace<'a>(name: &'a str, namespace: Option<&str>) -> &'a str {
    match namespace {
        Some(ns) if !ns.is_empty() => name
            .strip_prefix(ns)
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(name),
        _ => name,
    }
}
