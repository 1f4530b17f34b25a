//! Lint diagnostics for picker characters.
//!
//! Reports structural issues without modifying the character. Front ends
//! show the results before saving or after loading a picker built for a
//! different rig.

use crate::character::CharacterData;
use crate::transform::ControlResolver;
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Likely a mistake; clicking the item will misbehave.
    Warning,
    /// Harmless but untidy.
    Info,
}

/// A single lint diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct LintDiagnostic {
    /// Index of the tab the finding belongs to.
    pub tab: usize,
    /// Back-to-front index of the item inside the tab, if item-specific.
    pub item: Option<usize>,
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "duplicate-tab", "missing-control").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over `character`. Control names are checked with
/// `namespace` applied.
#[must_use]
pub fn lint_character(
    character: &CharacterData,
    namespace: Option<&str>,
    resolver: &dyn ControlResolver,
) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_duplicate_tabs(character, &mut diags);
    lint_duplicate_controls(character, &mut diags);
    lint_missing_controls(character, namespace, resolver, &mut diags);
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

/// Warn on every tab whose name was already used by an earlier tab.
fn lint_duplicate_tabs(character: &CharacterData, diags: &mut Vec<LintDiagnostic>) {
    let mut seen = HashSet::new();
    for (tab_index, tab) in character.tabs.iter().enumerate() {
        if !seen.insert(tab.name.as_str()) {
            diags.push(LintDiagnostic {
                tab: tab_index,
                item: None,
                message: format!("Tab name `{}` is used more than once.", tab.name),
                severity: LintSeverity::Warning,
                rule: "duplicate-tab",
            });
        }
    }
}

/// Info when the same control appears twice in one item's list.
fn lint_duplicate_controls(character: &CharacterData, diags: &mut Vec<LintDiagnostic>) {
    for (tab_index, tab) in character.tabs.iter().enumerate() {
        for (item_index, (_, item)) in tab.scene.iter().enumerate() {
            let mut seen = HashSet::new();
            for ctrl in item.controls() {
                if !seen.insert(ctrl.as_str()) {
                    diags.push(LintDiagnostic {
                        tab: tab_index,
                        item: Some(item_index),
                        message: format!("Control `{ctrl}` is listed twice on the same item."),
                        severity: LintSeverity::Info,
                        rule: "duplicate-control",
                    });
                }
            }
        }
    }
}

/// Warn on controls that do not exist on the host.
fn lint_missing_controls(
    character: &CharacterData,
    namespace: Option<&str>,
    resolver: &dyn ControlResolver,
    diags: &mut Vec<LintDiagnostic>,
) {
    for (tab_index, tab) in character.tabs.iter().enumerate() {
        for (item_index, (_, item)) in tab.scene.iter().enumerate() {
            for ctrl in item.controls_with_namespace(namespace) {
                if !resolver.exists(&ctrl) {
                    diags.push(LintDiagnostic {
                        tab: tab_index,
                        item: Some(item_index),
                        message: format!("Control `{ctrl}` does not exist."),
                        severity: LintSeverity::Warning,
                        rule: "missing-control",
                    });
                }
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
