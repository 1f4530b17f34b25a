//! Host doubles shared by the unit tests.

use crate::controls::{NodeSelector, SelectModifier, SelectionProvider};
use crate::script::{ScriptContext, ScriptError, ScriptSandbox};
use picker_core::ControlResolver;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
pub struct FakeHost {
    pub nodes: BTreeSet<String>,
    /// Set name → members.
    pub sets: BTreeMap<String, Vec<String>>,
    pub selection: Vec<String>,
    pub last_select: Option<(Vec<String>, SelectModifier)>,
    pub cleared: bool,
}

impl FakeHost {
    pub fn with_nodes(nodes: &[&str]) -> Self {
        Self {
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl ControlResolver for FakeHost {
    fn exists(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }
}

impl SelectionProvider for FakeHost {
    fn update(&mut self) {}

    fn is_selected(&self, name: &str) -> bool {
        self.selection.iter().any(|s| s == name)
    }

    fn selected(&self) -> Vec<String> {
        self.selection.clone()
    }
}

impl NodeSelector for FakeHost {
    fn select(&mut self, nodes: &[String], modifier: SelectModifier) {
        self.last_select = Some((nodes.to_vec(), modifier));
    }

    fn clear_selection(&mut self) {
        self.cleared = true;
        self.selection.clear();
    }

    fn flatten(&self, nodes: &[String]) -> Vec<String> {
        nodes
            .iter()
            .flat_map(|n| match self.sets.get(n) {
                Some(members) => members.clone(),
                None => vec![n.clone()],
            })
            .collect()
    }
}

/// Records every script it is asked to run; fails on scripts containing
/// `raise`.
#[derive(Debug, Default)]
pub struct RecordingSandbox {
    pub runs: Vec<(String, ScriptContext)>,
}

impl ScriptSandbox for RecordingSandbox {
    fn execute(&mut self, script: &str, context: &ScriptContext) -> Result<(), ScriptError> {
        self.runs.push((script.to_string(), context.clone()));
        if script.contains("raise") {
            return Err(ScriptError::Failed {
                message: "script raised".into(),
            });
        }
        Ok(())
    }
}
