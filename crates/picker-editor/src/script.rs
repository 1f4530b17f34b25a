//! Custom action and menu scripts.
//!
//! Scripts run in a host-provided sandbox. They never see the caller's
//! state; everything they may use is passed in a `ScriptContext`.

use crate::controls::NodeSelector;
use picker_core::PickerItem;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("script failed: {message}")]
    Failed { message: String },

    #[error("item has no custom action script")]
    NoActionScript,

    #[error("item has no menu entry {index}")]
    NoSuchMenu { index: usize },
}

/// Values exposed to a script.
///
/// Sandboxes publish them as `__CONTROLS__`, `__FLATCONTROLS__` and
/// `__NAMESPACE__`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptContext {
    /// The item's controls, namespace included.
    pub controls: Vec<String>,
    /// `controls` with sets expanded to their members.
    pub flattened_controls: Vec<String>,
    pub namespace: Option<String>,
}

impl ScriptContext {
    pub fn for_item(item: &PickerItem, namespace: Option<&str>, selector: &dyn NodeSelector) -> Self {
        let controls = item.controls_with_namespace(namespace);
        let flattened_controls = selector.flatten(&controls);
        Self {
            controls,
            flattened_controls,
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
        }
    }
}

/// Evaluates script text. Errors raised by the script come back as
/// `ScriptError`, never swallowed.
pub trait ScriptSandbox {
    fn execute(&mut self, script: &str, context: &ScriptContext) -> Result<(), ScriptError>;
}

/// Run the item's click action.
pub fn run_custom_action(
    item: &PickerItem,
    namespace: Option<&str>,
    selector: &dyn NodeSelector,
    sandbox: &mut dyn ScriptSandbox,
) -> Result<(), ScriptError> {
    let script = item
        .action()
        .script
        .as_deref()
        .ok_or(ScriptError::NoActionScript)?;
    let context = ScriptContext::for_item(item, namespace, selector);
    log::debug!("running custom action for {:?}", context.controls);
    sandbox.execute(script, &context)
}

/// Run entry `index` of the item's custom menu.
pub fn run_custom_menu(
    item: &PickerItem,
    index: usize,
    namespace: Option<&str>,
    selector: &dyn NodeSelector,
    sandbox: &mut dyn ScriptSandbox,
) -> Result<(), ScriptError> {
    let menu = item
        .menus()
        .get(index)
        .ok_or(ScriptError::NoSuchMenu { index })?;
    let context = ScriptContext::for_item(item, namespace, selector);
    log::debug!("running menu \"{}\"", menu.name);
    sandbox.execute(&menu.script, &context)
}
