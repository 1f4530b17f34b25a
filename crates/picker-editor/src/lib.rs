pub mod clipboard;
pub mod controls;
pub mod error;
pub mod mode;
pub mod script;
pub mod session;

#[cfg(test)]
mod testing;

pub use clipboard::{CopyField, CopyMask, ItemClipboard};
pub use controls::{
    NodeSelector, SelectModifier, SelectionProvider, add_selected_controls, item_is_selected,
    replace_controls_with_selection, search_and_replace_controls, select_item_controls,
};
pub use error::{EditorError, Result};
pub use mode::EditMode;
pub use script::{ScriptContext, ScriptError, ScriptSandbox, run_custom_action, run_custom_menu};
pub use session::{ClickOutcome, Session};
