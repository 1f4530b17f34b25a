//! Integration tests: a rigging artist building a picker tab, then an
//! animator using it.

use picker_core::kurbo::{Point, Vec2};
use picker_core::{
    CharacterData, ControlResolver, DrawCommand, Rgba, TabData, draw_list, lint_character,
};
use picker_editor::{
    ClickOutcome, CopyField, EditorError, NodeSelector, ScriptContext, ScriptError, ScriptSandbox,
    SelectModifier, SelectionProvider, Session, add_selected_controls,
};
use pretty_assertions::assert_eq;

// ─── Host doubles ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Rig {
    nodes: Vec<String>,
    selection: Vec<String>,
}

impl Rig {
    fn new(nodes: &[&str]) -> Self {
        Self {
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            selection: Vec::new(),
        }
    }
}

impl ControlResolver for Rig {
    fn exists(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n == name)
    }
}

impl SelectionProvider for Rig {
    fn update(&mut self) {}

    fn is_selected(&self, name: &str) -> bool {
        self.selection.iter().any(|s| s == name)
    }

    fn selected(&self) -> Vec<String> {
        self.selection.clone()
    }
}

impl NodeSelector for Rig {
    fn select(&mut self, nodes: &[String], modifier: SelectModifier) {
        match modifier {
            SelectModifier::Replace => self.selection = nodes.to_vec(),
            SelectModifier::Add => {
                for node in nodes {
                    if !self.is_selected(node) {
                        self.selection.push(node.clone());
                    }
                }
            }
            SelectModifier::Remove => self.selection.retain(|s| !nodes.contains(s)),
            SelectModifier::Toggle => {
                for node in nodes {
                    if self.is_selected(node) {
                        self.selection.retain(|s| s != node);
                    } else {
                        self.selection.push(node.clone());
                    }
                }
            }
        }
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn flatten(&self, nodes: &[String]) -> Vec<String> {
        nodes.to_vec()
    }
}

#[derive(Default)]
struct Console {
    lines: Vec<String>,
}

impl ScriptSandbox for Console {
    fn execute(&mut self, script: &str, context: &ScriptContext) -> Result<(), ScriptError> {
        if script.is_empty() {
            return Err(ScriptError::Failed {
                message: "empty script".into(),
            });
        }
        self.lines
            .push(format!("{script} {}", context.controls.join(",")));
        Ok(())
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[test]
fn build_left_side_then_mirror_to_right() {
    init_logger();
    let mut rig = Rig::new(&["hero:hand_L", "hero:hand_R", "hero:foot_L"]);
    let mut session = Session::new(true);
    let mut tab = TabData::new("body");

    let hand = session.new_item(&mut tab.scene).unwrap();
    session
        .set_item_color(&mut tab.scene, hand, Rgba::new(0, 0, 255, 200))
        .unwrap();
    session
        .move_item(&mut tab.scene, hand, Vec2::new(60.0, -20.0))
        .unwrap();

    rig.selection = vec!["hero:hand_L".into()];
    let added = add_selected_controls(tab.scene.get_mut(hand).unwrap(), Some("hero"), &rig);
    assert_eq!(added, 1);

    let (mirrored, report) = session
        .duplicate_and_mirror(&mut tab.scene, hand, Some(("_L$", "_R")), Some("hero"), &rig)
        .unwrap();
    assert!(report.is_clean());

    let right = tab.scene.get(mirrored).unwrap();
    assert_eq!(right.controls(), &["hand_R"]);
    assert_eq!(right.position(), Point::new(-60.0, -20.0));
    assert_eq!(right.color(), Rgba::new(255, 0, 0, 200));

    // The next new item picks up the last fill.
    let foot = session.new_item(&mut tab.scene).unwrap();
    assert_eq!(
        tab.scene.get(foot).unwrap().color(),
        Rgba::new(0, 0, 255, 200)
    );

    let mut character = CharacterData::new();
    character.add_tab(tab);
    let diags = lint_character(&character, Some("hero"), &rig);
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
}

#[test]
fn copy_mask_limits_paste() {
    let mut session = Session::new(true);
    let mut tab = TabData::new("face");
    let source = session.new_item(&mut tab.scene).unwrap();
    let target = session.new_item(&mut tab.scene).unwrap();

    {
        let item = tab.scene.get_mut(source).unwrap();
        item.set_text(Some("jaw".into()));
        item.set_controls(vec!["jaw_ctl".into()]);
        item.set_color(Rgba::new(9, 9, 9, 9));
    }

    session.clipboard.mask.set(CopyField::Controls, false);
    session.copy(&tab.scene, source).unwrap();
    session.paste(&mut tab.scene, target).unwrap();

    let pasted = tab.scene.get(target).unwrap();
    assert_eq!(pasted.text(), Some("jaw"));
    assert_eq!(pasted.color(), Rgba::new(9, 9, 9, 9));
    assert!(pasted.controls().is_empty());
}

#[test]
fn paste_without_copy_fails() {
    let session = Session::new(true);
    let mut tab = TabData::new("face");
    let id = session.new_item(&mut tab.scene).unwrap();
    assert!(matches!(
        session.paste(&mut tab.scene, id),
        Err(EditorError::EmptyClipboard)
    ));
}

#[test]
fn animator_clicks_drive_selection_and_highlight() {
    init_logger();
    let builder = Session::new(true);
    let mut tab = TabData::new("body");
    let hip = builder.new_item(&mut tab.scene).unwrap();
    let chest = builder.new_item(&mut tab.scene).unwrap();
    tab.scene.get_mut(hip).unwrap().set_controls(vec!["hip".into()]);
    {
        let item = tab.scene.get_mut(chest).unwrap();
        item.set_controls(vec!["chest".into()]);
        item.set_position(Point::new(100.0, 0.0));
    }

    let animator = Session::new(false);
    animator.apply_edit_status(&mut tab.scene);
    let mut rig = Rig::new(&["hero:hip", "hero:chest"]);
    let mut console = Console::default();

    let outcome = animator
        .click(&tab.scene, Point::ORIGIN, SelectModifier::Replace, Some("hero"), &mut rig, &mut console)
        .unwrap();
    assert!(matches!(outcome, ClickOutcome::Selected { item, .. } if item == hip));

    animator
        .click(&tab.scene, Point::new(100.0, 0.0), SelectModifier::Add, Some("hero"), &mut rig, &mut console)
        .unwrap();
    assert_eq!(rig.selection, vec!["hero:hip", "hero:chest"]);

    let selected = animator.selected_items(&tab.scene, Some("hero"), &mut rig);
    assert_eq!(selected, vec![hip, chest]);

    // Handles are hidden outside edit mode.
    let commands = draw_list(&tab.scene, None, &selected);
    assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Handle { .. })));

    animator
        .click(&tab.scene, Point::new(-500.0, 0.0), SelectModifier::Replace, Some("hero"), &mut rig, &mut console)
        .unwrap();
    assert!(rig.selection.is_empty());
}

#[test]
fn failing_action_is_reported() {
    let builder = Session::new(true);
    let mut tab = TabData::new("body");
    let id = builder.new_item(&mut tab.scene).unwrap();
    {
        let item = tab.scene.get_mut(id).unwrap();
        item.set_action_mode(true);
        item.set_action_script(Some(String::new()));
    }

    let animator = Session::new(false);
    let mut rig = Rig::new(&[]);
    let mut console = Console::default();
    let err = animator
        .click(&tab.scene, Point::ORIGIN, SelectModifier::Replace, None, &mut rig, &mut console)
        .unwrap_err();
    assert!(matches!(err, EditorError::Script(ScriptError::Failed { .. })));
    assert!(console.lines.is_empty());
}
