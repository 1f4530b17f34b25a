//! Integration tests: character → record → JSON → record → character.
//!
//! Verifies that no data is lost through the serialized form and that the
//! item transforms compose the way the editor relies on.

use picker_core::kurbo::{Point, Vec2};
use picker_core::*;
use pretty_assertions::assert_eq;

// ─── Helpers ─────────────────────────────────────────────────────────────

fn arm_item(side: &str, x: f64) -> PickerItem {
    let mut item = PickerItem::new();
    item.set_position(Point::new(x, -40.0));
    item.set_handle_count(6).expect("six handles is valid");
    item.set_color(Rgba::new(240, 30, 30, 200));
    item.set_text(Some(format!("arm {side}")));
    item.set_controls(vec![format!("arm_FK_{side}"), format!("hand_{side}")]);
    item.set_menus(vec![CustomMenu::new("reset", "reset_pose()")]);
    item
}

fn build_character() -> CharacterData {
    let mut body = TabData::new("body");
    body.background = Some("/rigs/hero/body.png".into());
    body.add_item(arm_item("L", 60.0));

    let mut circle = PickerItem::new();
    circle.set_handle_count(2).expect("two handles is valid");
    circle.set_controls(vec!["root".into()]);
    body.add_item(circle);

    let mut face = TabData::new("face");
    let mut jaw = PickerItem::new();
    jaw.set_action_mode(true);
    jaw.set_action_script(Some("print(__NAMESPACE__)".into()));
    face.add_item(jaw);

    let mut character = CharacterData::new();
    character.snapshot = Some("/rigs/hero/snap.png".into());
    character.add_tab(body);
    character.add_tab(face);
    character
}

/// Encode to JSON text and back, then rebuild the character.
fn through_json(character: &CharacterData) -> CharacterData {
    let json = serde_json::to_string(&character.get_data()).expect("encode failed");
    let record: CharacterRecord = serde_json::from_str(&json).expect("decode failed");
    CharacterData::from_data(&record).expect("rebuild failed")
}

// ─── Round trips ─────────────────────────────────────────────────────────

#[test]
fn roundtrip_preserves_every_field() {
    let character = build_character();
    let restored = through_json(&character);
    assert_eq!(restored.get_data(), character.get_data());

    let body = restored.tab("body").expect("body tab lost");
    let items: Vec<&PickerItem> = body.scene.iter().map(|(_, item)| item).collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text(), Some("arm L"));
    assert_eq!(items[0].handle_count(), 6);
    assert!(items[1].geometry().is_circle());

    let jaw_action = restored.tab("face").expect("face tab lost");
    let (_, jaw) = jaw_action.scene.iter().next().expect("jaw lost");
    assert!(jaw.action().enabled);
    assert_eq!(jaw.action().script.as_deref(), Some("print(__NAMESPACE__)"));
}

#[test]
fn roundtrip_preserves_z_order() {
    let mut character = build_character();
    let body = character.tab_mut("body").expect("body tab");
    let ids = body.scene.back_to_front();
    body.scene.move_to_back(ids[1]);

    let restored = through_json(&character);
    let order: Vec<Option<&str>> = restored
        .tab("body")
        .expect("body tab")
        .scene
        .iter()
        .map(|(_, item)| item.controls().first().map(String::as_str))
        .collect();
    assert_eq!(order, vec![Some("root"), Some("arm_FK_L")]);
}

#[test]
fn empty_character_encodes_to_empty_object() {
    let json = serde_json::to_value(CharacterData::new().get_data()).expect("encode failed");
    assert_eq!(json, serde_json::json!({}));
}

// ─── Transforms ──────────────────────────────────────────────────────────

#[test]
fn mirrored_copy_is_independent_and_renamed() {
    let mut scene = Scene::new();
    let left = scene.add(arm_item("L", 60.0));
    let rename = ControlRename::new("_L$", "_R").expect("valid pattern");

    let (right, report) = scene
        .duplicate_and_mirror(left, Some(&rename), None, &AnyControl)
        .expect("source exists");
    assert!(report.is_clean());

    scene
        .get_mut(right)
        .expect("copy exists")
        .translate(Vec2::new(0.0, 10.0));

    let left_item = scene.get(left).expect("left exists");
    let right_item = scene.get(right).expect("right exists");
    assert_eq!(left_item.position(), Point::new(60.0, -40.0));
    assert_eq!(right_item.position(), Point::new(-60.0, -30.0));
    assert_eq!(right_item.controls(), &["arm_FK_R", "hand_R"]);
    assert_eq!(right_item.color(), Rgba::new(30, 30, 240, 200));
    assert_eq!(hit_test(&scene, Point::new(-60.0, -30.0)), Some(right));
}

#[test]
fn double_mirror_restores_record() {
    let mut item = arm_item("L", 60.0);
    let before = item.get_data();
    item.mirror();
    item.mirror();
    assert_eq!(item.get_data(), before);
}
