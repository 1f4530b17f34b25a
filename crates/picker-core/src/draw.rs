//! Scene → renderer-agnostic draw commands.
//!
//! Walks a tab scene back to front and emits a flat display list: shape
//! fills, borders, labels, and edit-mode handles. A front end replays the
//! list with whatever 2D backend it has.

use crate::hit::HANDLE_RADIUS;
use crate::id::ItemId;
use crate::model::{PickerItem, Rgba};
use crate::scene::Scene;
use kurbo::{Affine, BezPath, Point};

/// Border color of selected and hovered shapes.
pub const SELECTION_BORDER: Rgba = Rgba::new(0, 30, 0, 180);
/// Overlay laid over selected shapes.
pub const SELECTION_OVERLAY: Rgba = Rgba::new(255, 255, 255, 50);
/// Handle disc fill.
pub const HANDLE_COLOR: Rgba = Rgba::new(200, 200, 200, 255);
/// Point size of a label at text size 1.0.
pub const BASE_FONT_SIZE: f64 = 10.0;

const BORDER_WIDTH: f64 = 1.5;
const HOVER_LIGHTEN: u16 = 130;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        item: ItemId,
        path: BezPath,
        color: Rgba,
    },
    Stroke {
        item: ItemId,
        path: BezPath,
        color: Rgba,
        width: f64,
        dashed: bool,
    },
    Label {
        item: ItemId,
        label: ShapeLabel,
    },
    Handle {
        item: ItemId,
        index: usize,
        center: Point,
        radius: f64,
        color: Rgba,
    },
}

/// Per-item interaction state the display list reflects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemState {
    pub hovered: bool,
    pub selected: bool,
}

/// Text drawn over a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeLabel {
    pub text: String,
    /// Label center in scene space.
    pub center: Point,
    pub color: Rgba,
    pub font_size: f64,
}

/// What a renderer needs from a shape.
pub trait Drawable {
    /// Closed outline in scene space.
    fn outline(&self) -> BezPath;
    fn fill(&self) -> Rgba;
    fn label(&self) -> Option<ShapeLabel>;
}

impl Drawable for PickerItem {
    fn outline(&self) -> BezPath {
        Affine::translate(self.position.to_vec2()) * self.geometry.build_path().to_bez_path()
    }

    fn fill(&self) -> Rgba {
        self.color
    }

    fn label(&self) -> Option<ShapeLabel> {
        self.text.as_ref().map(|text| ShapeLabel {
            text: text.clone(),
            center: self.bounding_box().center(),
            color: self.text_color,
            font_size: BASE_FONT_SIZE * self.text_size,
        })
    }
}

fn draw_item(id: ItemId, item: &PickerItem, state: ItemState, out: &mut Vec<DrawCommand>) {
    let path = item.outline();

    let fill = if state.hovered {
        lighter(item.fill(), HOVER_LIGHTEN)
    } else {
        item.fill()
    };
    out.push(DrawCommand::Fill {
        item: id,
        path: path.clone(),
        color: fill,
    });

    if state.selected {
        out.push(DrawCommand::Fill {
            item: id,
            path: path.clone(),
            color: SELECTION_OVERLAY,
        });
    }
    if state.selected || state.hovered {
        out.push(DrawCommand::Stroke {
            item: id,
            path,
            color: SELECTION_BORDER,
            width: BORDER_WIDTH,
            dashed: !state.selected,
        });
    }

    if let Some(label) = item.label() {
        out.push(DrawCommand::Label { item: id, label });
    }

    if item.edit_status {
        for (index, handle) in item.geometry.points().iter().enumerate() {
            out.push(DrawCommand::Handle {
                item: id,
                index,
                center: *handle + item.position.to_vec2(),
                radius: HANDLE_RADIUS,
                color: HANDLE_COLOR,
            });
        }
    }
}

/// Build the display list for a whole scene, back to front.
pub fn draw_list(scene: &Scene, hovered: Option<ItemId>, selected: &[ItemId]) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    for (id, item) in scene.iter() {
        let state = ItemState {
            hovered: hovered == Some(id),
            selected: selected.contains(&id),
        };
        draw_item(id, item, state, &mut out);
    }
    log::trace!("draw_list: {} items -> {} commands", scene.len(), out.len());
    out
}

/// Brighten each channel by `percent`, keeping alpha.
fn lighter(color: Rgba, percent: u16) -> Rgba {
    let scale = |c: u8| (u16::from(c) * percent / 100).min(255) as u8;
    Rgba::new(scale(color.r), scale(color.g), scale(color.b), color.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item_ids(commands: &[DrawCommand]) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = Vec::new();
        for cmd in commands {
            let id = match cmd {
                DrawCommand::Fill { item, .. }
                | DrawCommand::Stroke { item, .. }
                | DrawCommand::Label { item, .. }
                | DrawCommand::Handle { item, .. } => *item,
            };
            if ids.last() != Some(&id) {
                ids.push(id);
            }
        }
        ids
    }

    #[test]
    fn paints_back_to_front() {
        let mut scene = Scene::new();
        let a = scene.add(PickerItem::new());
        let b = scene.add(PickerItem::new());
        scene.move_to_back(b);
        assert_eq!(item_ids(&draw_list(&scene, None, &[])), vec![b, a]);
    }

    #[test]
    fn plain_item_is_one_fill() {
        let mut scene = Scene::new();
        scene.add(PickerItem::new());
        let cmds = draw_list(&scene, None, &[]);
        assert_eq!(cmds.len(), 1);
        assert!(matches!(
            &cmds[0],
            DrawCommand::Fill { color, .. } if *color == Rgba::DEFAULT_FILL
        ));
    }

    #[test]
    fn selection_and_hover_feedback() {
        let mut scene = Scene::new();
        let id = scene.add(PickerItem::new());

        let hovered = draw_list(&scene, Some(id), &[]);
        assert!(matches!(&hovered[0], DrawCommand::Fill { color, .. } if *color == Rgba::new(255, 255, 255, 180)));
        assert!(matches!(&hovered[1], DrawCommand::Stroke { dashed: true, .. }));

        let selected = draw_list(&scene, None, &[id]);
        assert_eq!(selected.len(), 3);
        assert!(matches!(&selected[2], DrawCommand::Stroke { dashed: false, .. }));
    }

    #[test]
    fn label_and_handles() {
        let mut item = PickerItem::new();
        item.set_text(Some("IK".into()));
        item.set_text_size(2.0);
        item.set_position(Point::new(50.0, 0.0));
        item.set_edit_status(true);

        let mut scene = Scene::new();
        scene.add(item);
        let cmds = draw_list(&scene, None, &[]);

        let label = cmds.iter().find_map(|c| match c {
            DrawCommand::Label { label, .. } => Some((label.font_size, label.center)),
            _ => None,
        });
        let (size, center) = label.unwrap();
        assert_eq!(size, 20.0);
        assert!((center.x - 50.0).abs() < 1e-9);

        let handles = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::Handle { .. }))
            .count();
        assert_eq!(handles, 4);
    }
}
