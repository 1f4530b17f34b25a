pub mod character;
pub mod draw;
pub mod geometry;
pub mod hit;
pub mod id;
pub mod lint;
pub mod model;
pub mod record;
pub mod scene;
pub mod transform;

pub use character::{CharacterData, TabData};
pub use draw::{DrawCommand, Drawable, ItemState, ShapeLabel, draw_list};
pub use geometry::{GeometryError, ShapeGeometry, ShapePath, default_points};
pub use hit::{Hoverable, hit_test, hit_test_rect};
pub use id::ItemId;
pub use lint::{LintDiagnostic, LintSeverity, lint_character};
pub use model::*;
pub use record::{CharacterRecord, ItemRecord, TabRecord};
pub use scene::{Scene, SceneConfig};
pub use transform::{AnyControl, ControlRename, ControlResolver, RenameError, RenameReport};

// Re-export kurbo so downstream crates share one geometry vocabulary.
pub use kurbo;
