pub mod codec;
pub mod edit;
pub mod geometry;
pub mod id;
pub mod layout;
pub mod model;
pub mod tidy;

pub use codec::{CodecError, export_json, from_persisted_json, import_json, to_persisted_json};
pub use edit::{EditRejection, EditResult};
pub use geometry::{Branch, Link};
pub use id::NodeId;
pub use layout::{Layout, LayoutConfig, LayoutNode, Viewport, radial_layout};
pub use model::*;

// Re-export geometry types so downstream crates don't need a direct dependency
pub use kurbo::Point;
