pub mod hit;
pub mod paint;
pub mod svg;
pub mod theme;

pub use hit::{hit_test, nearest_within};
pub use paint::paint_scene;
pub use svg::render_svg;
pub use theme::{Theme, node_radius};
