//! Branch colors and parent→child connector curves.

use crate::id::NodeId;
use crate::model::Color;
use kurbo::{BezPath, CubicBez, Point, Vec2};

/// Categorical palette for top-level branches, cycled by child index.
pub const BRANCH_PALETTE: [Color; 10] = [
    Color::rgb8(0x1F, 0x77, 0xB4),
    Color::rgb8(0xFF, 0x7F, 0x0E),
    Color::rgb8(0x2C, 0xA0, 0x2C),
    Color::rgb8(0xD6, 0x27, 0x28),
    Color::rgb8(0x94, 0x67, 0xBD),
    Color::rgb8(0x8C, 0x56, 0x4B),
    Color::rgb8(0xE3, 0x77, 0xC2),
    Color::rgb8(0x7F, 0x7F, 0x7F),
    Color::rgb8(0xBC, 0xBD, 0x22),
    Color::rgb8(0x17, 0xBE, 0xCF),
];

/// Neutral accent used for the root.
pub const ROOT_ACCENT: Color = Color::rgb8(0x63, 0x66, 0xF1);

/// Which color bucket a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// The root itself.
    Neutral,
    /// Subtree of the root's child at this index.
    Top(usize),
}

impl Branch {
    pub fn color(self) -> Color {
        match self {
            Branch::Neutral => ROOT_ACCENT,
            Branch::Top(i) => BRANCH_PALETTE[i % BRANCH_PALETTE.len()],
        }
    }
}

/// Stroke width of the link entering a node at `depth`.
pub fn stroke_width(depth: usize) -> f64 {
    (4.0 - depth as f64 * 0.4).max(1.5)
}

/// Perpendicular control-point offset for a segment of length `distance`.
pub fn bend(distance: f64) -> f64 {
    (distance * 0.2).clamp(20.0, 80.0)
}

/// Share of the bend applied, on the opposite side, to the second control point.
const COUNTER_BEND: f64 = 0.2;

/// Cubic connector from `from` to `to` that reads as a gentle S.
///
/// The first control point sits a third of the way along the segment pushed
/// out by the full bend; the second sits two thirds along, pulled the other
/// way by a fifth of it.
pub fn connector(from: Point, to: Point) -> CubicBez {
    let delta = to - from;
    let distance = delta.hypot().max(1.0);
    let unit = delta / distance;
    let normal = Vec2::new(-unit.y, unit.x);
    let b = bend(distance);

    let c1 = from + delta / 3.0 + normal * b;
    let c2 = from + delta * (2.0 / 3.0) - normal * (b * COUNTER_BEND);
    CubicBez::new(from, c1, c2, to)
}

/// A drawable parent→child edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    pub curve: CubicBez,
    pub width: f64,
    pub color: Color,
}

impl Link {
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.curve.p0);
        path.curve_to(self.curve.p1, self.curve.p2, self.curve.p3);
        path
    }

    /// SVG path data (`M… C…`).
    pub fn path_data(&self) -> String {
        self.path().to_svg()
    }
}
