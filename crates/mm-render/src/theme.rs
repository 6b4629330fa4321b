//! Theme-dependent colors and node sizing shared by every renderer.

use mm_core::model::Color;

/// Colors for painting a mind map.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub label: Color,
    /// Outline drawn around every node circle.
    pub node_outline: Color,
    pub selection: Color,
    /// Alpha applied to link strokes.
    pub link_alpha: f32,
}

impl Theme {
    /// Light theme: warm white canvas.
    pub fn light() -> Self {
        Self {
            background: Color::rgb8(0xF5, 0xF5, 0xF7),
            label: Color::rgb8(0x1D, 0x1D, 0x1F),
            node_outline: Color::rgb8(0xFF, 0xFF, 0xFF),
            selection: Color::rgb8(0x0A, 0x84, 0xFF),
            link_alpha: 0.85,
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::rgb8(0x1C, 0x1C, 0x1E),
            label: Color::rgb8(0xF5, 0xF5, 0xF7),
            node_outline: Color::rgb8(0x1C, 0x1C, 0x1E),
            selection: Color::rgb8(0x0A, 0x84, 0xFF),
            link_alpha: 0.9,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Circle radius of a node at `depth`, in layout units.
pub fn node_radius(depth: usize) -> f64 {
    match depth {
        0 => 26.0,
        1 => 18.0,
        _ => 12.0,
    }
}

/// Label font size at `depth`.
pub fn label_size(depth: usize) -> f64 {
    if depth == 0 { 16.0 } else { 13.0 }
}

/// Gap between the selection ring and the node circle.
pub const SELECTION_GAP: f64 = 4.0;
