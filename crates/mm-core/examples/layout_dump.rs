//! Print the radial layout of a stored mind map.
//!
//! ```sh
//! RUST_LOG=trace cargo run -p mm-core --example layout_dump -- tree.json 1024 768
//! ```
//!
//! Without arguments the default tree is laid out in an 800×600 viewport.

use mm_core::codec::from_persisted_json;
use mm_core::layout::{LayoutConfig, Viewport, radial_layout};
use mm_core::model::default_tree;
use std::env;
use std::fs;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let tree = match args.next() {
        Some(path) => match fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|s| from_persisted_json(&s).map_err(|e| e.to_string()))
        {
            Ok(tree) => tree,
            Err(e) => {
                log::warn!("could not load {path}: {e}; using the default tree");
                default_tree()
            }
        },
        None => default_tree(),
    };

    let mut viewport = Viewport::default();
    if let (Some(w), Some(h)) = (args.next(), args.next())
        && let (Ok(w), Ok(h)) = (w.parse(), h.parse())
    {
        viewport = Viewport {
            width: w,
            height: h,
        };
    }

    let layout = radial_layout(&tree, viewport, &LayoutConfig::default());
    for node in layout.nodes() {
        println!(
            "{indent}{name:<24} depth={depth} angle={angle:>7.3} r={radius:>7.2} at ({x:>8.2}, {y:>8.2}){pin}",
            indent = "  ".repeat(node.depth),
            name = node.name,
            depth = node.depth,
            angle = node.angle,
            radius = node.radius,
            x = node.x,
            y = node.y,
            pin = if node.pin.is_some() { " [pinned]" } else { "" },
        );
    }
    println!("{} links", layout.links().len());
}
