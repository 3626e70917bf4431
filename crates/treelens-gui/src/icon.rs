//! TreeLens application icon generator.
//!
//! The icon is a small treemap drawn by the real layout engine: a fixed
//! sample tree is laid out into the icon square and every leaf tile is
//! filled with its extension colour, with a darker one-pixel gutter. The
//! result is RGBA pixel data suitable for use as a window icon.

use treelens_core::color::{ColorMap, Rgb, DEFAULT_DIR_COLOR};
use treelens_core::layout::{LayoutRect, Placement, TreemapLayout};
use treelens_core::model::{FileTree, SnapshotNode};

/// Generate the TreeLens icon as egui `IconData`.
pub fn generate_icon(size: u32) -> egui::IconData {
    let rgba = render_icon(size);
    egui::IconData {
        rgba,
        width: size,
        height: size,
    }
}

fn sample_tree() -> FileTree {
    FileTree::from_snapshot(SnapshotNode::dir(
        "/",
        vec![
            SnapshotNode::dir(
                "/a",
                vec![
                    SnapshotNode::file("/a/1.mp4", 30),
                    SnapshotNode::file("/a/2.png", 12),
                    SnapshotNode::file("/a/3.js", 8),
                ],
            ),
            SnapshotNode::dir(
                "/b",
                vec![
                    SnapshotNode::file("/b/1.rs", 18),
                    SnapshotNode::file("/b/2.pdf", 10),
                ],
            ),
            SnapshotNode::file("/c.zip", 22),
        ],
    ))
}

/// Render the icon into an RGBA pixel buffer (top-to-bottom row order).
pub fn render_icon(size: u32) -> Vec<u8> {
    let mut pixels = vec![0u8; (size * size * 4) as usize];
    if size == 0 {
        return pixels;
    }

    let tree = sample_tree();
    let colors = ColorMap::default();
    // Inset by one pixel so the outer gutter is visible too.
    let s = size as f32;
    let bounds = LayoutRect::new(1.0, 1.0, (s - 2.0).max(0.0), (s - 2.0).max(0.0));
    let (rects, placements) = TreemapLayout::new(1).layout_with_placement(&tree, tree.root, bounds);

    let gutter = DEFAULT_DIR_COLOR.darken(0.45);
    for y in 0..size {
        for x in 0..size {
            put(&mut pixels, size, x, y, gutter);
        }
    }

    for (&(node, rect), &placement) in rects.iter().zip(placements.iter()) {
        if !matches!(placement, Placement::Leaf | Placement::Culled) {
            continue;
        }
        let fill = colors.color_for(tree.node(node));
        // Leave a one-pixel gutter on the right and bottom of every tile.
        let x0 = rect.x.round() as u32;
        let y0 = rect.y.round() as u32;
        let x1 = ((rect.x + rect.width).round() as u32).saturating_sub(1).min(size);
        let y1 = ((rect.y + rect.height).round() as u32).saturating_sub(1).min(size);
        for y in y0..y1 {
            for x in x0..x1 {
                put(&mut pixels, size, x, y, fill);
            }
        }
    }

    pixels
}

fn put(pixels: &mut [u8], size: u32, x: u32, y: u32, c: Rgb) {
    let idx = ((y * size + x) * 4) as usize;
    pixels[idx] = c.r;
    pixels[idx + 1] = c.g;
    pixels[idx + 2] = c.b;
    pixels[idx + 3] = 0xff;
}
