/// Slice-and-dice treemap layout.
///
/// Partitions a rectangle among a node's children proportionally to their
/// size, slicing along one axis per depth level: horizontal at the top,
/// then alternating. This is deliberately not squarified; orientation
/// depends only on depth, never on aspect ratio.
///
/// Rules applied at every visited node, in order:
/// 1. Bounds narrower or shorter than `min_pixel_size` → the node gets the
///    bounds and its subtree is culled.
/// 2. Exactly one child → the child is laid out in the same bounds with the
///    same orientation (single-child flattening).
/// 3. No children, or a file → the node gets the bounds.
/// 4. Otherwise children are sorted by descending size (stable) and sliced.
///
/// Every visited node gets an entry, including culled and flattened ones,
/// because hit testing and selection highlighting address interior nodes
/// as well as leaves.
use crate::model::{FileTree, NodeIndex};
use std::collections::HashMap;

/// Default minimum rectangle side (px) below which subdivision stops.
pub const DEFAULT_MIN_PIXEL_SIZE: u32 = 10;

/// An axis-aligned rectangle in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Edge-inclusive containment test.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Slicing axis for one level of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Children sit side by side; widths are proportional.
    Horizontal,
    /// Children are stacked; heights are proportional.
    Vertical,
}

impl Orientation {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Node → rectangle mapping produced by one layout pass.
///
/// Entries are kept in visit (pre-)order: a node's descendants always come
/// after it. Only valid until the next pass.
#[derive(Debug, Default, Clone)]
pub struct NodeRectMap {
    entries: Vec<(NodeIndex, LayoutRect)>,
    lookup: HashMap<NodeIndex, usize>,
}

impl NodeRectMap {
    fn insert(&mut self, node: NodeIndex, rect: LayoutRect) {
        self.lookup.insert(node, self.entries.len());
        self.entries.push((node, rect));
    }

    /// Rectangle assigned to `node` in this pass, if it was visited.
    pub fn get(&self, node: NodeIndex) -> Option<LayoutRect> {
        self.lookup.get(&node).map(|&i| self.entries[i].1)
    }

    /// Entries in visit order.
    pub fn iter(&self) -> impl Iterator<Item = &(NodeIndex, LayoutRect)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What kind of entry a visited node produced. Used by the renderer to
/// decide which rectangles get painted as tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Subtree culled because the bounds were below `min_pixel_size`.
    Culled,
    /// Bounds handed straight to the only child.
    Flattened,
    /// File or empty directory.
    Leaf,
    /// Bounds split among two or more children.
    Sliced,
}

/// Treemap layout engine.
#[derive(Clone, Copy, Debug)]
pub struct TreemapLayout {
    min_pixel_size: u32,
}

impl Default for TreemapLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PIXEL_SIZE)
    }
}

impl TreemapLayout {
    /// `min_pixel_size` of zero is bumped to one so subdivision always stops.
    pub fn new(min_pixel_size: u32) -> Self {
        Self {
            min_pixel_size: min_pixel_size.max(1),
        }
    }

    pub fn min_pixel_size(&self) -> u32 {
        self.min_pixel_size
    }

    pub fn set_min_pixel_size(&mut self, min_pixel_size: u32) {
        self.min_pixel_size = min_pixel_size.max(1);
    }

    /// Lay out the subtree of `root` inside `bounds`.
    pub fn layout(&self, tree: &FileTree, root: NodeIndex, bounds: LayoutRect) -> NodeRectMap {
        let mut map = NodeRectMap::default();
        self.visit(tree, root, bounds, |node, rect, _| map.insert(node, rect));
        map
    }

    /// Lay out and also report how each node was placed.
    pub fn layout_with_placement(
        &self,
        tree: &FileTree,
        root: NodeIndex,
        bounds: LayoutRect,
    ) -> (NodeRectMap, Vec<Placement>) {
        let mut map = NodeRectMap::default();
        let mut placements = Vec::new();
        self.visit(tree, root, bounds, |node, rect, placement| {
            map.insert(node, rect);
            placements.push(placement);
        });
        (map, placements)
    }

    /// Pre-order traversal with an explicit stack.
    fn visit(
        &self,
        tree: &FileTree,
        root: NodeIndex,
        bounds: LayoutRect,
        mut emit: impl FnMut(NodeIndex, LayoutRect, Placement),
    ) {
        let min = self.min_pixel_size as f32;
        let mut stack: Vec<(NodeIndex, LayoutRect, Orientation)> =
            vec![(root, bounds, Orientation::Horizontal)];

        while let Some((idx, rect, orientation)) = stack.pop() {
            let node = tree.node(idx);

            if rect.width < min || rect.height < min {
                emit(idx, rect, Placement::Culled);
                continue;
            }

            if node.children.len() == 1 {
                emit(idx, rect, Placement::Flattened);
                stack.push((node.children[0], rect, orientation));
                continue;
            }

            if !node.is_dir || node.children.is_empty() {
                emit(idx, rect, Placement::Leaf);
                continue;
            }

            emit(idx, rect, Placement::Sliced);

            let children = tree.children_sorted_by_size(idx);
            let slices = slice(tree, node.size, &children, rect, orientation);
            // Reverse push keeps the emitted order largest-first.
            for (child, child_rect) in slices.into_iter().rev() {
                stack.push((child, child_rect, orientation.flipped()));
            }
        }
    }
}

/// Split `rect` among `children` along `orientation`, proportional to
/// `child.size / parent_size`. A zero-sized parent gives every child a zero
/// extent at the leading edge.
fn slice(
    tree: &FileTree,
    parent_size: u64,
    children: &[NodeIndex],
    rect: LayoutRect,
    orientation: Orientation,
) -> Vec<(NodeIndex, LayoutRect)> {
    let mut out = Vec::with_capacity(children.len());
    let mut pos = match orientation {
        Orientation::Horizontal => rect.x,
        Orientation::Vertical => rect.y,
    };

    for &child in children {
        let ratio = if parent_size == 0 {
            0.0
        } else {
            (tree.node(child).size as f64 / parent_size as f64) as f32
        };
        let child_rect = match orientation {
            Orientation::Horizontal => {
                let width = rect.width * ratio;
                let r = LayoutRect::new(pos, rect.y, width, rect.height);
                pos += width;
                r
            }
            Orientation::Vertical => {
                let height = rect.height * ratio;
                let r = LayoutRect::new(rect.x, pos, rect.width, height);
                pos += height;
                r
            }
        };
        out.push((child, child_rect));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SnapshotNode;

    fn tree_of(children: Vec<SnapshotNode>) -> FileTree {
        FileTree::from_snapshot(SnapshotNode::dir("/r", children))
    }

    fn rect_of(tree: &FileTree, map: &NodeRectMap, path: &str) -> LayoutRect {
        map.get(tree.find_by_path(path).unwrap()).unwrap()
    }

    #[test]
    fn test_proportional_horizontal_slices() {
        let tree = tree_of(vec![
            SnapshotNode::file("/r/b", 30),
            SnapshotNode::file("/r/a", 60),
            SnapshotNode::file("/r/c", 10),
        ]);
        let map = TreemapLayout::default().layout(
            &tree,
            tree.root,
            LayoutRect::new(0.0, 0.0, 100.0, 50.0),
        );

        let a = rect_of(&tree, &map, "/r/a");
        let b = rect_of(&tree, &map, "/r/b");
        let c = rect_of(&tree, &map, "/r/c");
        assert!((a.width - 60.0).abs() <= 1.0);
        assert!((b.width - 30.0).abs() <= 1.0);
        assert!((c.width - 10.0).abs() <= 1.0);
        assert_eq!(a.x, 0.0);
        assert!((b.x - 60.0).abs() < 1e-3);
        assert!((c.x - 90.0).abs() < 1e-3);
        for r in [a, b, c] {
            assert_eq!(r.height, 50.0);
            assert_eq!(r.y, 0.0);
        }
    }

    #[test]
    fn test_orientation_alternates_by_depth() {
        let tree = tree_of(vec![
            SnapshotNode::dir(
                "/r/d",
                vec![SnapshotNode::file("/r/d/x", 30), SnapshotNode::file("/r/d/y", 10)],
            ),
            SnapshotNode::file("/r/f", 40),
        ]);
        let map = TreemapLayout::default().layout(
            &tree,
            tree.root,
            LayoutRect::new(0.0, 0.0, 200.0, 100.0),
        );

        let d = rect_of(&tree, &map, "/r/d");
        assert_eq!(d, LayoutRect::new(0.0, 0.0, 100.0, 100.0));
        let x = rect_of(&tree, &map, "/r/d/x");
        let y = rect_of(&tree, &map, "/r/d/y");
        assert_eq!(x, LayoutRect::new(0.0, 0.0, 100.0, 75.0));
        assert_eq!(y, LayoutRect::new(0.0, 75.0, 100.0, 25.0));
    }

    #[test]
    fn test_single_child_is_flattened() {
        let tree = tree_of(vec![SnapshotNode::dir(
            "/r/only",
            vec![SnapshotNode::file("/r/only/f1", 5), SnapshotNode::file("/r/only/f2", 5)],
        )]);
        let bounds = LayoutRect::new(0.0, 0.0, 80.0, 40.0);
        let map = TreemapLayout::default().layout(&tree, tree.root, bounds);

        assert_eq!(map.get(tree.root), Some(bounds));
        assert_eq!(rect_of(&tree, &map, "/r/only"), bounds);
        // The grandchildren are still sliced horizontally: orientation is kept
        // across the flattened level.
        let f1 = rect_of(&tree, &map, "/r/only/f1");
        assert_eq!(f1, LayoutRect::new(0.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn test_small_bounds_are_culled_but_recorded() {
        let tree = tree_of(vec![
            SnapshotNode::dir(
                "/r/small",
                vec![SnapshotNode::file("/r/small/a", 1), SnapshotNode::file("/r/small/b", 1)],
            ),
            SnapshotNode::file("/r/large", 98),
        ]);
        let (map, placements) = TreemapLayout::new(10).layout_with_placement(
            &tree,
            tree.root,
            LayoutRect::new(0.0, 0.0, 100.0, 100.0),
        );

        let small = tree.find_by_path("/r/small").unwrap();
        assert!(map.get(small).is_some());
        assert!(map.get(tree.find_by_path("/r/small/a").unwrap()).is_none());
        let pos = map.iter().position(|(n, _)| *n == small).unwrap();
        assert_eq!(placements[pos], Placement::Culled);
    }

    #[test]
    fn test_zero_size_parent_gives_children_zero_extent() {
        let tree = FileTree::from_snapshot(SnapshotNode::dir(
            "/r",
            vec![SnapshotNode::file("/r/a", 0), SnapshotNode::file("/r/b", 0)],
        ));
        let map = TreemapLayout::default().layout(
            &tree,
            tree.root,
            LayoutRect::new(0.0, 0.0, 100.0, 100.0),
        );
        assert_eq!(map.len(), 3);
        for path in ["/r/a", "/r/b"] {
            let r = rect_of(&tree, &map, path);
            assert_eq!(r.width, 0.0);
            assert!(r.x.is_finite() && r.y.is_finite());
        }
    }

    #[test]
    fn test_every_node_recorded_and_area_conserved() {
        let tree = tree_of(vec![
            SnapshotNode::dir(
                "/r/a",
                vec![
                    SnapshotNode::file("/r/a/1", 300),
                    SnapshotNode::file("/r/a/2", 200),
                    SnapshotNode::dir(
                        "/r/a/sub",
                        vec![SnapshotNode::file("/r/a/sub/x", 50), SnapshotNode::file("/r/a/sub/y", 50)],
                    ),
                ],
            ),
            SnapshotNode::file("/r/b", 250),
            SnapshotNode::file("/r/c", 150),
        ]);
        let bounds = LayoutRect::new(0.0, 0.0, 1000.0, 800.0);
        let map = TreemapLayout::new(1).layout(&tree, tree.root, bounds);
        assert_eq!(map.len(), tree.len());

        let top_area: f32 = tree
            .children(tree.root)
            .iter()
            .map(|&c| map.get(c).unwrap().area())
            .sum();
        assert!((top_area - bounds.area()).abs() < 1.0);
    }

    #[test]
    fn test_min_pixel_size_zero_is_clamped() {
        let layout = TreemapLayout::new(0);
        assert_eq!(layout.min_pixel_size(), 1);
    }
}
