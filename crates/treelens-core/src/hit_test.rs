/// Pointer hit testing over a [`NodeRectMap`].
///
/// Single-child flattening and culling make rectangles nest and even
/// coincide (a parent and its only child share the same bounds), so the
/// answer is the *smallest* rectangle containing the point. A linear scan is
/// fine: the map only holds the nodes visible in the current render.
use crate::layout::NodeRectMap;
use crate::model::NodeIndex;

/// Smallest-area node whose rectangle contains `(x, y)`.
///
/// Edges are inclusive. On equal area the entry visited later wins, which is
/// the deeper node because the map is in pre-order. Zero-area rectangles
/// (children of zero-sized directories, empty files) are never returned.
pub fn smallest_node_at(map: &NodeRectMap, x: f32, y: f32) -> Option<NodeIndex> {
    let mut best: Option<(NodeIndex, f32)> = None;
    for &(node, rect) in map.iter() {
        let area = rect.area();
        if area <= 0.0 || !rect.contains(x, y) {
            continue;
        }
        match best {
            Some((_, best_area)) if area > best_area => {}
            _ => best = Some((node, area)),
        }
    }
    best.map(|(node, _)| node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutRect, TreemapLayout};
    use crate::model::{FileTree, SnapshotNode};

    #[test]
    fn test_only_child_wins_over_parent_with_same_bounds() {
        let tree = FileTree::from_snapshot(SnapshotNode::dir(
            "/r",
            vec![SnapshotNode::file("/r/only", 10)],
        ));
        let map = TreemapLayout::default().layout(
            &tree,
            tree.root,
            LayoutRect::new(0.0, 0.0, 100.0, 100.0),
        );
        let only = tree.find_by_path("/r/only").unwrap();
        assert_eq!(map.get(tree.root), map.get(only));
        assert_eq!(smallest_node_at(&map, 50.0, 50.0), Some(only));
    }

    #[test]
    fn test_deepest_leaf_is_returned() {
        let tree = FileTree::from_snapshot(SnapshotNode::dir(
            "/r",
            vec![
                SnapshotNode::dir(
                    "/r/d",
                    vec![SnapshotNode::file("/r/d/x", 75), SnapshotNode::file("/r/d/y", 25)],
                ),
                SnapshotNode::file("/r/f", 100),
            ],
        ));
        let map = TreemapLayout::default().layout(
            &tree,
            tree.root,
            LayoutRect::new(0.0, 0.0, 200.0, 100.0),
        );
        // "/r/d" occupies the left half; its children stack vertically.
        assert_eq!(
            smallest_node_at(&map, 10.0, 90.0),
            tree.find_by_path("/r/d/y")
        );
        assert_eq!(smallest_node_at(&map, 150.0, 50.0), tree.find_by_path("/r/f"));
    }

    #[test]
    fn test_outside_and_zero_area() {
        let tree = FileTree::from_snapshot(SnapshotNode::dir(
            "/r",
            vec![SnapshotNode::file("/r/a", 0), SnapshotNode::file("/r/b", 0)],
        ));
        let map = TreemapLayout::default().layout(
            &tree,
            tree.root,
            LayoutRect::new(0.0, 0.0, 100.0, 100.0),
        );
        // Zero-width children sit on the left edge; the root is returned.
        assert_eq!(smallest_node_at(&map, 0.0, 50.0), Some(tree.root));
        assert_eq!(smallest_node_at(&map, 101.0, 50.0), None);
        assert_eq!(smallest_node_at(&NodeRectMap::default(), 1.0, 1.0), None);
    }
}
