/// Arena-backed snapshot tree with O(1) parent lookup.
///
/// All nodes live in a single `Vec<TreeNode>` in pre-order (every parent
/// precedes its descendants). The parent links stored on each node form the
/// parent index; it is built once during ingestion and never mutated, since
/// a snapshot is immutable for the whole session. A new snapshot means a
/// new `FileTree`.
///
/// Preconditions: the snapshot is acyclic (guaranteed by construction from
/// nested JSON) and paths are unique. Duplicate paths are not rejected; the
/// path index keeps the first occurrence.
use super::file_node::{NodeIndex, TreeNode};
use super::snapshot::SnapshotNode;
use compact_str::CompactString;
use std::collections::HashMap;

/// The complete, immutable tree of one snapshot.
#[derive(Debug, Clone)]
pub struct FileTree {
    /// Arena: every node, parents before children.
    pub nodes: Vec<TreeNode>,

    /// The snapshot root (always index 0).
    pub root: NodeIndex,

    /// path → node, for identity across view rebuilds.
    path_index: HashMap<String, NodeIndex>,
}

impl FileTree {
    /// Flatten a nested snapshot into the arena.
    ///
    /// Iterative with an explicit stack so arbitrarily deep snapshots cannot
    /// overflow the call stack. Children keep their snapshot order.
    pub fn from_snapshot(root: SnapshotNode) -> Self {
        let mut nodes: Vec<TreeNode> = Vec::new();
        let mut path_index = HashMap::new();

        let mut stack: Vec<(SnapshotNode, Option<NodeIndex>)> = vec![(root, None)];
        while let Some((mut snap, parent)) = stack.pop() {
            let idx = NodeIndex::new(nodes.len());
            let children = std::mem::take(&mut snap.children);

            let extension = if snap.is_dir {
                None
            } else {
                snap.extension
                    .as_deref()
                    .map(|e| e.trim_start_matches('.'))
                    .or_else(|| extension_of(&snap.name))
                    .filter(|e| !e.is_empty())
                    .map(|e| CompactString::new(e.to_lowercase()))
            };

            path_index.entry(snap.path.clone()).or_insert(idx);
            nodes.push(TreeNode {
                name: CompactString::new(&snap.name),
                path: snap.path,
                is_dir: snap.is_dir,
                size: snap.size,
                extension,
                parent,
                children: Vec::with_capacity(children.len()),
            });
            if let Some(p) = parent {
                nodes[p.idx()].children.push(idx);
            }

            // Reverse push so siblings pop (and are numbered) in snapshot order.
            for child in children.into_iter().rev() {
                stack.push((child, Some(idx)));
            }
        }

        tracing::debug!("Ingested snapshot with {} nodes", nodes.len());

        Self {
            nodes,
            root: NodeIndex(0),
            path_index,
        }
    }

    /// Get the node at the given index.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index.idx()]
    }

    /// `true` if `index` addresses a node of this tree.
    #[inline]
    pub fn contains(&self, index: NodeIndex) -> bool {
        index.idx() < self.nodes.len()
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for a tree built from a snapshot; provided for symmetry
    /// with [`len`](Self::len).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of `index`, or `None` for the root.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.nodes[index.idx()].parent
    }

    /// Direct children in snapshot order.
    #[inline]
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.nodes[index.idx()].children
    }

    /// Direct children sorted by size descending.
    ///
    /// The sort is stable: equal sizes keep snapshot order, so layouts and
    /// list rows are reproducible. Directories get no priority over files.
    pub fn children_sorted_by_size(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut children = self.nodes[index.idx()].children.clone();
        children.sort_by(|a, b| self.nodes[b.idx()].size.cmp(&self.nodes[a.idx()].size));
        children
    }

    /// Look a node up by its absolute path.
    pub fn find_by_path(&self, path: &str) -> Option<NodeIndex> {
        self.path_index.get(path).copied()
    }

    /// Chain of nodes from the root down to `index`, both inclusive.
    pub fn path_to(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut chain = vec![index];
        let mut cursor = index;
        while let Some(p) = self.nodes[cursor.idx()].parent {
            chain.push(p);
            cursor = p;
        }
        chain.reverse();
        chain
    }

    /// Chain from `ancestor` down to `target`, both inclusive, or `None` if
    /// `target` is not inside `ancestor`'s subtree.
    pub fn path_between(&self, ancestor: NodeIndex, target: NodeIndex) -> Option<Vec<NodeIndex>> {
        let mut chain = vec![target];
        let mut cursor = target;
        while cursor != ancestor {
            cursor = self.nodes[cursor.idx()].parent?;
            chain.push(cursor);
        }
        chain.reverse();
        Some(chain)
    }

    /// `true` if `node` is `ancestor` or lies anywhere below it.
    pub fn is_ancestor_or_self(&self, ancestor: NodeIndex, node: NodeIndex) -> bool {
        let mut cursor = Some(node);
        while let Some(idx) = cursor {
            if idx == ancestor {
                return true;
            }
            cursor = self.nodes[idx.idx()].parent;
        }
        false
    }

    /// Size of `index` as a percentage (0–100) of its parent's size.
    ///
    /// The root is measured against itself. O(1) via the parent link.
    pub fn percent_of_parent(&self, index: NodeIndex) -> f32 {
        let node = &self.nodes[index.idx()];
        let reference = node
            .parent
            .map(|p| self.nodes[p.idx()].size)
            .unwrap_or(node.size);
        if reference == 0 {
            return 0.0;
        }
        ((node.size as f64 / reference as f64 * 100.0) as f32).min(100.0)
    }

    /// All nodes of the subtree rooted at `index`, in pre-order.
    pub fn subtree(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![index];
        while let Some(idx) = stack.pop() {
            out.push(idx);
            stack.extend(self.nodes[idx.idx()].children.iter().rev().copied());
        }
        out
    }
}

/// Extension of a file name: text after the last dot, if any.
fn extension_of(name: &str) -> Option<&str> {
    name.rfind('.').map(|pos| &name[pos + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FileTree {
        FileTree::from_snapshot(SnapshotNode::dir(
            "/r",
            vec![
                SnapshotNode::dir(
                    "/r/src",
                    vec![
                        SnapshotNode::file("/r/src/main.RS", 100),
                        SnapshotNode::file("/r/src/lib.rs", 200),
                    ],
                ),
                SnapshotNode::file("/r/README", 50),
                SnapshotNode::file("/r/big.bin", 400),
            ],
        ))
    }

    #[test]
    fn test_ingestion_is_preorder_with_parent_links() {
        let tree = sample();
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.node(tree.root).name, "r");
        let src = tree.find_by_path("/r/src").unwrap();
        assert_eq!(tree.parent(src), Some(tree.root));
        assert!(src.0 < tree.find_by_path("/r/src/lib.rs").unwrap().0);
        assert_eq!(tree.children(tree.root).len(), 3);
    }

    #[test]
    fn test_extensions_lowercased_and_derived() {
        let tree = sample();
        let main = tree.find_by_path("/r/src/main.RS").unwrap();
        assert_eq!(tree.node(main).extension.as_deref(), Some("rs"));
        let readme = tree.find_by_path("/r/README").unwrap();
        assert_eq!(tree.node(readme).extension, None);
        assert_eq!(tree.node(tree.root).extension, None);
    }

    #[test]
    fn test_children_sorted_pure_size_stable() {
        let tree = FileTree::from_snapshot(SnapshotNode::dir(
            "/r",
            vec![
                SnapshotNode::file("/r/a", 10),
                SnapshotNode::dir("/r/d", vec![SnapshotNode::file("/r/d/x", 5)]),
                SnapshotNode::file("/r/b", 10),
                SnapshotNode::file("/r/c", 30),
            ],
        ));
        let names: Vec<&str> = tree
            .children_sorted_by_size(tree.root)
            .into_iter()
            .map(|i| tree.node(i).name.as_str())
            .collect();
        // Directory "d" is smallest and sorts last; equal "a"/"b" keep order.
        assert_eq!(names, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_path_queries() {
        let tree = sample();
        let src = tree.find_by_path("/r/src").unwrap();
        let lib = tree.find_by_path("/r/src/lib.rs").unwrap();
        let big = tree.find_by_path("/r/big.bin").unwrap();

        assert_eq!(tree.path_to(lib), vec![tree.root, src, lib]);
        assert_eq!(tree.path_between(src, lib), Some(vec![src, lib]));
        assert_eq!(tree.path_between(src, big), None);
        assert!(tree.is_ancestor_or_self(tree.root, lib));
        assert!(tree.is_ancestor_or_self(lib, lib));
        assert!(!tree.is_ancestor_or_self(src, big));
        assert_eq!(tree.find_by_path("/nope"), None);
    }

    #[test]
    fn test_percent_of_parent() {
        let tree = sample();
        let src = tree.find_by_path("/r/src").unwrap();
        let lib = tree.find_by_path("/r/src/lib.rs").unwrap();
        assert!((tree.percent_of_parent(tree.root) - 100.0).abs() < 1e-4);
        assert!((tree.percent_of_parent(src) - 40.0).abs() < 1e-4);
        assert!((tree.percent_of_parent(lib) - 66.666_67).abs() < 1e-3);

        let empty = FileTree::from_snapshot(SnapshotNode::dir("/e", vec![]));
        assert_eq!(empty.percent_of_parent(empty.root), 0.0);
    }

    #[test]
    fn test_subtree_preorder() {
        let tree = sample();
        let all = tree.subtree(tree.root);
        assert_eq!(all.len(), tree.len());
        assert_eq!(all[0], tree.root);
        let src = tree.find_by_path("/r/src").unwrap();
        assert_eq!(tree.subtree(src).len(), 3);
    }

    #[test]
    fn test_deep_snapshot_does_not_overflow() {
        let mut node = SnapshotNode::file("/leaf", 1);
        for depth in 0..50_000 {
            node = SnapshotNode::dir(&format!("/d{depth}"), vec![node]);
        }
        let tree = FileTree::from_snapshot(node);
        assert_eq!(tree.len(), 50_001);
        let leaf = tree.find_by_path("/leaf").unwrap();
        assert_eq!(tree.path_to(leaf).len(), 50_001);
    }
}
