/// A single node in the arena-allocated snapshot tree.
///
/// Nodes are stored in a flat `Vec<TreeNode>`. Parent-child relationships
/// use indices rather than pointers, which gives every node a stable
/// identity that can be used as a map/set key by the layout, navigation
/// and list-view components without relying on reference identity.
use compact_str::CompactString;

/// Lightweight index into the arena `Vec<TreeNode>`.
///
/// Uses `u32` to keep indices small — supports up to ~4 billion nodes,
/// far beyond anything a snapshot will contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new `NodeIndex` from a `usize`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A single file or directory of a snapshot.
///
/// Immutable once the owning [`FileTree`](super::FileTree) is built.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// File or directory name only.
    pub name: CompactString,

    /// Absolute path, unique across the tree and stable for the session.
    pub path: String,

    /// `true` if this node represents a directory.
    pub is_dir: bool,

    /// Size in bytes. Directory sizes arrive pre-aggregated in the snapshot;
    /// never recomputed here.
    pub size: u64,

    /// Lower-cased extension without the dot. Files only.
    pub extension: Option<CompactString>,

    /// Parent node. `None` for the snapshot root.
    pub parent: Option<NodeIndex>,

    /// Children in snapshot order (directories only, possibly empty).
    pub children: Vec<NodeIndex>,
}

impl TreeNode {
    /// `true` for a directory that has at least one child.
    ///
    /// Only such nodes can be zoomed into or expanded.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.is_dir && !self.children.is_empty()
    }
}
