/// Data model for TreeLens: the immutable snapshot tree.
///
/// Re-exports the arena tree, its node type, and the snapshot wire format.
pub mod file_node;
pub mod file_tree;
pub mod size;
pub mod snapshot;

pub use file_node::{NodeIndex, TreeNode};
pub use file_tree::FileTree;
pub use snapshot::SnapshotNode;
