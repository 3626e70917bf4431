/// Hierarchical list view state with incremental updates.
///
/// The list mirrors the subtree of its root, children sorted by descending
/// size at every level. Two structures are kept:
///
/// - a **retained row table**: one [`RowElement`] per node whose row has
///   ever been built since the last full rebuild. Collapsing a directory
///   only hides its rows; re-expanding reuses them.
/// - the **visible row list**: the flattened, paint-ready order. Expanding
///   splices the newly visible rows in after the directory, collapsing
///   drains the contiguous deeper rows that follow it.
///
/// Only [`set_root`](TreeListView::set_root) (and therefore a new tree or a
/// zoom change) throws the row table away. Selection changes restyle at most
/// two rows. [`RenderStats`] counts all of this so the discipline can be
/// observed from tests and the status bar.
use crate::model::{FileTree, NodeIndex};
use crate::navigation::{NavigationType, NodeSelected};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Counters describing how much work the view has done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Row elements created.
    pub rows_built: u64,
    /// Times the whole row table was discarded and rebuilt.
    pub full_rebuilds: u64,
    /// Rows whose selection highlight was changed.
    pub rows_restyled: u64,
}

/// One retained row.
#[derive(Clone, Debug)]
struct RowElement {
    depth: u32,
    percent: f32,
    is_selected: bool,
    /// Children in display order; `None` until the row is first expanded.
    children: Option<Vec<NodeIndex>>,
}

/// A paint-ready row yielded by [`TreeListView::visible_rows`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleRow {
    pub node: NodeIndex,
    pub depth: u32,
    pub has_children: bool,
    pub is_expanded: bool,
    pub is_selected: bool,
    /// Size as a percentage of the parent, for the inline size bar.
    pub percent: f32,
}

pub struct TreeListView {
    tree: Arc<FileTree>,
    root: NodeIndex,
    selected: NodeIndex,
    expanded: HashSet<NodeIndex>,
    rows: HashMap<NodeIndex, RowElement>,
    visible: Vec<NodeIndex>,
    stats: RenderStats,
}

impl TreeListView {
    pub fn new(tree: Arc<FileTree>) -> Self {
        let root = tree.root;
        let mut view = Self {
            tree,
            root,
            selected: root,
            expanded: HashSet::new(),
            rows: HashMap::new(),
            visible: Vec::new(),
            stats: RenderStats::default(),
        };
        view.rebuild();
        view
    }

    /// Show a new tree rooted at its top node.
    pub fn set_tree(&mut self, tree: Arc<FileTree>) {
        self.root = tree.root;
        self.selected = tree.root;
        self.tree = tree;
        self.rebuild();
    }

    pub fn tree(&self) -> &Arc<FileTree> {
        &self.tree
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn selected(&self) -> NodeIndex {
        self.selected
    }

    pub fn is_expanded(&self, node: NodeIndex) -> bool {
        self.expanded.contains(&node)
    }

    pub fn render_stats(&self) -> RenderStats {
        self.stats
    }

    // ── Root changes (full rebuild) ────────────────────────────────

    /// Show the subtree of `node`. Expansion resets to just the new root and
    /// the root becomes the selection.
    pub fn set_root(&mut self, node: NodeIndex) {
        if !self.tree.contains(node) {
            return;
        }
        self.root = node;
        self.selected = node;
        self.rebuild();
    }

    /// Back to the top of the tree.
    pub fn reset_to_original_root(&mut self) {
        self.set_root(self.tree.root);
    }

    fn rebuild(&mut self) {
        debug!("List view full rebuild at {}", self.tree.node(self.root).path);
        self.stats.full_rebuilds += 1;
        self.rows.clear();
        self.expanded.clear();
        self.visible.clear();

        self.build_row(self.root, 0);
        self.visible.push(self.root);
        if self.tree.node(self.root).has_children() {
            self.expanded.insert(self.root);
            let below = self.flatten_below(self.root);
            self.visible.extend(below);
        }
    }

    // ── Expansion (incremental) ────────────────────────────────────

    /// Flip the expansion of a non-empty directory inside the current root.
    /// Returns `false` when nothing changed.
    pub fn toggle_expand(&mut self, node: NodeIndex) -> bool {
        if !self.can_expand(node) {
            return false;
        }
        if self.expanded.contains(&node) {
            self.collapse(node);
        } else {
            self.expand(node);
        }
        true
    }

    fn can_expand(&self, node: NodeIndex) -> bool {
        self.tree.contains(node)
            && self.tree.node(node).has_children()
            && self.tree.is_ancestor_or_self(self.root, node)
    }

    fn expand(&mut self, node: NodeIndex) {
        if !self.expanded.insert(node) {
            return;
        }
        // Hidden directories only join the set; their rows are built once
        // an ancestor expansion makes them visible.
        if let Some(pos) = self.visible_position(node) {
            let below = self.flatten_below(node);
            self.visible.splice(pos + 1..pos + 1, below);
        }
    }

    fn collapse(&mut self, node: NodeIndex) {
        if !self.expanded.remove(&node) {
            return;
        }
        if let Some(pos) = self.visible_position(node) {
            let depth = self.row_depth(node);
            let start = pos + 1;
            let mut end = start;
            while end < self.visible.len() && self.row_depth(self.visible[end]) > depth {
                end += 1;
            }
            self.visible.drain(start..end);
        }
    }

    /// Expand every non-empty directory under the root.
    pub fn expand_all(&mut self) {
        for node in self.tree.subtree(self.root) {
            if self.tree.node(node).has_children() {
                self.expanded.insert(node);
                self.ensure_children_built(node);
            }
        }
        self.reflow();
    }

    /// Collapse everything except the root.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        if self.tree.node(self.root).has_children() {
            self.expanded.insert(self.root);
        }
        self.reflow();
    }

    /// Recompute the visible list from the expansion set, reusing rows.
    fn reflow(&mut self) {
        self.visible.clear();
        self.visible.push(self.root);
        if self.expanded.contains(&self.root) {
            let below = self.flatten_below(self.root);
            self.visible.extend(below);
        }
    }

    /// Visible descendants of an expanded `node`, in display order.
    fn flatten_below(&mut self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeIndex> = self.ensure_children_built(node);
        stack.reverse();
        while let Some(idx) = stack.pop() {
            out.push(idx);
            if self.expanded.contains(&idx) {
                let children = self.ensure_children_built(idx);
                stack.extend(children.iter().rev().copied());
            }
        }
        out
    }

    /// Build the child rows of `node` if that has not happened yet and
    /// return the children in display order.
    fn ensure_children_built(&mut self, node: NodeIndex) -> Vec<NodeIndex> {
        if let Some(children) = self.rows.get(&node).and_then(|r| r.children.clone()) {
            return children;
        }
        let depth = self.row_depth(node);
        let children = self.tree.children_sorted_by_size(node);
        for &child in &children {
            self.build_row(child, depth.saturating_add(1));
        }
        if let Some(row) = self.rows.get_mut(&node) {
            row.children = Some(children.clone());
        }
        children
    }

    fn build_row(&mut self, node: NodeIndex, depth: u32) {
        let percent = self.percent(node);
        self.rows.insert(
            node,
            RowElement {
                depth,
                percent,
                is_selected: node == self.selected,
                children: None,
            },
        );
        self.stats.rows_built += 1;
    }

    fn row_depth(&self, node: NodeIndex) -> u32 {
        self.rows.get(&node).map(|r| r.depth).unwrap_or(0)
    }

    fn visible_position(&self, node: NodeIndex) -> Option<usize> {
        self.visible.iter().position(|&n| n == node)
    }

    // ── Selection ──────────────────────────────────────────────────

    /// User selection inside the list. Publishes a `Select` event.
    pub fn select(&mut self, node: NodeIndex) -> Option<NodeSelected> {
        if !self.in_root(node) {
            return None;
        }
        self.set_selected(node);
        Some(NodeSelected {
            node,
            navigation: NavigationType::Select,
        })
    }

    /// Selection driven from outside: reveal the node by expanding the path
    /// from the root down to it (the node itself included when it is a
    /// non-empty directory), then select it.
    pub fn select_external(&mut self, node: NodeIndex) -> Option<NodeSelected> {
        let chain = self.tree.path_between(self.root, node)?;
        for &step in &chain {
            if self.tree.node(step).has_children() {
                self.expand(step);
            }
        }
        self.select(node)
    }

    /// Reveal the node, collapse it, and select it. Used when the treemap
    /// moves the selection up to a parent.
    pub fn select_and_collapse(&mut self, node: NodeIndex) -> Option<NodeSelected> {
        let chain = self.tree.path_between(self.root, node)?;
        for &step in &chain[..chain.len() - 1] {
            self.expand(step);
        }
        self.collapse(node);
        self.select(node)
    }

    pub fn select_by_path(&mut self, path: &str) -> Option<NodeSelected> {
        let node = self.tree.find_by_path(path)?;
        self.select_external(node)
    }

    fn in_root(&self, node: NodeIndex) -> bool {
        self.tree.contains(node) && self.tree.is_ancestor_or_self(self.root, node)
    }

    /// Move the highlight, touching only the old and the new row.
    fn set_selected(&mut self, node: NodeIndex) {
        let previous = std::mem::replace(&mut self.selected, node);
        if previous == node {
            return;
        }
        for (idx, value) in [(previous, false), (node, true)] {
            if let Some(row) = self.rows.get_mut(&idx) {
                row.is_selected = value;
                self.stats.rows_restyled += 1;
            }
        }
    }

    // ── Painting ───────────────────────────────────────────────────

    /// Size bar percentage: share of the parent's size, with the list root
    /// at 100 % (0 % when empty).
    pub fn percent(&self, node: NodeIndex) -> f32 {
        if node == self.root {
            if self.tree.node(node).size == 0 {
                0.0
            } else {
                100.0
            }
        } else {
            self.tree.percent_of_parent(node)
        }
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Index of `node` in the visible list, for scrolling it into view.
    pub fn row_index(&self, node: NodeIndex) -> Option<usize> {
        self.visible_position(node)
    }

    /// Rows in paint order.
    pub fn visible_rows(&self) -> impl Iterator<Item = VisibleRow> + '_ {
        self.visible.iter().filter_map(move |&node| self.visible_row(node))
    }

    /// Rows `range` of the visible list, for virtualised painting.
    pub fn visible_rows_in(&self, range: std::ops::Range<usize>) -> Vec<VisibleRow> {
        let end = range.end.min(self.visible.len());
        let start = range.start.min(end);
        self.visible[start..end]
            .iter()
            .filter_map(|&node| self.visible_row(node))
            .collect()
    }

    fn visible_row(&self, node: NodeIndex) -> Option<VisibleRow> {
        let row = self.rows.get(&node)?;
        Some(VisibleRow {
            node,
            depth: row.depth,
            has_children: self.tree.node(node).has_children(),
            is_expanded: self.expanded.contains(&node),
            is_selected: row.is_selected,
            percent: row.percent,
        })
    }
}
