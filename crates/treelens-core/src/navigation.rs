/// Treemap navigation state machine.
///
/// Holds the zoom root (`current_root`) and the selection of the treemap
/// view, owns the layout of the last render for hit testing, and turns
/// discrete intents (clicks, keys) into state transitions.
///
/// Every transition that changes something returns exactly one
/// [`NodeSelected`] event for the sync bridge; operations on invalid or
/// missing targets return `None` and leave the state untouched. Nothing here
/// can fail.
///
/// Invariant: `selected` always lies inside the subtree of `current_root`.
/// Keyboard traversal therefore stops at the zoom root (use zoom out to go
/// higher), and focusing a node outside the zoom root widens the zoom to the
/// full tree first.
use crate::hit_test::smallest_node_at;
use crate::layout::{LayoutRect, NodeRectMap, Placement, TreemapLayout};
use crate::model::{FileTree, NodeIndex};
use std::sync::Arc;
use tracing::debug;

/// Why a selection changed. Consumed by the sync bridge to decide how the
/// list view follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationType {
    Select,
    /// Selection moved to the parent via the dedicated key; the list view
    /// should collapse the newly selected node.
    NavigateToParent,
    ZoomIn,
    ZoomOut,
    ResetView,
}

/// "Node selected" event published by either view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeSelected {
    pub node: NodeIndex,
    pub navigation: NavigationType,
}

impl NodeSelected {
    fn new(node: NodeIndex, navigation: NavigationType) -> Self {
        Self { node, navigation }
    }
}

/// Sibling step direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiblingStep {
    Previous,
    Next,
}

/// Discrete keyboard intents understood by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavIntent {
    PreviousSibling,
    NextSibling,
    Parent,
    FirstChild,
    ZoomIntoSelection,
    ZoomOut,
    Reset,
}

pub struct NavigationController {
    tree: Arc<FileTree>,
    current_root: NodeIndex,
    selected: NodeIndex,
    layout: TreemapLayout,
    rects: NodeRectMap,
    placements: Vec<Placement>,
}

impl NavigationController {
    pub fn new(tree: Arc<FileTree>, layout: TreemapLayout) -> Self {
        let root = tree.root;
        Self {
            tree,
            current_root: root,
            selected: root,
            layout,
            rects: NodeRectMap::default(),
            placements: Vec::new(),
        }
    }

    /// Replace the tree; the whole navigation state resets.
    pub fn set_tree(&mut self, tree: Arc<FileTree>) {
        self.current_root = tree.root;
        self.selected = tree.root;
        self.tree = tree;
        self.rects = NodeRectMap::default();
        self.placements.clear();
    }

    pub fn tree(&self) -> &Arc<FileTree> {
        &self.tree
    }

    pub fn full_root(&self) -> NodeIndex {
        self.tree.root
    }

    pub fn current_root(&self) -> NodeIndex {
        self.current_root
    }

    pub fn selected(&self) -> NodeIndex {
        self.selected
    }

    pub fn min_pixel_size(&self) -> u32 {
        self.layout.min_pixel_size()
    }

    /// Takes effect on the next [`render`](Self::render).
    pub fn set_min_pixel_size(&mut self, min_pixel_size: u32) {
        self.layout.set_min_pixel_size(min_pixel_size);
    }

    // ── Rendering / hit testing ────────────────────────────────────

    /// Recompute the layout of the zoom root inside `bounds`. The previous
    /// map is discarded.
    pub fn render(&mut self, bounds: LayoutRect) -> &NodeRectMap {
        let (rects, placements) =
            self.layout
                .layout_with_placement(&self.tree, self.current_root, bounds);
        self.rects = rects;
        self.placements = placements;
        &self.rects
    }

    /// Map of the last render.
    pub fn rects(&self) -> &NodeRectMap {
        &self.rects
    }

    /// Entries of the last render paired with how they were placed.
    pub fn placed_rects(&self) -> impl Iterator<Item = (NodeIndex, LayoutRect, Placement)> + '_ {
        self.rects
            .iter()
            .zip(self.placements.iter())
            .map(|(&(node, rect), &placement)| (node, rect, placement))
    }

    /// Node under the pointer in the last render.
    pub fn node_at(&self, x: f32, y: f32) -> Option<NodeIndex> {
        smallest_node_at(&self.rects, x, y)
    }

    /// Pointer click. A plain click selects the node under the pointer; with
    /// `ctrl` held the parent of that node is selected instead, falling back
    /// to the zoom root when the hit node is the zoom root itself.
    pub fn handle_click(&mut self, x: f32, y: f32, ctrl: bool) -> Option<NodeSelected> {
        let hit = self.node_at(x, y)?;
        if ctrl {
            let target = if hit == self.current_root {
                self.current_root
            } else {
                self.tree.parent(hit).unwrap_or(self.current_root)
            };
            self.select(target)
        } else {
            self.select(hit)
        }
    }

    /// Apply a keyboard intent.
    pub fn apply(&mut self, intent: NavIntent) -> Option<NodeSelected> {
        match intent {
            NavIntent::PreviousSibling => self.navigate_sibling(SiblingStep::Previous),
            NavIntent::NextSibling => self.navigate_sibling(SiblingStep::Next),
            NavIntent::Parent => self.navigate_parent(),
            NavIntent::FirstChild => self.navigate_first_child(),
            NavIntent::ZoomIntoSelection => self.zoom_in(self.selected),
            NavIntent::ZoomOut => self.zoom_out(),
            NavIntent::Reset => Some(self.reset_view()),
        }
    }

    // ── Zoom ───────────────────────────────────────────────────────

    /// Make `node` the zoom root. Only non-empty directories qualify.
    pub fn zoom_in(&mut self, node: NodeIndex) -> Option<NodeSelected> {
        if !self.tree.contains(node) || !self.tree.node(node).has_children() {
            return None;
        }
        debug!("Zoom in to {}", self.tree.node(node).path);
        self.current_root = node;
        self.selected = node;
        Some(NodeSelected::new(node, NavigationType::ZoomIn))
    }

    /// Move the zoom root one level up in the full tree.
    pub fn zoom_out(&mut self) -> Option<NodeSelected> {
        let parent = self.tree.parent(self.current_root)?;
        debug!("Zoom out to {}", self.tree.node(parent).path);
        self.current_root = parent;
        self.selected = parent;
        Some(NodeSelected::new(parent, NavigationType::ZoomOut))
    }

    /// Back to the full tree with the root selected.
    pub fn reset_view(&mut self) -> NodeSelected {
        let root = self.tree.root;
        self.current_root = root;
        self.selected = root;
        NodeSelected::new(root, NavigationType::ResetView)
    }

    // ── Selection ──────────────────────────────────────────────────

    /// Select `node` without changing the zoom. Nodes outside the zoom root
    /// are ignored.
    pub fn select(&mut self, node: NodeIndex) -> Option<NodeSelected> {
        self.select_as(node, NavigationType::Select)
    }

    fn select_as(&mut self, node: NodeIndex, navigation: NavigationType) -> Option<NodeSelected> {
        if !self.tree.contains(node) || !self.tree.is_ancestor_or_self(self.current_root, node) {
            return None;
        }
        self.selected = node;
        Some(NodeSelected::new(node, navigation))
    }

    /// Treemap reaction to a selection made in the list view: select the node
    /// if it is inside the zoom root, otherwise reset the zoom to the full
    /// tree and select it there.
    pub fn focus_on_node(&mut self, node: NodeIndex) -> Option<NodeSelected> {
        if !self.tree.contains(node) {
            return None;
        }
        if !self.tree.is_ancestor_or_self(self.current_root, node) {
            debug!("Focus target outside zoom root, resetting zoom");
            self.current_root = self.tree.root;
        }
        self.select(node)
    }

    /// Step to the previous/next sibling in child order. No-op at either end
    /// and at the zoom root.
    pub fn navigate_sibling(&mut self, step: SiblingStep) -> Option<NodeSelected> {
        let parent = self.parent_within_zoom(self.selected)?;
        let siblings = self.tree.children(parent);
        let pos = siblings.iter().position(|&c| c == self.selected)?;
        let target = match step {
            SiblingStep::Previous => pos.checked_sub(1)?,
            SiblingStep::Next => pos + 1,
        };
        let next = *siblings.get(target)?;
        self.select(next)
    }

    /// Select the parent of the selection. No-op at the zoom root.
    pub fn navigate_parent(&mut self) -> Option<NodeSelected> {
        let parent = self.parent_within_zoom(self.selected)?;
        self.select_as(parent, NavigationType::NavigateToParent)
    }

    /// Select the first child of the selection. No-op for files and empty
    /// directories.
    pub fn navigate_first_child(&mut self) -> Option<NodeSelected> {
        let first = *self.tree.children(self.selected).first()?;
        self.select(first)
    }

    fn parent_within_zoom(&self, node: NodeIndex) -> Option<NodeIndex> {
        if node == self.current_root {
            return None;
        }
        self.tree.parent(node)
    }
}
