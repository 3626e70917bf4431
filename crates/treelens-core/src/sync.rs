/// Selection synchronisation between the treemap and the list view.
///
/// The bridge owns both views and is the only code that calls from one into
/// the other. Each view publishes a [`NodeSelected`] for every selection
/// change, including changes made on behalf of the other view. Those echoes
/// arrive while the `syncing` flag is set and are dropped, so a user action
/// propagates exactly one level deep.
///
/// Accepted events (the ones originating from the user) are also queued for
/// the surrounding UI; drain them with [`take_published`](SelectionSyncBridge::take_published).
use crate::layout::{LayoutRect, NodeRectMap, TreemapLayout};
use crate::list_view::TreeListView;
use crate::model::{FileTree, NodeIndex};
use crate::navigation::{NavIntent, NavigationController, NavigationType, NodeSelected};
use std::sync::Arc;
use tracing::debug;

pub struct SelectionSyncBridge {
    treemap: NavigationController,
    list: TreeListView,
    syncing: bool,
    published: Vec<NodeSelected>,
    suppressed: u64,
}

impl SelectionSyncBridge {
    pub fn new(tree: Arc<FileTree>, layout: TreemapLayout) -> Self {
        Self {
            treemap: NavigationController::new(tree.clone(), layout),
            list: TreeListView::new(tree),
            syncing: false,
            published: Vec::new(),
            suppressed: 0,
        }
    }

    /// Install a new tree in both views. Both reset to the top node; no
    /// event is published.
    pub fn set_tree(&mut self, tree: Arc<FileTree>) {
        self.treemap.set_tree(tree.clone());
        self.list.set_tree(tree);
        self.published.clear();
    }

    pub fn tree(&self) -> &Arc<FileTree> {
        self.treemap.tree()
    }

    pub fn treemap(&self) -> &NavigationController {
        &self.treemap
    }

    pub fn list(&self) -> &TreeListView {
        &self.list
    }

    /// Events accepted since the last call, oldest first.
    pub fn take_published(&mut self) -> Vec<NodeSelected> {
        std::mem::take(&mut self.published)
    }

    /// Echo events dropped by the re-entrancy guard.
    pub fn suppressed_echoes(&self) -> u64 {
        self.suppressed
    }

    // ── Treemap side ───────────────────────────────────────────────

    pub fn render_treemap(&mut self, bounds: LayoutRect) -> &NodeRectMap {
        self.treemap.render(bounds)
    }

    pub fn set_min_pixel_size(&mut self, min_pixel_size: u32) {
        self.treemap.set_min_pixel_size(min_pixel_size);
    }

    pub fn treemap_click(&mut self, x: f32, y: f32, ctrl: bool) {
        let event = self.treemap.handle_click(x, y, ctrl);
        self.on_treemap_event(event);
    }

    pub fn treemap_intent(&mut self, intent: NavIntent) {
        let event = self.treemap.apply(intent);
        self.on_treemap_event(event);
    }

    pub fn treemap_zoom_in(&mut self, node: NodeIndex) {
        let event = self.treemap.zoom_in(node);
        self.on_treemap_event(event);
    }

    // ── List side ──────────────────────────────────────────────────

    pub fn list_select(&mut self, node: NodeIndex) {
        let event = self.list.select(node);
        self.on_list_event(event);
    }

    pub fn list_select_by_path(&mut self, path: &str) {
        let event = self.list.select_by_path(path);
        self.on_list_event(event);
    }

    /// Expansion is local to the list; nothing is propagated.
    pub fn list_toggle_expand(&mut self, node: NodeIndex) -> bool {
        self.list.toggle_expand(node)
    }

    pub fn list_expand_all(&mut self) {
        self.list.expand_all();
    }

    pub fn list_collapse_all(&mut self) {
        self.list.collapse_all();
    }

    // ── Dispatch ───────────────────────────────────────────────────

    fn on_treemap_event(&mut self, event: Option<NodeSelected>) {
        let Some(event) = event else { return };
        if self.syncing {
            self.suppressed += 1;
            return;
        }
        self.syncing = true;
        self.published.push(event);
        debug!("Treemap {:?} -> list", event.navigation);

        let echo = match event.navigation {
            NavigationType::NavigateToParent => self.list.select_and_collapse(event.node),
            NavigationType::ZoomIn | NavigationType::ZoomOut => {
                self.list.set_root(event.node);
                None
            }
            NavigationType::ResetView => {
                self.list.reset_to_original_root();
                None
            }
            NavigationType::Select => self.list.select_external(event.node),
        };
        self.on_list_event(echo);

        self.syncing = false;
    }

    fn on_list_event(&mut self, event: Option<NodeSelected>) {
        let Some(event) = event else { return };
        if self.syncing {
            self.suppressed += 1;
            return;
        }
        self.syncing = true;
        self.published.push(event);
        debug!("List selection -> treemap");

        let echo = self.treemap.focus_on_node(event.node);
        self.on_treemap_event(echo);

        self.syncing = false;
    }
}
