/// Application state — owns the engine and drives it from UI input.
///
/// Widgets never talk to the two views directly: every selection-changing
/// input goes through the [`SelectionSyncBridge`] held here, and the events
/// it publishes are drained once per action to update the status line and
/// scroll the list to the new selection.
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use treelens_core::clipboard::{copy_node_path, ClipboardSink, Notification, Notifications};
use treelens_core::color::{default_rules, ColorMap, ColorRule, Rgb};
use treelens_core::layout::TreemapLayout;
use treelens_core::loader::{start_load, LoadHandle, LoadProgress};
use treelens_core::model::{FileTree, NodeIndex};
use treelens_core::navigation::{NavIntent, NodeSelected};
use treelens_core::settings::ViewerSettings;
use treelens_core::sync::SelectionSyncBridge;
use tracing::{info, warn};

/// Current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Nothing loaded yet.
    Idle,
    /// A snapshot is being parsed on the loader thread.
    Loading,
    /// A tree is installed and both views are live.
    Ready,
}

/// Maximum loader messages drained per frame.
const MAX_MESSAGES_PER_FRAME: usize = 16;

/// All application state.
pub struct AppState {
    // ── Loading ────────────────────────────────────────
    pub phase: AppPhase,
    pub load_handle: Option<LoadHandle>,
    /// Snapshot currently loaded or being loaded.
    pub snapshot_path: Option<PathBuf>,
    pub load_duration: Option<Duration>,
    /// Last load failure, shown in the status bar until the next load.
    pub load_error: Option<String>,
    /// Contents of the toolbar path field.
    pub path_input: String,

    // ── Engine ─────────────────────────────────────────
    pub bridge: Option<SelectionSyncBridge>,
    /// Most recent accepted selection event.
    pub last_event: Option<NodeSelected>,
    /// List row to bring into view on the next frame.
    pub scroll_to_row: Option<usize>,

    // ── Settings ───────────────────────────────────────
    pub settings: ViewerSettings,
    /// Where settings are saved; `None` keeps them in memory only.
    pub settings_path: Option<PathBuf>,
    pub color_map: ColorMap,
    /// Edit buffer for the settings window; `None` while it is closed.
    pub settings_draft: Option<SettingsDraft>,

    // ── UI state ───────────────────────────────────────
    pub notifications: Notifications,
    pub show_settings: bool,
    pub show_about: bool,
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerSettings::default(), None)
    }
}

impl AppState {
    pub fn new(settings: ViewerSettings, settings_path: Option<PathBuf>) -> Self {
        let color_map = settings.color_map();
        Self {
            phase: AppPhase::Idle,
            load_handle: None,
            snapshot_path: None,
            load_duration: None,
            load_error: None,
            path_input: String::new(),
            bridge: None,
            last_event: None,
            scroll_to_row: None,
            settings,
            settings_path,
            color_map,
            settings_draft: None,
            notifications: Notifications::default(),
            show_settings: false,
            show_about: false,
            dark_mode: true,
        }
    }

    pub fn tree(&self) -> Option<&Arc<FileTree>> {
        self.bridge.as_ref().map(|b| b.tree())
    }

    // ── Loading ────────────────────────────────────────────────────

    /// Start loading a snapshot. Any load in flight is cancelled; the
    /// current tree stays visible until the new one arrives.
    pub fn start_load(&mut self, path: PathBuf) {
        self.cancel_load();
        self.load_error = None;
        self.load_duration = None;
        self.path_input = path.to_string_lossy().into_owned();

        match start_load(path.clone()) {
            Ok(handle) => {
                self.phase = AppPhase::Loading;
                self.snapshot_path = Some(path);
                self.load_handle = Some(handle);
            }
            Err(e) => {
                warn!("Could not start loader: {e}");
                self.load_error = Some(e.to_string());
                self.phase = self.settled_phase();
            }
        }
    }

    pub fn cancel_load(&mut self) {
        if let Some(handle) = self.load_handle.take() {
            handle.cancel();
            info!("Load cancelled");
        }
        if self.phase == AppPhase::Loading {
            self.phase = self.settled_phase();
        }
    }

    fn settled_phase(&self) -> AppPhase {
        if self.bridge.is_some() {
            AppPhase::Ready
        } else {
            AppPhase::Idle
        }
    }

    /// Drain loader messages. Returns `true` if the UI should repaint.
    pub fn process_load_messages(&mut self) -> bool {
        let handle = match &self.load_handle {
            Some(h) => h,
            None => return false,
        };

        let mut repaint = false;
        let mut finished: Option<LoadProgress> = None;
        for _ in 0..MAX_MESSAGES_PER_FRAME {
            let msg = match handle.progress_rx.try_recv() {
                Ok(m) => m,
                Err(_) => break,
            };
            repaint = true;
            match msg {
                LoadProgress::Started { path } => {
                    info!("Loader picked up {}", path.display());
                }
                done => {
                    finished = Some(done);
                    break;
                }
            }
        }

        match finished {
            Some(LoadProgress::Complete { tree, duration }) => {
                self.load_handle = None;
                self.load_duration = Some(duration);
                self.install_tree(tree);
            }
            Some(LoadProgress::Failed { message }) => {
                self.load_handle = None;
                self.load_error = Some(message);
                self.phase = self.settled_phase();
            }
            Some(LoadProgress::Cancelled) => {
                self.load_handle = None;
                self.phase = self.settled_phase();
            }
            Some(LoadProgress::Started { .. }) | None => {}
        }
        repaint
    }

    /// Hand a finished tree to both views.
    pub fn install_tree(&mut self, tree: Arc<FileTree>) {
        match self.bridge.as_mut() {
            Some(bridge) => bridge.set_tree(tree),
            None => {
                let layout = TreemapLayout::new(self.settings.min_pixel_size);
                self.bridge = Some(SelectionSyncBridge::new(tree, layout));
            }
        }
        self.phase = AppPhase::Ready;
        self.last_event = None;
        self.scroll_to_row = Some(0);
    }

    // ── Engine input ───────────────────────────────────────────────

    pub fn treemap_click(&mut self, x: f32, y: f32, ctrl: bool) {
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.treemap_click(x, y, ctrl);
        }
        self.after_sync();
    }

    pub fn treemap_intent(&mut self, intent: NavIntent) {
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.treemap_intent(intent);
        }
        self.after_sync();
    }

    pub fn treemap_zoom_in(&mut self, node: NodeIndex) {
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.treemap_zoom_in(node);
        }
        self.after_sync();
    }

    pub fn list_select(&mut self, node: NodeIndex) {
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.list_select(node);
        }
        self.after_sync();
    }

    pub fn list_select_by_path(&mut self, path: &str) {
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.list_select_by_path(path);
        }
        self.after_sync();
    }

    pub fn list_toggle_expand(&mut self, node: NodeIndex) {
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.list_toggle_expand(node);
        }
    }

    pub fn list_expand_all(&mut self) {
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.list_expand_all();
        }
    }

    pub fn list_collapse_all(&mut self) {
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.list_collapse_all();
        }
    }

    /// Pick up what the bridge published and keep the list scrolled to the
    /// selection.
    fn after_sync(&mut self) {
        let Some(bridge) = self.bridge.as_mut() else {
            return;
        };
        if let Some(last) = bridge.take_published().pop() {
            self.last_event = Some(last);
            self.scroll_to_row = bridge.list().row_index(bridge.list().selected());
        }
    }

    // ── Side actions ───────────────────────────────────────────────

    pub fn copy_path(&mut self, sink: &mut dyn ClipboardSink, node: NodeIndex) {
        let Some(tree) = self.tree() else { return };
        let notification = copy_node_path(sink, tree, node);
        self.notifications.push(notification);
    }

    /// Visible notifications; expired ones are dropped.
    pub fn active_notifications(&mut self) -> &[Notification] {
        self.notifications.active(Instant::now())
    }

    // ── Settings ───────────────────────────────────────────────────

    /// Validate and apply new settings, then persist them if a settings
    /// path is configured. Invalid settings are rejected unchanged.
    pub fn apply_settings(&mut self, settings: ViewerSettings) -> treelens_core::Result<()> {
        settings.validate()?;
        self.color_map = settings.color_map();
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.set_min_pixel_size(settings.min_pixel_size);
        }
        self.settings = settings;

        if let Some(path) = &self.settings_path {
            if let Err(e) = self.settings.save_to(path) {
                warn!("Could not save settings: {e}");
                self.notifications
                    .push(Notification::error(format!("Settings not saved: {e}")));
                return Ok(());
            }
        }
        self.notifications.push(Notification::success("Settings applied"));
        Ok(())
    }

    pub fn set_color_rules(&mut self, rules: Vec<ColorRule>) -> treelens_core::Result<()> {
        let settings = ViewerSettings {
            color_mappings: rules,
            ..self.settings.clone()
        };
        self.apply_settings(settings)
    }

    pub fn open_settings(&mut self) {
        self.settings_draft = Some(SettingsDraft::from_settings(&self.settings));
        self.show_settings = true;
    }

    /// Apply the edit buffer. On failure the window stays open with the
    /// error shown next to the Save button.
    pub fn save_settings_draft(&mut self) {
        let Some(draft) = self.settings_draft.take() else {
            return;
        };
        match self.apply_settings(draft.to_settings()) {
            Ok(()) => self.show_settings = false,
            Err(e) => {
                self.settings_draft = Some(SettingsDraft {
                    error: Some(e.to_string()),
                    ..draft
                });
            }
        }
    }
}

/// One editable colour rule row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRule {
    pub extension: String,
    pub color: [u8; 3],
    pub name: String,
}

/// Settings as edited in the settings window, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    pub min_pixel_size: u32,
    pub rules: Vec<DraftRule>,
    pub error: Option<String>,
}

impl SettingsDraft {
    /// Colour given to newly added rows.
    pub const NEW_RULE_COLOR: [u8; 3] = [0x80, 0x80, 0x80];

    pub fn from_settings(settings: &ViewerSettings) -> Self {
        Self {
            min_pixel_size: settings.min_pixel_size,
            rules: Self::rows(&settings.color_mappings),
            error: None,
        }
    }

    pub fn add_rule(&mut self) {
        self.rules.push(DraftRule {
            extension: String::new(),
            color: Self::NEW_RULE_COLOR,
            name: String::new(),
        });
    }

    pub fn reset_rules(&mut self) {
        self.rules = Self::rows(&default_rules());
    }

    /// Rows with a blank extension are dropped.
    pub fn to_settings(&self) -> ViewerSettings {
        let color_mappings = self
            .rules
            .iter()
            .filter(|r| !r.extension.trim().is_empty())
            .map(|r| {
                let [red, green, blue] = r.color;
                ColorRule::new(r.extension.trim(), Rgb::new(red, green, blue), r.name.trim())
            })
            .collect();
        ViewerSettings {
            min_pixel_size: self.min_pixel_size,
            color_mappings,
        }
    }

    fn rows(rules: &[ColorRule]) -> Vec<DraftRule> {
        rules
            .iter()
            .map(|r| DraftRule {
                extension: r.extension.clone(),
                color: [r.color.r, r.color.g, r.color.b],
                name: r.name.clone(),
            })
            .collect()
    }
}

/// Clipboard backed by the egui context. egui queues the text for the
/// platform integration, so this never fails.
pub struct EguiClipboard<'a>(pub &'a egui::Context);

impl ClipboardSink for EguiClipboard<'_> {
    fn set_text(&mut self, text: &str) -> treelens_core::Result<()> {
        self.0.copy_text(text.to_owned());
        Ok(())
    }
}
