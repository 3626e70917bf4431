/// Main `eframe::App` implementation for TreeLens.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::state::{AppPhase, AppState};
use crate::theme::TreeLensTheme;
use crate::widgets;
use std::path::PathBuf;
use treelens_core::clipboard::Notification;
use treelens_core::settings::ViewerSettings;

/// Start-up options, usually taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// Snapshot to load immediately.
    pub snapshot: Option<PathBuf>,
    /// Settings file; defaults to the per-user config location.
    pub settings_path: Option<PathBuf>,
    /// Overrides the minimum tile size from the settings file.
    pub min_pixel_size: Option<u32>,
}

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so that settings
/// are read and the first snapshot load is already running when the window
/// opens.
pub struct TreeLensState {
    pub(crate) inner: AppState,
}

impl TreeLensState {
    /// Load settings and kick off the initial snapshot load, if any.
    pub fn build(options: StartupOptions) -> Self {
        let settings_path = options.settings_path.or_else(ViewerSettings::default_path);

        let (mut settings, settings_error) = match settings_path.as_deref() {
            Some(path) => match ViewerSettings::load_from(path) {
                Ok(s) => (s, None),
                Err(e) => {
                    tracing::warn!("Ignoring settings: {e}");
                    (ViewerSettings::default(), Some(e.to_string()))
                }
            },
            None => (ViewerSettings::default(), None),
        };
        if let Some(min) = options.min_pixel_size {
            settings.min_pixel_size = min.max(1);
        }

        let mut state = AppState::new(settings, settings_path);
        if let Some(err) = settings_error {
            state
                .notifications
                .push(Notification::error(format!("Settings not loaded: {err}")));
        }
        if let Some(snapshot) = options.snapshot {
            state.start_load(snapshot);
        }

        Self { inner: state }
    }

    pub fn state(&self) -> &AppState {
        &self.inner
    }
}

const KEY_HELP: &[(&str, &str)] = &[
    ("← / →", "previous / next sibling"),
    ("↑", "parent"),
    ("↓", "first child"),
    ("Space", "zoom into selection"),
    ("Backspace", "zoom out"),
    ("Esc", "reset view"),
    ("Ctrl + click", "select the parent of a tile"),
];

fn about_window(ctx: &egui::Context, state: &mut AppState, theme: &TreeLensTheme) {
    egui::Window::new("About TreeLens")
        .open(&mut state.show_about)
        .collapsible(false)
        .resizable(false)
        .default_width(320.0)
        .pivot(egui::Align2::CENTER_CENTER)
        .default_pos(ctx.screen_rect().center())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("▦ TreeLens").color(theme.accent));
                ui.label(
                    egui::RichText::new(concat!("v", env!("CARGO_PKG_VERSION")))
                        .small()
                        .color(theme.text_muted),
                );
            });
            ui.label(
                egui::RichText::new("Treemap and tree list of a directory size snapshot.")
                    .color(theme.text_primary),
            );
            ui.add_space(6.0);
            egui::Grid::new("key_help")
                .num_columns(2)
                .spacing([16.0, 2.0])
                .show(ui, |ui| {
                    for (key, action) in KEY_HELP {
                        ui.label(egui::RichText::new(*key).monospace().color(theme.accent));
                        ui.label(egui::RichText::new(*action).color(theme.text_secondary));
                        ui.end_row();
                    }
                });
        });
}

/// The TreeLens application.
pub struct TreeLensApp {
    state: AppState,
}

impl TreeLensApp {
    /// Create a new application instance from pre-built state.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: TreeLensState) -> Self {
        TreeLensTheme::for_dark_mode(state.inner.dark_mode).apply(&cc.egui_ctx);
        Self { state: state.inner }
    }
}

impl eframe::App for TreeLensApp {
    /// Override the GPU clear colour to match the active theme background,
    /// preventing a colour mismatch flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        let theme = TreeLensTheme::for_dark_mode(self.state.dark_mode);
        theme.apply(ctx);

        // ── Process background messages ───────────────────────────────────
        if self.state.process_load_messages() {
            ctx.request_repaint();
        }
        if self.state.phase == AppPhase::Loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ── Keyboard navigation ───────────────────────────────────────────
        for intent in widgets::treemap::keyboard_intents(ctx) {
            self.state.treemap_intent(intent);
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        about_window(ctx, &mut self.state, &theme);

        // ── Settings window ───────────────────────────────────────────────
        panels::settings_panel::settings_window(ctx, &mut self.state, &theme);

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state, &theme);
                ui.add_space(2.0);
            });

        // ── Left sidebar (tree list) ──────────────────────────────────────
        egui::SidePanel::left("left_panel")
            .default_width(560.0)
            .min_width(320.0)
            .max_width(900.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::tree_panel::tree_panel(ui, &mut self.state, &theme);
            });

        // ── Right details panel ───────────────────────────────────────────
        egui::SidePanel::right("right_panel")
            .default_width(240.0)
            .min_width(180.0)
            .max_width(360.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    panels::details_panel::details_panel(ui, &mut self.state, &theme);
                });
            });

        // ── Central panel (Treemap) ───────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            use widgets::treemap::TreemapAction;
            match widgets::treemap::treemap(ui, &mut self.state, &theme) {
                Some(TreemapAction::Click { x, y, ctrl }) => self.state.treemap_click(x, y, ctrl),
                Some(TreemapAction::Intent(intent)) => self.state.treemap_intent(intent),
                Some(TreemapAction::ZoomIn(node)) => self.state.treemap_zoom_in(node),
                None => {}
            }
        });

        widgets::notifications::notifications(ctx, &mut self.state, &theme);
    }
}
