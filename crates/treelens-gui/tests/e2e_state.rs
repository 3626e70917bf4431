/// End-to-end tests for `AppState` — the GUI application state machine.
///
/// These tests exercise the real business-logic paths of `AppState` without
/// spinning up an egui window, keeping them fast and deterministic.
///
/// **Scope:** All user-visible state transitions are covered:
///   - Snapshot load lifecycle (start, completion, failure, cancellation, reload)
///   - Selection flowing through the sync bridge from either view
///   - Settings validation, persistence and the settings draft
///   - Copy-path notifications
///   - Start-up from command-line options
///
/// The real loader thread is used so no mocking is needed.
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use treelens_core::clipboard::{ClipboardSink, NotificationKind};
use treelens_core::color::{ColorRule, Rgb};
use treelens_core::model::NodeIndex;
use treelens_core::navigation::{NavIntent, NavigationType};
use treelens_core::settings::ViewerSettings;
use treelens_gui::state::{AppPhase, AppState, SettingsDraft};
use treelens_gui::{StartupOptions, TreeLensState};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// ```text
/// /data               (1 000)
///   alpha/            (300)
///     a.txt  (100)
///     b.rs   (200)
///   beta/             (300)
///     c.png  (300)
///   d.zip    (400)
/// ```
const SNAPSHOT: &str = r#"{
  "name": "data", "path": "/data", "directory": true, "size": 1000,
  "children": [
    { "name": "alpha", "path": "/data/alpha", "directory": true, "size": 300,
      "children": [
        { "name": "a.txt", "path": "/data/alpha/a.txt", "directory": false, "size": 100, "extension": "txt" },
        { "name": "b.rs", "path": "/data/alpha/b.rs", "directory": false, "size": 200, "extension": "rs" }
      ] },
    { "name": "beta", "path": "/data/beta", "directory": true, "size": 300,
      "children": [
        { "name": "c.png", "path": "/data/beta/c.png", "directory": false, "size": 300, "extension": "png" }
      ] },
    { "name": "d.zip", "path": "/data/d.zip", "directory": false, "size": 400, "extension": "zip" }
  ]
}"#;

fn write_snapshot(dir: &Path) -> PathBuf {
    let path = dir.join("snapshot.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    path
}

/// Pump `process_load_messages()` until the phase leaves `Loading` or the
/// deadline expires.
fn pump_until_done(state: &mut AppState) {
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    while state.phase == AppPhase::Loading {
        assert!(
            std::time::Instant::now() < deadline,
            "load did not complete within 30 seconds"
        );
        state.process_load_messages();
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn loaded_state(tmp: &TempDir) -> AppState {
    let mut state = AppState::default();
    state.start_load(write_snapshot(tmp.path()));
    pump_until_done(&mut state);
    assert_eq!(state.phase, AppPhase::Ready);
    state
}

fn node(state: &AppState, path: &str) -> NodeIndex {
    state.tree().unwrap().find_by_path(path).unwrap()
}

#[derive(Default)]
struct RecordingSink {
    copied: Vec<String>,
}

impl ClipboardSink for RecordingSink {
    fn set_text(&mut self, text: &str) -> treelens_core::Result<()> {
        self.copied.push(text.to_string());
        Ok(())
    }
}

// ── Load lifecycle ────────────────────────────────────────────────────────────

/// After `start_load`, the phase must be `Loading` and the path field must
/// show the snapshot being loaded.
#[test]
fn start_load_sets_loading_phase() {
    let tmp = TempDir::new().unwrap();
    let path = write_snapshot(tmp.path());
    let mut state = AppState::default();
    state.start_load(path.clone());

    assert_eq!(state.phase, AppPhase::Loading);
    assert_eq!(state.snapshot_path.as_deref(), Some(path.as_path()));
    assert_eq!(state.path_input, path.to_string_lossy());
}

/// A completed load installs the tree in both views, rooted at the top.
#[test]
fn load_completes_and_views_are_ready() {
    let tmp = TempDir::new().unwrap();
    let state = loaded_state(&tmp);

    let bridge = state.bridge.as_ref().expect("bridge after load");
    assert_eq!(bridge.tree().len(), 7);
    assert_eq!(bridge.treemap().current_root(), bridge.tree().root);
    assert_eq!(bridge.list().root(), bridge.tree().root);
    assert!(state.load_duration.is_some());
    assert!(state.load_error.is_none());
    assert_eq!(state.scroll_to_row, Some(0));
}

/// A missing file is reported in the status line and never panics.
#[test]
fn missing_snapshot_reports_error() {
    let tmp = TempDir::new().unwrap();
    let mut state = AppState::default();
    state.start_load(tmp.path().join("nope.json"));
    pump_until_done(&mut state);

    assert_eq!(state.phase, AppPhase::Idle);
    assert!(state.bridge.is_none());
    let err = state.load_error.as_deref().expect("error must be recorded");
    assert!(err.contains("nope.json"), "unexpected message: {err}");
}

/// Cancelling returns to the phase before the load: idle without a tree.
#[test]
fn cancel_load_returns_to_idle() {
    let tmp = TempDir::new().unwrap();
    let mut state = AppState::default();
    state.start_load(write_snapshot(tmp.path()));
    state.cancel_load();

    assert_eq!(state.phase, AppPhase::Idle);
    assert!(state.load_handle.is_none());
    assert!(!state.process_load_messages());
}

/// A failed reload keeps the tree that is already on screen.
#[test]
fn failed_reload_keeps_previous_tree() {
    let tmp = TempDir::new().unwrap();
    let mut state = loaded_state(&tmp);

    let bad = tmp.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();
    state.start_load(bad);
    pump_until_done(&mut state);

    assert_eq!(state.phase, AppPhase::Ready);
    assert!(state.load_error.is_some());
    assert_eq!(state.tree().unwrap().len(), 7);
}

/// Reloading resets zoom and selection in both views.
#[test]
fn reload_resets_views() {
    let tmp = TempDir::new().unwrap();
    let mut state = loaded_state(&tmp);
    let alpha = node(&state, "/data/alpha");
    state.treemap_zoom_in(alpha);
    assert!(state.last_event.is_some());

    state.start_load(write_snapshot(tmp.path()));
    pump_until_done(&mut state);

    let bridge = state.bridge.as_ref().unwrap();
    assert_eq!(bridge.treemap().current_root(), bridge.tree().root);
    assert_eq!(bridge.list().root(), bridge.tree().root);
    assert!(state.last_event.is_none());
}

// ── Selection sync ────────────────────────────────────────────────────────────

/// Selecting in the list moves the treemap selection and records one event.
#[test]
fn list_selection_reaches_treemap() {
    let tmp = TempDir::new().unwrap();
    let mut state = loaded_state(&tmp);
    let d = node(&state, "/data/d.zip");

    state.list_select(d);

    let bridge = state.bridge.as_ref().unwrap();
    assert_eq!(bridge.treemap().selected(), d);
    assert_eq!(state.last_event.map(|e| e.node), Some(d));
    assert_eq!(state.scroll_to_row, bridge.list().row_index(d));
    assert!(state.scroll_to_row.is_some());
}

/// Selecting a deep node by path reveals it in the list.
#[test]
fn select_by_path_expands_list() {
    let tmp = TempDir::new().unwrap();
    let mut state = loaded_state(&tmp);
    state.list_select_by_path("/data/alpha/b.rs");

    let b = node(&state, "/data/alpha/b.rs");
    let bridge = state.bridge.as_ref().unwrap();
    assert!(bridge.list().is_expanded(node(&state, "/data/alpha")));
    assert!(bridge.list().row_index(b).is_some());
    assert_eq!(bridge.treemap().selected(), b);
}

/// Zooming the treemap re-roots the list; Escape-style reset restores it.
#[test]
fn treemap_zoom_reroots_list() {
    let tmp = TempDir::new().unwrap();
    let mut state = loaded_state(&tmp);
    let alpha = node(&state, "/data/alpha");

    state.treemap_zoom_in(alpha);
    assert_eq!(state.bridge.as_ref().unwrap().list().root(), alpha);
    assert_eq!(
        state.last_event.map(|e| e.navigation),
        Some(NavigationType::ZoomIn)
    );

    state.treemap_intent(NavIntent::Reset);
    let bridge = state.bridge.as_ref().unwrap();
    assert_eq!(bridge.list().root(), bridge.tree().root);
    assert_eq!(
        state.last_event.map(|e| e.navigation),
        Some(NavigationType::ResetView)
    );
}

/// A click on the canvas selects the tile under the pointer in both views.
#[test]
fn treemap_click_selects_in_both_views() {
    let tmp = TempDir::new().unwrap();
    let mut state = loaded_state(&tmp);
    state
        .bridge
        .as_mut()
        .unwrap()
        .render_treemap(treelens_core::layout::LayoutRect::new(0.0, 0.0, 1000.0, 500.0));

    // Largest child first: d.zip takes x in [0, 400).
    state.treemap_click(100.0, 250.0, false);

    let d = node(&state, "/data/d.zip");
    let bridge = state.bridge.as_ref().unwrap();
    assert_eq!(bridge.treemap().selected(), d);
    assert_eq!(bridge.list().selected(), d);
}

/// Keyboard intents before any tree is loaded are ignored.
#[test]
fn intents_without_tree_are_noops() {
    let mut state = AppState::default();
    state.treemap_intent(NavIntent::NextSibling);
    state.list_expand_all();
    assert!(state.last_event.is_none());
    assert_eq!(state.phase, AppPhase::Idle);
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// A zero minimum tile size is rejected and the current settings survive.
#[test]
fn invalid_settings_are_rejected() {
    let mut state = AppState::default();
    let bad = ViewerSettings {
        min_pixel_size: 0,
        ..ViewerSettings::default()
    };
    assert!(state.apply_settings(bad).is_err());
    assert_eq!(state.settings, ViewerSettings::default());
}

/// Applied settings reach the treemap and are written to the settings file.
#[test]
fn applied_settings_are_persisted() {
    let tmp = TempDir::new().unwrap();
    let settings_path = tmp.path().join("cfg").join("settings.json");
    let mut state = AppState::new(ViewerSettings::default(), Some(settings_path.clone()));
    state.start_load(write_snapshot(tmp.path()));
    pump_until_done(&mut state);

    let new = ViewerSettings {
        min_pixel_size: 25,
        ..ViewerSettings::default()
    };
    state.apply_settings(new.clone()).unwrap();

    assert_eq!(state.bridge.as_ref().unwrap().treemap().min_pixel_size(), 25);
    assert_eq!(ViewerSettings::load_from(&settings_path).unwrap(), new);
    assert!(!state.notifications.is_empty());
}

/// Replacing the colour rules keeps the tile size and recolours by extension.
#[test]
fn color_rules_replace_mapping() {
    let tmp = TempDir::new().unwrap();
    let settings_path = tmp.path().join("settings.json");
    let mut state = AppState::new(
        ViewerSettings {
            min_pixel_size: 7,
            ..ViewerSettings::default()
        },
        Some(settings_path.clone()),
    );

    state
        .set_color_rules(vec![ColorRule::new(".MD", Rgb::new(1, 2, 3), "Markdown")])
        .unwrap();

    assert_eq!(state.settings.min_pixel_size, 7);
    assert_eq!(state.color_map.color_for_extension("md"), Some(Rgb::new(1, 2, 3)));
    assert_eq!(state.color_map.color_for_extension("rs"), None);
    let saved = ViewerSettings::load_from(&settings_path).unwrap();
    assert_eq!(saved.color_mappings.len(), 1);
    assert_eq!(saved.min_pixel_size, 7);
}

/// The draft drops blank rows and keeps the window open on a bad value.
#[test]
fn settings_draft_round_trip() {
    let mut state = AppState::default();
    state.open_settings();
    assert!(state.show_settings);

    let draft = state.settings_draft.as_mut().unwrap();
    draft.rules.clear();
    draft.add_rule();
    draft.add_rule();
    draft.rules[0].extension = " .LOG ".to_string();
    draft.rules[0].color = [0x12, 0x34, 0x56];
    draft.min_pixel_size = 0;

    state.save_settings_draft();
    assert!(state.show_settings, "window must stay open on error");
    assert!(state.settings_draft.as_ref().unwrap().error.is_some());

    state.settings_draft.as_mut().unwrap().min_pixel_size = 4;
    state.save_settings_draft();
    assert!(!state.show_settings);
    assert_eq!(state.settings.min_pixel_size, 4);
    assert_eq!(state.settings.color_mappings.len(), 1);
    assert_eq!(
        state.color_map.color_for_extension("log"),
        Some(Rgb::new(0x12, 0x34, 0x56))
    );
}

/// Restoring defaults in the draft brings back the built-in rules.
#[test]
fn settings_draft_reset_restores_defaults() {
    let mut draft = SettingsDraft::from_settings(&ViewerSettings {
        min_pixel_size: 10,
        color_mappings: Vec::new(),
    });
    draft.reset_rules();
    assert_eq!(draft.to_settings(), ViewerSettings::default());
}

// ── Copy path ─────────────────────────────────────────────────────────────────

/// Copying a path puts it on the clipboard and shows a success toast.
#[test]
fn copy_path_notifies() {
    let tmp = TempDir::new().unwrap();
    let mut state = loaded_state(&tmp);
    let b = node(&state, "/data/alpha/b.rs");
    let mut sink = RecordingSink::default();

    state.copy_path(&mut sink, b);

    assert_eq!(sink.copied, vec!["/data/alpha/b.rs".to_string()]);
    let active = state.active_notifications();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].kind, NotificationKind::Success);
}

// ── Start-up ──────────────────────────────────────────────────────────────────

/// Command-line options load the snapshot and override the tile size.
#[test]
fn build_from_startup_options() {
    let tmp = TempDir::new().unwrap();
    let built = TreeLensState::build(StartupOptions {
        snapshot: Some(write_snapshot(tmp.path())),
        settings_path: Some(tmp.path().join("settings.json")),
        min_pixel_size: Some(3),
    });

    let state = built.state();
    assert_eq!(state.phase, AppPhase::Loading);
    assert_eq!(state.settings.min_pixel_size, 3);
    assert_eq!(
        state.settings_path.as_deref(),
        Some(tmp.path().join("settings.json").as_path())
    );
}

/// A broken settings file falls back to defaults with an error toast.
#[test]
fn build_with_broken_settings_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let settings_path = tmp.path().join("settings.json");
    std::fs::write(&settings_path, r##"{ "minPixelSize": 5, "colorMappings": [{ "extension": "js", "color": "red" }] }"##)
        .unwrap();

    let built = TreeLensState::build(StartupOptions {
        settings_path: Some(settings_path),
        ..StartupOptions::default()
    });

    let state = built.state();
    assert_eq!(state.settings, ViewerSettings::default());
    assert_eq!(state.phase, AppPhase::Idle);
    assert!(!state.notifications.is_empty());
}
