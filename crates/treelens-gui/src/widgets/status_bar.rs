/// Bottom status bar — load state, tree statistics and the current selection.
use crate::state::{AppPhase, AppState};
use crate::theme::TreeLensTheme;
use egui::Ui;
use treelens_core::model::size::{format_count, format_size};
use treelens_core::navigation::NavigationType;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState, theme: &TreeLensTheme) {
    ui.horizontal(|ui| {
        match state.phase {
            AppPhase::Idle => {
                ui.label(egui::RichText::new("Ready").size(12.0).color(theme.text_muted));
            }
            AppPhase::Loading => {
                ui.spinner();
                let path = state
                    .snapshot_path
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                ui.label(
                    egui::RichText::new(format!("Loading {}...", truncate_path(&path, 60)))
                        .size(12.0)
                        .color(theme.text_primary),
                );
            }
            AppPhase::Ready => {
                if let Some(bridge) = &state.bridge {
                    let tree = bridge.tree();
                    ui.label(
                        egui::RichText::new("\u{2713} Snapshot loaded")
                            .size(12.0)
                            .color(theme.success),
                    );
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("{} nodes", format_count(tree.len() as u64)))
                            .size(12.0)
                            .color(theme.text_primary),
                    );
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format_size(tree.node(tree.root).size))
                            .size(12.0)
                            .color(theme.accent),
                    );
                    if let Some(duration) = state.load_duration {
                        ui.separator();
                        ui.label(
                            egui::RichText::new(format!("{:.2}s", duration.as_secs_f64()))
                                .size(12.0)
                                .color(theme.text_muted),
                        );
                    }

                    // Current selection, as reported by the last accepted event.
                    if let Some(event) = state.last_event {
                        let node = tree.node(event.node);
                        ui.separator();
                        ui.label(
                            egui::RichText::new(format!(
                                "{} · {}",
                                truncate_path(&node.path, 60),
                                format_size(node.size)
                            ))
                            .size(12.0)
                            .color(theme.text_primary),
                        );
                        ui.label(
                            egui::RichText::new(navigation_label(event.navigation))
                                .size(11.0)
                                .color(theme.text_muted),
                        );
                    }

                    let stats = bridge.list().render_stats();
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!(
                            "rows built {} · rebuilds {}",
                            format_count(stats.rows_built),
                            format_count(stats.full_rebuilds)
                        ))
                        .size(11.0)
                        .color(theme.text_muted),
                    )
                    .on_hover_text(format!(
                        "Rows restyled: {}\nEcho events suppressed: {}",
                        format_count(stats.rows_restyled),
                        format_count(bridge.suppressed_echoes())
                    ));
                }
            }
        }

        if let Some(err) = &state.load_error {
            ui.separator();
            ui.label(
                egui::RichText::new(format!("Load failed: {err}"))
                    .size(12.0)
                    .color(theme.error),
            );
        }
    });
}

fn navigation_label(navigation: NavigationType) -> &'static str {
    match navigation {
        NavigationType::Select => "select",
        NavigationType::NavigateToParent => "parent",
        NavigationType::ZoomIn => "zoom in",
        NavigationType::ZoomOut => "zoom out",
        NavigationType::ResetView => "reset",
    }
}

/// Truncate a path string to fit within `max_len` characters,
/// replacing the middle with "..." if needed.
pub fn truncate_path(path: &str, max_len: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= max_len {
        return path.to_string();
    }
    let half = max_len.saturating_sub(3) / 2;
    let head: String = chars[..half].iter().collect();
    let tail: String = chars[chars.len() - half..].iter().collect();
    format!("{head}...{tail}")
}
