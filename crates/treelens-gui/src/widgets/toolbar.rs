/// Top action bar -- snapshot path, load controls, list controls, theme toggle.
use crate::state::{AppPhase, AppState};
use egui::Ui;
use std::path::PathBuf;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("▦ TreeLens")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        // Snapshot path; Enter opens it.
        let path_edit = ui.add(
            egui::TextEdit::singleline(&mut state.path_input)
                .hint_text("Path to snapshot JSON")
                .desired_width(320.0),
        );
        let enter = path_edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let can_open = !state.path_input.trim().is_empty();
        let open_btn = ui.add_enabled(
            can_open,
            egui::Button::new("📂 Open").min_size(egui::vec2(70.0, 28.0)),
        );
        if can_open && (open_btn.clicked() || enter) {
            let path = PathBuf::from(state.path_input.trim());
            state.start_load(path);
        }

        let can_cancel = state.phase == AppPhase::Loading;
        if ui
            .add_enabled(can_cancel, egui::Button::new("⏹ Cancel").min_size(egui::vec2(70.0, 28.0)))
            .clicked()
        {
            state.cancel_load();
        }

        ui.separator();

        let have_tree = state.bridge.is_some();
        if ui
            .add_enabled(have_tree, egui::Button::new("⊞ Expand all"))
            .on_hover_text("Expand every directory in the list")
            .clicked()
        {
            state.list_expand_all();
        }
        if ui
            .add_enabled(have_tree, egui::Button::new("⊟ Collapse all"))
            .on_hover_text("Collapse the list to its root")
            .clicked()
        {
            state.list_collapse_all();
        }

        // Right-aligned controls.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("ℹ").on_hover_text("About TreeLens").clicked() {
                state.show_about = true;
            }

            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }

            ui.separator();

            if ui
                .selectable_label(state.show_settings, "⚙ Settings")
                .on_hover_text("Minimum tile size and extension colours")
                .clicked()
            {
                if state.show_settings {
                    state.show_settings = false;
                } else {
                    state.open_settings();
                }
            }
        });
    });
}
