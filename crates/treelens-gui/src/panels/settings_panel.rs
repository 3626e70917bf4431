/// Settings window — minimum tile size and the extension colour rules.
///
/// Edits go to the draft in [`AppState::settings_draft`] and only take
/// effect on Save, which validates, recolours the treemap and persists.
use crate::state::{AppState, SettingsDraft};
use crate::theme::TreeLensTheme;
use treelens_core::color::default_rules;

pub fn settings_window(ctx: &egui::Context, state: &mut AppState, theme: &TreeLensTheme) {
    if !state.show_settings {
        return;
    }
    if state.settings_draft.is_none() {
        state.settings_draft = Some(SettingsDraft::from_settings(&state.settings));
    }

    let mut open = true;
    let mut save = false;
    let mut cancel = false;

    egui::Window::new("Settings")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(380.0)
        .show(ctx, |ui| {
            let Some(draft) = state.settings_draft.as_mut() else {
                return;
            };

            ui.horizontal(|ui| {
                ui.label("Minimum tile size (px):");
                ui.add(egui::DragValue::new(&mut draft.min_pixel_size).range(1..=200));
            });
            ui.label(
                egui::RichText::new("Regions smaller than this are drawn as a single tile.")
                    .size(11.0)
                    .color(theme.text_muted),
            );

            ui.add_space(8.0);
            ui.separator();
            ui.label(egui::RichText::new("Extension colours").strong());

            let mut remove: Option<usize> = None;
            egui::ScrollArea::vertical()
                .max_height(260.0)
                .show(ui, |ui| {
                    if draft.rules.is_empty() {
                        ui.label(
                            egui::RichText::new("No colour rules. Click Add to create one.")
                                .color(theme.text_muted),
                        );
                    }
                    egui::Grid::new("color_rules")
                        .num_columns(4)
                        .spacing([6.0, 4.0])
                        .show(ui, |ui| {
                            for (i, rule) in draft.rules.iter_mut().enumerate() {
                                ui.add(
                                    egui::TextEdit::singleline(&mut rule.extension)
                                        .hint_text("e.g. js")
                                        .desired_width(70.0),
                                );
                                ui.color_edit_button_srgb(&mut rule.color);
                                ui.add(
                                    egui::TextEdit::singleline(&mut rule.name)
                                        .hint_text("Name")
                                        .desired_width(120.0),
                                );
                                if ui.small_button("✕").on_hover_text("Remove").clicked() {
                                    remove = Some(i);
                                }
                                ui.end_row();
                            }
                        });
                });
            if let Some(i) = remove {
                draft.rules.remove(i);
            }

            ui.horizontal(|ui| {
                if ui.button("➕ Add").clicked() {
                    draft.add_rule();
                }
                if ui
                    .button("↺ Defaults")
                    .on_hover_text(format!("Restore the {} built-in rules", default_rules().len()))
                    .clicked()
                {
                    draft.reset_rules();
                }
            });

            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("💾 Save").clicked() {
                    save = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
                if let Some(err) = &draft.error {
                    ui.label(egui::RichText::new(err).color(theme.error));
                }
            });

            if let Some(path) = &state.settings_path {
                ui.label(
                    egui::RichText::new(format!("Saved to {}", path.display()))
                        .size(11.0)
                        .color(theme.text_muted),
                );
            }
        });

    if save {
        state.save_settings_draft();
    } else if cancel || !open {
        state.show_settings = false;
        state.settings_draft = None;
    }
}

