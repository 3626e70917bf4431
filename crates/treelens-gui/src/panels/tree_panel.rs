/// Tree list panel: column headers, path lookup and the virtualised list.
use crate::state::AppState;
use crate::theme::TreeLensTheme;
use crate::widgets;
use egui::Ui;

/// Draw the tree panel (left side).
pub fn tree_panel(ui: &mut Ui, state: &mut AppState, theme: &TreeLensTheme) {
    // Jump to a node by path; the treemap follows through the bridge.
    if state.bridge.is_some() {
        ui.horizontal(|ui| {
            let id = ui.id().with("select_path");
            let mut query = ui.data_mut(|d| d.get_temp::<String>(id).unwrap_or_default());
            let edit = ui.add(
                egui::TextEdit::singleline(&mut query)
                    .hint_text("Select by path")
                    .desired_width(ui.available_width() - 60.0),
            );
            let submit = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.button("Go").clicked() || submit) && !query.trim().is_empty() {
                state.list_select_by_path(query.trim());
            }
            ui.data_mut(|d| d.insert_temp(id, query));
        });
        ui.add_space(2.0);
    }

    // Column headers.
    let header_height = 20.0;
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), header_height),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, theme.header_bg);

    let right_start = rect.right() - 330.0;
    for (x, label) in [
        (rect.left() + 8.0, "Name"),
        (right_start, "Size"),
        (right_start + 80.0, "%"),
        (right_start + 130.0, "Share"),
    ] {
        painter.text(
            egui::pos2(x, rect.center().y),
            egui::Align2::LEFT_CENTER,
            label,
            egui::FontId::proportional(12.0),
            theme.text_muted,
        );
    }

    ui.separator();

    widgets::tree_view::tree_view(ui, state, theme);
}
