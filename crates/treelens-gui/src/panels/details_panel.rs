/// Details panel — shows information about the currently selected node.
use crate::state::{AppState, EguiClipboard};
use crate::theme::{to_color32, TreeLensTheme};
use crate::widgets::size_bar::size_bar;
use egui::Ui;
use treelens_core::model::size::{format_count, format_size};

/// Draw the details panel for the node selected in the treemap.
pub fn details_panel(ui: &mut Ui, state: &mut AppState, theme: &TreeLensTheme) {
    let Some(bridge) = &state.bridge else {
        ui.label(
            egui::RichText::new("Load a snapshot to see details")
                .color(theme.text_muted)
                .italics(),
        );
        return;
    };

    let tree = bridge.tree().clone();
    let selected = bridge.treemap().selected();
    let zoom_root = bridge.treemap().current_root();
    let node = tree.node(selected);

    ui.heading(egui::RichText::new(if node.is_dir { "📁" } else { "📄" }).size(16.0));
    ui.add_space(2.0);

    ui.label(
        egui::RichText::new(node.name.as_str())
            .size(14.0)
            .strong()
            .color(theme.text_primary),
    );
    ui.add_space(4.0);
    ui.label(egui::RichText::new(&node.path).size(11.0).color(theme.text_muted));

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    let percent = tree.percent_of_parent(selected);
    egui::Grid::new("details_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Size:").color(theme.text_muted));
            ui.label(
                egui::RichText::new(format_size(node.size))
                    .color(theme.accent)
                    .strong(),
            );
            ui.end_row();

            ui.label(egui::RichText::new("% of parent:").color(theme.text_muted));
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("{percent:.1}%")).color(theme.text_primary));
                size_bar(ui, percent, 60.0, 8.0, theme);
            });
            ui.end_row();

            if node.is_dir {
                ui.label(egui::RichText::new("Items:").color(theme.text_muted));
                ui.label(
                    egui::RichText::new(format_count(node.children.len() as u64))
                        .color(theme.text_primary),
                );
                ui.end_row();
            } else {
                let ext = node.extension.as_deref().unwrap_or("—");
                ui.label(egui::RichText::new("Type:").color(theme.text_muted));
                ui.horizontal(|ui| {
                    let (swatch, _) =
                        ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, 2.0, to_color32(state.color_map.color_for(node)));
                    ui.label(egui::RichText::new(ext).color(theme.text_primary));
                });
                ui.end_row();
            }

            ui.label(egui::RichText::new("Zoom root:").color(theme.text_muted));
            ui.label(
                egui::RichText::new(tree.node(zoom_root).name.as_str()).color(theme.text_primary),
            );
            ui.end_row();
        });

    ui.add_space(8.0);

    if ui.button("📋 Copy Path").clicked() {
        let ctx = ui.ctx().clone();
        state.copy_path(&mut EguiClipboard(&ctx), selected);
    }
}
