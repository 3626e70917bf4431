/// Virtualised tree list widget.
///
/// Paints only the rows inside the viewport, reading them from the list
/// view's flat visible-row table. All mutations are deferred until painting
/// is done and then routed through the sync bridge, so the treemap follows.
use crate::state::{AppPhase, AppState};
use crate::theme::TreeLensTheme;
use crate::widgets::size_bar::paint_size_bar;
use egui::{Rect, Response, Sense, Ui, Vec2};
use treelens_core::model::size::format_size;
use treelens_core::model::NodeIndex;

/// Height of each row in pixels.
const ROW_HEIGHT: f32 = 24.0;

/// Indentation per depth level in pixels.
const INDENT_PX: f32 = 20.0;

/// Width reserved on the right for size, percentage, bar and copy button.
const RIGHT_AREA_W: f32 = 330.0;

/// Deferred row interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowAction {
    Select(NodeIndex),
    Toggle(NodeIndex),
    CopyPath(NodeIndex),
}

/// Draw the virtualised tree list.
pub fn tree_view(ui: &mut Ui, state: &mut AppState, theme: &TreeLensTheme) -> Response {
    let Some(bridge) = state.bridge.as_ref() else {
        let text = if state.phase == AppPhase::Loading {
            "Loading snapshot..."
        } else {
            "No snapshot loaded."
        };
        ui.centered_and_justified(|ui| {
            ui.label(egui::RichText::new(text).color(theme.text_muted));
        });
        return ui.interact(ui.max_rect(), ui.id().with("empty_tree"), Sense::click());
    };

    let list = bridge.list();
    let tree = list.tree();
    let total_rows = list.visible_len();
    let total_height = total_rows as f32 * ROW_HEIGHT;
    let scroll_to = state.scroll_to_row.take();
    let mut action: Option<RowAction> = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            // Reserve the full virtual height so the scrollbar is correct.
            let (response, painter) = ui.allocate_painter(
                Vec2::new(ui.available_width(), total_height),
                Sense::hover(),
            );
            let top_y = response.rect.top();
            let row_rect_at = |row_idx: usize| {
                Rect::from_min_size(
                    egui::pos2(response.rect.left(), top_y + row_idx as f32 * ROW_HEIGHT),
                    Vec2::new(response.rect.width(), ROW_HEIGHT),
                )
            };

            if let Some(row_idx) = scroll_to.filter(|&r| r < total_rows) {
                ui.scroll_to_rect(row_rect_at(row_idx), Some(egui::Align::Center));
            }

            let viewport = ui.clip_rect();
            let first_visible = ((viewport.top() - top_y) / ROW_HEIGHT).floor().max(0.0) as usize;
            let last_visible = (((viewport.bottom() - top_y) / ROW_HEIGHT).ceil().max(0.0) as usize)
                .min(total_rows);

            for (offset, row) in list
                .visible_rows_in(first_visible..last_visible.max(first_visible))
                .into_iter()
                .enumerate()
            {
                let row_idx = first_visible + offset;
                let node = tree.node(row.node);
                let row_rect = row_rect_at(row_idx);

                if row.is_selected {
                    painter.rect_filled(row_rect, 0.0, theme.selection);
                }

                let row_response =
                    ui.interact(row_rect, ui.id().with(("tree_row", row_idx)), Sense::click());
                if row_response.hovered() && !row.is_selected {
                    painter.rect_filled(row_rect, 0.0, theme.surface_hover);
                }
                if row_response.clicked() {
                    action = Some(RowAction::Select(row.node));
                }
                if row_response.double_clicked() && row.has_children {
                    action = Some(RowAction::Toggle(row.node));
                }
                row_response.context_menu(|ui| {
                    if ui.button("📋 Copy Path").clicked() {
                        action = Some(RowAction::CopyPath(row.node));
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.label(format!("Size: {}", format_size(node.size)));
                });

                let indent = INDENT_PX * row.depth as f32;
                let text_x = row_rect.left() + indent + 18.0;
                let text_y = row_rect.center().y;

                // Expand/collapse arrow, only for non-empty directories.
                if row.has_children {
                    let arrow_rect = Rect::from_min_size(
                        egui::pos2(row_rect.left() + indent, row_rect.top()),
                        Vec2::new(16.0, ROW_HEIGHT),
                    );
                    let arrow_response =
                        ui.interact(arrow_rect, ui.id().with(("arrow", row_idx)), Sense::click());
                    if arrow_response.clicked() {
                        action = Some(RowAction::Toggle(row.node));
                    }
                    painter.text(
                        egui::pos2(row_rect.left() + indent + 2.0, text_y),
                        egui::Align2::LEFT_CENTER,
                        if row.is_expanded { "▼" } else { "▶" },
                        egui::FontId::proportional(11.0),
                        theme.text_muted,
                    );
                }

                let (icon, icon_color) = if node.is_dir {
                    ("📁", theme.folder_icon)
                } else {
                    ("📄", theme.file_icon)
                };
                painter.text(
                    egui::pos2(text_x, text_y),
                    egui::Align2::LEFT_CENTER,
                    icon,
                    egui::FontId::proportional(13.0),
                    icon_color,
                );

                // Name, clipped before the right-hand columns.
                let name_x = text_x + 20.0;
                let right_area_start = (row_rect.right() - RIGHT_AREA_W).max(name_x + 20.0);
                let name_clip = Rect::from_min_max(
                    egui::pos2(name_x, row_rect.top()),
                    egui::pos2(right_area_start - 8.0, row_rect.bottom()),
                );
                painter.with_clip_rect(painter.clip_rect().intersect(name_clip)).text(
                    egui::pos2(name_x, text_y),
                    egui::Align2::LEFT_CENTER,
                    node.name.as_str(),
                    egui::FontId::proportional(13.0),
                    theme.text_primary,
                );
                if row_response.hovered() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        ui.id().with(("tree_tip", row_idx)),
                        |ui| {
                            ui.label(&node.path);
                        },
                    );
                }

                painter.text(
                    egui::pos2(right_area_start, text_y),
                    egui::Align2::LEFT_CENTER,
                    format_size(node.size),
                    egui::FontId::proportional(12.0),
                    theme.text_secondary,
                );
                painter.text(
                    egui::pos2(right_area_start + 80.0, text_y),
                    egui::Align2::LEFT_CENTER,
                    format!("{:.1}%", row.percent),
                    egui::FontId::proportional(12.0),
                    theme.text_muted,
                );

                let bar_rect = Rect::from_min_size(
                    egui::pos2(right_area_start + 130.0, text_y - 5.0),
                    Vec2::new(100.0, 10.0),
                );
                paint_size_bar(&painter, bar_rect, row.percent, theme.header_bg, theme);

                let copy_rect = Rect::from_min_size(
                    egui::pos2(right_area_start + 240.0, row_rect.top() + 2.0),
                    Vec2::new(80.0, ROW_HEIGHT - 4.0),
                );
                let copy_response =
                    ui.interact(copy_rect, ui.id().with(("copy", row_idx)), Sense::click());
                let copy_color = if copy_response.hovered() {
                    theme.accent
                } else {
                    theme.text_muted
                };
                painter.text(
                    copy_rect.left_center(),
                    egui::Align2::LEFT_CENTER,
                    "copy path",
                    egui::FontId::proportional(11.0),
                    copy_color,
                );
                if copy_response.clicked() {
                    action = Some(RowAction::CopyPath(row.node));
                }
            }

            response
        });

    // Apply deferred state mutations.
    match action {
        Some(RowAction::Select(node)) => state.list_select(node),
        Some(RowAction::Toggle(node)) => state.list_toggle_expand(node),
        Some(RowAction::CopyPath(node)) => {
            let ctx = ui.ctx().clone();
            state.copy_path(&mut crate::state::EguiClipboard(&ctx), node);
        }
        None => {}
    }

    ui.interact(ui.max_rect(), ui.id().with("tree_bg"), Sense::hover())
}
