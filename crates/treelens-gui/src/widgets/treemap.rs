/// Treemap widget — paints the engine's slice-and-dice layout.
///
/// The widget never computes geometry itself: it hands its canvas size to
/// the sync bridge, paints the tiles the layout produced, and translates
/// pointer and key input into [`TreemapAction`]s for the app to apply.
///
/// **Input**:
/// - Click selects the smallest tile under the pointer; Ctrl-click selects
///   its parent.
/// - ←/→ siblings, ↑ parent, ↓ first child, Space zoom into the selection,
///   Backspace zoom out, Escape reset.
///
/// **Labels**: centred, shown when the tile is large enough.
/// **Hover**: tooltip with name, size, share of parent and path.

use crate::state::AppState;
use crate::theme::{to_color32, TreeLensTheme};
use egui::{Key, Rect, Sense, Stroke, StrokeKind, Ui, Vec2};
use treelens_core::layout::{LayoutRect, Placement};
use treelens_core::model::size::format_size;
use treelens_core::model::NodeIndex;
use treelens_core::navigation::NavIntent;

/// Minimum tile size for a label.
const MIN_LABEL_W: f32 = 30.0;
const MIN_LABEL_H: f32 = 20.0;

/// Approximate glyph width at the label font size.
const LABEL_CHAR_W: f32 = 7.0;

/// Border colour is the fill scaled by this factor.
const BORDER_DARKEN: f32 = 0.7;

/// Selection outline width.
const HIGHLIGHT_W: f32 = 3.0;

/// Action returned from the treemap widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreemapAction {
    /// Pointer click in canvas coordinates.
    Click { x: f32, y: f32, ctrl: bool },
    /// Keyboard or nav-bar navigation.
    Intent(NavIntent),
    /// Breadcrumb or zoom button targeting a specific directory.
    ZoomIn(NodeIndex),
}

/// Map a key to the navigation it triggers.
pub fn intent_for_key(key: Key) -> Option<NavIntent> {
    match key {
        Key::ArrowLeft => Some(NavIntent::PreviousSibling),
        Key::ArrowRight => Some(NavIntent::NextSibling),
        Key::ArrowUp => Some(NavIntent::Parent),
        Key::ArrowDown => Some(NavIntent::FirstChild),
        Key::Space => Some(NavIntent::ZoomIntoSelection),
        Key::Backspace => Some(NavIntent::ZoomOut),
        Key::Escape => Some(NavIntent::Reset),
        _ => None,
    }
}

/// Navigation keys pressed this frame. Nothing is returned while a text
/// field has focus.
pub fn keyboard_intents(ctx: &egui::Context) -> Vec<NavIntent> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|e| match e {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } if !modifiers.command => intent_for_key(*key),
                _ => None,
            })
            .collect()
    })
}

/// Draw the navigation bar and the treemap canvas.
pub fn treemap(ui: &mut Ui, state: &mut AppState, theme: &TreeLensTheme) -> Option<TreemapAction> {
    let AppState {
        bridge, color_map, ..
    } = state;

    let Some(bridge) = bridge.as_mut() else {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("No snapshot loaded. Enter a path and click Open.")
                    .color(theme.text_muted),
            );
        });
        return None;
    };

    let mut action: Option<TreemapAction> = None;

    // ── Navigation bar ─────────────────────────────────────────────
    {
        let nav = bridge.treemap();
        let tree = nav.tree();
        let current = nav.current_root();
        let selected = nav.selected();
        let at_top = current == nav.full_root();
        let can_zoom_in = selected != current && tree.node(selected).has_children();

        ui.horizontal(|ui| {
            if ui
                .add_enabled(can_zoom_in, egui::Button::new("▼").min_size(Vec2::new(28.0, 22.0)))
                .on_hover_text("Zoom into selection (Space)")
                .clicked()
            {
                action = Some(TreemapAction::Intent(NavIntent::ZoomIntoSelection));
            }
            if ui
                .add_enabled(!at_top, egui::Button::new("▲").min_size(Vec2::new(28.0, 22.0)))
                .on_hover_text("Zoom out (Backspace)")
                .clicked()
            {
                action = Some(TreemapAction::Intent(NavIntent::ZoomOut));
            }
            if ui
                .add_enabled(!at_top, egui::Button::new("⟲").min_size(Vec2::new(28.0, 22.0)))
                .on_hover_text("Reset view (Escape)")
                .clicked()
            {
                action = Some(TreemapAction::Intent(NavIntent::Reset));
            }

            ui.add_space(8.0);

            // ── Breadcrumb ─────────────────────────────────────────
            for (i, crumb) in tree.path_to(current).into_iter().enumerate() {
                if i > 0 {
                    ui.label(egui::RichText::new(" › ").color(theme.text_muted).size(12.0));
                }
                let name = tree.node(crumb).name.as_str();
                let is_current = crumb == current;
                let text = if is_current {
                    egui::RichText::new(name)
                        .color(theme.text_primary)
                        .size(12.0)
                        .strong()
                } else {
                    egui::RichText::new(name).color(theme.accent).size(12.0)
                };
                let resp = ui.add(egui::Label::new(text).sense(Sense::click()));
                if resp.clicked() && !is_current {
                    action = Some(if crumb == nav.full_root() {
                        TreemapAction::Intent(NavIntent::Reset)
                    } else {
                        TreemapAction::ZoomIn(crumb)
                    });
                }
                if resp.hovered() && !is_current {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format_size(tree.node(current).size))
                        .color(theme.accent)
                        .size(12.0),
                );
            });
        });
    }

    ui.add_space(2.0);

    // ── Canvas ─────────────────────────────────────────────────────
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
    let canvas = response.rect;
    painter.rect_filled(canvas, 0.0, theme.surface);

    if canvas.width() < 1.0 || canvas.height() < 1.0 {
        return action;
    }

    bridge.render_treemap(LayoutRect::new(0.0, 0.0, canvas.width(), canvas.height()));
    let nav = bridge.treemap();
    let tree = nav.tree();
    let to_screen = |r: LayoutRect| {
        Rect::from_min_size(canvas.min + Vec2::new(r.x, r.y), Vec2::new(r.width, r.height))
    };

    // Sliced and flattened nodes are fully covered by their children.
    for (node, r, placement) in nav.placed_rects() {
        if !matches!(placement, Placement::Leaf | Placement::Culled) || r.area() <= 0.0 {
            continue;
        }
        let fill = color_map.color_for(tree.node(node));
        let screen = to_screen(r);
        painter.rect_filled(screen, 0.0, to_color32(fill));
        painter.rect_stroke(
            screen,
            0.0,
            Stroke::new(1.0, to_color32(fill.darken(BORDER_DARKEN))),
            StrokeKind::Inside,
        );

        if r.width > MIN_LABEL_W && r.height > MIN_LABEL_H {
            let max_chars = ((r.width - 10.0) / LABEL_CHAR_W) as usize;
            painter.text(
                screen.center(),
                egui::Align2::CENTER_CENTER,
                truncate_name(tree.node(node).name.as_str(), max_chars),
                egui::FontId::proportional(12.0),
                theme.tile_label,
            );
        }
    }

    if let Some(r) = nav.rects().get(nav.selected()) {
        painter.rect_stroke(
            to_screen(r),
            0.0,
            Stroke::new(HIGHLIGHT_W, theme.highlight),
            StrokeKind::Inside,
        );
    }

    // ── Hover tooltip ──────────────────────────────────────────────
    if let Some(pos) = response.hover_pos() {
        let local = pos - canvas.min;
        if let Some(node) = nav.node_at(local.x, local.y) {
            let n = tree.node(node);
            if n.is_dir {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            egui::show_tooltip_at_pointer(
                ui.ctx(),
                egui::LayerId::new(egui::Order::Tooltip, response.id),
                response.id.with("treemap_tip"),
                |ui| {
                    ui.label(egui::RichText::new(n.name.as_str()).strong().size(12.0));
                    let kind = if n.is_dir { "Directory" } else { "File" };
                    ui.label(
                        egui::RichText::new(format!(
                            "{} · {:.1}% of parent ({kind})",
                            format_size(n.size),
                            tree.percent_of_parent(node),
                        ))
                        .color(theme.text_secondary),
                    );
                    ui.label(egui::RichText::new(&n.path).color(theme.text_muted).size(11.0));
                },
            );
        }
    }

    // ── Click ──────────────────────────────────────────────────────
    if action.is_none() && response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let local = pos - canvas.min;
            let ctrl = ui.input(|i| i.modifiers.command);
            action = Some(TreemapAction::Click {
                x: local.x,
                y: local.y,
                ctrl,
            });
        }
    }

    action
}

/// Shorten `name` to at most `max_chars` characters, ending in "…".
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    if max_chars <= 1 {
        return String::new();
    }
    let mut out: String = name.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_navigation_key_is_mapped() {
        assert_eq!(intent_for_key(Key::ArrowLeft), Some(NavIntent::PreviousSibling));
        assert_eq!(intent_for_key(Key::ArrowRight), Some(NavIntent::NextSibling));
        assert_eq!(intent_for_key(Key::ArrowUp), Some(NavIntent::Parent));
        assert_eq!(intent_for_key(Key::ArrowDown), Some(NavIntent::FirstChild));
        assert_eq!(intent_for_key(Key::Space), Some(NavIntent::ZoomIntoSelection));
        assert_eq!(intent_for_key(Key::Backspace), Some(NavIntent::ZoomOut));
        assert_eq!(intent_for_key(Key::Escape), Some(NavIntent::Reset));
        assert_eq!(intent_for_key(Key::A), None);
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("report.pdf", 20), "report.pdf");
        assert_eq!(truncate_name("report.pdf", 5), "repo…");
        assert_eq!(truncate_name("überlang", 3), "üb…");
        assert_eq!(truncate_name("abc", 1), "");
    }
}
