/// Proportional size bar -- share of the parent, colour-banded by percentage.
use crate::theme::TreeLensTheme;
use egui::{Color32, Painter, Rect, Ui, Vec2};

/// Paint a bar into `rect`: a track plus a fill proportional to `percent`.
pub fn paint_size_bar(painter: &Painter, rect: Rect, percent: f32, track: Color32, theme: &TreeLensTheme) {
    painter.rect_filled(rect, 2.0, track);

    let fill_w = rect.width() * (percent / 100.0).clamp(0.0, 1.0);
    if fill_w > 0.5 {
        let fill_rect = Rect::from_min_size(rect.min, Vec2::new(fill_w, rect.height()));
        painter.rect_filled(fill_rect, 2.0, theme.bar_color(percent));
    }
}

/// Allocate and draw a standalone size bar.
pub fn size_bar(ui: &mut Ui, percent: f32, width: f32, height: f32, theme: &TreeLensTheme) {
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(width, height), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    paint_size_bar(&painter, rect, percent, theme.header_bg, theme);
}
