/// Transient toasts in the bottom-right corner. They never take focus and
/// disappear on their own once expired.
use crate::state::AppState;
use crate::theme::TreeLensTheme;
use treelens_core::clipboard::{NotificationKind, NOTIFICATION_TTL};

pub fn notifications(ctx: &egui::Context, state: &mut AppState, theme: &TreeLensTheme) {
    let active = state.active_notifications();
    if active.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("notifications"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -36.0))
        .interactable(false)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for n in active {
                let color = match n.kind {
                    NotificationKind::Success => theme.success,
                    NotificationKind::Error => theme.error,
                };
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.0, color))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&n.message).color(color));
                    });
                ui.add_space(4.0);
            }
        });

    // Keep repainting so toasts vanish without further input.
    ctx.request_repaint_after(NOTIFICATION_TTL / 4);
}
