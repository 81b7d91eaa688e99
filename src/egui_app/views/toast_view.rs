use eframe::egui;

use crate::egui_app::notifications::{Notifications, ToastKind};
use crate::egui_app::theme::{colors, styles};

/// Draw the toast stack at the bottom of the window; a click dismisses one.
pub fn render(ctx: &egui::Context, notifications: &mut Notifications) {
    if notifications.is_empty() {
        return;
    }

    let mut dismissed = None;
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
        .interactable(true)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                for toast in notifications.iter() {
                    let response = styles::toast_frame(toast.kind == ToastKind::Error)
                        .show(ui, |ui| {
                            ui.colored_label(colors::TEXT_LIGHT, &toast.text);
                        })
                        .response
                        .interact(egui::Sense::click());
                    if response.clicked() {
                        dismissed = Some(toast.id);
                    }
                    ui.add_space(6.0);
                }
            });
        });

    if let Some(id) = dismissed {
        notifications.dismiss(id);
    }
}
