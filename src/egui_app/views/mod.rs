use eframe::egui;

use crate::egui_app::AppView;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub mod auth_view;
pub mod records_view;
pub mod toast_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    // The authentication screen has no bar.
    if state.current_view() == AppView::Auth {
        return;
    }

    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("Home").size(18.0).strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Sign out").clicked() {
                        state.sign_out();
                        return;
                    }
                    if let Some(email) = state.session.as_ref().and_then(|s| s.email.as_deref()) {
                        ui.colored_label(colors::TEXT_SECONDARY, email);
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::main_frame())
        .show(ctx, |ui| match state.current_view() {
            AppView::Auth => auth_view::render(ui, state),
            AppView::Records => records_view::render(ui, state),
        });
}
