use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

const INPUT_WIDTH: f32 = 280.0;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let available_rect = ui.available_rect_before_wrap();

    ui.scope_builder(egui::UiBuilder::new().max_rect(available_rect), |ui| {
        ui.vertical_centered(|ui| {
            let top_space = (available_rect.height() - 320.0).max(0.0) / 2.0;
            ui.add_space(top_space);

            ui.label(egui::RichText::new("Contact Book").size(32.0).strong().color(colors::TEXT_LIGHT));
            ui.add_space(24.0);

            let screen = &mut state.auth_screen;

            ui.add_sized(
                [INPUT_WIDTH, 28.0],
                egui::TextEdit::singleline(&mut screen.email_input)
                    .hint_text("Email")
                    .text_color(colors::TEXT_LIGHT),
            );
            field_error(ui, screen.email_error);
            ui.add_space(8.0);

            let password = ui.add_sized(
                [INPUT_WIDTH, 28.0],
                egui::TextEdit::singleline(&mut screen.password_input)
                    .hint_text("Password")
                    .password(true)
                    .text_color(colors::TEXT_LIGHT),
            );
            field_error(ui, screen.password_error);
            ui.add_space(20.0);

            let enabled = !screen.busy;
            let submit_login = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let mut register = false;
            let mut login = submit_login && enabled;
            ui.horizontal(|ui| {
                let button_width = 130.0;
                ui.add_space((ui.available_width() - button_width * 2.0 - 10.0).max(0.0) / 2.0);

                if ui
                    .add_enabled(enabled, egui::Button::new("Register").min_size(egui::vec2(button_width, 32.0)))
                    .clicked()
                {
                    register = true;
                }
                ui.add_space(10.0);
                if ui
                    .add_enabled(enabled, egui::Button::new("Sign in").min_size(egui::vec2(button_width, 32.0)))
                    .clicked()
                {
                    login = true;
                }
            });

            if !enabled {
                ui.add_space(15.0);
                ui.spinner();
            }

            if register {
                state.submit_register();
            } else if login {
                state.submit_login();
            }
        });
    });
}

fn field_error(ui: &mut egui::Ui, error: Option<&str>) {
    if let Some(message) = error {
        ui.label(egui::RichText::new(message).size(12.0).color(colors::ERROR));
    }
}
