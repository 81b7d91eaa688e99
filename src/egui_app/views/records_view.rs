use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::contact::ContactRecord;
use crate::shared::error::Field;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    egui::Frame::new()
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            render_form(ui, state);
            ui.add_space(12.0);
            render_list(ui, state);
        });
}

fn render_form(ui: &mut egui::Ui, state: &mut AppState) {
    let mut save = false;
    let mut show = false;

    styles::form_frame().show(ui, |ui| {
        let screen = &mut state.record_screen;
        let width = ui.available_width();

        labeled_input(ui, "Name", &mut screen.name_input, width, false);
        field_error(ui, screen.error_for(Field::Name));

        labeled_input(ui, "Email", &mut screen.email_input, width, false);
        field_error(ui, screen.error_for(Field::Email));

        labeled_input(ui, "Message", &mut screen.message_input, width, true);
        field_error(ui, screen.error_for(Field::Message));

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            save = ui
                .add_enabled(
                    screen.save_enabled(),
                    egui::Button::new("Save").min_size(egui::vec2(120.0, 32.0)),
                )
                .clicked();
            show = ui
                .add(egui::Button::new("Show records").min_size(egui::vec2(120.0, 32.0)))
                .clicked();
            if !screen.save_enabled() || screen.loading {
                ui.spinner();
            }
        });
    });

    if save {
        state.submit_save();
    }
    if show {
        state.submit_load();
    }
}

fn labeled_input(ui: &mut egui::Ui, label: &str, value: &mut String, width: f32, multiline: bool) {
    ui.label(egui::RichText::new(label).color(colors::TEXT_SECONDARY));
    let edit = if multiline {
        egui::TextEdit::multiline(value).desired_rows(3)
    } else {
        egui::TextEdit::singleline(value)
    };
    ui.add_sized([width, if multiline { 64.0 } else { 28.0 }], edit.text_color(colors::TEXT_LIGHT));
}

fn field_error(ui: &mut egui::Ui, error: Option<&str>) {
    if let Some(message) = error {
        ui.label(egui::RichText::new(message).size(12.0).color(colors::ERROR));
    }
}

fn render_list(ui: &mut egui::Ui, state: &AppState) {
    let screen = &state.record_screen;
    if !screen.list_visible {
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if screen.records.is_empty() && !screen.loading {
                ui.colored_label(colors::TEXT_SECONDARY, "No records yet");
            }
            for record in &screen.records {
                render_record(ui, record);
                ui.add_space(6.0);
            }
        });
}

fn render_record(ui: &mut egui::Ui, record: &ContactRecord) {
    styles::record_card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new(&record.name).strong());
            if let Some(created) = record.created_at_utc() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.colored_label(
                        colors::TEXT_SECONDARY,
                        created.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string(),
                    );
                });
            }
        });
        ui.colored_label(colors::TEXT_SECONDARY, &record.email);
        ui.colored_label(colors::TEXT_LIGHT, &record.message);
    });
}
