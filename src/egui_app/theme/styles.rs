//! Theme Styling Functions
//!
//! Global visuals plus frame builders for the panels and cards.

use eframe::egui::{self, CornerRadius, Stroke};
use super::colors;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.window_fill = colors::SURFACE;
    style.visuals.panel_fill = colors::BG_DARK;
    style.visuals.extreme_bg_color = colors::INPUT_BG;

    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);
    style.visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors::SEPARATOR);

    style.visuals.widgets.inactive.bg_fill = colors::ACCENT;
    style.visuals.widgets.inactive.weak_bg_fill = colors::ACCENT;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.widgets.hovered.bg_fill = colors::ACCENT_HOVER;
    style.visuals.widgets.hovered.weak_bg_fill = colors::ACCENT_HOVER;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.widgets.active.bg_fill = colors::ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.selection.bg_fill = colors::ACCENT;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    ctx.set_style(style);
}

/// Create a frame style for the top bar
pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame style for the central panel
pub fn main_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(0))
}

/// Create a frame for the record form
pub fn form_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::SURFACE)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(16))
}

/// Create a frame for one record in the list
pub fn record_card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(1.0, colors::CARD_BORDER))
        .corner_radius(CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame for a toast
pub fn toast_frame(is_error: bool) -> egui::Frame {
    egui::Frame::new()
        .fill(if is_error { colors::TOAST_ERROR_BG } else { colors::TOAST_INFO_BG })
        .corner_radius(CornerRadius::same(16))
        .inner_margin(egui::Margin::symmetric(16, 8))
        .shadow(egui::epaint::Shadow {
            offset: [0, 2],
            blur: 8,
            spread: 0,
            color: egui::Color32::from_black_alpha(80),
        })
}
