//! Theme Module
//!
//! Color constants and styling helpers shared by every view.
//!
//! # Usage
//!
//! ```rust,ignore
//! use contact_book::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::record_card_frame().show(ui, |ui| {
//!     ui.colored_label(colors::TEXT_LIGHT, "Ana");
//! });
//! ```

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
