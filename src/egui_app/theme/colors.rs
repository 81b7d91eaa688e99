//! Color Constants
//!
//! A dark slate background with teal accents. Record cards and inputs sit on
//! a lighter surface so the form reads clearly against the window.

use eframe::egui::Color32;

/// Window background - Deep slate
pub const BG_DARK: Color32 = Color32::from_rgb(0x1E, 0x25, 0x2B);

/// Top bar background - Slate
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x26, 0x32, 0x38);

/// Form and list surface
pub const SURFACE: Color32 = Color32::from_rgb(0x2C, 0x3A, 0x41);

/// Record card background
pub const CARD_BG: Color32 = Color32::from_rgb(0x37, 0x47, 0x4F);

/// Record card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0x45, 0x5A, 0x64);

/// Input background
pub const INPUT_BG: Color32 = Color32::from_rgb(0x24, 0x2E, 0x33);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xEC, 0xEF, 0xF1);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x90, 0xA4, 0xAE);

/// Accent color for highlights and primary buttons
pub const ACCENT: Color32 = Color32::from_rgb(0x00, 0x89, 0x7B);

/// Accent when hovered
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x26, 0xA6, 0x9A);

/// Disabled button fill
pub const BUTTON_DISABLED: Color32 = Color32::from_rgb(0x54, 0x6E, 0x7A);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x43, 0xA0, 0x47);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Separator/divider color
pub const SEPARATOR: Color32 = Color32::from_rgb(0x45, 0x5A, 0x64);

/// Toast background for confirmations
pub const TOAST_INFO_BG: Color32 = Color32::from_rgb(0x32, 0x32, 0x32);

/// Toast background for failures
pub const TOAST_ERROR_BG: Color32 = Color32::from_rgb(0x8E, 0x24, 0x24);
