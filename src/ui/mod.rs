//! User interface subsystem - OLED badge panel + key matrix.
//!
//! ## Components
//!
//! - **Panel**: SSD1306-compatible 128×32 OLED via I²C, showing the
//!   `LAYER n` badge
//! - **Matrix**: 4×4 key switches, scanned and debounced into key events

pub mod matrix;
pub mod panel;
