//! Library interface for the NexaPad firmware.
//!
//! Holds everything that does not touch hardware: the raw HID frame
//! codec, the display power policy, badge layout, the layer stack and
//! the controller that ties them together behind small traits. The
//! embedded binary (main.rs) plugs the real panel, USB endpoint and key
//! matrix into those traits; the tests plug in recording fakes.
//!
//! Usage: `cargo test` on the host.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is built with `--features embedded` for the nRF52840 target.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod controller;
pub mod layer;
pub mod oled;
pub mod protocol;

pub use controller::{Controller, KeyEvent, Transport};
pub use layer::{LayerStack, LayerState};
pub use oled::{BadgeDisplay, OledTimeout, PowerState};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - controller hooks against recording fakes
// ═══════════════════════════════════════════════════════════════════════════
