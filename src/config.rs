//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// USB

/// USB VID/PID of the NexaPad ("NK" vendor id).
/// The desktop companion app matches on this pair.
pub const USB_VID: u16 = 0x4E4B;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "NexaKeys";
pub const USB_PRODUCT: &str = "NexaPad";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// Vendor-defined usage page / usage of the raw HID interface.
pub const RAW_HID_USAGE_PAGE: u16 = 0xFF60;
pub const RAW_HID_USAGE: u8 = 0x61;

/// Raw HID report size in both directions (bytes).
pub const RAW_HID_REPORT_SIZE: usize = 32;

/// Raw HID endpoint polling interval (ms).
pub const RAW_HID_POLL_MS: u8 = 1;

// Display

/// 7-bit I²C address of the OLED controller.
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

/// Width of the badge canvas in pixels.
pub const CANVAS_WIDTH: u32 = 128;

/// Vertical offset of the badge text (top of the glyph box).
pub const BADGE_Y: i32 = 3;

/// Inactivity thresholds for timeout levels 0, 1 and 2 (ms).
/// Level 3 means "never".
pub const OLED_TIMEOUTS_MS: [u64; 3] = [10_000, 30_000, 60_000];

/// Timeout level used at power-up and for unknown levels (30 s).
pub const DEFAULT_OLED_TIMEOUT_LEVEL: u8 = 1;

// Layers

/// Number of keymap layers on the pad.
pub const LAYER_COUNT: u8 = 5;

// Key matrix
//
//   Rows (outputs, idle high) → P0.02, P0.03, P0.04, P0.05
//   Cols (inputs, pull-up)    → P0.28, P0.29, P0.30, P0.31
//   I²C SDA                   → P0.26
//   I²C SCL                   → P0.27

pub const MATRIX_ROWS: usize = 4;
pub const MATRIX_COLS: usize = 4;

/// Matrix scan period (ms).
pub const MATRIX_SCAN_MS: u64 = 1;

/// Number of identical consecutive scans before a key change is accepted.
pub const MATRIX_DEBOUNCE_SCANS: u8 = 5;

// Housekeeping

/// Period of the housekeeping tick that drives the display timeout (ms).
pub const HOUSEKEEPING_TICK_MS: u64 = 50;

/// Depth of the key-event queue between the matrix and keypad tasks.
pub const KEY_QUEUE_DEPTH: usize = 16;

/// Depth of the raw HID queues (commands in, packets out).
pub const RAW_HID_QUEUE_DEPTH: usize = 8;
