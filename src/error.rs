//! Unified error type for the firmware.
//!
//! We avoid `alloc` - all error variants are fieldless.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! None of these abort the firmware: the controller treats the panel
//! and the raw HID link as best-effort, so errors end up in the log.

use defmt::Format;

/// Top-level error type used across the firmware.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Format)]
pub enum Error {
    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    // USB
    /// Raw HID endpoint read or write failed.
    Usb,

    /// Outbound raw HID queue is full; the frame was dropped.
    QueueFull,

    /// A received report does not fit in a 32-byte frame.
    BufferOverflow,
}
