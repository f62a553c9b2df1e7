//! Raw HID side channel between the pad and the desktop companion app.
//!
//! Every frame is a fixed 32-byte report in both directions.
//!
//! ```text
//! Device → host (event):    [0xFB, type, payload.., 0x00 padding]
//!                             type 0x01 = layer change  [layer]
//!                             type 0x02 = key event     [row, col, pressed]
//! Host → device (command):  [0xFC, code, argument, ..]
//! Device → host (response): the command frame echoed back, with
//!                           byte 1 replaced by 0xFD when handled
//! ```
//!
//! Frames that do not start with `0xFC`, and unknown command codes, are
//! echoed back untouched. The host detects failure by the missing `0xFD`.

pub mod command;
pub mod event;

#[cfg(test)]
mod tests;

pub use command::{dispatch, Command, Effect, Outcome};
pub use event::Event;

/// Size of every raw HID frame (bytes).
pub const PACKET_SIZE: usize = crate::config::RAW_HID_REPORT_SIZE;

/// Byte 0 of device → host event frames.
pub const EVENT_MARKER: u8 = 0xFB;

/// Byte 0 of host → device command frames.
pub const COMMAND_MARKER: u8 = 0xFC;

/// Written into byte 1 of a command frame once it has been handled.
pub const ACK_MARKER: u8 = 0xFD;

/// A full raw HID frame.
pub type Packet = [u8; PACKET_SIZE];

// USB HID report descriptor for the vendor-defined raw HID interface

/// USB HID Report Descriptor for the raw HID interface.
///
/// One vendor collection (usage page 0xFF60, usage 0x61) with:
///   - 32 opaque bytes of input (device → host)
///   - 32 opaque bytes of output (host → device)
pub const RAW_HID_REPORT_DESCRIPTOR: &[u8] = &[
    0x06, 0x60, 0xFF, // Usage Page (Vendor Defined 0xFF60)
    0x09, 0x61, // Usage (0x61)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Data to host -
    0x09, 0x62, //   Usage (0x62)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x20, //   Report Count (32)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Data from host -
    0x09, 0x63, //   Usage (0x63)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x20, //   Report Count (32)
    0x75, 0x08, //   Report Size (8)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];
