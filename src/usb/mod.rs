//! USB Device subsystem - presents the raw HID side channel to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. The device exposes one vendor-defined HID interface
//! (usage page 0xFF60, usage 0x61) with 32-byte reports in each
//! direction, which the desktop companion app opens by VID/PID.
//!
//! Three tasks service it: the device runner, a reader that forwards
//! host commands to the keypad task, and a writer that drains the
//! outbound frame queue.

pub mod raw_hid;
