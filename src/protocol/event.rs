//! Device → host event frames.
//!
//! Layout (32 bytes, zero padded):
//! ```text
//! Byte 0: 0xFB (event marker)
//! Byte 1: event type
//!         0x01 = layer change → byte 2 = highest active layer
//!         0x02 = key event    → byte 2 = row, byte 3 = col,
//!                               byte 4 = pressed (0 or 1)
//! ```

use super::{Packet, EVENT_MARKER, PACKET_SIZE};

/// Event type byte for a layer change.
pub const EVENT_LAYER_CHANGE: u8 = 0x01;

/// Event type byte for a key press or release.
pub const EVENT_KEY: u8 = 0x02;

/// Notification pushed to the host without being asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The highest active layer changed (or was re-set).
    LayerChange { layer: u8 },
    /// A physical key changed state.
    Key { row: u8, col: u8, pressed: bool },
}

impl Event {
    /// Event type byte (frame byte 1).
    pub const fn kind(&self) -> u8 {
        match self {
            Event::LayerChange { .. } => EVENT_LAYER_CHANGE,
            Event::Key { .. } => EVENT_KEY,
        }
    }

    /// Serialise into a byte slice, zero-filling the rest of the frame.
    ///
    /// Returns the number of bytes written (always 32), or 0 if the
    /// buffer cannot hold a full frame.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < PACKET_SIZE {
            return 0;
        }
        let frame = &mut buf[..PACKET_SIZE];
        frame.fill(0);
        frame[0] = EVENT_MARKER;
        frame[1] = self.kind();
        match *self {
            Event::LayerChange { layer } => frame[2] = layer,
            Event::Key { row, col, pressed } => {
                frame[2] = row;
                frame[3] = col;
                frame[4] = pressed as u8;
            }
        }
        PACKET_SIZE
    }

    /// Build a complete frame for the transport.
    pub fn to_packet(&self) -> Packet {
        let mut packet = [0u8; PACKET_SIZE];
        self.serialize(&mut packet);
        packet
    }

    /// Parse an event frame, as the host side would.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 5 || data[0] != EVENT_MARKER {
            return None;
        }
        match data[1] {
            EVENT_LAYER_CHANGE => Some(Event::LayerChange { layer: data[2] }),
            EVENT_KEY => Some(Event::Key {
                row: data[2],
                col: data[3],
                pressed: data[4] != 0,
            }),
            _ => None,
        }
    }
}
