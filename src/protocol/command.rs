//! Host → device command frames and their dispatch.
//!
//! Layout:
//! ```text
//! Byte 0: 0xFC (command marker)
//! Byte 1: command code
//!         0x01 = switch layer      (byte 2 = target layer)
//!         0x02 = get current layer
//!         0x03 = set OLED timeout  (byte 2 = level 0..=3)
//!         0x04 = get OLED timeout
//! Byte 2: argument (command dependent)
//! ```
//!
//! The response is the same frame: byte 1 becomes 0xFD and, for the
//! two queries, byte 2 carries the answer.

use super::{ACK_MARKER, COMMAND_MARKER};
use crate::oled::OledTimeout;

pub const CMD_SWITCH_LAYER: u8 = 0x01;
pub const CMD_GET_LAYER: u8 = 0x02;
pub const CMD_SET_OLED_TIMEOUT: u8 = 0x03;
pub const CMD_GET_OLED_TIMEOUT: u8 = 0x04;

/// Smallest frame that can carry a command and its answer.
const COMMAND_HEADER_SIZE: usize = 3;

/// A recognised host command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Force the layer stack to a single layer.
    SwitchLayer(u8),
    /// Report the highest active layer.
    GetLayer,
    /// Change the display inactivity timeout (raw wire level).
    SetOledTimeout(u8),
    /// Report the current timeout level.
    GetOledTimeout,
}

impl Command {
    /// Parse a command frame.
    ///
    /// Returns `None` for frames without the command marker, frames too
    /// short to answer, and unknown command codes. Such frames must be
    /// echoed back unmodified.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < COMMAND_HEADER_SIZE || data[0] != COMMAND_MARKER {
            return None;
        }
        match data[1] {
            CMD_SWITCH_LAYER => Some(Command::SwitchLayer(data[2])),
            CMD_GET_LAYER => Some(Command::GetLayer),
            CMD_SET_OLED_TIMEOUT => Some(Command::SetOledTimeout(data[2])),
            CMD_GET_OLED_TIMEOUT => Some(Command::GetOledTimeout),
            _ => None,
        }
    }

    /// Wire code (frame byte 1).
    pub const fn code(&self) -> u8 {
        match self {
            Command::SwitchLayer(_) => CMD_SWITCH_LAYER,
            Command::GetLayer => CMD_GET_LAYER,
            Command::SetOledTimeout(_) => CMD_SET_OLED_TIMEOUT,
            Command::GetOledTimeout => CMD_GET_OLED_TIMEOUT,
        }
    }

    /// Build a 32-byte command frame, as the host side would.
    pub fn to_packet(&self) -> super::Packet {
        let mut packet = [0u8; super::PACKET_SIZE];
        packet[0] = COMMAND_MARKER;
        packet[1] = self.code();
        if let Command::SwitchLayer(arg) | Command::SetOledTimeout(arg) = *self {
            packet[2] = arg;
        }
        packet
    }
}

/// State change requested by a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    None,
    /// Force the layer stack to this layer.
    MoveLayer(u8),
    /// Store the timeout, reset the inactivity timer, wake the display.
    SetOledTimeout(OledTimeout),
}

/// Result of dispatching one command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outcome {
    pub effect: Effect,
    /// Answer for byte 2, if the command is a query.
    pub payload: Option<u8>,
}

impl Outcome {
    /// Write the acknowledgement (and answer) into the received frame.
    pub fn write_response(&self, buf: &mut [u8]) {
        if buf.len() < COMMAND_HEADER_SIZE {
            return;
        }
        if let Some(value) = self.payload {
            buf[2] = value;
        }
        buf[1] = ACK_MARKER;
    }
}

/// Map a command and the current device state to its effect and answer.
///
/// Pure: nothing is mutated here, so the table can be tested without a
/// transport, display or layer stack.
pub fn dispatch(command: Command, current_layer: u8, timeout: OledTimeout) -> Outcome {
    match command {
        Command::SwitchLayer(layer) => Outcome {
            effect: Effect::MoveLayer(layer),
            payload: None,
        },
        Command::GetLayer => Outcome {
            effect: Effect::None,
            payload: Some(current_layer),
        },
        Command::SetOledTimeout(level) => Outcome {
            effect: Effect::SetOledTimeout(OledTimeout::from_level(level)),
            payload: None,
        },
        Command::GetOledTimeout => Outcome {
            effect: Effect::None,
            payload: Some(timeout.level()),
        },
    }
}
