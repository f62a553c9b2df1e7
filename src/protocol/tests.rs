//! Unit tests for raw HID frame encoding and command dispatch.
//!
//! These tests run on the host (not embedded) and verify the byte
//! layout the desktop companion app depends on.

use super::command::{CMD_GET_LAYER, CMD_GET_OLED_TIMEOUT, CMD_SET_OLED_TIMEOUT, CMD_SWITCH_LAYER};
use super::*;
use crate::oled::OledTimeout;

// ═══════════════════════════════════════════════════════════════════════════
// Event Frame Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn layer_change_frame_layout() {
    let packet = Event::LayerChange { layer: 3 }.to_packet();
    assert_eq!(packet.len(), 32);
    assert_eq!(&packet[..3], &[0xFB, 0x01, 3]);
    assert!(packet[3..].iter().all(|&b| b == 0));
}

#[test]
fn key_event_frame_layout() {
    let packet = Event::Key {
        row: 2,
        col: 1,
        pressed: true,
    }
    .to_packet();
    assert_eq!(&packet[..5], &[0xFB, 0x02, 2, 1, 1]);
    assert!(packet[5..].iter().all(|&b| b == 0));

    let released = Event::Key {
        row: 2,
        col: 1,
        pressed: false,
    }
    .to_packet();
    assert_eq!(released[4], 0);
}

#[test]
fn event_serialize_clears_stale_bytes() {
    let mut buf = [0xAAu8; 40];
    let written = Event::LayerChange { layer: 1 }.serialize(&mut buf);
    assert_eq!(written, 32);
    assert!(buf[3..32].iter().all(|&b| b == 0));
    // Bytes past the frame are not ours to touch.
    assert_eq!(buf[32], 0xAA);
}

#[test]
fn event_serialize_buffer_too_small() {
    let mut buf = [0u8; 16];
    assert_eq!(Event::LayerChange { layer: 0 }.serialize(&mut buf), 0);
}

#[test]
fn event_from_bytes_rejects_foreign_frames() {
    assert!(Event::from_bytes(&[0xFC, 0x01, 0, 0, 0]).is_none());
    assert!(Event::from_bytes(&[0xFB, 0x07, 0, 0, 0]).is_none());
    assert!(Event::from_bytes(&[0xFB, 0x01]).is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// Command Parsing Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn command_codes_parse() {
    assert_eq!(
        Command::from_bytes(&[0xFC, CMD_SWITCH_LAYER, 3]),
        Some(Command::SwitchLayer(3))
    );
    assert_eq!(
        Command::from_bytes(&[0xFC, CMD_GET_LAYER, 0]),
        Some(Command::GetLayer)
    );
    assert_eq!(
        Command::from_bytes(&[0xFC, CMD_SET_OLED_TIMEOUT, 2]),
        Some(Command::SetOledTimeout(2))
    );
    assert_eq!(
        Command::from_bytes(&[0xFC, CMD_GET_OLED_TIMEOUT, 0]),
        Some(Command::GetOledTimeout)
    );
}

#[test]
fn command_without_marker_is_not_a_command() {
    assert!(Command::from_bytes(&[0xFB, 0x01, 3]).is_none());
    assert!(Command::from_bytes(&[0x00, 0x01, 3]).is_none());
}

#[test]
fn unknown_command_code_is_not_a_command() {
    assert!(Command::from_bytes(&[0xFC, 0x00, 0]).is_none());
    assert!(Command::from_bytes(&[0xFC, 0x05, 0]).is_none());
    assert!(Command::from_bytes(&[0xFC, 0xFD, 0]).is_none());
}

#[test]
fn truncated_command_is_not_a_command() {
    assert!(Command::from_bytes(&[]).is_none());
    assert!(Command::from_bytes(&[0xFC]).is_none());
    assert!(Command::from_bytes(&[0xFC, 0x02]).is_none());
}

#[test]
fn command_to_packet_carries_argument() {
    let packet = Command::SwitchLayer(4).to_packet();
    assert_eq!(&packet[..3], &[0xFC, 0x01, 4]);
    let packet = Command::GetOledTimeout.to_packet();
    assert_eq!(&packet[..3], &[0xFC, 0x04, 0]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Dispatch Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn dispatch_switch_layer_moves_without_payload() {
    let outcome = dispatch(Command::SwitchLayer(3), 0, OledTimeout::Secs30);
    assert_eq!(outcome.effect, Effect::MoveLayer(3));
    assert_eq!(outcome.payload, None);
}

#[test]
fn dispatch_get_layer_reports_current_layer() {
    let outcome = dispatch(Command::GetLayer, 2, OledTimeout::Secs30);
    assert_eq!(outcome.effect, Effect::None);
    assert_eq!(outcome.payload, Some(2));
}

#[test]
fn dispatch_set_timeout_maps_level() {
    let outcome = dispatch(Command::SetOledTimeout(3), 0, OledTimeout::Secs30);
    assert_eq!(outcome.effect, Effect::SetOledTimeout(OledTimeout::Never));
    assert_eq!(outcome.payload, None);

    let outcome = dispatch(Command::SetOledTimeout(0), 0, OledTimeout::Never);
    assert_eq!(outcome.effect, Effect::SetOledTimeout(OledTimeout::Secs10));
}

#[test]
fn dispatch_get_timeout_reports_level() {
    for (timeout, level) in [
        (OledTimeout::Secs10, 0),
        (OledTimeout::Secs30, 1),
        (OledTimeout::Secs60, 2),
        (OledTimeout::Never, 3),
    ] {
        let outcome = dispatch(Command::GetOledTimeout, 0, timeout);
        assert_eq!(outcome.payload, Some(level));
    }
}

#[test]
fn write_response_acknowledges_in_place() {
    let mut frame = Command::GetLayer.to_packet();
    let outcome = dispatch(Command::GetLayer, 4, OledTimeout::Secs30);
    outcome.write_response(&mut frame);
    assert_eq!(&frame[..3], &[0xFC, 0xFD, 4]);
    assert!(frame[3..].iter().all(|&b| b == 0));
}

#[test]
fn write_response_keeps_argument_for_actions() {
    let mut frame = Command::SwitchLayer(3).to_packet();
    dispatch(Command::SwitchLayer(3), 0, OledTimeout::Secs30).write_response(&mut frame);
    assert_eq!(&frame[..3], &[0xFC, 0xFD, 3]);
}

#[test]
fn raw_hid_descriptor_declares_vendor_page() {
    assert_eq!(&RAW_HID_REPORT_DESCRIPTOR[..5], &[0x06, 0x60, 0xFF, 0x09, 0x61]);
    assert_eq!(RAW_HID_REPORT_DESCRIPTOR.last(), Some(&0xC0));
}
