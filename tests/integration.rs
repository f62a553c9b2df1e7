//! Integration tests for the host-testable keypad logic.
//!
//! Drives a `Controller` the way the firmware does and reads the raw HID
//! traffic back the way the desktop companion app does.

use nexapad::oled::badge::measure_text;
use nexapad::protocol::{Command, Event, ACK_MARKER, PACKET_SIZE};
use nexapad::{BadgeDisplay, Controller, KeyEvent, LayerState, LayerStack, OledTimeout, Transport};

/// Panel that keeps only what a viewer would see.
#[derive(Default)]
struct Screen {
    on: bool,
    buffer: Option<(i32, i32, String)>,
    shown: Option<(i32, i32, String)>,
    flushes: usize,
}

impl BadgeDisplay for Screen {
    fn set_power(&mut self, on: bool) {
        self.on = on;
    }
    fn clear(&mut self) {
        self.buffer = None;
    }
    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.buffer = Some((x, y, text.to_string()));
    }
    fn flush(&mut self) {
        self.shown = self.buffer.clone();
        self.flushes += 1;
    }
}

impl Screen {
    fn visible(&self) -> Option<&str> {
        if self.on {
            self.shown.as_ref().map(|(_, _, text)| text.as_str())
        } else {
            None
        }
    }
}

#[derive(Default)]
struct Wire {
    frames: Vec<Vec<u8>>,
}

impl Transport for Wire {
    fn send(&mut self, packet: &[u8]) {
        self.frames.push(packet.to_vec());
    }
}

fn pad() -> Controller<Screen, Wire, LayerState> {
    Controller::new(Screen::default(), Wire::default(), LayerState::new(), 0)
}

fn key(row: u8, col: u8, pressed: bool, time_ms: u64) -> KeyEvent {
    KeyEvent {
        row,
        col,
        pressed,
        time_ms,
    }
}

#[test]
fn badge_is_centered_for_every_layer() {
    let mut pad = pad();
    for layer in 0..5u8 {
        pad.switch_layer(layer);
        let (x, y, text) = pad.display().shown.clone().expect("badge drawn");
        assert_eq!(text, format!("LAYER {}", layer));
        assert_eq!(x, (128 - measure_text(&text) as i32) / 2);
        assert_eq!(y, 3);
    }
}

#[test]
fn render_is_idempotent() {
    let mut pad = pad();
    pad.switch_layer(2);
    let first = pad.display().shown.clone();
    let flushes = pad.display().flushes;
    pad.switch_layer(2);
    assert_eq!(pad.display().shown, first);
    assert_eq!(pad.display().flushes, flushes + 1);
}

#[test]
fn idle_timeout_then_key_wakes_with_current_layer() {
    let mut pad = pad();
    assert_eq!(pad.display().visible(), Some("LAYER 0"));

    pad.on_tick(29_000);
    assert_eq!(pad.display().visible(), Some("LAYER 0"));
    pad.on_tick(30_001);
    assert_eq!(pad.display().visible(), None);

    // Host moves the layer while the panel is dark.
    let mut frame = Command::SwitchLayer(4).to_packet();
    pad.on_command(&mut frame, 31_000);
    assert_eq!(pad.display().visible(), None);

    pad.on_key_event(key(0, 2, true, 32_000));
    assert_eq!(pad.display().visible(), Some("LAYER 4"));
}

#[test]
fn host_session_over_raw_hid() {
    let mut pad = pad();

    // Query layer.
    let mut frame = Command::GetLayer.to_packet();
    pad.on_command(&mut frame, 0);

    // Switch layer.
    let mut frame = Command::SwitchLayer(3).to_packet();
    pad.on_command(&mut frame, 0);

    // Query timeout, set it, query again.
    let mut frame = Command::GetOledTimeout.to_packet();
    pad.on_command(&mut frame, 0);
    let mut frame = Command::SetOledTimeout(2).to_packet();
    pad.on_command(&mut frame, 0);
    let mut frame = Command::GetOledTimeout.to_packet();
    pad.on_command(&mut frame, 0);

    let frames = &pad.transport().frames;
    assert!(frames.iter().all(|f| f.len() == PACKET_SIZE));

    assert_eq!(&frames[0][..3], &[0xFC, ACK_MARKER, 0]);
    // Layer change event precedes the acknowledgement.
    assert_eq!(
        Event::from_bytes(&frames[1]),
        Some(Event::LayerChange { layer: 3 })
    );
    assert_eq!(&frames[2][..3], &[0xFC, ACK_MARKER, 3]);
    assert_eq!(&frames[3][..3], &[0xFC, ACK_MARKER, 1]);
    assert_eq!(&frames[4][..3], &[0xFC, ACK_MARKER, 2]);
    assert_eq!(&frames[5][..3], &[0xFC, ACK_MARKER, 2]);
    assert_eq!(frames.len(), 6);

    assert_eq!(pad.layers().highest_layer(), 3);
    assert_eq!(pad.power().timeout(), OledTimeout::Secs60);
}

#[test]
fn typing_reports_every_transition_and_cycles_layers() {
    let mut pad = pad();

    pad.process_key(key(1, 2, true, 100));
    pad.process_key(key(1, 2, false, 180));

    let events: Vec<Event> = pad
        .transport()
        .frames
        .iter()
        .filter_map(|f| Event::from_bytes(f))
        .collect();
    assert_eq!(
        events,
        vec![
            Event::Key {
                row: 1,
                col: 2,
                pressed: true
            },
            Event::LayerChange { layer: 1 },
            Event::Key {
                row: 1,
                col: 2,
                pressed: false
            },
        ]
    );
    assert_eq!(pad.display().visible(), Some("LAYER 1"));
}

#[test]
fn garbage_from_host_comes_back_untouched() {
    let mut pad = pad();
    let mut frame = [0xEEu8; PACKET_SIZE];
    pad.on_command(&mut frame, 0);

    let mut unknown = [0u8; PACKET_SIZE];
    unknown[..3].copy_from_slice(&[0xFC, 0x7F, 0x01]);
    pad.on_command(&mut unknown, 0);

    let frames = &pad.transport().frames;
    assert_eq!(frames[0], vec![0xEE; PACKET_SIZE]);
    assert_eq!(&frames[1][..3], &[0xFC, 0x7F, 0x01]);
    assert_eq!(pad.layers().highest_layer(), 0);
}

#[test]
fn never_timeout_keeps_display_on() {
    let mut pad = pad();
    let mut frame = Command::SetOledTimeout(3).to_packet();
    pad.on_command(&mut frame, 0);
    for now in (0..600_000).step_by(50) {
        pad.on_tick(now);
    }
    assert!(pad.power().is_on());
    assert_eq!(pad.display().visible(), Some("LAYER 0"));
}
