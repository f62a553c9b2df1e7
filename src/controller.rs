//! Keypad controller - the pad's event hooks.
//!
//! The runtime calls in on four occasions, one at a time:
//!
//! - `process_key`  - physical key press or release
//! - `on_tick`      - periodic housekeeping
//! - `on_command`   - raw HID frame from the host
//! - `switch_layer` - layer stack change (keymap or host)
//!
//! The controller owns the display power state and the three
//! collaborators (panel, transport, layer stack), so there is no global
//! state and every hook runs to completion before the next one starts.

use crate::layer::{next_layer, LayerStack};
use crate::oled::{render_badge, BadgeDisplay, DisplayPower, OledTimeout};
use crate::protocol::{dispatch, Command, Effect, Event};

/// Outbound side of the raw HID channel. Fire-and-forget.
pub trait Transport {
    fn send(&mut self, packet: &[u8]);
}

/// A debounced key transition from the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
    /// Milliseconds since boot.
    pub time_ms: u64,
}

pub struct Controller<D, T, L> {
    display: D,
    transport: T,
    layers: L,
    power: DisplayPower,
}

impl<D, T, L> Controller<D, T, L>
where
    D: BadgeDisplay,
    T: Transport,
    L: LayerStack,
{
    /// Bring up the panel and show the badge for the current layer.
    pub fn new(display: D, transport: T, layers: L, now_ms: u64) -> Self {
        let mut controller = Self {
            display,
            transport,
            layers,
            power: DisplayPower::new(now_ms, OledTimeout::default()),
        };
        controller.display.set_power(true);
        controller.display.clear();
        controller.render();
        controller
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn layers(&self) -> &L {
        &self.layers
    }

    pub fn power(&self) -> &DisplayPower {
        &self.power
    }

    pub fn current_layer(&self) -> u8 {
        self.layers.highest_layer()
    }

    /// Report a key transition to the host, then wake the panel on press.
    ///
    /// The notification always goes out before the wake renders anything.
    pub fn on_key_event(&mut self, event: KeyEvent) {
        self.notify(Event::Key {
            row: event.row,
            col: event.col,
            pressed: event.pressed,
        });

        if event.pressed {
            self.wake_on_activity(event.time_ms);
        }
    }

    /// Full key handling: hook first, then the keymap (every key steps to
    /// the next layer on press).
    pub fn process_key(&mut self, event: KeyEvent) {
        self.on_key_event(event);
        if event.pressed {
            let target = next_layer(self.current_layer());
            self.switch_layer(target);
        }
    }

    /// Force the layer stack and run the layer-change hook.
    pub fn switch_layer(&mut self, layer: u8) {
        self.layers.move_to(layer);
        self.on_layer_change();
    }

    /// Layer-change hook: redraw the badge and tell the host.
    ///
    /// The badge is redrawn even while the panel is off; the frame is
    /// not visible until the next wake, which redraws it anyway.
    pub fn on_layer_change(&mut self) {
        self.render();
        let layer = self.current_layer();
        self.notify(Event::LayerChange { layer });
    }

    /// Housekeeping tick. Powers the panel down after the idle timeout.
    pub fn on_tick(&mut self, now_ms: u64) {
        if self.power.tick(now_ms) {
            self.display.set_power(false);
        }
    }

    /// Handle one raw HID frame and echo it back.
    ///
    /// Recognised commands are acknowledged in place (byte 1 = 0xFD);
    /// anything else goes back byte-for-byte.
    pub fn on_command(&mut self, buf: &mut [u8], now_ms: u64) {
        if let Some(command) = Command::from_bytes(buf) {
            let outcome = dispatch(command, self.current_layer(), self.power.timeout());
            match outcome.effect {
                Effect::None => {}
                Effect::MoveLayer(layer) => self.switch_layer(layer),
                Effect::SetOledTimeout(timeout) => {
                    if self.power.set_timeout(timeout, now_ms) {
                        self.power_on_and_render();
                    }
                }
            }
            outcome.write_response(buf);
        }
        self.transport.send(buf);
    }

    fn notify(&mut self, event: Event) {
        let packet = event.to_packet();
        self.transport.send(&packet);
    }

    fn wake_on_activity(&mut self, now_ms: u64) {
        if self.power.activity(now_ms) {
            self.power_on_and_render();
        }
    }

    fn power_on_and_render(&mut self) {
        self.display.set_power(true);
        self.render();
    }

    fn render(&mut self) {
        let layer = self.current_layer();
        render_badge(&mut self.display, layer);
    }
}
