//! Keypad task - the single owner of the controller.
//!
//! Key events, host command frames and housekeeping ticks are awaited
//! together and handled one at a time, so the controller hooks never
//! overlap. Outbound frames go through a bounded queue to the raw HID
//! writer task.

use defmt::{debug, info, warn};
use embassy_futures::select::{select3, Either3};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use embassy_time::{Duration, Instant, Ticker};
use nexapad::config::{HOUSEKEEPING_TICK_MS, KEY_QUEUE_DEPTH, RAW_HID_QUEUE_DEPTH};
use nexapad::protocol::{Packet, PACKET_SIZE};
use nexapad::{BadgeDisplay, Controller, KeyEvent, LayerStack, Transport};

use crate::error::Error;

/// Milliseconds since boot.
pub fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Transport that queues frames for the raw HID writer task.
///
/// Never blocks: when the host is not reading, frames are dropped.
pub struct HostLink {
    tx: Sender<'static, CriticalSectionRawMutex, Packet, RAW_HID_QUEUE_DEPTH>,
}

impl HostLink {
    pub fn new(tx: Sender<'static, CriticalSectionRawMutex, Packet, RAW_HID_QUEUE_DEPTH>) -> Self {
        Self { tx }
    }

    fn queue_frame(&self, packet: &[u8]) -> Result<(), Error> {
        if packet.len() > PACKET_SIZE {
            return Err(Error::BufferOverflow);
        }
        let mut frame = [0u8; PACKET_SIZE];
        frame[..packet.len()].copy_from_slice(packet);
        self.tx.try_send(frame).map_err(|_| Error::QueueFull)
    }
}

impl Transport for HostLink {
    fn send(&mut self, packet: &[u8]) {
        if let Err(e) = self.queue_frame(packet) {
            warn!("Raw HID frame dropped: {}", e);
        }
    }
}

pub async fn keypad_task<D, L>(
    mut keypad: Controller<D, HostLink, L>,
    keys: Receiver<'static, CriticalSectionRawMutex, KeyEvent, KEY_QUEUE_DEPTH>,
    commands: Receiver<'static, CriticalSectionRawMutex, Packet, RAW_HID_QUEUE_DEPTH>,
) -> !
where
    D: BadgeDisplay,
    L: LayerStack,
{
    info!("Keypad task started on layer {}", keypad.current_layer());

    let mut ticker = Ticker::every(Duration::from_millis(HOUSEKEEPING_TICK_MS));

    loop {
        let was_on = keypad.power().is_on();

        match select3(keys.receive(), commands.receive(), ticker.next()).await {
            Either3::First(event) => {
                keypad.process_key(event);
                if event.pressed {
                    debug!("Layer -> {}", keypad.current_layer());
                }
            }
            Either3::Second(mut frame) => {
                debug!("Host command {:#x}", &frame[..3]);
                keypad.on_command(&mut frame, now_ms());
            }
            Either3::Third(()) => keypad.on_tick(now_ms()),
        }

        match (was_on, keypad.power().is_on()) {
            (true, false) => info!("OLED: idle timeout, display off"),
            (false, true) => info!("OLED: display on"),
            _ => {}
        }
    }
}
