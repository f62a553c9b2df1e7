//! NexaPad firmware - nRF52840 entry point.
//!
//! Wires the hardware into the keypad controller:
//!
//! ```text
//!  key matrix ──KeyEvent──▶ ┌────────────┐ ──frames──▶ raw HID writer ─▶ host
//!  raw HID reader ─frames─▶ │ keypad task│
//!  50 ms ticker ──────────▶ └────────────┘ ──I²C──▶ OLED badge
//! ```

#![no_std]
#![no_main]

mod error;
mod keypad;
mod ui;
mod usb;

use defmt::info;
use embassy_executor::Spawner;
use embassy_nrf::config::{Config, HfclkSource};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::hid::{HidReader, HidWriter};
use embassy_usb::UsbDevice;
use nexapad::config::{KEY_QUEUE_DEPTH, RAW_HID_QUEUE_DEPTH};
use nexapad::protocol::{Packet, PACKET_SIZE};
use nexapad::{Controller, KeyEvent, LayerState};
use {defmt_rtt as _, panic_probe as _};

use keypad::HostLink;
use ui::matrix::KeyMatrix;
use ui::panel::OledPanel;
use usb::raw_hid::UsbDriver;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

type Panel = OledPanel<Twim<'static, peripherals::TWISPI0>>;
type Matrix = KeyMatrix<Output<'static>, Input<'static>>;

/// Debounced key events, matrix → keypad.
static KEY_EVENTS: Channel<CriticalSectionRawMutex, KeyEvent, KEY_QUEUE_DEPTH> = Channel::new();
/// Host command frames, raw HID reader → keypad.
static HOST_COMMANDS: Channel<CriticalSectionRawMutex, Packet, RAW_HID_QUEUE_DEPTH> =
    Channel::new();
/// Event and response frames, keypad → raw HID writer.
static OUTBOUND: Channel<CriticalSectionRawMutex, Packet, RAW_HID_QUEUE_DEPTH> = Channel::new();

#[embassy_executor::task]
async fn usb_device_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    usb::raw_hid::run_usb_device(device).await
}

#[embassy_executor::task]
async fn raw_hid_reader(reader: HidReader<'static, UsbDriver, PACKET_SIZE>) -> ! {
    usb::raw_hid::raw_hid_reader_task(reader, HOST_COMMANDS.sender()).await
}

#[embassy_executor::task]
async fn raw_hid_writer(writer: HidWriter<'static, UsbDriver, PACKET_SIZE>) -> ! {
    usb::raw_hid::raw_hid_writer_task(writer, OUTBOUND.receiver()).await
}

#[embassy_executor::task]
async fn matrix_scan(matrix: Matrix) -> ! {
    ui::matrix::matrix_task(matrix, KEY_EVENTS.sender()).await
}

#[embassy_executor::task]
async fn keypad_runner(controller: Controller<Panel, HostLink, LayerState>) -> ! {
    keypad::keypad_task(controller, KEY_EVENTS.receiver(), HOST_COMMANDS.receiver()).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("NexaPad firmware starting");

    // USB needs the external crystal.
    let mut config = Config::default();
    config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(config);

    let usb = usb::raw_hid::init(p.USBD);
    spawner.must_spawn(usb_device_task(usb.device));
    spawner.must_spawn(raw_hid_reader(usb.reader));
    spawner.must_spawn(raw_hid_writer(usb.writer));

    // OLED on TWIM0: SDA P0.26, SCL P0.27.
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let panel = OledPanel::new(i2c);

    let rows = [
        Output::new(p.P0_02, Level::High, OutputDrive::Standard),
        Output::new(p.P0_03, Level::High, OutputDrive::Standard),
        Output::new(p.P0_04, Level::High, OutputDrive::Standard),
        Output::new(p.P0_05, Level::High, OutputDrive::Standard),
    ];
    let cols = [
        Input::new(p.P0_28, Pull::Up),
        Input::new(p.P0_29, Pull::Up),
        Input::new(p.P0_30, Pull::Up),
        Input::new(p.P0_31, Pull::Up),
    ];
    spawner.must_spawn(matrix_scan(KeyMatrix::new(rows, cols)));

    let controller = Controller::new(
        panel,
        HostLink::new(OUTBOUND.sender()),
        LayerState::new(),
        keypad::now_ms(),
    );
    info!("Badge shown, OLED timeout level {}", controller.power().timeout().level());
    spawner.must_spawn(keypad_runner(controller));
}
