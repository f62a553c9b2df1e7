//! Raw HID interface - 32-byte vendor reports in both directions.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes a single HID reader/writer pair.

use crate::error::Error;
use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use embassy_usb::class::hid::{Config as HidConfig, HidReader, HidReaderWriter, HidWriter, ReadError, State};
use embassy_usb::{Builder, Config, UsbDevice};
use nexapad::config::{self, RAW_HID_QUEUE_DEPTH};
use nexapad::protocol::{Packet, PACKET_SIZE, RAW_HID_REPORT_DESCRIPTOR};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

static RAW_HID_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Build result containing the USB device runner and the raw HID halves.
pub struct RawHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub reader: HidReader<'static, UsbDriver, PACKET_SIZE>,
    pub writer: HidWriter<'static, UsbDriver, PACKET_SIZE>,
}

/// Initialise the USB stack and create the raw HID interface.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> RawHidDevice {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let state = RAW_HID_STATE.init(State::new());
    let hid_config = HidConfig {
        report_descriptor: RAW_HID_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::RAW_HID_POLL_MS,
        max_packet_size: PACKET_SIZE as u16,
    };
    let raw_hid =
        HidReaderWriter::<_, PACKET_SIZE, PACKET_SIZE>::new(&mut builder, state, hid_config);
    let (reader, writer) = raw_hid.split();

    let device = builder.build();

    info!(
        "USB raw HID initialised (usage page {=u16:#x}, usage {=u8:#x})",
        config::RAW_HID_USAGE_PAGE,
        config::RAW_HID_USAGE
    );

    RawHidDevice {
        device,
        reader,
        writer,
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

fn read_error(e: ReadError) -> Error {
    match e {
        ReadError::BufferOverflow => Error::BufferOverflow,
        _ => Error::Usb,
    }
}

/// Command reader task - forwards every OUT report from the host to the
/// keypad task as a zero-padded 32-byte frame.
pub async fn raw_hid_reader_task(
    mut reader: HidReader<'static, UsbDriver, PACKET_SIZE>,
    commands: Sender<'static, CriticalSectionRawMutex, Packet, RAW_HID_QUEUE_DEPTH>,
) -> ! {
    info!("Raw HID reader task started");
    reader.ready().await;

    let mut buf = [0u8; PACKET_SIZE];

    loop {
        match reader.read(&mut buf).await {
            Ok(n) => {
                let mut frame = [0u8; PACKET_SIZE];
                frame[..n].copy_from_slice(&buf[..n]);
                commands.send(frame).await;
            }
            Err(ReadError::Disabled) => {
                warn!("Raw HID: endpoint disabled - waiting for host");
                reader.ready().await;
            }
            Err(e) => {
                warn!("Raw HID read failed: {}", read_error(e));
            }
        }
    }
}

/// Frame writer task - reads from the outbound queue and writes each
/// frame to the IN endpoint.
pub async fn raw_hid_writer_task(
    mut writer: HidWriter<'static, UsbDriver, PACKET_SIZE>,
    outbound: Receiver<'static, CriticalSectionRawMutex, Packet, RAW_HID_QUEUE_DEPTH>,
) -> ! {
    info!("Raw HID writer task started - waiting for frames");
    writer.ready().await;

    loop {
        let frame = outbound.receive().await;
        if writer.write(&frame).await.is_err() {
            warn!("Raw HID write failed: {}", Error::Usb);
        }
    }
}
