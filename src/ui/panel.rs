//! SSD1306 OLED panel wrapper - the badge drawing surface.

use defmt::warn;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use nexapad::config::DISPLAY_I2C_ADDR;
use nexapad::oled::badge::badge_style;
use nexapad::BadgeDisplay;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::error::Error;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// The badge panel. I²C failures are logged and otherwise ignored.
pub struct OledPanel<I2C> {
    display: Display<I2C>,
}

impl<I2C> OledPanel<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the SSD1306 display and clear the screen.
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDR);
        let mut display = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        if display.init().is_err() {
            warn!("OLED init failed: {}", Error::Display);
        }
        display.clear_buffer();
        let _ = display.flush();
        Self { display }
    }
}

impl<I2C> BadgeDisplay for OledPanel<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn set_power(&mut self, on: bool) {
        if self.display.set_display_on(on).is_err() {
            warn!("OLED power={} failed: {}", on, Error::Display);
        }
    }

    fn clear(&mut self) {
        self.display.clear_buffer();
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        // Drawing into the frame buffer cannot fail; errors surface on flush.
        let _ = Text::with_baseline(text, Point::new(x, y), badge_style(), Baseline::Top)
            .draw(&mut self.display);
    }

    fn flush(&mut self) {
        if self.display.flush().is_err() {
            warn!("OLED flush failed: {}", Error::Display);
        }
    }
}
