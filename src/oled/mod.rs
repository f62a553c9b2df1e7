//! OLED badge display - power state machine and layer badge rendering.
//!
//! The panel shows a single centered `LAYER n` badge. It powers down
//! after a configurable period without key presses and wakes on the
//! next press (or when the host changes the timeout).

pub mod badge;
pub mod power;

pub use badge::render_badge;
pub use power::{DisplayPower, OledTimeout, PowerState};

/// Drawing surface the badge is rendered onto.
///
/// Implementations are expected to swallow their own I/O failures: the
/// controller never retries a frame.
pub trait BadgeDisplay {
    /// Switch the panel on or off. The frame buffer is kept.
    fn set_power(&mut self, on: bool);

    /// Blank the frame buffer.
    fn clear(&mut self);

    /// Draw `text` in the badge font with its top-left corner at (x, y).
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// Rendered width of `text` in the badge font, in pixels.
    fn text_width(&self, text: &str) -> u32 {
        badge::measure_text(text)
    }

    /// Push the frame buffer to the panel.
    fn flush(&mut self);
}
