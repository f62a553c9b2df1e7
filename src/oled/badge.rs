//! Layer badge: a `LAYER n` label centered on the 128 px canvas.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::Baseline;
use heapless::String;

use super::BadgeDisplay;
use crate::config::{BADGE_Y, CANVAS_WIDTH};

/// Font the badge is drawn in. 20 px tall, fits the 32 px panel.
pub const BADGE_FONT: &MonoFont<'static> = &FONT_10X20;

/// Longest label is "LAYER 255".
pub type BadgeLabel = String<10>;

pub fn badge_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(BADGE_FONT)
        .text_color(BinaryColor::On)
        .build()
}

/// Format the badge text for `layer`.
pub fn badge_label(layer: u8) -> BadgeLabel {
    let mut label = BadgeLabel::new();
    // Cannot overflow: "LAYER " plus at most three digits.
    let _ = write!(label, "LAYER {}", layer);
    label
}

/// Width of `text` in the badge font, in pixels.
pub fn measure_text(text: &str) -> u32 {
    badge_style()
        .measure_string(text, Point::zero(), Baseline::Top)
        .bounding_box
        .size
        .width
}

/// Left edge that centers a label of `width` pixels on the canvas.
///
/// Labels wider than the canvas get a negative offset and are clipped
/// evenly on both sides.
pub fn centered_x(width: u32) -> i32 {
    (CANVAS_WIDTH as i32 - width as i32) / 2
}

/// Redraw the badge for `layer` and flush it.
///
/// Drawing the same layer twice produces the same frame. Returns the
/// x offset the label was drawn at.
pub fn render_badge<D>(display: &mut D, layer: u8) -> i32
where
    D: BadgeDisplay + ?Sized,
{
    let label = badge_label(layer);

    display.clear();
    let x = centered_x(display.text_width(&label));
    display.draw_text(x, BADGE_Y, &label);
    display.flush();

    x
}
