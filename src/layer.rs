//! Layer stack.
//!
//! Layers are tracked as a bitmask, one bit per layer; the highest set
//! bit is the layer whose keymap is in effect and whose number is shown
//! on the badge.

use crate::config::LAYER_COUNT;

/// Layer stack as seen by the controller.
pub trait LayerStack {
    /// Topmost active layer.
    fn highest_layer(&self) -> u8;

    /// Make `layer` the only active layer.
    fn move_to(&mut self, layer: u8);
}

/// Highest set bit of a layer mask; 0 for an empty mask.
pub fn highest_layer(mask: u32) -> u8 {
    if mask == 0 {
        0
    } else {
        (31 - mask.leading_zeros()) as u8
    }
}

/// Layer reached by pressing any key on `layer`.
///
/// Every key on the pad steps to the next layer, wrapping after the last.
pub fn next_layer(layer: u8) -> u8 {
    layer.wrapping_add(1) % LAYER_COUNT
}

/// Bitmask-backed layer stack with layer 0 active at power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerState {
    mask: u32,
}

impl LayerState {
    pub const fn new() -> Self {
        Self { mask: 1 }
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }
}

impl Default for LayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStack for LayerState {
    fn highest_layer(&self) -> u8 {
        highest_layer(self.mask)
    }

    /// Any layer the mask can hold is accepted, including ones past the
    /// keymap. Layers of 32 and up do not fit and are ignored.
    fn move_to(&mut self, layer: u8) {
        if let Some(mask) = 1u32.checked_shl(u32::from(layer)) {
            self.mask = mask;
        }
    }
}
