//! Display power policy.
//!
//! Two states, `On` and `Off`. The panel turns off when a housekeeping
//! tick finds no key press for longer than the configured timeout, and
//! turns back on with the next press. `Never` disables the timeout.
//!
//! Time is passed in explicitly (milliseconds since boot) so the policy
//! runs unchanged on the host.

use crate::config::{DEFAULT_OLED_TIMEOUT_LEVEL, OLED_TIMEOUTS_MS};

/// Display inactivity timeout, as selected by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OledTimeout {
    /// Level 0.
    Secs10,
    /// Level 1.
    Secs30,
    /// Level 2.
    Secs60,
    /// Level 3 - the display never powers down on its own.
    Never,
}

impl OledTimeout {
    /// Decode a wire level. Unknown levels fall back to 30 s and are
    /// stored as such, so the host reads back level 1 afterwards.
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => OledTimeout::Secs10,
            1 => OledTimeout::Secs30,
            2 => OledTimeout::Secs60,
            3 => OledTimeout::Never,
            _ => OledTimeout::Secs30,
        }
    }

    /// Wire level (0..=3).
    pub const fn level(self) -> u8 {
        match self {
            OledTimeout::Secs10 => 0,
            OledTimeout::Secs30 => 1,
            OledTimeout::Secs60 => 2,
            OledTimeout::Never => 3,
        }
    }

    /// Inactivity threshold, or `None` for `Never`.
    pub const fn threshold_ms(self) -> Option<u64> {
        match self {
            OledTimeout::Never => None,
            other => Some(OLED_TIMEOUTS_MS[other.level() as usize]),
        }
    }
}

impl Default for OledTimeout {
    fn default() -> Self {
        OledTimeout::from_level(DEFAULT_OLED_TIMEOUT_LEVEL)
    }
}

/// Panel power state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    On,
    Off,
}

/// Returns `true` once `elapsed_ms` of inactivity exceeds `timeout`.
pub fn inactivity_exceeded(elapsed_ms: u64, timeout: OledTimeout) -> bool {
    match timeout.threshold_ms() {
        Some(threshold) => elapsed_ms > threshold,
        None => false,
    }
}

/// Power state, activity timer and timeout setting of the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayPower {
    state: PowerState,
    last_activity_ms: u64,
    timeout: OledTimeout,
}

impl DisplayPower {
    /// Start powered on, with the inactivity timer running from `now_ms`.
    pub const fn new(now_ms: u64, timeout: OledTimeout) -> Self {
        Self {
            state: PowerState::On,
            last_activity_ms: now_ms,
            timeout,
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == PowerState::On
    }

    pub fn timeout(&self) -> OledTimeout {
        self.timeout
    }

    pub fn last_activity_ms(&self) -> u64 {
        self.last_activity_ms
    }

    /// Record activity (key press). Returns `true` if the panel must wake.
    pub fn activity(&mut self, now_ms: u64) -> bool {
        self.last_activity_ms = now_ms;
        if self.state == PowerState::Off {
            self.state = PowerState::On;
            true
        } else {
            false
        }
    }

    /// Apply a new timeout from the host. Counts as activity.
    ///
    /// Returns `true` if the panel must wake.
    pub fn set_timeout(&mut self, timeout: OledTimeout, now_ms: u64) -> bool {
        self.timeout = timeout;
        self.activity(now_ms)
    }

    /// Housekeeping tick. Returns `true` if the panel must power down.
    ///
    /// Only fires once per idle period: further ticks while `Off` do nothing.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.state != PowerState::On {
            return false;
        }
        let elapsed = now_ms.saturating_sub(self.last_activity_ms);
        if inactivity_exceeded(elapsed, self.timeout) {
            self.state = PowerState::Off;
            true
        } else {
            false
        }
    }
}
