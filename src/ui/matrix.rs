//! 4×4 key matrix scanning with per-key debouncing.
//!
//! Rows are driven low one at a time (idle high); columns have pull-ups,
//! so a closed switch reads low on its column while its row is selected.
//! A key change is only reported after `MATRIX_DEBOUNCE_SCANS` scans in a
//! row agree on the new level.

use defmt::debug;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_hal::digital::{InputPin, OutputPin};
use heapless::Vec;
use nexapad::config::{
    KEY_QUEUE_DEPTH, MATRIX_COLS, MATRIX_DEBOUNCE_SCANS, MATRIX_ROWS, MATRIX_SCAN_MS,
};
use nexapad::KeyEvent;

const KEY_COUNT: usize = MATRIX_ROWS * MATRIX_COLS;

/// Settling time after selecting a row (µs).
const ROW_SETTLE_US: u64 = 5;

pub struct KeyMatrix<O, I> {
    rows: [O; MATRIX_ROWS],
    cols: [I; MATRIX_COLS],
    /// Debounced state, true = pressed.
    stable: [[bool; MATRIX_COLS]; MATRIX_ROWS],
    /// Consecutive scans disagreeing with `stable`.
    pending: [[u8; MATRIX_COLS]; MATRIX_ROWS],
}

impl<O, I> KeyMatrix<O, I>
where
    O: OutputPin,
    I: InputPin,
{
    pub fn new(mut rows: [O; MATRIX_ROWS], cols: [I; MATRIX_COLS]) -> Self {
        for row in &mut rows {
            let _ = row.set_high();
        }
        Self {
            rows,
            cols,
            stable: [[false; MATRIX_COLS]; MATRIX_ROWS],
            pending: [[0; MATRIX_COLS]; MATRIX_ROWS],
        }
    }

    /// Scan every key once and return the debounced transitions.
    pub async fn scan(&mut self, time_ms: u64) -> Vec<KeyEvent, KEY_COUNT> {
        let mut events = Vec::new();

        for r in 0..MATRIX_ROWS {
            let _ = self.rows[r].set_low();
            Timer::after_micros(ROW_SETTLE_US).await;

            for c in 0..MATRIX_COLS {
                let raw = matches!(self.cols[c].is_low(), Ok(true));
                if raw == self.stable[r][c] {
                    self.pending[r][c] = 0;
                    continue;
                }
                self.pending[r][c] += 1;
                if self.pending[r][c] >= MATRIX_DEBOUNCE_SCANS {
                    self.pending[r][c] = 0;
                    self.stable[r][c] = raw;
                    // Capacity is one slot per key; cannot overflow.
                    let _ = events.push(KeyEvent {
                        row: r as u8,
                        col: c as u8,
                        pressed: raw,
                        time_ms,
                    });
                }
            }

            let _ = self.rows[r].set_high();
        }

        events
    }
}

/// Run the matrix scan loop forever, feeding the keypad task.
///
/// Waits for queue space rather than dropping, so every debounced
/// transition reaches the keypad task exactly once.
pub async fn matrix_task<O, I>(
    mut matrix: KeyMatrix<O, I>,
    tx: Sender<'static, CriticalSectionRawMutex, KeyEvent, KEY_QUEUE_DEPTH>,
) -> !
where
    O: OutputPin,
    I: InputPin,
{
    let mut ticker = Ticker::every(Duration::from_millis(MATRIX_SCAN_MS));

    loop {
        let now = Instant::now().as_millis();
        for event in matrix.scan(now).await {
            debug!("Key: {}", event);
            tx.send(event).await;
        }
        ticker.next().await;
    }
}
