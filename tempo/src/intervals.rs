//! Rolling history of tap-to-tap durations.

use heapless::Vec;

/// The upper bound of configurable history length.
pub const MAX_HISTORY_SIZE: usize = 20;

/// Ring buffer of the most recent intervals between taps, in milliseconds.
///
/// Slots are filled from the start after each reset, so while the chain is
/// shorter than the buffer, only the first `count` slots carry meaningful
/// values. Stale slots are excluded from the average by count, they are not
/// cleared.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct Intervals {
    buffer: Vec<u32, MAX_HISTORY_SIZE>,
    pointer: usize,
}

impl Intervals {
    pub fn new(size: usize) -> Self {
        assert!(size > 0 && size <= MAX_HISTORY_SIZE);
        let mut buffer = Vec::new();
        // NOTE: This is safe since the size was checked against the capacity.
        let _: Result<_, _> = buffer.resize(size, 0);
        Self { buffer, pointer: 0 }
    }

    pub fn write(&mut self, duration: u32) {
        self.buffer[self.pointer] = duration;
        self.pointer = (self.pointer + 1) % self.buffer.len();
    }

    /// Floored average of the first `count` slots, capped at the buffer size.
    pub fn average(&self, count: usize) -> Option<u32> {
        let amount = count.min(self.buffer.len());
        if amount == 0 {
            return None;
        }
        let sum: u64 = self.buffer[..amount].iter().map(|d| u64::from(*d)).sum();
        Some((sum / amount as u64) as u32)
    }

    pub fn reset(&mut self) {
        for slot in self.buffer.iter_mut() {
            *slot = 0;
        }
        self.pointer = 0;
    }
}
