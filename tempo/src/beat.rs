//! Looping phase of the current beat.

/// Beat length together with the position of the playhead within it.
///
/// Time is measured from a reset reference. Phase is the remainder of that
/// time over the beat length, so a beat boundary shows up as the remainder
/// wrapping around between two consecutive updates.
///
/// Only one boundary is detected per update. If the caller skips more than
/// a whole beat between two updates, the missed beats are not reported.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct Beat {
    length: u32,
    reset_ms: u32,
    since_reset: u32,
    since_reset_old: u32,
}

impl Beat {
    pub fn new(length: u32) -> Self {
        Self {
            length: length.max(1),
            reset_ms: 0,
            since_reset: 0,
            since_reset_old: 0,
        }
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn set_length(&mut self, length: u32) {
        self.length = length.max(1);
    }

    /// Anchor the phase so the next beat lands one beat length after `now`.
    pub fn reset(&mut self, now: u32) {
        self.reset_ms = now;
    }

    /// Move the playhead to `now` and report whether a beat boundary was crossed.
    pub fn advance(&mut self, now: u32) -> bool {
        self.since_reset_old = self.since_reset;
        self.since_reset = now.wrapping_sub(self.reset_ms);
        self.since_reset % self.length < self.since_reset_old % self.length
    }

    /// Position within the current beat, in `[0.0, 1.0)`.
    pub fn progress(&self) -> f32 {
        (self.since_reset % self.length) as f32 / self.length as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_advanced_within_a_beat_progress_grows() {
        let mut beat = Beat::new(500);
        beat.advance(100);
        assert_relative_eq!(beat.progress(), 0.2);
        beat.advance(250);
        assert_relative_eq!(beat.progress(), 0.5);
        beat.advance(499);
        assert_relative_eq!(beat.progress(), 0.998);
    }

    #[test]
    fn when_boundary_is_crossed_progress_wraps_and_beat_is_reported() {
        let mut beat = Beat::new(500);
        assert!(!beat.advance(490));
        assert!(beat.advance(510));
        assert_relative_eq!(beat.progress(), 0.02);
    }

    #[test]
    fn when_advanced_every_millisecond_it_reports_one_beat_per_period() {
        let mut beat = Beat::new(250);
        let beats = (1..=1000).filter(|ms| beat.advance(*ms)).count();
        assert_eq!(beats, 4);
    }

    #[test]
    fn when_reset_phase_starts_from_the_reset_time() {
        let mut beat = Beat::new(500);
        beat.advance(300);
        beat.reset(300);
        beat.advance(400);
        assert_relative_eq!(beat.progress(), 0.2);
    }

    #[test]
    fn when_more_than_one_beat_is_skipped_only_one_is_reported() {
        let mut beat = Beat::new(100);
        beat.advance(50);
        assert!(beat.advance(340));
        assert!(!beat.advance(370));
    }

    #[test]
    fn when_length_is_zero_it_is_kept_at_one_millisecond() {
        let mut beat = Beat::new(0);
        assert_eq!(beat.length(), 1);
        beat.set_length(0);
        assert_eq!(beat.length(), 1);
        beat.advance(5);
        assert_relative_eq!(beat.progress(), 0.0);
    }
}
