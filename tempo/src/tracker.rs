//! Estimate tempo from a tapped-in chain of button presses.

use crate::beat::Beat;
use crate::button::Button;
use crate::configuration::{Configuration, InvalidConfiguration, SKIPPED_TAP_CORRECTION};
use crate::intervals::Intervals;
use crate::log;
use crate::reaction::{Feedback, Reaction, Tap};

const MS_IN_MINUTE: f32 = 60_000.0;

/// Tempo tracker driven by periodic snapshots of the tap button.
///
/// Call `tick` once per control loop iteration with the current time in
/// milliseconds and the (debounced) state of the button. Consecutive taps
/// form a chain. The beat length is the average of the most recent
/// intervals in the chain. An interval roughly twice as long as the current
/// beat is taken for a missed tap and halved, but never two in a row.
///
/// Timestamps must never decrease and two ticks must not share one. Wrapping
/// of the millisecond counter is tolerated.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapTempo {
    configuration: Configuration,
    button: Button,
    intervals: Intervals,
    beat: Beat,
    taps_in_chain: u32,
    last_tap_ms: u32,
    last_tap_skipped: bool,
}

impl Default for TapTempo {
    fn default() -> Self {
        Self::from_valid_configuration(Configuration::default())
    }
}

impl TapTempo {
    /// # Errors
    ///
    /// This fails with `InvalidConfiguration` when any of the configured
    /// parameters is out of its range.
    pub fn new(configuration: Configuration) -> Result<Self, InvalidConfiguration> {
        configuration.validate()?;
        Ok(Self::from_valid_configuration(configuration))
    }

    fn from_valid_configuration(configuration: Configuration) -> Self {
        Self {
            configuration,
            button: Button::default(),
            intervals: Intervals::new(configuration.history_size),
            beat: Beat::new(configuration.default_beat_ms),
            taps_in_chain: 0,
            last_tap_ms: 0,
            last_tap_skipped: false,
        }
    }

    pub fn tick(&mut self, now: u32, pressed: bool) -> Reaction {
        self.button.update(pressed);

        let (new_chain, tap) = if self.button.clicked {
            let (new_chain, tap) = self.handle_tap(now);
            (new_chain, Some(tap))
        } else {
            (false, None)
        };

        let beat = self.beat.advance(now);

        Reaction {
            beat_ms: self.beat.length(),
            beat_progress: self.beat.progress(),
            new_chain,
            tap,
            beat,
        }
    }

    /// Tick and pass the resulting events to the observer right away.
    pub fn tick_with<F: Feedback + ?Sized>(
        &mut self,
        now: u32,
        pressed: bool,
        feedback: &mut F,
    ) -> Reaction {
        let reaction = self.tick(now, pressed);
        reaction.notify(feedback);
        reaction
    }

    /// Register a tap without going through button edge detection.
    ///
    /// This is meant for callers receiving press events rather than sampling
    /// the button. Phase and beat detection still advance only on `tick`.
    pub fn tap(&mut self, now: u32) -> Tap {
        self.handle_tap(now).1
    }

    /// Drop the current chain and start the beat phase anew from `now`.
    pub fn reset_tap_chain(&mut self, now: u32) {
        self.taps_in_chain = 0;
        self.intervals.reset();
        self.beat.reset(now);
    }

    /// Whether a tap at `now` would continue the current chain.
    pub fn is_chain_active(&self, now: u32) -> bool {
        self.taps_in_chain > 0 && !self.chain_expired(now)
    }

    pub fn beat_ms(&self) -> u32 {
        self.beat.length()
    }

    pub fn beat_progress(&self) -> f32 {
        self.beat.progress()
    }

    pub fn bpm(&self) -> f32 {
        MS_IN_MINUTE / self.beat.length() as f32
    }

    /// Override the beat length, clamped to the configured range.
    pub fn set_beat_ms(&mut self, beat_ms: u32) {
        let (min, max) = self.configuration.beat_ms_range;
        let beat_ms = beat_ms.clamp(min, max);
        log::info!("Setting beat length={:?}", beat_ms);
        self.beat.set_length(beat_ms);
    }

    /// Override the tempo. Values out of range, including non-positive
    /// ones, end up on the nearest bound of the beat length range.
    pub fn set_bpm(&mut self, bpm: f32) {
        self.set_beat_ms((MS_IN_MINUTE / bpm) as u32);
    }

    pub fn taps_in_chain(&self) -> u32 {
        self.taps_in_chain
    }

    pub fn last_tap_skipped(&self) -> bool {
        self.last_tap_skipped
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    fn handle_tap(&mut self, now: u32) -> (bool, Tap) {
        let new_chain = self.chain_expired(now);
        if new_chain {
            log::info!("Starting new tap chain at={:?}", now);
            self.reset_tap_chain(now);
        }

        let (tap, estimate) = self.register_tap(now);
        if let Some(beat_ms) = estimate {
            log::debug!("Estimated beat length={:?}", beat_ms);
            self.beat.set_length(beat_ms);
        }

        (new_chain, tap)
    }

    fn chain_expired(&self, now: u32) -> bool {
        let elapsed = now.wrapping_sub(self.last_tap_ms);
        if elapsed > self.configuration.chain_reset_ms {
            return true;
        }
        match self.configuration.beats_until_chain_reset {
            Some(beats) => u64::from(elapsed) >= u64::from(self.beat.length()) * u64::from(beats),
            None => false,
        }
    }

    fn register_tap(&mut self, now: u32) -> (Tap, Option<u32>) {
        self.taps_in_chain = self.taps_in_chain.saturating_add(1);
        if self.taps_in_chain == 1 {
            self.last_tap_ms = now;
            return (Tap::Regular, None);
        }

        let mut duration = now.wrapping_sub(self.last_tap_ms);
        let tap = if self.spans_missed_beat(duration) {
            log::info!("Halving interval={:?} spanning a missed beat", duration);
            duration = libm::floor(f64::from(duration) * f64::from(SKIPPED_TAP_CORRECTION)) as u32;
            self.last_tap_skipped = true;
            Tap::Skipped
        } else {
            self.last_tap_skipped = false;
            Tap::Regular
        };

        self.intervals.write(duration);
        self.last_tap_ms = now;

        let recorded = (self.taps_in_chain - 1) as usize;
        (tap, self.intervals.average(recorded))
    }

    fn spans_missed_beat(&self, duration: u32) -> bool {
        let beat = f64::from(self.beat.length());
        let duration = f64::from(duration);
        self.configuration.skipped_tap_detection
            && self.taps_in_chain > 2
            && !self.last_tap_skipped
            && duration > beat * f64::from(self.configuration.skip_threshold_low)
            && duration < beat * f64::from(self.configuration.skip_threshold_high)
    }
}
