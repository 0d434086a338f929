//! Tunable parameters of tempo tracking.

use core::fmt;

use crate::intervals::MAX_HISTORY_SIZE;

pub const DEFAULT_HISTORY_SIZE: usize = 5;
pub const DEFAULT_CHAIN_RESET_MS: u32 = 2000;
pub const DEFAULT_BEAT_MS: u32 = 500;

// An interval between these multiples of the current beat is most likely
// a beat the user did not tap.
pub const SKIPPED_TAP_THRESHOLD_LOW: f32 = 1.75;
pub const SKIPPED_TAP_THRESHOLD_HIGH: f32 = 2.75;

/// Multiplier applied to an interval spanning a missed beat.
pub const SKIPPED_TAP_CORRECTION: f32 = 0.5;

const MIN_BEATS_UNTIL_CHAIN_RESET: u32 = 2;

// Exclusive bounds accepted for the thresholds above.
const THRESHOLD_LOW_RANGE: (f32, f32) = (1.0, 2.0);
const THRESHOLD_HIGH_RANGE: (f32, f32) = (2.0, 4.0);

/// Tweaking of the default tracker behavior.
///
/// All values are checked once, when the tracker is constructed. Ticking
/// never re-validates them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// Number of the most recent intervals averaged into the tempo.
    pub history_size: usize,
    /// A tap arriving later than this after the previous one starts a new chain.
    pub chain_reset_ms: u32,
    /// When set, a chain also ends after this many beats without a tap.
    pub beats_until_chain_reset: Option<u32>,
    pub skip_threshold_low: f32,
    pub skip_threshold_high: f32,
    pub skipped_tap_detection: bool,
    /// Beat length used before the first estimate is available.
    pub default_beat_ms: u32,
    /// Inclusive bounds of a manually set beat length.
    pub beat_ms_range: (u32, u32),
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_HISTORY_SIZE,
            chain_reset_ms: DEFAULT_CHAIN_RESET_MS,
            beats_until_chain_reset: None,
            skip_threshold_low: SKIPPED_TAP_THRESHOLD_LOW,
            skip_threshold_high: SKIPPED_TAP_THRESHOLD_HIGH,
            skipped_tap_detection: true,
            default_beat_ms: DEFAULT_BEAT_MS,
            beat_ms_range: (100, 2000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidConfiguration {
    HistorySize,
    ChainReset,
    BeatsUntilChainReset,
    SkipThresholds,
    DefaultBeat,
    BeatRange,
}

impl fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HistorySize => write!(f, "history size must be between 1 and {MAX_HISTORY_SIZE}"),
            Self::ChainReset => write!(f, "chain reset timeout must be positive"),
            Self::BeatsUntilChainReset => {
                write!(f, "chain must be allowed to last at least {MIN_BEATS_UNTIL_CHAIN_RESET} beats")
            }
            Self::SkipThresholds => write!(
                f,
                "skipped tap thresholds must lie within (1.0, 2.0) and (2.0, 4.0)"
            ),
            Self::DefaultBeat => write!(f, "default beat length must be positive"),
            Self::BeatRange => write!(f, "beat length range must be positive and ordered"),
        }
    }
}

impl Configuration {
    /// # Errors
    ///
    /// This fails with `InvalidConfiguration` naming the first parameter
    /// that is out of its accepted range.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        if self.history_size == 0 || self.history_size > MAX_HISTORY_SIZE {
            return Err(InvalidConfiguration::HistorySize);
        }
        if self.chain_reset_ms == 0 {
            return Err(InvalidConfiguration::ChainReset);
        }
        if let Some(beats) = self.beats_until_chain_reset {
            if beats < MIN_BEATS_UNTIL_CHAIN_RESET {
                return Err(InvalidConfiguration::BeatsUntilChainReset);
            }
        }
        if !within(self.skip_threshold_low, THRESHOLD_LOW_RANGE)
            || !within(self.skip_threshold_high, THRESHOLD_HIGH_RANGE)
        {
            return Err(InvalidConfiguration::SkipThresholds);
        }
        if self.default_beat_ms == 0 {
            return Err(InvalidConfiguration::DefaultBeat);
        }
        let (min, max) = self.beat_ms_range;
        if min == 0 || min > max {
            return Err(InvalidConfiguration::BeatRange);
        }
        Ok(())
    }
}

fn within(value: f32, range: (f32, f32)) -> bool {
    value > range.0 && value < range.1
}
