//! Tap tempo detection for hardware with a single tap button.
//!
//! The user presses the button in rhythm and the tracker estimates the beat
//! length from intervals between the presses. Occasional missed taps are
//! corrected and a long pause starts a new chain of taps.
//!
//! It is meant to be driven from a control loop of a firmware, sampling the
//! button and reading a millisecond counter on every iteration. Reactions
//! are passed on to whatever shows the beat to the user:
//!
//! ```text
//!   [ Clock ]   [ Button ]
//!        |         |
//!  (now) |         | (pressed)
//!        V         V
//!      [ TapTempo::tick ] ----(Reaction)----> [ LEDs, triggers, ... ]
//! ```
//!
//! ```
//! use taptempo::{TapTempo, Tap};
//!
//! let mut tempo = TapTempo::default();
//! for (i, ms) in (0..2_000).step_by(5).enumerate() {
//!     let pressed = ms % 400 < 20;
//!     let reaction = tempo.tick(ms, pressed);
//!     if i == 0 {
//!         assert_eq!(reaction.tap, Some(Tap::Regular));
//!     }
//! }
//! assert_eq!(tempo.beat_ms(), 400);
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

#[cfg(test)]
#[macro_use]
extern crate approx;

mod beat;
pub mod button;
pub mod configuration;
mod intervals;
mod log;
pub mod reaction;
pub mod tracker;

pub use configuration::{Configuration, InvalidConfiguration};
pub use intervals::MAX_HISTORY_SIZE;
pub use reaction::{Feedback, Reaction, Tap};
pub use tracker::TapTempo;
