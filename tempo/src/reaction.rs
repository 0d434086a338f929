//! Result of a single tick, passed on to presentation.

/// Kind of a registered tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tap {
    Regular,
    /// The interval leading to this tap spanned a missed beat and was halved.
    Skipped,
}

/// State of the tracker after a tick, together with events that happened
/// during it.
///
/// This is meant to be evaluated by the caller, to drive LEDs, triggers or
/// any other transient feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reaction {
    pub beat_ms: u32,
    pub beat_progress: f32,
    pub new_chain: bool,
    pub tap: Option<Tap>,
    pub beat: bool,
}

/// Observer of tracker events.
///
/// All methods do nothing by default, implement only those of interest.
pub trait Feedback {
    fn on_new_chain(&mut self) {}
    fn on_tap(&mut self) {}
    fn on_tap_skipped(&mut self) {}
    fn on_beat(&mut self) {}
}

impl Reaction {
    /// Pass events of this reaction to the observer, in the order they
    /// occurred within the tick.
    pub fn notify<F: Feedback + ?Sized>(&self, feedback: &mut F) {
        if self.new_chain {
            feedback.on_new_chain();
        }
        match self.tap {
            Some(Tap::Regular) => feedback.on_tap(),
            Some(Tap::Skipped) => feedback.on_tap_skipped(),
            None => (),
        }
        if self.beat {
            feedback.on_beat();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: heapless::Vec<&'static str, 8>,
    }

    impl Feedback for Recorder {
        fn on_new_chain(&mut self) {
            self.events.push("new_chain").unwrap();
        }

        fn on_tap(&mut self) {
            self.events.push("tap").unwrap();
        }

        fn on_tap_skipped(&mut self) {
            self.events.push("tap_skipped").unwrap();
        }

        fn on_beat(&mut self) {
            self.events.push("beat").unwrap();
        }
    }

    fn reaction() -> Reaction {
        Reaction {
            beat_ms: 500,
            beat_progress: 0.0,
            new_chain: false,
            tap: None,
            beat: false,
        }
    }

    #[test]
    fn when_everything_happened_it_notifies_in_order() {
        let reaction = Reaction {
            new_chain: true,
            tap: Some(Tap::Regular),
            beat: true,
            ..reaction()
        };
        let mut recorder = Recorder::default();
        reaction.notify(&mut recorder);
        assert_eq!(&recorder.events[..], &["new_chain", "tap", "beat"]);
    }

    #[test]
    fn when_tap_was_skipped_it_does_not_report_regular_tap() {
        let reaction = Reaction {
            tap: Some(Tap::Skipped),
            ..reaction()
        };
        let mut recorder = Recorder::default();
        reaction.notify(&mut recorder);
        assert_eq!(&recorder.events[..], &["tap_skipped"]);
    }

    #[test]
    fn when_nothing_happened_it_stays_silent() {
        let mut recorder = Recorder::default();
        reaction().notify(&mut recorder);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn when_observer_ignores_events_defaults_are_used() {
        struct Silent;
        impl Feedback for Silent {}
        let reaction = Reaction {
            new_chain: true,
            beat: true,
            ..reaction()
        };
        reaction.notify(&mut Silent);
    }
}
