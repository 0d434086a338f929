//! Manage tap button's state.

/// Use this to hold the button's state over time.
///
/// Detects the rising edge of a press purely from consecutive snapshots.
/// Debouncing is left to the caller.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    pub pressed: bool,
    pub clicked: bool,
}

impl Button {
    pub fn update(&mut self, down: bool) {
        let was_pressed = self.pressed;
        self.pressed = down;
        self.clicked = !was_pressed && self.pressed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_pressed_after_release_only_the_first_snapshot_clicks() {
        let mut button = Button::default();
        assert!(!button.pressed);
        button.update(true);
        assert!(button.clicked && button.pressed);
        button.update(true);
        assert!(!button.clicked && button.pressed);
        button.update(false);
        assert!(!button.clicked && !button.pressed);
    }

    #[test]
    fn when_released_and_pressed_again_it_clicks_again() {
        let mut button = Button::default();
        button.update(true);
        button.update(false);
        button.update(false);
        button.update(true);
        assert!(button.clicked);
        assert!(button.pressed);
    }

    #[test]
    fn when_it_stays_released_it_never_clicks() {
        let mut button = Button::default();
        for _ in 0..10 {
            button.update(false);
            assert!(!button.clicked);
        }
    }
}
