use std::f64::consts::FRAC_PI_2;

use crate::math::damping::approach;

/// Yaw of a fully open door, in radians.
pub const DOOR_OPEN_ANGLE: f64 = FRAC_PI_2;

/// Swing state of one door.
///
/// A click flips the target between closed (0) and open
/// ([`DOOR_OPEN_ANGLE`]); [`DoorState::tick`] eases the angle toward it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DoorState {
    open: bool,
    angle: f64,
}

impl DoorState {
    /// Flips between open and closed.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the angle the door is moving toward.
    #[must_use]
    pub fn target(&self) -> f64 {
        if self.open {
            DOOR_OPEN_ANGLE
        } else {
            0.0
        }
    }

    /// Returns the current yaw.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Advances one frame, covering `damping` of the remaining swing.
    ///
    /// Returns the new angle.
    pub fn tick(&mut self, damping: f64) -> f64 {
        self.angle = approach(self.angle, self.target(), damping);
        self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn starts_closed() {
        let door = DoorState::default();
        assert!(!door.is_open());
        assert_relative_eq!(door.angle(), 0.0);
        assert_relative_eq!(door.target(), 0.0);
    }

    #[test]
    fn opening_is_monotone_and_never_overshoots() {
        let mut door = DoorState::default();
        door.toggle();
        let mut last = door.angle();
        for _ in 0..200 {
            let next = door.tick(0.1);
            assert!(next >= last);
            assert!(next <= DOOR_OPEN_ANGLE);
            last = next;
        }
        assert_relative_eq!(last, DOOR_OPEN_ANGLE, epsilon = 1e-6);
    }

    #[test]
    fn first_frame_covers_a_tenth() {
        let mut door = DoorState::default();
        door.toggle();
        assert_relative_eq!(door.tick(0.1), DOOR_OPEN_ANGLE * 0.1);
    }

    #[test]
    fn closing_mid_swing_reverses() {
        let mut door = DoorState::default();
        door.toggle();
        for _ in 0..5 {
            door.tick(0.1);
        }
        let peak = door.angle();
        door.toggle();
        let mut last = peak;
        for _ in 0..100 {
            let next = door.tick(0.1);
            assert!(next <= last);
            assert!(next >= 0.0);
            last = next;
        }
        assert!(last < peak);
    }
}
