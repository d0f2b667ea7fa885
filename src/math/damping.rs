/// Moves `current` a fixed fraction of the remaining distance towards `target`.
///
/// With `factor` in `(0, 1]` the result never passes `target`.
#[must_use]
pub fn approach(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Applies one step of exponential decay: `value - value * rate * delta`.
///
/// The step is clamped so a long frame cannot flip the sign of `value`.
#[must_use]
pub fn decay(value: f64, rate: f64, delta: f64) -> f64 {
    let k = (rate * delta).clamp(0.0, 1.0);
    value - value * k
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn approach_moves_fraction_of_gap() {
        assert_relative_eq!(approach(0.0, 10.0, 0.1), 1.0);
        assert_relative_eq!(approach(10.0, 0.0, 0.5), 5.0);
    }

    #[test]
    fn approach_full_factor_reaches_target() {
        assert_relative_eq!(approach(3.0, 7.5, 1.0), 7.5);
    }

    #[test]
    fn decay_shrinks_towards_zero() {
        let v = decay(2.0, 10.0, 1.0 / 60.0);
        assert!(v > 0.0 && v < 2.0);
        assert_relative_eq!(v, 2.0 - 2.0 * 10.0 / 60.0);
    }

    #[test]
    fn decay_never_flips_sign() {
        assert_relative_eq!(decay(-4.0, 10.0, 0.5), 0.0);
    }
}
