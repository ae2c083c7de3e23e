use crate::error::{ConfigError, Result};

/// Checks that a numerical value is in the closed interval `[a,b]`, yielding a
/// [`ConfigError`] naming the offending value if not
///
/// NaN is never in any interval.
///
/// ### Example
/// ```ignore
/// let alpha = 2.0;
/// check_interval!(alpha, 0.0, 1.0)?;
/// ```
/// This fails with the message "Invalid value for \`alpha\`: 2. Must be in the interval \[0, 1\]."
#[macro_export]
macro_rules! check_interval {
    ($var:expr, $a:expr, $b:expr) => {
        if $var >= $a && $var <= $b {
            Ok(())
        } else {
            Err($crate::error::ConfigError::OutOfInterval {
                name: stringify!($var),
                value: $var,
                low: $a,
                high: $b,
            })
        }
    };
}

/// Checks that a value lies in the half-open interval `(low, high]`
pub(crate) fn check_half_open(name: &'static str, value: f32, low: f32, high: f32) -> Result<()> {
    (value > low && value <= high)
        .then_some(())
        .ok_or(ConfigError::OutOfHalfOpenInterval {
            name,
            value,
            low,
            high,
        })
}

/// Index of the largest value, with the lowest index winning ties
///
/// NaN entries never win. Returns `0` for an empty or all-NaN slice.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_picks_largest() {
        assert_eq!(argmax(&[0.0, 3.0, 1.0]), 1);
        assert_eq!(argmax(&[-5.0, -2.0, -9.0]), 1);
    }

    #[test]
    fn argmax_lowest_index_wins_ties() {
        assert_eq!(argmax(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(argmax(&[1.0, 4.0, 4.0, 2.0]), 1);
    }

    #[test]
    fn argmax_ignores_nan() {
        assert_eq!(argmax(&[f32::NAN, 1.0, 0.5]), 1);
        assert_eq!(argmax(&[f32::NAN, f32::NAN]), 0);
    }

    #[test]
    fn check_interval_functional() {
        let alpha = 0.5_f32;
        assert!(check_interval!(alpha, 0.0, 1.0).is_ok());
        let alpha = 1.5_f32;
        assert_eq!(
            check_interval!(alpha, 0.0, 1.0),
            Err(ConfigError::OutOfInterval {
                name: "alpha",
                value: 1.5,
                low: 0.0,
                high: 1.0,
            })
        );
        let alpha = f32::NAN;
        assert!(check_interval!(alpha, 0.0, 1.0).is_err());
    }

    #[test]
    fn check_half_open_functional() {
        assert!(check_half_open("rate", 1.0, 0.0, 1.0).is_ok());
        assert!(check_half_open("rate", 0.0, 0.0, 1.0).is_err());
        assert!(check_half_open("rate", f32::NAN, 0.0, 1.0).is_err());
    }
}
