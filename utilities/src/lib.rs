use num_traits::Float;
use std::time::Duration;

pub fn format_number(value: f64) -> String {
    if value != 0.0 && !(1e-2..=1e4).contains(&value.abs()) {
        // Format in scientific notation with 4 significant digits
        format!("{:.4e}", value)
    } else {
        // Format with up to 4 decimal places, removing trailing zeros
        let s = format!("{:.4}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn format_duration(duration: Duration) -> String {
    if duration.as_secs() >= 3600 {
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;
        format!("{} hrs, {} min, {} sec", hours, minutes, seconds)
    } else if duration.as_secs() >= 60 {
        let minutes = duration.as_secs() / 60;
        let seconds = duration.as_secs() % 60;
        format!("{} min, {} sec", minutes, seconds)
    } else if duration.as_secs() >= 1 {
        format!("{} sec", duration.as_secs())
    } else if duration.as_millis() >= 1 {
        format!("{} ms", duration.as_millis())
    } else {
        format!("{} us", duration.as_micros())
    }
}

/// Smallest and largest finite values, ignoring NaN and infinities.
pub fn finite_bounds<T: Float>(values: impl IntoIterator<Item = T>) -> Option<(T, T)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

pub fn assert_equal(left: f64, right: f64) {
    let max = left.abs().max(right.abs());
    if max < f64::EPSILON {
        // If both values are close to zero, we consider them equal
        return;
    }
    let rel_diff = (left - right).abs() / max;
    assert!(
        rel_diff < 1e-9,
        "Assertion failed: left ({}) and right ({}) are not approximately equal. Relative difference: {}",
        left,
        right,
        rel_diff
    );
}

pub fn assert_equal_reltol(left: f64, right: f64, reltol: f64) {
    let max = left.abs().max(right.abs());
    if max < f64::EPSILON {
        // If both values are close to zero, we consider them equal
        return;
    }
    let abs_diff = (left - right).abs();
    let rel_diff = abs_diff / max;

    assert!(
        rel_diff < reltol,
        "Assertion failed: left ({}) and right ({}) are not approximately equal. Relative difference: {}. Absolute difference: {}",
        left,
        right,
        rel_diff,
        abs_diff,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(123456.0), "1.2346e5");
        assert_eq!(format_number(-0.001), "-1.0000e-3");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(3725)), "1 hrs, 2 min, 5 sec");
        assert_eq!(format_duration(Duration::from_millis(15)), "15 ms");
    }

    #[test]
    fn test_finite_bounds() {
        let b = finite_bounds([1.0, f64::NAN, -2.0, f64::INFINITY, 3.0]);
        assert_eq!(b, Some((-2.0, 3.0)));
        assert_eq!(finite_bounds([f64::NAN]), None);
    }

    #[test]
    fn test_assert_equal_reltol() {
        assert_equal_reltol(1.0, 1.05, 0.1);
        assert_equal(0.0, 1e-20);
    }
}
