//! Sliding-window smoothing

/// Median filter with mirrored boundaries
///
/// The signal is extended by reflecting about its edges (`d c b a | a b c d |
/// d c b a`) so every output has a full window. `window` must be odd.
pub fn median_filter(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 || window <= 1 {
        return values.to_vec();
    }

    let half = (window / 2) as isize;
    let mut buffer = Vec::with_capacity(window);
    (0..n as isize)
        .map(|centre| {
            buffer.clear();
            buffer.extend((centre - half..=centre + half).map(|i| values[reflect_index(i, n)]));
            buffer.sort_by(f64::total_cmp);
            buffer[buffer.len() / 2]
        })
        .collect()
}

/// Map an out-of-range index onto the signal by repeated mirroring
fn reflect_index(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let folded = index.rem_euclid(period) as usize;
    if folded < len {
        folded
    } else {
        2 * len - 1 - folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_index() {
        assert_eq!(reflect_index(-1, 4), 0);
        assert_eq!(reflect_index(-2, 4), 1);
        assert_eq!(reflect_index(4, 4), 3);
        assert_eq!(reflect_index(5, 4), 2);
        assert_eq!(reflect_index(2, 4), 2);
        // Windows wider than the signal keep folding
        assert_eq!(reflect_index(-3, 2), 1);
        assert_eq!(reflect_index(-5, 2), 0);
    }

    #[test]
    fn test_removes_isolated_spike() {
        let values = [0.1, 0.1, 5.0, 0.1, 0.1, 0.1];
        let filtered = median_filter(&values, 5);
        assert_eq!(filtered, vec![0.1; 6]);
    }

    #[test]
    fn test_boundaries_use_reflection() {
        // Window at index 0 sees [2, 1, 1, 2, 3]
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let filtered = median_filter(&values, 5);
        assert_eq!(filtered[0], 2.0);
        assert_eq!(filtered[2], 3.0);
        assert_eq!(filtered[4], 4.0);
    }

    #[test]
    fn test_monotonic_signal_preserved_inside() {
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let filtered = median_filter(&values, 5);
        assert_eq!(&filtered[2..8], &values[2..8]);
    }

    #[test]
    fn test_short_signal() {
        // [1 3 | 3 1 | 1 3] mirrored around a two-sample signal
        assert_eq!(median_filter(&[3.0, 1.0], 5), vec![1.0, 3.0]);
        assert!(median_filter(&[], 5).is_empty());
    }
}
