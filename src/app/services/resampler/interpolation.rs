//! Piecewise-linear interpolation with linear extrapolation

/// Interpolate samples `(x, y)` onto `targets`
///
/// Samples are sorted by `x` (stable). Each target is placed in the segment
/// found by a left-sided binary search, clamped to the first and last
/// segments so targets outside the sampled range are extrapolated from the
/// nearest segment. Fewer than two samples yields all NaN.
pub fn interpolate_linear(x: &[f64], y: &[f64], targets: &[f64]) -> Vec<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return vec![f64::NAN; targets.len()];
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| x[a].total_cmp(&x[b]));
    let xs: Vec<f64> = order.iter().map(|&i| x[i]).collect();
    let ys: Vec<f64> = order.iter().map(|&i| y[i]).collect();

    targets
        .iter()
        .map(|&target| {
            let hi = xs.partition_point(|&v| v < target).clamp(1, n - 1);
            let lo = hi - 1;
            let slope = (ys[hi] - ys[lo]) / (xs[hi] - xs[lo]);
            slope * (target - xs[lo]) + ys[lo]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{} != {}", a, e);
        }
    }

    #[test]
    fn test_interior_points() {
        let out = interpolate_linear(&[0.0, 10.0, 20.0], &[0.0, 1.0, 3.0], &[5.0, 15.0]);
        assert_close(&out, &[0.5, 2.0]);
    }

    #[test]
    fn test_exact_sample_points() {
        let out = interpolate_linear(&[0.0, 10.0, 20.0], &[0.0, 1.0, 3.0], &[0.0, 10.0, 20.0]);
        assert_close(&out, &[0.0, 1.0, 3.0]);
    }

    #[test]
    fn test_extrapolates_both_ends() {
        let out = interpolate_linear(&[10.0, 20.0, 30.0], &[1.0, 2.0, 4.0], &[0.0, 40.0]);
        assert_close(&out, &[0.0, 6.0]);
    }

    #[test]
    fn test_unsorted_samples() {
        let out = interpolate_linear(&[20.0, 0.0, 10.0], &[3.0, 0.0, 1.0], &[5.0, 15.0]);
        assert_close(&out, &[0.5, 2.0]);
    }

    #[test]
    fn test_two_samples_is_a_line() {
        let out = interpolate_linear(&[0.0, 1.0], &[1.0, 3.0], &[-1.0, 0.5, 2.0]);
        assert_close(&out, &[-1.0, 2.0, 5.0]);
    }

    #[test]
    fn test_too_few_samples() {
        let out = interpolate_linear(&[1.0], &[1.0], &[0.0, 1.0]);
        assert!(out.iter().all(|v| v.is_nan()));
    }
}
