//! Moving-average smoothing and peak location
//!
//! Shared by the momentum extractor (to suppress per-frame jitter before
//! peak detection) and by the synthetic data generator (to shape noise).
//!
//! Both functions are total: empty input yields empty output / `None`,
//! and non-finite samples never win a peak.

/// Default smoothing window, in frames
pub const DEFAULT_SMOOTHING_WINDOW: usize = 3;

/// Centered moving average with edge truncation
///
/// Each output sample is the mean of the input samples within
/// `window / 2` positions on either side. Near the edges the window is
/// truncated to the samples that exist rather than padded, so the output
/// has the same length as the input.
///
/// A `window` of 0 or 1 returns the input unchanged. Even windows behave
/// like the next odd window down (`4` → `3`).
///
/// # Examples
///
/// ```rust
/// use swingdx_common::signal::moving_average;
///
/// let smoothed = moving_average(&[0.0, 3.0, 0.0], 3);
/// assert_eq!(smoothed, vec![1.5, 1.0, 1.5]);
/// ```
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || values.is_empty() {
        return values.to_vec();
    }

    let half = (window - 1) / 2;
    let last = values.len() - 1;

    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(last);
            let span = &values[lo..=hi];
            span.iter().sum::<f64>() / span.len() as f64
        })
        .collect()
}

/// Index of the maximum value (first occurrence on ties)
///
/// NaN samples are skipped. Returns `None` for empty input or input with
/// no comparable samples.
pub fn find_peak_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((i, v)),
        }
    }

    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_edges_truncate() {
        let out = moving_average(&[3.0, 6.0, 9.0, 12.0], 3);
        assert_eq!(out, vec![4.5, 6.0, 9.0, 10.5]);
    }

    #[test]
    fn test_moving_average_window_one_is_identity() {
        let input = [1.0, 5.0, 2.0];
        assert_eq!(moving_average(&input, 1), input.to_vec());
        assert_eq!(moving_average(&input, 0), input.to_vec());
    }

    #[test]
    fn test_moving_average_single_sample() {
        assert_eq!(moving_average(&[7.0], 3), vec![7.0]);
    }

    #[test]
    fn test_moving_average_empty() {
        assert!(moving_average(&[], 3).is_empty());
    }

    #[test]
    fn test_moving_average_wide_window() {
        let out = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 5);
        assert_eq!(out[2], 3.0);
        assert_eq!(out[0], 2.0); // mean of first three
        assert_eq!(out[4], 4.0); // mean of last three
    }

    #[test]
    fn test_peak_first_occurrence_on_ties() {
        assert_eq!(find_peak_index(&[1.0, 4.0, 2.0, 4.0]), Some(1));
    }

    #[test]
    fn test_peak_skips_nan() {
        assert_eq!(find_peak_index(&[f64::NAN, 1.0, 0.5]), Some(1));
        assert_eq!(find_peak_index(&[f64::NAN]), None);
    }

    #[test]
    fn test_peak_empty() {
        assert_eq!(find_peak_index(&[]), None);
    }

    #[test]
    fn test_peak_all_equal_is_first() {
        assert_eq!(find_peak_index(&[0.0, 0.0, 0.0]), Some(0));
    }
}
