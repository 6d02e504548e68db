//! Value lookup for fractional years over sparse samples.

use crate::series::Sample;

/// Leftmost insertion point of `year` in `samples[lo..hi]`.
///
/// Returns the index of the first sample whose year is `>= year`, or `hi` when
/// every sample in the window is earlier.
pub(crate) fn bisect_left(samples: &[Sample], year: f64, mut lo: usize, mut hi: usize) -> usize {
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if samples[mid].year < year {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Finds (and possibly interpolates) the value for a fractional year.
///
/// The search window excludes the last sample, so the bisector yields an index
/// in `[0, len - 1]`. Index `0` returns the first value; any other index blends
/// the sample at-or-after the query with the one before it. Queries past the
/// last sample clamp to its value.
///
/// `samples` must be non-empty and sorted ascending by year, which
/// [`TimeSeries`](crate::TimeSeries) guarantees.
///
/// # Panics
///
/// Panics if `samples` is empty.
pub(crate) fn interpolate(samples: &[Sample], year: f64) -> f64 {
    let last = samples[samples.len() - 1];
    if year > last.year {
        return last.value;
    }

    let i = bisect_left(samples, year, 0, samples.len() - 1);
    let a = samples[i];
    if i > 0 {
        let b = samples[i - 1];
        let t = (year - a.year) / (b.year - a.year);
        return a.value * (1.0 - t) + b.value * t;
    }
    a.value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(pairs: &[(f64, f64)]) -> Vec<Sample> {
        pairs.iter().map(|&p| Sample::from(p)).collect()
    }

    #[test]
    fn test_bisect_left_ties_go_left() {
        let s = samples(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert_eq!(bisect_left(&s, 2.0, 0, 3), 1);
        assert_eq!(bisect_left(&s, 2.5, 0, 3), 2);
        assert_eq!(bisect_left(&s, 0.0, 0, 3), 0);
        assert_eq!(bisect_left(&s, 9.0, 0, 3), 3);
        // Window excludes the last element
        assert_eq!(bisect_left(&s, 9.0, 0, 2), 2);
    }

    #[test]
    fn test_single_sample_is_constant() {
        let s = samples(&[(2000.0, 7.0)]);
        for year in [-5000.0, 1999.0, 2000.0, 2000.5, 3000.0] {
            assert_eq!(interpolate(&s, year), 7.0);
        }
    }

    #[test]
    fn test_two_samples_endpoints_and_midpoint() {
        let s = samples(&[(2000.0, 10.0), (2010.0, 30.0)]);
        assert_eq!(interpolate(&s, 2000.0), 10.0);
        assert_eq!(interpolate(&s, 2010.0), 30.0);
        assert!((interpolate(&s, 2005.0) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamps_before_first_sample() {
        let s = samples(&[(2000.0, 10.0), (2010.0, 30.0), (2020.0, 0.0)]);
        assert_eq!(interpolate(&s, 1900.0), 10.0);
        assert_eq!(interpolate(&s, 1999.999), 10.0);
    }

    #[test]
    fn test_clamps_after_last_sample() {
        let s = samples(&[(2000.0, 10.0), (2010.0, 30.0), (2020.0, 0.0)]);
        assert_eq!(interpolate(&s, 2020.0), 0.0);
        assert_eq!(interpolate(&s, 2020.5), 0.0);
        assert_eq!(interpolate(&s, 3000.0), 0.0);
    }

    #[test]
    fn test_exact_years_return_sample_values() {
        let s = samples(&[(1990.0, 1.0), (1991.0, 4.0), (1995.0, -2.0), (2001.0, 8.0)]);
        for sample in &s {
            assert_eq!(interpolate(&s, sample.year), sample.value);
        }
    }

    #[test]
    fn test_irregular_gap_is_linear() {
        let s = samples(&[(1990.0, 0.0), (1991.0, 4.0), (1995.0, 12.0)]);
        assert!((interpolate(&s, 1993.0) - 8.0).abs() < 1e-12);
        assert!((interpolate(&s, 1990.25) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_query_falls_back_to_first_value() {
        let s = samples(&[(1990.0, 3.0), (1991.0, 4.0)]);
        assert_eq!(interpolate(&s, f64::NAN), 3.0);
    }
}
