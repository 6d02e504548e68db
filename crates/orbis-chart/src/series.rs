//! Sparse yearly time series.

use std::fmt;

use crate::error::SeriesError;
use crate::interpolate::interpolate;

/// The three visualised dimensions of every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Horizontal axis
    X,
    /// Vertical axis
    Y,
    /// Bubble size
    Radius,
}

impl Dimension {
    /// All dimensions, in storage order.
    pub const ALL: [Dimension; 3] = [Dimension::X, Dimension::Y, Dimension::Radius];

    /// Storage index of this dimension.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Dimension::X => 0,
            Dimension::Y => 1,
            Dimension::Radius => 2,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::X => "horizontal",
            Dimension::Y => "vertical",
            Dimension::Radius => "radius",
        };
        f.write_str(name)
    }
}

/// A single observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Year of the observation (may be fractional)
    pub year: f64,
    /// Observed value in raw indicator units
    pub value: f64,
}

impl Sample {
    pub fn new(year: f64, value: f64) -> Self {
        Self { year, value }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((year, value): (f64, f64)) -> Self {
        Self { year, value }
    }
}

impl From<(i32, f64)> for Sample {
    fn from((year, value): (i32, f64)) -> Self {
        Self {
            year: year as f64,
            value,
        }
    }
}

/// Samples sorted strictly ascending by year.
///
/// Always holds at least one sample and only finite numbers; a series with a
/// single sample is constant for every query year.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Validate and wrap a list of samples.
    pub fn new(samples: Vec<Sample>) -> Result<Self, SeriesError> {
        if samples.is_empty() {
            return Err(SeriesError::Empty);
        }

        for (index, sample) in samples.iter().enumerate() {
            if !sample.year.is_finite() || !sample.value.is_finite() {
                return Err(SeriesError::NonFinite { index });
            }
            if index > 0 {
                let previous = samples[index - 1].year;
                if sample.year <= previous {
                    return Err(SeriesError::NotAscending {
                        index,
                        previous,
                        year: sample.year,
                    });
                }
            }
        }

        Ok(Self { samples })
    }

    /// Build a series from `(year, value)` tuples.
    pub fn from_pairs<T: Into<Sample> + Copy>(pairs: &[T]) -> Result<Self, SeriesError> {
        Self::new(pairs.iter().map(|&p| p.into()).collect())
    }

    /// A series that holds `value` for every year.
    pub fn constant(value: f64) -> Result<Self, SeriesError> {
        Self::new(vec![Sample::new(0.0, value)])
    }

    /// The samples, ascending by year.
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples (always at least one).
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Sample {
        self.samples[0]
    }

    pub fn last(&self) -> Sample {
        self.samples[self.samples.len() - 1]
    }

    /// Smallest and largest sample value.
    pub fn value_bounds(&self) -> (f64, f64) {
        self.samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), s| {
                (min.min(s.value), max.max(s.value))
            })
    }

    /// Value at a (possibly fractional) year. See [`interpolate`].
    #[inline]
    pub fn value_at(&self, year: f64) -> f64 {
        interpolate(&self.samples, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty() {
        assert_eq!(TimeSeries::new(Vec::new()), Err(SeriesError::Empty));
    }

    #[test]
    fn test_rejects_duplicate_years() {
        let err = TimeSeries::from_pairs(&[(2000, 1.0), (2000, 2.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::NotAscending { index: 1, .. }));
    }

    #[test]
    fn test_rejects_descending_years() {
        let err = TimeSeries::from_pairs(&[(2001, 1.0), (2000, 2.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::NotAscending { index: 1, .. }));
    }

    #[test]
    fn test_rejects_nan() {
        let err = TimeSeries::from_pairs(&[(2000.0, 1.0), (2001.0, f64::NAN)]).unwrap_err();
        assert_eq!(err, SeriesError::NonFinite { index: 1 });
    }

    #[test]
    fn test_irregular_years_are_fine() {
        let series = TimeSeries::from_pairs(&[(1950, 1.0), (1953, 2.0), (1990, 4.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first().year, 1950.0);
        assert_eq!(series.last().year, 1990.0);
    }

    #[test]
    fn test_value_bounds() {
        let series = TimeSeries::from_pairs(&[(2000, 3.0), (2001, -1.0), (2002, 7.5)]).unwrap();
        assert_eq!(series.value_bounds(), (-1.0, 7.5));
    }

    #[test]
    fn test_constant_series() {
        let series = TimeSeries::constant(42.0).unwrap();
        assert_eq!(series.value_at(-1e9), 42.0);
        assert_eq!(series.value_at(1e9), 42.0);
    }

    #[test]
    fn test_value_at_is_total() {
        let series = TimeSeries::from_pairs(&[(2000, 4.0)]).unwrap();
        for year in [f64::NEG_INFINITY, -1.0, 2000.0, 1e9, f64::INFINITY, f64::NAN] {
            assert_eq!(series.value_at(year), 4.0);
        }
    }

    #[test]
    fn test_dimension_indices_are_distinct() {
        let indices: Vec<usize> = Dimension::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
