//! Error types for series construction, data loading and chart configuration.

use std::fmt;

use crate::series::Dimension;

/// Errors raised while constructing a [`TimeSeries`](crate::TimeSeries).
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// The series has no samples.
    Empty,

    /// A sample's year is not strictly greater than the previous one.
    NotAscending {
        /// Index of the offending sample.
        index: usize,
        /// Year of the previous sample.
        previous: f64,
        /// Year of the offending sample.
        year: f64,
    },

    /// A sample carries a NaN or infinite year or value.
    NonFinite {
        /// Index of the offending sample.
        index: usize,
    },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::Empty => write!(f, "Time series has no samples"),
            SeriesError::NotAscending {
                index,
                previous,
                year,
            } => write!(
                f,
                "Sample {} (year {}) does not come after year {}",
                index, year, previous
            ),
            SeriesError::NonFinite { index } => {
                write!(f, "Sample {} has a non-finite year or value", index)
            }
        }
    }
}

impl std::error::Error for SeriesError {}

/// Errors that make a dataset unusable. Always raised before any animation starts.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// `start_year` is after `end_year`.
    InvalidYearRange {
        /// Configured first year.
        start: i32,
        /// Configured last year.
        end: i32,
    },

    /// A row lacks the entity or indicator column.
    MissingColumn {
        /// Index of the row in the input.
        row: usize,
        /// Name of the missing column.
        column: String,
    },

    /// An entity has no row for one of the configured indicators.
    MissingIndicator {
        /// Entity name.
        entity: String,
        /// Indicator key.
        indicator: String,
    },

    /// A year inside the configured range has no cell.
    MissingSample {
        /// Entity name.
        entity: String,
        /// Indicator key.
        indicator: String,
        /// Year without a value.
        year: i32,
    },

    /// A cell could not be parsed as a number after cleaning.
    InvalidNumber {
        /// Entity name.
        entity: String,
        /// Indicator key.
        indicator: String,
        /// Year of the cell.
        year: i32,
        /// Raw cell text.
        raw: String,
    },

    /// The extracted samples do not form a valid series.
    InvalidSeries {
        /// Entity name.
        entity: String,
        /// Dimension the series was meant for.
        dimension: Dimension,
        /// Underlying series error.
        source: SeriesError,
    },

    /// The same entity was registered twice.
    DuplicateEntity {
        /// Entity name.
        entity: String,
    },

    /// No entity carried any of the configured indicators.
    NoEntities,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::InvalidYearRange { start, end } => {
                write!(f, "Invalid year range: {} is after {}", start, end)
            }
            LoadError::MissingColumn { row, column } => {
                write!(f, "Row {} has no '{}' column", row, column)
            }
            LoadError::MissingIndicator { entity, indicator } => {
                write!(f, "Entity '{}' has no '{}' series", entity, indicator)
            }
            LoadError::MissingSample {
                entity,
                indicator,
                year,
            } => write!(
                f,
                "Entity '{}' has no '{}' value for {}",
                entity, indicator, year
            ),
            LoadError::InvalidNumber {
                entity,
                indicator,
                year,
                raw,
            } => write!(
                f,
                "Entity '{}' has a non-numeric '{}' value for {}: {:?}",
                entity, indicator, year, raw
            ),
            LoadError::InvalidSeries {
                entity,
                dimension,
                source,
            } => write!(
                f,
                "Entity '{}' has an invalid {} series: {}",
                entity, dimension, source
            ),
            LoadError::DuplicateEntity { entity } => {
                write!(f, "Entity '{}' was added twice", entity)
            }
            LoadError::NoEntities => write!(f, "Dataset contains no entities"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::InvalidSeries { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Invalid chart configuration values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The label threshold is negative or not finite.
    InvalidLabelThreshold {
        /// Configured threshold in pixels.
        threshold: f64,
    },

    /// A padding factor is not positive and finite.
    InvalidPadding {
        /// Lower factor.
        lower: f64,
        /// Upper factor.
        upper: f64,
    },

    /// A pixel range has a non-finite endpoint.
    InvalidRange {
        /// What the range is for.
        what: &'static str,
        /// Range start.
        start: f64,
        /// Range end.
        end: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLabelThreshold { threshold } => {
                write!(f, "Invalid label threshold: {} px", threshold)
            }
            ConfigError::InvalidPadding { lower, upper } => {
                write!(f, "Invalid domain padding: x{} / x{}", lower, upper)
            }
            ConfigError::InvalidRange { what, start, end } => {
                write!(f, "Invalid {} range: [{}, {}]", what, start, end)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type alias for dataset loading.
pub type LoadResult<T> = Result<T, LoadError>;
