//! Per-entity time series and the global domain of every dimension.
//!
//! The store is built once at load time and never mutated while a chart runs.
//! Entities keep the order in which the loader first saw them, which is also
//! the initial draw order.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use orbis_core::alloc::{HashMap, RandomState};
use orbis_core::profiling::profile_function;
use static_assertions::assert_impl_all;

use crate::config::{DomainPadding, LoadConfig, YearRange};
use crate::error::{LoadError, LoadResult};
use crate::series::{Dimension, Sample, TimeSeries};

/// Stable entity key, also used as the colour and legend key by sinks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Arc<str>);

impl EntityId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Free-form display data attached to an entity (e.g. a constant label).
pub type AuxData = HashMap<String, String>;

/// An entity and its three series.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    series: [TimeSeries; 3],
    aux: AuxData,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, x: TimeSeries, y: TimeSeries, radius: TimeSeries) -> Self {
        Self {
            id: id.into(),
            series: [x, y, radius],
            aux: AuxData::default(),
        }
    }

    /// Attach an auxiliary display value.
    pub fn with_aux(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.aux.insert(key.into(), value.into());
        self
    }

    #[inline]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    #[inline]
    pub fn series(&self, dimension: Dimension) -> &TimeSeries {
        &self.series[dimension.index()]
    }

    pub fn aux(&self) -> &AuxData {
        &self.aux
    }

    pub fn aux_value(&self, key: &str) -> Option<&str> {
        self.aux.get(key).map(String::as_str)
    }

    /// Interpolated value of one dimension at a fractional year.
    #[inline]
    pub fn value_at(&self, dimension: Dimension, year: f64) -> f64 {
        self.series(dimension).value_at(year)
    }
}

/// Closed `[min, max]` interval of domain values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainRange {
    pub min: f64,
    pub max: f64,
}

impl DomainRange {
    /// Create a range; callers guarantee `min <= max`.
    pub fn new(min: f64, max: f64) -> Self {
        debug_assert!(min <= max, "domain min {} above max {}", min, max);
        Self { min, max }
    }

    /// Create the range spanning two values in either order.
    pub fn spanning(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Whether every value in the domain is identical.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Multiply the bounds by the padding factors.
    pub fn padded(&self, padding: DomainPadding) -> Self {
        Self::spanning(self.min * padding.lower, self.max * padding.upper)
    }

    fn include(self, (lo, hi): (f64, f64)) -> Self {
        Self {
            min: self.min.min(lo),
            max: self.max.max(hi),
        }
    }

    const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };
}

/// Global domains of the three dimensions, across all entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionDomains {
    pub x: DomainRange,
    pub y: DomainRange,
    pub radius: DomainRange,
}

impl DimensionDomains {
    pub fn get(&self, dimension: Dimension) -> DomainRange {
        match dimension {
            Dimension::X => self.x,
            Dimension::Y => self.y,
            Dimension::Radius => self.radius,
        }
    }
}

/// Immutable collection of entities in load order.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    entities: IndexMap<EntityId, Entity, RandomState>,
    domains: DimensionDomains,
    years: Option<YearRange>,
}

assert_impl_all!(SeriesStore: Send, Sync);

impl SeriesStore {
    pub fn builder() -> SeriesStoreBuilder {
        SeriesStoreBuilder::new()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in load order.
    pub fn entities(&self) -> impl ExactSizeIterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Load-order index of an entity.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entities.get_index_of(id)
    }

    pub fn entity_at(&self, index: usize) -> Option<&Entity> {
        self.entities.get_index(index).map(|(_, entity)| entity)
    }

    /// Global min/max per dimension.
    #[inline]
    pub fn domains(&self) -> DimensionDomains {
        self.domains
    }

    /// Year range the data was loaded for, if it came from raw rows.
    pub fn years(&self) -> Option<YearRange> {
        self.years
    }

    /// Whole years spanned by the samples of every entity.
    pub fn sample_years(&self) -> YearRange {
        let (first, last) = self
            .entities
            .values()
            .flat_map(|entity| Dimension::ALL.map(|dimension| entity.series(dimension)))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), series| {
                (lo.min(series.first().year), hi.max(series.last().year))
            });
        let start = first.floor() as i32;
        let end = (last.ceil() as i32).max(start);
        YearRange { start, end }
    }

    /// Attach an auxiliary display value to a loaded entity.
    ///
    /// Unknown entities are skipped with a warning.
    pub fn with_aux(mut self, id: &str, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self.entities.get_mut(id) {
            Some(entity) => {
                entity.aux.insert(key.into(), value.into());
            }
            None => tracing::warn!("Ignoring auxiliary data for unknown entity '{}'", id),
        }
        self
    }
}

/// Incremental construction of a [`SeriesStore`].
#[derive(Debug, Default)]
pub struct SeriesStoreBuilder {
    entities: IndexMap<EntityId, Entity, RandomState>,
    years: Option<YearRange>,
}

impl SeriesStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the year range the data covers.
    pub fn with_years(mut self, years: YearRange) -> Self {
        self.years = Some(years);
        self
    }

    /// Add an entity; names must be unique.
    pub fn add_entity(&mut self, entity: Entity) -> LoadResult<&mut Self> {
        if self.entities.contains_key(entity.id.as_str()) {
            return Err(LoadError::DuplicateEntity {
                entity: entity.id.to_string(),
            });
        }
        self.entities.insert(entity.id.clone(), entity);
        Ok(self)
    }

    /// Consuming variant of [`add_entity`](Self::add_entity) for chaining.
    pub fn entity(mut self, entity: Entity) -> LoadResult<Self> {
        self.add_entity(entity)?;
        Ok(self)
    }

    /// Compute the global domains and freeze the store.
    pub fn build(self) -> LoadResult<SeriesStore> {
        if self.entities.is_empty() {
            return Err(LoadError::NoEntities);
        }

        let mut ranges = [DomainRange::EMPTY; 3];
        for entity in self.entities.values() {
            for dimension in Dimension::ALL {
                let bounds = entity.series(dimension).value_bounds();
                ranges[dimension.index()] = ranges[dimension.index()].include(bounds);
            }
        }

        let domains = DimensionDomains {
            x: ranges[0],
            y: ranges[1],
            radius: ranges[2],
        };

        for dimension in Dimension::ALL {
            let domain = domains.get(dimension);
            if domain.is_degenerate() {
                tracing::warn!(
                    "Degenerate {} domain: every value is {}",
                    dimension,
                    domain.min
                );
            }
        }

        Ok(SeriesStore {
            entities: self.entities,
            domains,
            years: self.years,
        })
    }
}

/// One raw input record: column name to raw cell text.
///
/// Rows are (entity, indicator) pairs with one column per year, e.g.
/// `Country=Chile, Indicator=GDP, 1990="$4,511", 1991="$4,733"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse a raw cell, stripping currency symbols, thousands separators and
/// surrounding whitespace.
pub fn clean_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let value: f64 = cleaned.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Build a store from raw rows.
///
/// Every entity must have a row for each configured indicator, and every such
/// row must hold a numeric cell for every year of the configured range.
/// Rows for other indicators still register their entity, so an entity that
/// only appears there is reported as missing an indicator. When an
/// (entity, indicator) pair appears twice, the later row wins.
pub fn build_series_store(rows: &[RawRow], config: &LoadConfig) -> LoadResult<SeriesStore> {
    profile_function!();

    let keys = [
        config.indicators.x.as_str(),
        config.indicators.y.as_str(),
        config.indicators.radius.as_str(),
    ];

    let mut slots: IndexMap<&str, [Option<TimeSeries>; 3], RandomState> = IndexMap::default();

    for (row_index, row) in rows.iter().enumerate() {
        let entity = row
            .get(&config.entity_column)
            .ok_or_else(|| LoadError::MissingColumn {
                row: row_index,
                column: config.entity_column.clone(),
            })?;
        let indicator =
            row.get(&config.indicator_column)
                .ok_or_else(|| LoadError::MissingColumn {
                    row: row_index,
                    column: config.indicator_column.clone(),
                })?;

        let entry = slots.entry(entity).or_default();

        for dimension in Dimension::ALL {
            if keys[dimension.index()] != indicator {
                continue;
            }
            if entry[dimension.index()].is_some() {
                tracing::warn!(
                    "Duplicate '{}' row for '{}', keeping the later one",
                    indicator,
                    entity
                );
            }
            let series = extract_series(row, entity, indicator, dimension, config.years)?;
            entry[dimension.index()] = Some(series);
        }
    }

    let mut builder = SeriesStoreBuilder::new().with_years(config.years);
    for (entity, [x, y, radius]) in slots {
        let missing = |dimension: Dimension| LoadError::MissingIndicator {
            entity: entity.to_string(),
            indicator: keys[dimension.index()].to_string(),
        };
        let x = x.ok_or_else(|| missing(Dimension::X))?;
        let y = y.ok_or_else(|| missing(Dimension::Y))?;
        let radius = radius.ok_or_else(|| missing(Dimension::Radius))?;
        builder.add_entity(Entity::new(entity, x, y, radius))?;
    }

    let store = builder.build()?;
    tracing::info!(
        "Loaded {} entities covering {}-{}",
        store.len(),
        config.years.start(),
        config.years.end()
    );
    Ok(store)
}

fn extract_series(
    row: &RawRow,
    entity: &str,
    indicator: &str,
    dimension: Dimension,
    years: YearRange,
) -> LoadResult<TimeSeries> {
    let mut samples = Vec::with_capacity(years.len());
    for year in years.years() {
        let raw = row
            .get(&year.to_string())
            .ok_or_else(|| LoadError::MissingSample {
                entity: entity.to_string(),
                indicator: indicator.to_string(),
                year,
            })?;
        let value = clean_number(raw).ok_or_else(|| LoadError::InvalidNumber {
            entity: entity.to_string(),
            indicator: indicator.to_string(),
            year,
            raw: raw.to_string(),
        })?;
        samples.push(Sample::new(year as f64, value));
    }

    TimeSeries::new(samples).map_err(|source| LoadError::InvalidSeries {
        entity: entity.to_string(),
        dimension,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndicatorKeys;

    fn config(start: i32, end: i32) -> LoadConfig {
        LoadConfig::new(
            IndicatorKeys::new("Income", "Life expectancy", "Population"),
            YearRange::new(start, end).unwrap(),
        )
    }

    fn row(country: &str, indicator: &str, cells: &[(i32, &str)]) -> RawRow {
        let mut row = RawRow::new()
            .with("Country", country)
            .with("Indicator", indicator);
        for (year, cell) in cells {
            row = row.with(year.to_string(), *cell);
        }
        row
    }

    #[test]
    fn test_clean_number() {
        assert_eq!(clean_number("$1,234.5"), Some(1234.5));
        assert_eq!(clean_number(" 12,345,678 "), Some(12_345_678.0));
        assert_eq!(clean_number("-3.25"), Some(-3.25));
        assert_eq!(clean_number(""), None);
        assert_eq!(clean_number("n/a"), None);
        assert_eq!(clean_number("inf"), None);
    }

    #[test]
    fn test_builds_entities_in_row_order() {
        let rows = vec![
            row("Chile", "Income", &[(2000, "$10"), (2001, "$12")]),
            row("Angola", "Income", &[(2000, "$3"), (2001, "$4")]),
            row("Chile", "Life expectancy", &[(2000, "70"), (2001, "71")]),
            row("Angola", "Life expectancy", &[(2000, "50"), (2001, "52")]),
            row("Chile", "Population", &[(2000, "15,000"), (2001, "15,200")]),
            row("Angola", "Population", &[(2000, "16,000"), (2001, "16,600")]),
        ];
        let store = build_series_store(&rows, &config(2000, 2001)).unwrap();

        let names: Vec<&str> = store.entities().map(|e| e.id().as_str()).collect();
        assert_eq!(names, vec!["Chile", "Angola"]);
        assert_eq!(store.index_of("Angola"), Some(1));

        let chile = store.get("Chile").unwrap();
        assert_eq!(chile.value_at(Dimension::X, 2001.0), 12.0);
        assert_eq!(chile.value_at(Dimension::Radius, 2000.0), 15_000.0);

        let domains = store.domains();
        assert_eq!(domains.x, DomainRange::new(3.0, 12.0));
        assert_eq!(domains.y, DomainRange::new(50.0, 71.0));
        assert_eq!(domains.radius, DomainRange::new(15_000.0, 16_600.0));
    }

    #[test]
    fn test_missing_year_is_fatal() {
        let rows = vec![row("Chile", "Income", &[(2000, "1")])];
        let err = build_series_store(&rows, &config(2000, 2001)).unwrap_err();
        assert_eq!(
            err,
            LoadError::MissingSample {
                entity: "Chile".into(),
                indicator: "Income".into(),
                year: 2001,
            }
        );
    }

    #[test]
    fn test_missing_indicator_is_fatal() {
        let rows = vec![
            row("Chile", "Income", &[(2000, "1")]),
            row("Chile", "Life expectancy", &[(2000, "1")]),
        ];
        let err = build_series_store(&rows, &config(2000, 2000)).unwrap_err();
        assert_eq!(
            err,
            LoadError::MissingIndicator {
                entity: "Chile".into(),
                indicator: "Population".into(),
            }
        );
    }

    #[test]
    fn test_non_numeric_cell_is_fatal() {
        let rows = vec![row("Chile", "Income", &[(2000, "lots")])];
        let err = build_series_store(&rows, &config(2000, 2000)).unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { year: 2000, .. }));
    }

    #[test]
    fn test_row_without_entity_column() {
        let rows = vec![RawRow::new().with("Indicator", "Income")];
        let err = build_series_store(&rows, &config(2000, 2000)).unwrap_err();
        assert_eq!(
            err,
            LoadError::MissingColumn {
                row: 0,
                column: "Country".into()
            }
        );
    }

    #[test]
    fn test_unrelated_indicators_are_ignored() {
        let rows = vec![
            row("Chile", "Income", &[(2000, "1")]),
            row("Chile", "CO2", &[(2000, "oops")]),
            row("Chile", "Life expectancy", &[(2000, "2")]),
            row("Chile", "Population", &[(2000, "3")]),
        ];
        let store = build_series_store(&rows, &config(2000, 2000)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            build_series_store(&[], &config(2000, 2000)).unwrap_err(),
            LoadError::NoEntities
        );
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let series = || TimeSeries::constant(1.0).unwrap();
        let mut builder = SeriesStore::builder();
        builder
            .add_entity(Entity::new("Chile", series(), series(), series()))
            .unwrap();
        let err = builder
            .add_entity(Entity::new("Chile", series(), series(), series()))
            .unwrap_err();
        assert_eq!(
            err,
            LoadError::DuplicateEntity {
                entity: "Chile".into()
            }
        );
    }

    #[test]
    fn test_degenerate_domain_is_not_fatal() {
        let series = || TimeSeries::constant(5.0).unwrap();
        let store = SeriesStore::builder()
            .entity(Entity::new("Chile", series(), series(), series()))
            .unwrap()
            .build()
            .unwrap();
        assert!(store.domains().radius.is_degenerate());
    }

    #[test]
    fn test_aux_attached_after_load() {
        let series = || TimeSeries::constant(5.0).unwrap();
        let store = SeriesStore::builder()
            .entity(Entity::new("Chile", series(), series(), series()))
            .unwrap()
            .build()
            .unwrap()
            .with_aux("Chile", "label", "CL")
            .with_aux("Nowhere", "label", "??");
        assert_eq!(store.get("Chile").unwrap().aux_value("label"), Some("CL"));
    }

    #[test]
    fn test_padding_widens_domain() {
        let padded = DomainRange::new(50.0, 80.0).padded(DomainPadding::fraction(0.1));
        assert!((padded.min - 45.0).abs() < 1e-9);
        assert!((padded.max - 88.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_years_spans_all_series() {
        let store = SeriesStore::builder()
            .entity(Entity::new(
                "Chile",
                TimeSeries::from_pairs(&[(1990, 1.0), (2000, 2.0)]).unwrap(),
                TimeSeries::from_pairs(&[(1995.5, 1.0), (2003.2, 2.0)]).unwrap(),
                TimeSeries::from_pairs(&[(1992, 1.0)]).unwrap(),
            ))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(store.years(), None);
        assert_eq!(store.sample_years(), YearRange::new(1990, 2004).unwrap());
    }
}
