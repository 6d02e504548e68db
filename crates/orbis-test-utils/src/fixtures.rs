//! A tiny income / life expectancy / population dataset.
//!
//! Values are loosely modelled on real indicators but kept round so expected
//! interpolations can be written by hand.

use orbis_chart::{
    Entity, IndicatorKeys, LoadConfig, RawRow, SeriesStore, TimeSeries, YearRange,
    build_series_store,
};

pub const START_YEAR: i32 = 2000;
pub const END_YEAR: i32 = 2004;

pub const INCOME: &str = "Income per person";
pub const LIFE_EXPECTANCY: &str = "Life expectancy";
pub const POPULATION: &str = "Population";

const YEARS: [&str; 5] = ["2000", "2001", "2002", "2003", "2004"];

/// (country, indicator, one cell per year)
const TABLE: &[(&str, &str, [&str; 5])] = &[
    ("Norway", INCOME, ["$40,000", "$41,000", "$42,000", "$43,000", "$44,000"]),
    ("Norway", LIFE_EXPECTANCY, ["78.5", "78.9", "79.3", "79.7", "80.1"]),
    ("Norway", POPULATION, ["4,500,000", "4,520,000", "4,540,000", "4,560,000", "4,580,000"]),
    ("India", INCOME, ["$1,500", "$1,600", "$1,700", "$1,800", "$1,900"]),
    ("India", LIFE_EXPECTANCY, ["62.0", "62.5", "63.0", "63.5", "64.0"]),
    ("India", POPULATION, ["1,000,000,000", "1,020,000,000", "1,040,000,000", "1,060,000,000", "1,080,000,000"]),
    ("Chile", INCOME, ["$10,000", "$10,500", "$11,000", "$11,500", "$12,000"]),
    ("Chile", LIFE_EXPECTANCY, ["76.0", "76.4", "76.8", "77.2", "77.6"]),
    ("Chile", POPULATION, ["15,000,000", "15,200,000", "15,400,000", "15,600,000", "15,800,000"]),
];

pub fn years() -> YearRange {
    YearRange::new(START_YEAR, END_YEAR).expect("fixture years are ordered")
}

pub fn load_config() -> LoadConfig {
    LoadConfig::new(
        IndicatorKeys::new(INCOME, LIFE_EXPECTANCY, POPULATION),
        years(),
    )
}

/// The dataset as raw rows with `Country` / `Indicator` / year columns.
pub fn rows() -> Vec<RawRow> {
    TABLE
        .iter()
        .map(|(country, indicator, cells)| {
            YEARS
                .iter()
                .zip(cells)
                .fold(
                    RawRow::new()
                        .with("Country", *country)
                        .with("Indicator", *indicator),
                    |row, (year, cell)| row.with(*year, *cell),
                )
        })
        .collect()
}

/// The dataset loaded through [`build_series_store`].
pub fn store() -> SeriesStore {
    build_series_store(&rows(), &load_config()).expect("fixture rows are complete")
}

/// Entity with linear series between two samples, for hand-built stores.
pub fn linear_entity(name: &str, from: (f64, f64, f64), to: (f64, f64, f64)) -> Entity {
    let series = |a: f64, b: f64| {
        TimeSeries::from_pairs(&[(START_YEAR, a), (END_YEAR, b)]).expect("fixture series are valid")
    };
    Entity::new(
        name,
        series(from.0, to.0),
        series(from.1, to.1),
        series(from.2, to.2),
    )
}

/// Store built from [`linear_entity`] values, in the given order.
pub fn linear_store(entities: &[(&str, (f64, f64, f64), (f64, f64, f64))]) -> SeriesStore {
    entities
        .iter()
        .try_fold(
            SeriesStore::builder().with_years(years()),
            |builder, (name, from, to)| builder.entity(linear_entity(name, *from, *to)),
        )
        .and_then(|builder| builder.build())
        .expect("fixture entities are unique")
}
