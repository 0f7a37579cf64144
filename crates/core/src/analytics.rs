//! Pure analytic functions over crime records.
//!
//! Each function takes rows already selected by the store plus typed parameters and
//! returns a plain, serializable report. Metric filters and sorts happen here, so every
//! storage backend yields identical results.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::crime_type::{CrimeType, RankBy, RateCategory};
use crate::record::{CrimeDetail, CrimeRecord, CrimeSummary};

/// Year a report was restricted to, serialized as the year or `"all years"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearScope {
    Year(i32),
    AllYears,
}

impl From<Option<i32>> for YearScope {
    fn from(year: Option<i32>) -> Self {
        year.map_or(Self::AllYears, Self::Year)
    }
}

impl Serialize for YearScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Year(year) => serializer.serialize_i32(year),
            Self::AllYears => serializer.serialize_str("all years"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdReport {
    pub threshold: f64,
    pub crime_type: RateCategory,
    pub year: YearScope,
    pub count: usize,
    pub results: Vec<CrimeSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendStatistics {
    pub avg_violent_rate: f64,
    pub avg_property_rate: f64,
    pub max_violent_rate: f64,
    pub min_violent_rate: f64,
    pub total_murders: i64,
    pub avg_population: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub state: String,
    pub year_range: String,
    pub statistics: TrendStatistics,
    pub data_points: usize,
    pub yearly_data: Vec<CrimeDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateComparison {
    pub state: String,
    pub population: i64,
    pub violent_rate: f64,
    pub property_rate: f64,
    pub total_crime_rate: f64,
    pub murder_rate: f64,
}

impl From<&CrimeRecord> for StateComparison {
    fn from(record: &CrimeRecord) -> Self {
        let d = &record.data;
        Self {
            state: d.state.clone(),
            population: d.population,
            violent_rate: d.violent_rate_all,
            property_rate: d.property_rate_all,
            total_crime_rate: d.crime_rate_per_capita(),
            murder_rate: d.violent_rate_murder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub year: i32,
    pub states_compared: usize,
    pub comparison: Vec<StateComparison>,
    pub detailed_data: Vec<CrimeDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafestReport {
    pub year: i32,
    pub crime_type: RateCategory,
    pub limit: usize,
    pub safest_states: Vec<CrimeSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeStatistics {
    pub avg_violent_rate: f64,
    pub avg_property_rate: f64,
    pub total_murders: i64,
    pub avg_population: f64,
    pub years_included: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeReport {
    pub state: String,
    pub decades_analyzed: usize,
    /// Keyed by decade label ("1980s"); labels are four-digit so key order is chronological
    pub decade_statistics: BTreeMap<String, DecadeStatistics>,
}

/// One row of the crime-type ranking.
///
/// Serializes rate and total under type-specific keys, e.g. `murder_rate` / `murder_total`.
#[derive(Debug, Clone, PartialEq)]
pub struct CrimeTypeEntry {
    pub state: String,
    pub population: i64,
    pub crime_type: CrimeType,
    pub rate: f64,
    pub total: i64,
}

impl Serialize for CrimeTypeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("state", &self.state)?;
        map.serialize_entry("population", &self.population)?;
        map.serialize_entry(&format!("{}_rate", self.crime_type), &self.rate)?;
        map.serialize_entry(&format!("{}_total", self.crime_type), &self.total)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrimeTypeReport {
    pub year: i32,
    pub crime_type: CrimeType,
    pub sorted_by: RankBy,
    pub states_analyzed: usize,
    pub results: Vec<CrimeTypeEntry>,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn total_murders<'a>(records: impl Iterator<Item = &'a CrimeRecord>) -> i64 {
    records.fold(0i64, |acc, r| acc.saturating_add(r.data.violent_total_murder))
}

/// Label of the decade a year falls into, e.g. 1987 -> "1980s".
#[must_use]
pub fn decade_label(year: i32) -> String {
    format!("{}s", year - year.rem_euclid(10))
}

/// Records whose selected rate is at or above `threshold`, optionally restricted to a year.
#[must_use]
pub fn threshold_report(
    records: &[CrimeRecord],
    threshold: f64,
    category: RateCategory,
    year: Option<i32>,
) -> ThresholdReport {
    let results: Vec<CrimeSummary> = records
        .iter()
        .filter(|r| year.is_none_or(|y| r.year() == y))
        .filter(|r| category.rate_of(&r.data) >= threshold)
        .map(CrimeRecord::summary)
        .collect();
    ThresholdReport {
        threshold,
        crime_type: category,
        year: year.into(),
        count: results.len(),
        results,
    }
}

/// Aggregates over a non-empty set of records.
#[must_use]
pub fn trend_statistics(records: &[CrimeRecord]) -> Option<TrendStatistics> {
    if records.is_empty() {
        return None;
    }
    let violent = || records.iter().map(|r| r.data.violent_rate_all);
    Some(TrendStatistics {
        avg_violent_rate: mean(violent()),
        avg_property_rate: mean(records.iter().map(|r| r.data.property_rate_all)),
        max_violent_rate: violent().fold(f64::NEG_INFINITY, f64::max),
        min_violent_rate: violent().fold(f64::INFINITY, f64::min),
        total_murders: total_murders(records.iter()),
        avg_population: mean(records.iter().map(|r| r.data.population as f64)),
    })
}

/// Trend over one state's records, restricted to an inclusive year range.
///
/// `records` must be ordered by year ascending. Returns `None` when nothing is left
/// after the range restriction.
#[must_use]
pub fn trend_report(
    state_name: &str,
    records: &[CrimeRecord],
    year_from: Option<i32>,
    year_to: Option<i32>,
) -> Option<TrendReport> {
    let selected: Vec<CrimeRecord> = records
        .iter()
        .filter(|r| year_from.is_none_or(|from| r.year() >= from))
        .filter(|r| year_to.is_none_or(|to| r.year() <= to))
        .cloned()
        .collect();
    let statistics = trend_statistics(&selected)?;
    let (first, last) = (selected.first()?, selected.last()?);
    Some(TrendReport {
        state: state_name.to_owned(),
        year_range: format!("{} to {}", first.year(), last.year()),
        statistics,
        data_points: selected.len(),
        yearly_data: selected.iter().map(CrimeRecord::detail).collect(),
    })
}

/// Side-by-side comparison of the given records. Returns `None` for an empty set.
#[must_use]
pub fn comparison_report(year: i32, records: &[CrimeRecord]) -> Option<ComparisonReport> {
    if records.is_empty() {
        return None;
    }
    let comparison: Vec<StateComparison> = records.iter().map(StateComparison::from).collect();
    Some(ComparisonReport {
        year,
        states_compared: comparison.len(),
        comparison,
        detailed_data: records.iter().map(CrimeRecord::detail).collect(),
    })
}

/// Lowest-rate records first; the sort is stable so ties keep input order.
#[must_use]
pub fn safest_report(
    year: i32,
    records: &[CrimeRecord],
    category: RateCategory,
    limit: usize,
) -> SafestReport {
    let mut ranked: Vec<&CrimeRecord> = records.iter().collect();
    ranked.sort_by(|a, b| category.rate_of(&a.data).total_cmp(&category.rate_of(&b.data)));
    SafestReport {
        year,
        crime_type: category,
        limit,
        safest_states: ranked.into_iter().take(limit).map(CrimeRecord::summary).collect(),
    }
}

/// Per-decade aggregates for one state's records.
#[must_use]
pub fn decade_statistics(records: &[CrimeRecord]) -> BTreeMap<String, DecadeStatistics> {
    let mut buckets: BTreeMap<String, Vec<&CrimeRecord>> = BTreeMap::new();
    for record in records {
        buckets.entry(decade_label(record.year())).or_default().push(record);
    }
    buckets
        .into_iter()
        .map(|(label, rows)| {
            let stats = DecadeStatistics {
                avg_violent_rate: mean(rows.iter().map(|r| r.data.violent_rate_all)),
                avg_property_rate: mean(rows.iter().map(|r| r.data.property_rate_all)),
                total_murders: total_murders(rows.iter().copied()),
                avg_population: mean(rows.iter().map(|r| r.data.population as f64)),
                years_included: rows.len(),
            };
            (label, stats)
        })
        .collect()
}

/// Decade comparison for a state. Returns `None` when the state has no records.
#[must_use]
pub fn decade_report(state_name: &str, records: &[CrimeRecord]) -> Option<DecadeReport> {
    if records.is_empty() {
        return None;
    }
    let decade_statistics = decade_statistics(records);
    Some(DecadeReport {
        state: state_name.to_owned(),
        decades_analyzed: decade_statistics.len(),
        decade_statistics,
    })
}

/// Highest rate (or total) first for one crime type; ties keep input order.
#[must_use]
pub fn crime_type_report(
    year: i32,
    records: &[CrimeRecord],
    crime_type: CrimeType,
    rank_by: RankBy,
    limit: usize,
) -> CrimeTypeReport {
    let mut ranked: Vec<&CrimeRecord> = records.iter().collect();
    ranked.sort_by(|a, b| -> Ordering {
        match rank_by {
            RankBy::Rate => crime_type.rate(&b.data).total_cmp(&crime_type.rate(&a.data)),
            RankBy::Total => crime_type.total(&b.data).cmp(&crime_type.total(&a.data)),
        }
    });
    let results: Vec<CrimeTypeEntry> = ranked
        .into_iter()
        .take(limit)
        .map(|r| CrimeTypeEntry {
            state: r.data.state.clone(),
            population: r.data.population,
            crime_type,
            rate: crime_type.rate(&r.data),
            total: crime_type.total(&r.data),
        })
        .collect();
    CrimeTypeReport {
        year,
        crime_type,
        sorted_by: rank_by,
        states_analyzed: results.len(),
        results,
    }
}
