//! Crime statistics record types.
//!
//! One record exists per (state, year). Rates are per 100,000 inhabitants,
//! totals are absolute incident counts.

use serde::{Deserialize, Serialize};

/// Writable fields of a crime record, as accepted on create, update and import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeInput {
    /// US state name, canonicalized to title case on write
    pub state: String,
    /// Reporting year
    pub year: i32,
    /// State population for the year
    pub population: i64,

    pub property_rate_all: f64,
    pub property_rate_burglary: f64,
    pub property_rate_larceny: f64,
    pub property_rate_motor: f64,

    pub violent_rate_all: f64,
    pub violent_rate_assault: f64,
    pub violent_rate_murder: f64,
    pub violent_rate_rape: f64,
    pub violent_rate_robbery: f64,

    pub property_total_all: i64,
    pub property_total_burglary: i64,
    pub property_total_larceny: i64,
    pub property_total_motor: i64,

    pub violent_total_all: i64,
    pub violent_total_assault: i64,
    pub violent_total_murder: i64,
    pub violent_total_rape: i64,
    pub violent_total_robbery: i64,
}

impl CrimeInput {
    /// Rate fields by name, in declaration order.
    #[must_use]
    pub fn rate_fields(&self) -> [(&'static str, f64); 9] {
        [
            ("property_rate_all", self.property_rate_all),
            ("property_rate_burglary", self.property_rate_burglary),
            ("property_rate_larceny", self.property_rate_larceny),
            ("property_rate_motor", self.property_rate_motor),
            ("violent_rate_all", self.violent_rate_all),
            ("violent_rate_assault", self.violent_rate_assault),
            ("violent_rate_murder", self.violent_rate_murder),
            ("violent_rate_rape", self.violent_rate_rape),
            ("violent_rate_robbery", self.violent_rate_robbery),
        ]
    }

    /// Total fields by name, in declaration order.
    #[must_use]
    pub fn total_fields(&self) -> [(&'static str, i64); 9] {
        [
            ("property_total_all", self.property_total_all),
            ("property_total_burglary", self.property_total_burglary),
            ("property_total_larceny", self.property_total_larceny),
            ("property_total_motor", self.property_total_motor),
            ("violent_total_all", self.violent_total_all),
            ("violent_total_assault", self.violent_total_assault),
            ("violent_total_murder", self.violent_total_murder),
            ("violent_total_rape", self.violent_total_rape),
            ("violent_total_robbery", self.violent_total_robbery),
        ]
    }

    /// `property_total_all + violent_total_all`
    #[must_use]
    pub const fn total_crimes(&self) -> i64 {
        self.property_total_all.saturating_add(self.violent_total_all)
    }

    /// `property_rate_all + violent_rate_all`
    #[must_use]
    pub fn crime_rate_per_capita(&self) -> f64 {
        self.property_rate_all + self.violent_rate_all
    }
}

/// A persisted crime record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeRecord {
    /// Store-assigned identifier
    pub id: i64,
    #[serde(flatten)]
    pub data: CrimeInput,
}

impl CrimeRecord {
    #[must_use]
    pub const fn new(id: i64, data: CrimeInput) -> Self {
        Self { id, data }
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.data.state
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.data.year
    }

    #[must_use]
    pub const fn total_crimes(&self) -> i64 {
        self.data.total_crimes()
    }

    #[must_use]
    pub fn crime_rate_per_capita(&self) -> f64 {
        self.data.crime_rate_per_capita()
    }

    /// Full serialized form including derived values.
    #[must_use]
    pub fn detail(&self) -> CrimeDetail {
        CrimeDetail::from(self)
    }

    /// Lightweight serialized form used by listings.
    #[must_use]
    pub fn summary(&self) -> CrimeSummary {
        CrimeSummary::from(self)
    }
}

/// Full record with derived values, as returned by detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrimeDetail {
    #[serde(flatten)]
    pub record: CrimeRecord,
    pub total_crimes: i64,
    pub crime_rate_per_capita: f64,
}

impl From<&CrimeRecord> for CrimeDetail {
    fn from(record: &CrimeRecord) -> Self {
        Self {
            record: record.clone(),
            total_crimes: record.total_crimes(),
            crime_rate_per_capita: record.crime_rate_per_capita(),
        }
    }
}

/// Essential columns of a record, as returned by list-style endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrimeSummary {
    pub id: i64,
    pub state: String,
    pub year: i32,
    pub population: i64,
    pub violent_rate_all: f64,
    pub property_rate_all: f64,
    pub violent_total_all: i64,
    pub property_total_all: i64,
    pub total_crimes: i64,
    pub crime_rate_per_capita: f64,
}

impl From<&CrimeRecord> for CrimeSummary {
    fn from(record: &CrimeRecord) -> Self {
        let d = &record.data;
        Self {
            id: record.id,
            state: d.state.clone(),
            year: d.year,
            population: d.population,
            violent_rate_all: d.violent_rate_all,
            property_rate_all: d.property_rate_all,
            violent_total_all: d.violent_total_all,
            property_total_all: d.property_total_all,
            total_crimes: d.total_crimes(),
            crime_rate_per_capita: d.crime_rate_per_capita(),
        }
    }
}

/// Optional filters for record listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring match on state
    pub state: Option<String>,
    /// Exact year
    pub year: Option<i32>,
    /// Inclusive lower bound on year
    pub year_from: Option<i32>,
    /// Inclusive upper bound on year
    pub year_to: Option<i32>,
}

impl RecordFilter {
    /// Whether a record passes every configured filter.
    #[must_use]
    pub fn matches(&self, record: &CrimeRecord) -> bool {
        let year = record.year();
        self.state.as_deref().is_none_or(|needle| {
            record.state().to_lowercase().contains(&needle.to_lowercase())
        }) && self.year.is_none_or(|y| year == y)
            && self.year_from.is_none_or(|from| year >= from)
            && self.year_to.is_none_or(|to| year <= to)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{california_2015, record};
    use super::*;

    #[test]
    fn derived_values_are_sums_of_category_alls() {
        let rec = CrimeRecord::new(1, california_2015());
        assert_eq!(rec.total_crimes(), 975_195 + 175_695);
        assert!((rec.crime_rate_per_capita() - (2500.5 + 450.5)).abs() < 1e-9);
    }

    #[test]
    fn detail_serializes_flat_with_derived_fields() {
        let rec = CrimeRecord::new(7, california_2015());
        let json = serde_json::to_value(rec.detail()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["state"], "California");
        assert_eq!(json["violent_total_murder"], 2145);
        assert_eq!(json["total_crimes"], 1_150_890);
        assert_eq!(json["crime_rate_per_capita"], 2951.0);
    }

    #[test]
    fn summary_keeps_only_essential_columns() {
        let rec = CrimeRecord::new(3, california_2015());
        let json = serde_json::to_value(rec.summary()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 10);
        assert!(!obj.contains_key("violent_rate_murder"));
    }

    #[test]
    fn input_deserializes_and_record_round_trips_id() {
        let json = serde_json::to_string(&CrimeRecord::new(5, california_2015())).unwrap();
        let back: CrimeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, 5);
        assert_eq!(back.data, california_2015());
    }

    #[test]
    fn filter_matches_state_substring_case_insensitively() {
        let filter = RecordFilter { state: Some("cali".to_owned()), ..RecordFilter::default() };
        assert!(filter.matches(&record(1, "California", 2015, 1.0, 1.0)));
        assert!(!filter.matches(&record(2, "Texas", 2015, 1.0, 1.0)));
    }

    #[test]
    fn filter_year_bounds_are_inclusive() {
        let filter =
            RecordFilter { year_from: Some(2000), year_to: Some(2010), ..RecordFilter::default() };
        assert!(filter.matches(&record(1, "Ohio", 2000, 1.0, 1.0)));
        assert!(filter.matches(&record(2, "Ohio", 2010, 1.0, 1.0)));
        assert!(!filter.matches(&record(3, "Ohio", 2011, 1.0, 1.0)));
    }
}
