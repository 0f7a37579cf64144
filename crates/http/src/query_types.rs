//! Request/query types (Deserialize)

use crimestat_core::RecordFilter;
use crimestat_service::{ComparisonParams, CrimeTypeParams, SafestParams, ThresholdParams, TrendParams};
use serde::Deserialize;

/// Blank query values count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Numeric query values where `?year=` means "not given" rather than a parse error.
mod blank_as_none {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CrimeListQuery {
    pub state: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub year_from: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub year_to: Option<i32>,
}

impl From<CrimeListQuery> for RecordFilter {
    fn from(q: CrimeListQuery) -> Self {
        Self {
            state: non_blank(q.state).map(|s| s.trim().to_owned()),
            year: q.year,
            year_from: q.year_from,
            year_to: q.year_to,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ThresholdQuery {
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub threshold: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub year: Option<i32>,
    pub crime_type: Option<String>,
}

impl From<ThresholdQuery> for ThresholdParams {
    fn from(q: ThresholdQuery) -> Self {
        Self { threshold: q.threshold, year: q.year, crime_type: non_blank(q.crime_type) }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub year_from: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub year_to: Option<i32>,
}

impl From<TrendQuery> for TrendParams {
    fn from(q: TrendQuery) -> Self {
        Self { year_from: q.year_from, year_to: q.year_to }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    pub states: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub year: Option<i32>,
}

impl From<CompareQuery> for ComparisonParams {
    fn from(q: CompareQuery) -> Self {
        Self { states: non_blank(q.states), year: q.year }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SafestQuery {
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub limit: Option<usize>,
    pub crime_type: Option<String>,
}

impl From<SafestQuery> for SafestParams {
    fn from(q: SafestQuery) -> Self {
        Self { year: q.year, limit: q.limit, crime_type: non_blank(q.crime_type) }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CrimeTypeQuery {
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub year: Option<i32>,
    pub crime_type: Option<String>,
    pub sort: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none::deserialize")]
    pub limit: Option<usize>,
}

impl From<CrimeTypeQuery> for CrimeTypeParams {
    fn from(q: CrimeTypeQuery) -> Self {
        Self {
            year: q.year,
            crime_type: non_blank(q.crime_type),
            sort: non_blank(q.sort),
            limit: q.limit,
        }
    }
}
