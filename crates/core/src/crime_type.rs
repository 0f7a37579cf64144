//! Query-side classification enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::record::CrimeInput;

/// Broad crime category used by the threshold filter and the safest-states ranking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RateCategory {
    Violent,
    Property,
    /// Violent and property rates combined
    #[default]
    All,
}

impl RateCategory {
    pub const ACCEPTED: &'static str = "violent, property, all";

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Violent => "violent",
            Self::Property => "property",
            Self::All => "all",
        }
    }

    /// Rate selected by this category for a record.
    #[must_use]
    pub fn rate_of(&self, data: &CrimeInput) -> f64 {
        match *self {
            Self::Violent => data.violent_rate_all,
            Self::Property => data.property_rate_all,
            Self::All => data.crime_rate_per_capita(),
        }
    }
}

impl FromStr for RateCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "violent" => Ok(Self::Violent),
            "property" => Ok(Self::Property),
            "all" => Ok(Self::All),
            _ => Err(CoreError::InvalidValue {
                param: "crime_type",
                value: s.to_owned(),
                accepted: Self::ACCEPTED,
            }),
        }
    }
}

impl fmt::Display for RateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specific crime type ranked by the crime-type analysis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CrimeType {
    Murder,
    Assault,
    Robbery,
    Rape,
    Burglary,
    Larceny,
    Motor,
}

impl CrimeType {
    pub const ACCEPTED: &'static str = "murder, assault, robbery, rape, burglary, larceny, motor";

    pub const ALL_VARIANTS: &'static [Self] = &[
        Self::Murder,
        Self::Assault,
        Self::Robbery,
        Self::Rape,
        Self::Burglary,
        Self::Larceny,
        Self::Motor,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Murder => "murder",
            Self::Assault => "assault",
            Self::Robbery => "robbery",
            Self::Rape => "rape",
            Self::Burglary => "burglary",
            Self::Larceny => "larceny",
            Self::Motor => "motor",
        }
    }

    #[must_use]
    pub const fn rate(&self, data: &CrimeInput) -> f64 {
        match *self {
            Self::Murder => data.violent_rate_murder,
            Self::Assault => data.violent_rate_assault,
            Self::Robbery => data.violent_rate_robbery,
            Self::Rape => data.violent_rate_rape,
            Self::Burglary => data.property_rate_burglary,
            Self::Larceny => data.property_rate_larceny,
            Self::Motor => data.property_rate_motor,
        }
    }

    #[must_use]
    pub const fn total(&self, data: &CrimeInput) -> i64 {
        match *self {
            Self::Murder => data.violent_total_murder,
            Self::Assault => data.violent_total_assault,
            Self::Robbery => data.violent_total_robbery,
            Self::Rape => data.violent_total_rape,
            Self::Burglary => data.property_total_burglary,
            Self::Larceny => data.property_total_larceny,
            Self::Motor => data.property_total_motor,
        }
    }
}

impl FromStr for CrimeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "murder" => Ok(Self::Murder),
            "assault" => Ok(Self::Assault),
            "robbery" => Ok(Self::Robbery),
            "rape" => Ok(Self::Rape),
            "burglary" => Ok(Self::Burglary),
            "larceny" => Ok(Self::Larceny),
            "motor" => Ok(Self::Motor),
            _ => Err(CoreError::InvalidValue {
                param: "crime_type",
                value: s.to_owned(),
                accepted: Self::ACCEPTED,
            }),
        }
    }
}

impl fmt::Display for CrimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field a crime-type ranking is ordered by.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RankBy {
    #[default]
    Rate,
    Total,
}

impl RankBy {
    pub const ACCEPTED: &'static str = "rate, total";

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Rate => "rate",
            Self::Total => "total",
        }
    }
}

impl FromStr for RankBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rate" => Ok(Self::Rate),
            "total" => Ok(Self::Total),
            _ => Err(CoreError::InvalidValue {
                param: "sort",
                value: s.to_owned(),
                accepted: Self::ACCEPTED,
            }),
        }
    }
}

impl fmt::Display for RankBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::california_2015;

    #[test]
    fn crime_type_parse_accepts_only_exact_names() {
        assert_eq!("murder".parse::<CrimeType>().unwrap(), CrimeType::Murder);
        assert_eq!("motor".parse::<CrimeType>().unwrap(), CrimeType::Motor);
        assert!(" MURDER ".parse::<CrimeType>().is_err());
        assert!("Violent".parse::<RateCategory>().is_err());
        assert!("TOTAL".parse::<RankBy>().is_err());
    }

    #[test]
    fn invalid_crime_type_lists_all_seven() {
        let err = "invalid_crime".parse::<CrimeType>().unwrap_err();
        let msg = err.to_string();
        for ct in CrimeType::ALL_VARIANTS {
            assert!(msg.contains(ct.as_str()), "{msg} is missing {ct}");
        }
        assert!(msg.starts_with("Invalid crime_type"));
    }

    #[test]
    fn crime_type_maps_to_matching_columns() {
        let data = california_2015();
        assert!((CrimeType::Murder.rate(&data) - 5.5).abs() < f64::EPSILON);
        assert_eq!(CrimeType::Murder.total(&data), 2145);
        assert_eq!(CrimeType::Larceny.total(&data), 702_117);
        assert!((CrimeType::Motor.rate(&data) - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rate_category_all_sums_both_rates() {
        let data = california_2015();
        assert!((RateCategory::All.rate_of(&data) - 2951.0).abs() < 1e-9);
        assert!((RateCategory::Violent.rate_of(&data) - 450.5).abs() < 1e-9);
    }

    #[test]
    fn invalid_sort_names_the_parameter() {
        let err = "alphabetical".parse::<RankBy>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid sort. Must be one of: rate, total");
    }
}
