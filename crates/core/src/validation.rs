//! Write-time validation for crime records.
//!
//! Field checks are collected exhaustively. Cross-field checks (category totals,
//! rate/total consistency) only run once every field check has passed.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::constants::{
    DEFAULT_RATE_TOLERANCE, DEFAULT_TOTAL_TOLERANCE, MAX_POPULATION, MAX_YEAR, MIN_YEAR,
    RATE_PER_POPULATION,
};
use crate::record::CrimeInput;

/// Key under which cross-field violations are reported.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Reported when a write collides with an existing (state, year).
pub const UNIQUE_KEY_MESSAGE: &str = "The fields state, year must make a unique set.";

/// Tolerances for the heuristic cross-field rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationThresholds {
    /// Allowed relative gap between a category's `all` total and its constituents' sum
    pub total_tolerance: f64,
    /// Allowed relative gap between a stated rate and `total / population * 100000`
    pub rate_tolerance: f64,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self { total_tolerance: DEFAULT_TOTAL_TOLERANCE, rate_tolerance: DEFAULT_RATE_TOLERANCE }
    }
}

/// Which rule set a write goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Lightweight path for single creates and bulk import
    Create,
    /// Full-detail path: adds rate/total consistency
    Full,
}

/// Violations keyed by field name; cross-field ones go under `non_field_errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.entry(field.to_owned()).or_default().push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    /// Single non-field violation.
    #[must_use]
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_non_field(message);
        errors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Trim and title-case a state name.
///
/// Idempotent: normalizing an already-normalized name returns it unchanged.
#[must_use]
pub fn normalize_state(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word_start = true;
    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            let mapped: Vec<char> = if word_start {
                c.to_uppercase().collect()
            } else {
                c.to_lowercase().collect()
            };
            // Multi-char case mappings ('ß' -> "SS") are not stable on re-normalization.
            match mapped.as_slice() {
                [single] => out.push(*single),
                _ => out.push(c),
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

fn check_state(raw: &str, errors: &mut ValidationErrors) -> String {
    let state = normalize_state(raw);
    if state.is_empty() {
        errors.add("state", "State name cannot be empty.");
    } else if !state.chars().all(|c| c.is_alphabetic() || c == ' ') {
        errors.add("state", "State name must contain only letters and spaces.");
    }
    state
}

fn check_fields(input: &CrimeInput, errors: &mut ValidationErrors) {
    if !(MIN_YEAR..=MAX_YEAR).contains(&input.year) {
        errors.add("year", format!("Year must be between {MIN_YEAR} and {MAX_YEAR}."));
    }

    if input.population < 0 {
        errors.add("population", "Population cannot be negative.");
    } else if input.population > MAX_POPULATION {
        errors.add("population", "Population value seems unrealistic for a US state.");
    }

    for (field, rate) in input.rate_fields() {
        if !rate.is_finite() {
            errors.add(field, "A valid number is required.");
        } else if rate < 0.0 {
            errors.add(field, "Ensure this value is greater than or equal to 0.");
        }
    }

    for (field, total) in input.total_fields() {
        if total < 0 {
            errors.add(field, "Ensure this value is greater than or equal to 0.");
        }
    }
}

struct Category<'a> {
    label: &'static str,
    rate_all: f64,
    total_all: i64,
    constituents: &'a [i64],
}

fn check_category_totals(
    category: &Category<'_>,
    tolerance: f64,
    errors: &mut ValidationErrors,
) {
    // Totals are unbounded above; i128 holds any sum of four i64 values.
    let sum: i128 = category.constituents.iter().map(|&t| i128::from(t)).sum();
    if category.total_all == 0 || sum <= 0 {
        return;
    }
    let all = category.total_all as f64;
    if ((sum - i128::from(category.total_all)).abs() as f64) > all * tolerance {
        errors.add_non_field(format!(
            "{} crime totals do not match individual crime sums.",
            category.label
        ));
    }
}

fn check_category_rate(
    category: &Category<'_>,
    population: i64,
    tolerance: f64,
    errors: &mut ValidationErrors,
) {
    if population <= 0 {
        return;
    }
    let expected = category.total_all as f64 / population as f64 * RATE_PER_POPULATION;
    if (expected - category.rate_all).abs() > category.rate_all * tolerance {
        errors.add_non_field(format!(
            "{} crime rate does not match calculated rate from totals and population.",
            category.label
        ));
    }
}

fn check_cross_fields(
    input: &CrimeInput,
    mode: ValidationMode,
    thresholds: ValidationThresholds,
    errors: &mut ValidationErrors,
) {
    let property = Category {
        label: "Property",
        rate_all: input.property_rate_all,
        total_all: input.property_total_all,
        constituents: &[
            input.property_total_burglary,
            input.property_total_larceny,
            input.property_total_motor,
        ],
    };
    let violent = Category {
        label: "Violent",
        rate_all: input.violent_rate_all,
        total_all: input.violent_total_all,
        constituents: &[
            input.violent_total_assault,
            input.violent_total_murder,
            input.violent_total_rape,
            input.violent_total_robbery,
        ],
    };

    for category in [&property, &violent] {
        check_category_totals(category, thresholds.total_tolerance, errors);
        if mode == ValidationMode::Full {
            check_category_rate(category, input.population, thresholds.rate_tolerance, errors);
        }
    }
}

/// Validate a candidate record, returning it with `state` normalized.
///
/// # Errors
/// Returns every field violation at once, or the cross-field violations when all fields pass.
pub fn validate_record(
    mut input: CrimeInput,
    mode: ValidationMode,
    thresholds: ValidationThresholds,
) -> Result<CrimeInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    input.state = check_state(&input.state, &mut errors);
    check_fields(&input, &mut errors);
    if errors.is_empty() {
        check_cross_fields(&input, mode, thresholds, &mut errors);
    }
    errors.into_result(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::california_2015;

    fn create(input: CrimeInput) -> Result<CrimeInput, ValidationErrors> {
        validate_record(input, ValidationMode::Create, ValidationThresholds::default())
    }

    fn full(input: CrimeInput) -> Result<CrimeInput, ValidationErrors> {
        validate_record(input, ValidationMode::Full, ValidationThresholds::default())
    }

    #[test]
    fn normalize_state_trims_and_title_cases() {
        assert_eq!(normalize_state("  new YORK "), "New York");
        assert_eq!(normalize_state("district of columbia"), "District Of Columbia");
    }

    #[test]
    fn normalize_state_is_idempotent() {
        for raw in ["  new YORK ", "texas", "ßtraße", "north   dakota", "O'Brien"] {
            let once = normalize_state(raw);
            assert_eq!(normalize_state(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn valid_record_passes_both_modes() {
        assert!(create(california_2015()).is_ok());
        assert!(full(california_2015()).is_ok());
    }

    #[test]
    fn state_is_normalized_on_success() {
        let mut input = california_2015();
        input.state = "  california ".to_owned();
        assert_eq!(create(input).unwrap().state, "California");
    }

    #[test]
    fn blank_state_is_rejected() {
        let mut input = california_2015();
        input.state = "   ".to_owned();
        let errors = create(input).unwrap_err();
        assert_eq!(errors.get("state").unwrap(), ["State name cannot be empty."]);
    }

    #[test]
    fn state_with_digits_is_rejected() {
        let mut input = california_2015();
        input.state = "Area 51".to_owned();
        let errors = create(input).unwrap_err();
        assert_eq!(errors.get("state").unwrap(), ["State name must contain only letters and spaces."]);
    }

    #[test]
    fn field_errors_are_collected_not_fail_fast() {
        let mut input = california_2015();
        input.state = "C4lifornia".to_owned();
        input.year = 1959;
        input.population = -1;
        input.violent_rate_murder = -0.5;
        let errors = create(input).unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, ["population", "state", "violent_rate_murder", "year"]);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn year_bounds_are_inclusive() {
        for (year, ok) in [(1960, true), (2025, true), (1959, false), (2026, false)] {
            let mut input = california_2015();
            input.year = year;
            assert_eq!(create(input).is_ok(), ok, "year {year}");
        }
    }

    #[test]
    fn unrealistic_population_is_rejected() {
        let mut input = california_2015();
        input.population = MAX_POPULATION + 1;
        let errors = create(input).unwrap_err();
        assert!(errors.get("population").is_some());
    }

    #[test]
    fn non_finite_rate_is_rejected() {
        let mut input = california_2015();
        input.property_rate_motor = f64::NAN;
        let errors = create(input).unwrap_err();
        assert_eq!(errors.get("property_rate_motor").unwrap(), ["A valid number is required."]);
    }

    #[test]
    fn property_totals_mismatch_is_a_non_field_error() {
        let mut input = california_2015();
        input.property_total_burglary = 400_000;
        let errors = create(input).unwrap_err();
        assert_eq!(
            errors.get(NON_FIELD_ERRORS).unwrap(),
            ["Property crime totals do not match individual crime sums."]
        );
    }

    #[test]
    fn violent_totals_mismatch_is_checked_too() {
        let mut input = california_2015();
        input.violent_total_all = 100_000;
        let errors = create(input).unwrap_err();
        assert_eq!(
            errors.get(NON_FIELD_ERRORS).unwrap(),
            ["Violent crime totals do not match individual crime sums."]
        );
    }

    #[test]
    fn totals_within_tolerance_pass() {
        let mut input = california_2015();
        // 4% above the constituent sum
        input.property_total_all = 975_195 * 104 / 100;
        input.property_rate_all = input.property_total_all as f64 / 39_000_000.0 * 100_000.0;
        assert!(create(input).is_ok());
    }

    #[test]
    fn huge_constituent_totals_do_not_overflow() {
        let mut input = california_2015();
        input.violent_total_all = 1;
        input.violent_total_assault = i64::MAX / 2;
        input.violent_total_murder = i64::MAX / 2;
        input.violent_total_rape = i64::MAX / 2;
        input.violent_total_robbery = 10;
        let errors = create(input).unwrap_err();
        assert_eq!(
            errors.get(NON_FIELD_ERRORS).unwrap(),
            ["Violent crime totals do not match individual crime sums."]
        );
    }

    #[test]
    fn totals_at_i64_max_are_compared_exactly() {
        let mut input = california_2015();
        input.property_total_all = i64::MAX;
        input.property_total_burglary = i64::MAX;
        input.property_total_larceny = 0;
        input.property_total_motor = 0;
        assert!(create(input).is_ok());
    }

    #[test]
    fn zero_all_total_skips_totals_check() {
        let mut input = california_2015();
        input.property_total_all = 0;
        assert!(create(input).is_ok());
    }

    #[test]
    fn cross_field_checks_wait_for_field_checks() {
        let mut input = california_2015();
        input.year = 3000;
        input.property_total_burglary = 400_000;
        let errors = create(input).unwrap_err();
        assert!(errors.get(NON_FIELD_ERRORS).is_none());
        assert!(errors.get("year").is_some());
    }

    #[test]
    fn rate_consistency_only_on_full_path() {
        let mut input = california_2015();
        input.property_rate_all = 5000.0;
        assert!(create(input.clone()).is_ok());
        let errors = full(input).unwrap_err();
        assert_eq!(
            errors.get(NON_FIELD_ERRORS).unwrap(),
            ["Property crime rate does not match calculated rate from totals and population."]
        );
    }

    #[test]
    fn rate_consistency_skipped_for_zero_population() {
        let mut input = california_2015();
        input.population = 0;
        assert!(full(input).is_ok());
    }

    #[test]
    fn thresholds_are_configurable() {
        let mut input = california_2015();
        input.property_total_burglary = 175_578 + 80_000;
        let loose = ValidationThresholds { total_tolerance: 0.2, rate_tolerance: 0.1 };
        assert!(create(input.clone()).is_err());
        assert!(validate_record(input, ValidationMode::Create, loose).is_ok());
    }

    #[test]
    fn errors_serialize_as_field_map() {
        let errors = ValidationErrors::non_field("boom");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"non_field_errors": ["boom"]}));
    }
}
