//! Read-only analytic queries.
//!
//! The store selects rows by year or state; ranking, metric filters and
//! aggregation are delegated to `crimestat_core::analytics`.

use std::str::FromStr;
use std::sync::Arc;

use crimestat_core::analytics::{
    self, ComparisonReport, CrimeTypeReport, DecadeReport, SafestReport, ThresholdReport,
    TrendReport,
};
use crimestat_core::{
    CoreError, CrimeType, DEFAULT_CRIME_THRESHOLD, DEFAULT_CRIME_TYPE_LIMIT, DEFAULT_SAFEST_LIMIT,
    MAX_QUERY_LIMIT, RankBy, RateCategory, RecordFilter,
};
use crimestat_storage::{CrimeStore, StorageBackend};

use crate::ServiceError;

#[derive(Debug, Clone, Default)]
pub struct ThresholdParams {
    pub threshold: Option<f64>,
    pub year: Option<i32>,
    /// violent, property or all
    pub crime_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrendParams {
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct ComparisonParams {
    /// Comma-separated state names
    pub states: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct SafestParams {
    pub year: Option<i32>,
    pub limit: Option<usize>,
    pub crime_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CrimeTypeParams {
    pub year: Option<i32>,
    /// One of the seven specific crime types
    pub crime_type: Option<String>,
    /// rate or total
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

/// Parse an optional enum parameter, falling back to the type's default when absent.
fn parse_or_default<T>(raw: Option<&str>) -> Result<T, ServiceError>
where
    T: FromStr<Err = CoreError> + Default,
{
    raw.map_or_else(|| Ok(T::default()), |value| value.parse::<T>().map_err(ServiceError::from))
}

fn capped_limit(limit: Option<usize>, default: usize) -> usize {
    limit.unwrap_or(default).min(MAX_QUERY_LIMIT)
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_states(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect()
}

fn no_state_data(state_name: &str) -> ServiceError {
    ServiceError::NotFound(format!("No data found for state: {state_name}"))
}

pub struct AnalyticsService {
    storage: Arc<StorageBackend>,
}

impl AnalyticsService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Records whose selected rate meets the threshold. An empty match is a valid result.
    pub async fn high_crime_states(
        &self,
        params: &ThresholdParams,
    ) -> Result<ThresholdReport, ServiceError> {
        let threshold = params.threshold.unwrap_or(DEFAULT_CRIME_THRESHOLD);
        if !threshold.is_finite() {
            return Err(ServiceError::InvalidInput("threshold must be a finite number".to_owned()));
        }
        let category: RateCategory = parse_or_default(params.crime_type.as_deref())?;
        let filter = RecordFilter { year: params.year, ..RecordFilter::default() };
        let rows = self.storage.list_records(&filter).await?;
        Ok(analytics::threshold_report(&rows, threshold, category, params.year))
    }

    pub async fn crime_trends(
        &self,
        state_name: &str,
        params: TrendParams,
    ) -> Result<TrendReport, ServiceError> {
        let rows = self.storage.records_for_state(state_name.trim()).await?;
        analytics::trend_report(state_name, &rows, params.year_from, params.year_to)
            .ok_or_else(|| no_state_data(state_name))
    }

    pub async fn compare_states(
        &self,
        params: &ComparisonParams,
    ) -> Result<ComparisonReport, ServiceError> {
        let states = params.states.as_deref().map(split_states).unwrap_or_default();
        let (false, Some(year)) = (states.is_empty(), params.year) else {
            return Err(ServiceError::InvalidInput(
                "Both states and year parameters are required".to_owned(),
            ));
        };
        let rows = self.storage.records_for_states(&states, year).await?;
        analytics::comparison_report(year, &rows).ok_or_else(|| {
            ServiceError::NotFound(format!("No data found for specified states in year {year}"))
        })
    }

    pub async fn safest_states(&self, params: &SafestParams) -> Result<SafestReport, ServiceError> {
        let Some(year) = params.year else {
            return Err(ServiceError::InvalidInput("Year parameter is required".to_owned()));
        };
        let category: RateCategory = parse_or_default(params.crime_type.as_deref())?;
        let limit = capped_limit(params.limit, DEFAULT_SAFEST_LIMIT);
        let rows = self.storage.records_for_year(year).await?;
        Ok(analytics::safest_report(year, &rows, category, limit))
    }

    pub async fn decade_comparison(&self, state_name: &str) -> Result<DecadeReport, ServiceError> {
        let rows = self.storage.records_for_state(state_name.trim()).await?;
        analytics::decade_report(state_name, &rows).ok_or_else(|| no_state_data(state_name))
    }

    pub async fn crime_type_analysis(
        &self,
        params: &CrimeTypeParams,
    ) -> Result<CrimeTypeReport, ServiceError> {
        let (Some(year), Some(raw_type)) = (params.year, params.crime_type.as_deref()) else {
            return Err(ServiceError::InvalidInput(
                "Both year and crime_type parameters are required".to_owned(),
            ));
        };
        let crime_type: CrimeType = raw_type.parse()?;
        let rank_by: RankBy = parse_or_default(params.sort.as_deref())?;
        let limit = capped_limit(params.limit, DEFAULT_CRIME_TYPE_LIMIT);
        let rows = self.storage.records_for_year(year).await?;
        Ok(analytics::crime_type_report(year, &rows, crime_type, rank_by, limit))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code")]

    use super::*;
    use crate::test_support::{california_2015, memory_backend, seed};

    async fn seeded() -> AnalyticsService {
        let storage = memory_backend();
        seed(&storage, "Texas", 2015, 410.0, 2800.0).await;
        seed(&storage, "California", 2015, 450.5, 2500.5).await;
        seed(&storage, "Maine", 2015, 120.0, 1800.0).await;
        seed(&storage, "Vermont", 2015, 120.0, 1600.0).await;
        seed(&storage, "Texas", 2009, 500.0, 3900.0).await;
        seed(&storage, "Texas", 2010, 480.0, 3700.0).await;
        AnalyticsService::new(storage)
    }

    #[test]
    fn split_states_trims_and_drops_empty_entries() {
        assert_eq!(split_states(" California, Texas ,,"), vec!["California", "Texas"]);
    }

    #[tokio::test]
    async fn threshold_defaults_to_all_rates_over_5000() {
        let svc = seeded().await;
        let report = svc.high_crime_states(&ThresholdParams::default()).await.unwrap();
        // 2009: 4400, 2010: 4180, others lower
        assert_eq!(report.count, 0);

        let params = ThresholdParams { threshold: Some(2900.0), ..Default::default() };
        let report = svc.high_crime_states(&params).await.unwrap();
        let keys: Vec<(String, i32)> = report.results.iter().map(|r| (r.state.clone(), r.year)).collect();
        assert_eq!(
            keys,
            vec![
                ("California".to_owned(), 2015),
                ("Texas".to_owned(), 2015),
                ("Texas".to_owned(), 2010),
                ("Texas".to_owned(), 2009),
            ]
        );
    }

    #[tokio::test]
    async fn threshold_respects_year_and_category() {
        let svc = seeded().await;
        let params = ThresholdParams {
            threshold: Some(400.0),
            year: Some(2015),
            crime_type: Some("violent".to_owned()),
        };
        let report = svc.high_crime_states(&params).await.unwrap();
        assert_eq!(report.count, 2);
        assert!(report.results.iter().all(|r| r.year == 2015 && r.violent_rate_all >= 400.0));
    }

    #[tokio::test]
    async fn threshold_rejects_unknown_category() {
        let svc = seeded().await;
        let params = ThresholdParams { crime_type: Some("arson".to_owned()), ..Default::default() };
        let err = svc.high_crime_states(&params).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(ref m) if m.contains("violent, property, all")));
    }

    #[tokio::test]
    async fn trend_for_single_california_record() {
        let storage = memory_backend();
        storage.insert_record(&california_2015()).await.unwrap();
        let svc = AnalyticsService::new(storage);

        let report = svc.crime_trends("California", TrendParams::default()).await.unwrap();
        assert_eq!(report.yearly_data.len(), 1);
        assert!((report.statistics.avg_violent_rate - 450.5).abs() < 1e-9);
        assert_eq!(report.year_range, "2015 to 2015");
    }

    #[tokio::test]
    async fn trend_is_case_insensitive_and_range_limited() {
        let svc = seeded().await;
        let params = TrendParams { year_from: Some(2010), year_to: None };
        let report = svc.crime_trends("texas", params).await.unwrap();
        assert_eq!(report.state, "texas");
        assert_eq!(report.data_points, 2);
        assert_eq!(report.year_range, "2010 to 2015");
    }

    #[tokio::test]
    async fn trend_for_unknown_state_or_empty_range_is_not_found() {
        let svc = seeded().await;
        let err = svc.crime_trends("Atlantis", TrendParams::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "No data found for state: Atlantis"));

        let params = TrendParams { year_from: Some(1990), year_to: Some(1995) };
        assert!(svc.crime_trends("Texas", params).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn compare_two_states() {
        let svc = seeded().await;
        let params = ComparisonParams {
            states: Some("California, texas".to_owned()),
            year: Some(2015),
        };
        let report = svc.compare_states(&params).await.unwrap();
        assert_eq!(report.states_compared, 2);
        assert_eq!(report.detailed_data.len(), 2);
    }

    #[tokio::test]
    async fn compare_requires_both_params() {
        let svc = seeded().await;
        for params in [
            ComparisonParams { states: None, year: Some(2015) },
            ComparisonParams { states: Some("Texas".to_owned()), year: None },
            ComparisonParams { states: Some(" , ".to_owned()), year: Some(2015) },
        ] {
            let err = svc.compare_states(&params).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidInput(ref m) if m.contains("Both states and year")));
        }
    }

    #[tokio::test]
    async fn compare_without_matches_is_not_found() {
        let svc = seeded().await;
        let params = ComparisonParams { states: Some("Texas".to_owned()), year: Some(1999) };
        let err = svc.compare_states(&params).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m.ends_with("in year 1999")));
    }

    #[tokio::test]
    async fn safest_states_breaks_ties_by_state() {
        let svc = seeded().await;
        let params = SafestParams {
            year: Some(2015),
            limit: Some(3),
            crime_type: Some("violent".to_owned()),
        };
        let report = svc.safest_states(&params).await.unwrap();
        let states: Vec<&str> = report.safest_states.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, vec!["Maine", "Vermont", "Texas"]);
    }

    #[tokio::test]
    async fn safest_states_requires_year_and_caps_limit() {
        let svc = seeded().await;
        let err = svc.safest_states(&SafestParams::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(ref m) if m == "Year parameter is required"));

        let params = SafestParams { year: Some(2015), limit: Some(1_000_000), crime_type: None };
        let report = svc.safest_states(&params).await.unwrap();
        assert_eq!(report.limit, MAX_QUERY_LIMIT);
        assert_eq!(report.safest_states.len(), 4);

        let params = SafestParams { year: Some(2015), limit: Some(0), crime_type: None };
        assert!(svc.safest_states(&params).await.unwrap().safest_states.is_empty());
    }

    #[tokio::test]
    async fn decades_bucket_by_year() {
        let svc = seeded().await;
        let report = svc.decade_comparison("Texas").await.unwrap();
        assert_eq!(report.decades_analyzed, 2);
        assert_eq!(report.decade_statistics["2000s"].years_included, 1);
        assert_eq!(report.decade_statistics["2010s"].years_included, 2);
        assert!(svc.decade_comparison("Atlantis").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn crime_type_analysis_validates_params() {
        let svc = seeded().await;
        let missing = CrimeTypeParams { year: Some(2015), ..Default::default() };
        let err = svc.crime_type_analysis(&missing).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(ref m) if m.starts_with("Both year and crime_type")));

        let invalid = CrimeTypeParams {
            year: Some(2015),
            crime_type: Some("invalid_crime".to_owned()),
            ..Default::default()
        };
        let err = svc.crime_type_analysis(&invalid).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InvalidInput(ref m)
                if m.contains("murder, assault, robbery, rape, burglary, larceny, motor")
        ));

        let bad_sort = CrimeTypeParams {
            year: Some(2015),
            crime_type: Some("murder".to_owned()),
            sort: Some("alphabetical".to_owned()),
            limit: None,
        };
        let err = svc.crime_type_analysis(&bad_sort).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(ref m) if m.contains("rate, total")));
    }

    #[tokio::test]
    async fn crime_type_analysis_ranks_descending() {
        let svc = seeded().await;
        let params = CrimeTypeParams {
            year: Some(2015),
            crime_type: Some("murder".to_owned()),
            sort: Some("total".to_owned()),
            limit: Some(2),
        };
        let report = svc.crime_type_analysis(&params).await.unwrap();
        assert_eq!(report.states_analyzed, 2);
        assert!(report.results[0].total >= report.results[1].total);
    }
}
