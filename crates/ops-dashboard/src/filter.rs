//! Date-range and category filtering

use chrono::NaiveDate;
use tracing::debug;

use crate::dataset::{ColumnRole, Dataset, Row, Schema, parse_date};
use crate::error::DashboardError;

/// Active constraints narrowing the dataset to the displayed rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive lower bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound
    pub to: Option<NaiveDate>,
    /// Exact match against the raw category cell
    pub category: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from raw form values. Empty strings mean "no constraint".
    pub fn parse(from: &str, to: &str, category: &str) -> Result<Self, DashboardError> {
        let criteria = Self {
            from: parse_bound(from)?,
            to: parse_bound(to)?,
            category: Some(category).filter(|c| !c.is_empty()).map(str::to_string),
        };
        criteria.validate()?;
        Ok(criteria)
    }

    /// Reject an inverted range. Never clamped.
    pub fn validate(&self) -> Result<(), DashboardError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if to < from => Err(DashboardError::InvalidDateRange { from, to }),
            _ => Ok(()),
        }
    }

    /// Whether a row passes. Rows without a valid date never pass.
    pub fn matches(&self, schema: &Schema, row: &Row) -> bool {
        let Some(date) = row.date(schema) else {
            return false;
        };

        let after_from = self.from.is_none_or(|from| date >= from);
        let before_to = self.to.is_none_or(|to| date <= to);
        let category_match = match &self.category {
            None => true,
            Some(wanted) => schema
                .by_role(ColumnRole::Category)
                .is_some_and(|column| row.get(column) == wanted),
        };

        after_from && before_to && category_match
    }

    /// Indices of matching rows, in dataset order
    pub fn apply(&self, dataset: &Dataset) -> Result<Vec<usize>, DashboardError> {
        self.validate()?;

        let schema = dataset.schema();
        let matched: Vec<usize> = dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| self.matches(schema, row))
            .map(|(idx, _)| idx)
            .collect();

        debug!("Filter {:?} matched {} of {} rows", self, matched.len(), dataset.len());
        Ok(matched)
    }
}

fn parse_bound(value: &str) -> Result<Option<NaiveDate>, DashboardError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse_date(value)
        .map(Some)
        .ok_or_else(|| DashboardError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleAliases;

    const SAMPLE: &str = "date,category,item name,status\n\
                          2024-05-03,plant,Boiler,normal\n\
                          2024-05-01,measurement,Reactor A,warning\n\
                          ,storage,Tank 1,normal\n\
                          not a date,storage,Tank 2,normal\n\
                          2024-05-01,transport,Pump B-2,error\n\
                          2024-05-02,measurement,Reactor B,normal\n";

    fn dataset() -> Dataset {
        Dataset::parse(SAMPLE, &RoleAliases::default()).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_bounds_keeps_all_dated_rows_in_order() {
        let matched = FilterCriteria::default().apply(&dataset()).unwrap();
        // rows 2 and 3 have no valid date
        assert_eq!(matched, vec![0, 1, 4, 5]);
    }

    #[test]
    fn test_single_day_range() {
        let day = ymd(2024, 5, 1);
        let criteria = FilterCriteria { from: Some(day), to: Some(day), category: None };
        let data = dataset();
        let matched = criteria.apply(&data).unwrap();

        assert_eq!(matched, vec![1, 4]);
        for idx in matched {
            assert_eq!(data.rows()[idx].date(data.schema()), Some(day));
        }
    }

    #[test]
    fn test_open_ended_bounds() {
        let data = dataset();
        let from_only = FilterCriteria { from: Some(ymd(2024, 5, 2)), ..Default::default() };
        assert_eq!(from_only.apply(&data).unwrap(), vec![0, 5]);

        let to_only = FilterCriteria { to: Some(ymd(2024, 5, 1)), ..Default::default() };
        assert_eq!(to_only.apply(&data).unwrap(), vec![1, 4]);
    }

    #[test]
    fn test_category_exact_match() {
        let criteria = FilterCriteria { category: Some("measurement".to_string()), ..Default::default() };
        assert_eq!(criteria.apply(&dataset()).unwrap(), vec![1, 5]);

        // the display label is not the stored value
        let label = FilterCriteria { category: Some("Measurement".to_string()), ..Default::default() };
        assert!(label.apply(&dataset()).unwrap().is_empty());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let criteria = FilterCriteria { from: Some(ymd(2024, 5, 2)), to: Some(ymd(2024, 5, 1)), category: None };
        let err = criteria.apply(&dataset()).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_parse_form_values() {
        let criteria = FilterCriteria::parse("2024-05-01", "", "").unwrap();
        assert_eq!(criteria.from, Some(ymd(2024, 5, 1)));
        assert_eq!(criteria.to, None);
        assert_eq!(criteria.category, None);

        let criteria = FilterCriteria::parse("", "2024/05/03", "plant").unwrap();
        assert_eq!(criteria.to, Some(ymd(2024, 5, 3)));
        assert_eq!(criteria.category.as_deref(), Some("plant"));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            FilterCriteria::parse("soon", "", ""),
            Err(DashboardError::InvalidDate(_))
        ));
        assert!(matches!(
            FilterCriteria::parse("2024-05-03", "2024-05-01", ""),
            Err(DashboardError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_category_filter_without_category_column() {
        let data = Dataset::parse("date,status\n2024-05-01,normal\n", &RoleAliases::default()).unwrap();
        let criteria = FilterCriteria { category: Some("plant".to_string()), ..Default::default() };
        assert!(criteria.apply(&data).unwrap().is_empty());
    }
}
