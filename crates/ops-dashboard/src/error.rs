//! Dashboard error type
//!
//! Every failure degrades to a visible message; `kind()` says how the
//! surface should present it.

use chrono::NaiveDate;
use thiserror::Error;

use crate::constants;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("data file not found in candidate paths: {}", tried.join(", "))]
    ResourceUnavailable { tried: Vec<String> },

    #[error("data file has no header row")]
    MissingHeader,

    #[error("data file contains no rows")]
    EmptyDataset,

    #[error("data file has no date column; rows cannot be filtered")]
    NoDateColumn,

    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not UTF-8 text; re-save it as UTF-8")]
    NotUtf8 { path: String },

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    #[error("end date {to} is before start date {from}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    #[error("there is no data to export")]
    NothingToExport,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("exported CSV is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// How a failure is surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Data could not be fetched or parsed; shown as an inline placeholder row
    ResourceUnavailable,
    /// Bad user input; blocks the operation with an alert, prior view kept
    Validation,
    /// Valid operation with nothing to act on; non-error alert or placeholder
    EmptyResult,
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::InvalidDate(_) | DashboardError::InvalidDateRange { .. } => ErrorKind::Validation,
            DashboardError::NothingToExport => ErrorKind::EmptyResult,
            DashboardError::ResourceUnavailable { .. }
            | DashboardError::MissingHeader
            | DashboardError::EmptyDataset
            | DashboardError::NoDateColumn
            | DashboardError::Unreadable { .. }
            | DashboardError::NotUtf8 { .. }
            | DashboardError::Csv(_)
            | DashboardError::Io(_)
            | DashboardError::Encoding(_) => ErrorKind::ResourceUnavailable,
        }
    }

    /// Text shown in the alert or placeholder row
    pub fn user_message(&self) -> &'static str {
        match self {
            DashboardError::InvalidDate(_) => constants::MSG_INVALID_DATE,
            DashboardError::InvalidDateRange { .. } => constants::MSG_INVALID_DATE_RANGE,
            DashboardError::NothingToExport => constants::MSG_NOTHING_TO_EXPORT,
            DashboardError::NoDateColumn => constants::MSG_NO_DATE_COLUMN,
            _ => constants::MSG_LOAD_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let range = DashboardError::InvalidDateRange {
            from: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        };
        assert_eq!(range.kind(), ErrorKind::Validation);
        assert_eq!(range.user_message(), constants::MSG_INVALID_DATE_RANGE);

        assert_eq!(DashboardError::NothingToExport.kind(), ErrorKind::EmptyResult);
        assert_eq!(DashboardError::EmptyDataset.kind(), ErrorKind::ResourceUnavailable);
        assert_eq!(DashboardError::EmptyDataset.user_message(), constants::MSG_LOAD_FAILED);
        assert_eq!(DashboardError::NoDateColumn.kind(), ErrorKind::ResourceUnavailable);
        assert_eq!(DashboardError::NoDateColumn.user_message(), constants::MSG_NO_DATE_COLUMN);
    }

    #[test]
    fn test_resource_unavailable_lists_paths() {
        let err = DashboardError::ResourceUnavailable {
            tried: vec!["data.csv".to_string(), "integration/achievements/data.csv".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "data file not found in candidate paths: data.csv, integration/achievements/data.csv"
        );
    }
}
