//! Tabular data loaded from the dashboard CSV
//!
//! Column names are discovered from the header row. Each header is resolved
//! once into a `Column` descriptor carrying its rendering role, and every
//! cell lookup goes through that descriptor.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::config::RoleAliases;
use crate::constants;
use crate::error::DashboardError;

/// Semantic role of a column, decides filtering and cell rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Date,
    Category,
    Status,
    Plain,
}

/// A discovered header column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Position in the header row
    pub index: usize,
    pub name: String,
    pub role: ColumnRole,
}

/// Ordered column descriptors for one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Resolve header names into descriptors. A role is owned by the first
    /// column that claims it; later matches render as plain text.
    pub fn resolve<I, S>(headers: I, roles: &RoleAliases) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<Column> = Vec::new();

        for (index, name) in headers.into_iter().enumerate() {
            let name = name.into();
            let mut role = roles.role_of(&name);
            if role != ColumnRole::Plain && columns.iter().any(|c| c.role == role) {
                role = ColumnRole::Plain;
            }
            columns.push(Column { index, name, role });
        }

        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column holding the given role, if the header has one
    pub fn by_role(&self, role: ColumnRole) -> Option<&Column> {
        self.columns.iter().find(|c| c.role == role)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// One record, cells aligned with the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell value for a column; missing cells read as empty
    pub fn get(&self, column: &Column) -> &str {
        self.cells.get(column.index).map(String::as_str).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Calendar date of this row, `None` when absent, empty or unparseable
    pub fn date(&self, schema: &Schema) -> Option<NaiveDate> {
        let column = schema.by_role(ColumnRole::Date)?;
        parse_date(self.get(column))
    }
}

/// The full dataset for one page session. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    schema: Schema,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(schema: Schema, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    /// Parse CSV text with the first record as header.
    ///
    /// A leading byte-order mark is dropped and blank lines are skipped.
    /// Short records are padded with empty cells, fields beyond the header
    /// are dropped.
    pub fn parse(text: &str, roles: &RoleAliases) -> Result<Self, DashboardError> {
        let text = text.strip_prefix(constants::UTF8_BOM).unwrap_or(text);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(DashboardError::MissingHeader);
        }

        let schema = Schema::resolve(headers.iter(), roles);
        let width = schema.len();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut cells: Vec<String> = record.iter().take(width).map(str::to_string).collect();
            cells.resize(width, String::new());
            rows.push(Row::new(cells));
        }

        if rows.is_empty() {
            return Err(DashboardError::EmptyDataset);
        }

        debug!(
            "Parsed {} rows with {} columns (date column: {:?})",
            rows.len(),
            width,
            schema.by_role(ColumnRole::Date).map(|c| c.name.as_str())
        );

        Ok(Self { schema, rows })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%m/%d/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Parse a cell or input value into a calendar date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "date,category,item name,measured value,unit,status,remarks\n\
                          2024-05-01,measurement,Reactor A temperature,89.5,°C,warning,check sensor\n\
                          2024-05-02,transport,Pump B-2,12,m3/h,normal,\n";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_discovers_header_and_roles() {
        let dataset = Dataset::parse(SAMPLE, &RoleAliases::default()).unwrap();
        let schema = dataset.schema();

        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            vec!["date", "category", "item name", "measured value", "unit", "status", "remarks"]
        );
        assert_eq!(schema.by_role(ColumnRole::Date).unwrap().index, 0);
        assert_eq!(schema.by_role(ColumnRole::Category).unwrap().index, 1);
        assert_eq!(schema.by_role(ColumnRole::Status).unwrap().index, 5);
        assert_eq!(schema.column(2).unwrap().role, ColumnRole::Plain);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_parse_strips_bom_and_skips_blank_lines() {
        let text = format!("{}date,status\n\n2024-05-01,normal\n\n", constants::UTF8_BOM);
        let dataset = Dataset::parse(&text, &RoleAliases::default()).unwrap();

        assert_eq!(dataset.schema().column(0).unwrap().name, "date");
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_short_and_long_records_align_to_header() {
        let text = "date,status,remarks\n2024-05-01\n2024-05-02,error,late,extra\n";
        let dataset = Dataset::parse(text, &RoleAliases::default()).unwrap();
        let remarks = dataset.schema().column(2).unwrap();

        assert_eq!(dataset.rows()[0].cells().len(), 3);
        assert_eq!(dataset.rows()[0].get(remarks), "");
        assert_eq!(dataset.rows()[1].cells(), &["2024-05-02", "error", "late"]);
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let err = Dataset::parse("date,status\n", &RoleAliases::default()).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyDataset));
    }

    #[test]
    fn test_empty_text_has_no_header() {
        let err = Dataset::parse("", &RoleAliases::default()).unwrap_err();
        assert!(matches!(err, DashboardError::MissingHeader));
    }

    #[test]
    fn test_japanese_headers_resolve() {
        let text = "日付,カテゴリ,項目名,状態\n2024-05-01,plant,炉A,注意\n";
        let dataset = Dataset::parse(text, &RoleAliases::default()).unwrap();

        assert_eq!(dataset.schema().by_role(ColumnRole::Status).unwrap().name, "状態");
        assert_eq!(dataset.rows()[0].date(dataset.schema()), Some(ymd(2024, 5, 1)));
    }

    #[test]
    fn test_duplicate_role_keeps_first_column() {
        let schema = Schema::resolve(["date", "Date", "status"], &RoleAliases::default());
        assert_eq!(schema.by_role(ColumnRole::Date).unwrap().index, 0);
        assert_eq!(schema.column(1).unwrap().role, ColumnRole::Plain);
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-05-01"), Some(ymd(2024, 5, 1)));
        assert_eq!(parse_date(" 2024/05/01 "), Some(ymd(2024, 5, 1)));
        assert_eq!(parse_date("2024.5.1"), Some(ymd(2024, 5, 1)));
        assert_eq!(parse_date("05/01/2024"), Some(ymd(2024, 5, 1)));
        assert_eq!(parse_date("2024-05-01 15:00"), Some(ymd(2024, 5, 1)));
        assert_eq!(parse_date("2024-05-01T15:00:00"), Some(ymd(2024, 5, 1)));
        assert_eq!(parse_date("2024-05-01T15:00:00+09:00"), Some(ymd(2024, 5, 1)));
    }

    #[test]
    fn test_parse_date_rejects_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn test_row_without_date_column() {
        let schema = Schema::resolve(["item name", "status"], &RoleAliases::default());
        let row = Row::new(vec!["Pump".to_string(), "normal".to_string()]);
        assert_eq!(row.date(&schema), None);
    }
}
