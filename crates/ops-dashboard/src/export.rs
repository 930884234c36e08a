//! CSV export of the filtered view

use csv::{Terminator, WriterBuilder};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants;
use crate::dataset::{Row, Schema};
use crate::error::DashboardError;

/// A file offered to the user for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime_type: &'static str,
    /// Full file text, byte-order mark included
    pub contents: String,
}

/// Serialize rows with the full header, CRLF records, minimal quoting
pub fn to_csv<'a, I>(schema: &Schema, rows: I) -> Result<String, DashboardError>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut wtr = WriterBuilder::new().terminator(Terminator::CRLF).from_writer(Vec::new());

    wtr.write_record(schema.names())?;
    for row in rows {
        wtr.write_record(row.cells())?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Build the download for the filtered rows. Nothing to export is an error.
pub fn export(schema: &Schema, rows: &[&Row], file_name: &str) -> Result<Download, DashboardError> {
    if rows.is_empty() {
        return Err(DashboardError::NothingToExport);
    }

    let csv = to_csv(schema, rows.iter().copied())?;
    info!("Exporting {} rows as {}", rows.len(), file_name);

    Ok(Download {
        file_name: file_name.to_string(),
        mime_type: constants::EXPORT_MIME_TYPE,
        contents: format!("{}{}", constants::UTF8_BOM, csv),
    })
}

/// Write a download to disk under its own name in `dir`
pub fn write_to_dir(download: &Download, dir: &Path) -> Result<PathBuf, DashboardError> {
    let path = dir.join(&download.file_name);
    std::fs::write(&path, download.contents.as_bytes())?;
    Ok(path)
}

/// Header-only CSV for a fresh data file
pub fn template(columns: &[String]) -> Result<String, DashboardError> {
    let mut wtr = WriterBuilder::new().terminator(Terminator::CRLF).from_writer(Vec::new());
    wtr.write_record(columns)?;
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(format!("{}{}", constants::UTF8_BOM, String::from_utf8(bytes)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleAliases;
    use crate::dataset::Dataset;
    use crate::filter::FilterCriteria;

    const SAMPLE: &str = "date,category,item name,status,remarks\n\
                          2024-05-01,measurement,Reactor A,warning,\"needs, recalibration\"\n\
                          2024-05-02,transport,Pump B-2,normal,\n\
                          2024-05-03,plant,\"Boiler \"\"East\"\"\",error,line 1\n";

    #[test]
    fn test_export_roundtrip_of_filtered_view() {
        let dataset = Dataset::parse(SAMPLE, &RoleAliases::default()).unwrap();
        let criteria = FilterCriteria::parse("2024-05-01", "2024-05-02", "").unwrap();
        let rows: Vec<&Row> = criteria
            .apply(&dataset)
            .unwrap()
            .into_iter()
            .map(|idx| &dataset.rows()[idx])
            .collect();

        let download = export(dataset.schema(), &rows, "exported_data.csv").unwrap();
        assert!(download.contents.starts_with(constants::UTF8_BOM));

        let reparsed = Dataset::parse(&download.contents, &RoleAliases::default()).unwrap();
        assert_eq!(reparsed.schema(), dataset.schema());
        assert_eq!(reparsed.len(), rows.len());
        for (got, want) in reparsed.rows().iter().zip(&rows) {
            assert_eq!(got, *want);
        }
    }

    #[test]
    fn test_export_quotes_only_when_needed() {
        let dataset = Dataset::parse(SAMPLE, &RoleAliases::default()).unwrap();
        let csv = to_csv(dataset.schema(), dataset.rows()).unwrap();

        assert!(csv.starts_with("date,category,item name,status,remarks\r\n"));
        assert!(csv.contains("2024-05-01,measurement,Reactor A,warning,\"needs, recalibration\"\r\n"));
        assert!(csv.contains("\"Boiler \"\"East\"\"\""));
        assert!(csv.contains("2024-05-02,transport,Pump B-2,normal,\r\n"));
    }

    #[test]
    fn test_export_nothing() {
        let dataset = Dataset::parse(SAMPLE, &RoleAliases::default()).unwrap();
        let err = export(dataset.schema(), &[], "exported_data.csv").unwrap_err();
        assert!(matches!(err, DashboardError::NothingToExport));
    }

    #[test]
    fn test_download_metadata() {
        let dataset = Dataset::parse(SAMPLE, &RoleAliases::default()).unwrap();
        let rows: Vec<&Row> = dataset.rows().iter().collect();
        let download = export(dataset.schema(), &rows, "results.csv").unwrap();

        assert_eq!(download.file_name, "results.csv");
        assert_eq!(download.mime_type, "text/csv;charset=utf-8;");
    }

    #[test]
    fn test_template_is_header_only() {
        let columns = vec!["date".to_string(), "status".to_string()];
        let text = template(&columns).unwrap();
        assert_eq!(text, "\u{FEFF}date,status\r\n");
    }

    #[test]
    fn test_write_to_dir() {
        let dir = std::env::temp_dir().join("ops-dashboard-export-test");
        std::fs::create_dir_all(&dir).unwrap();
        let download = Download {
            file_name: "out.csv".to_string(),
            mime_type: constants::EXPORT_MIME_TYPE,
            contents: "\u{FEFF}date\r\n2024-05-01\r\n".to_string(),
        };

        let path = write_to_dir(&download, &dir).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), download.contents);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
