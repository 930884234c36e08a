//! Locating the data file
//!
//! A short ordered list of candidate paths is tried and the first that
//! yields content wins.

use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::error::DashboardError;

/// Candidate paths in lookup order, without duplicates.
///
/// The bare file name comes first, then the file under `base` (as given and
/// root-anchored), then the configured fallbacks.
pub fn candidate_paths(config: &DashboardConfig, base: Option<&str>) -> Vec<String> {
    let file = &config.data_file_name;
    let mut paths = vec![file.clone()];

    if let Some(base) = base.map(|b| b.trim_end_matches('/')).filter(|b| !b.is_empty()) {
        paths.push(format!("{}/{}", base, file));
        paths.push(format!("/{}/{}", base.trim_start_matches('/'), file));
    }

    paths.extend(config.fallback_paths.iter().cloned());

    let mut unique: Vec<String> = Vec::with_capacity(paths.len());
    for path in paths {
        if !unique.contains(&path) {
            unique.push(path);
        }
    }
    unique
}

/// Try each candidate with `fetch`; return the winning path and its text.
///
/// `fetch` yields `Ok(None)` when the path does not exist, which moves on to
/// the next candidate. Any other error ends the lookup.
pub fn load_first<F>(candidates: &[String], mut fetch: F) -> Result<(String, String), DashboardError>
where
    F: FnMut(&str) -> Result<Option<String>, DashboardError>,
{
    for path in candidates {
        match fetch(path)? {
            Some(text) => {
                debug!("Loaded data from {}", path);
                return Ok((path.clone(), text));
            }
            None => debug!("Candidate {} not found", path),
        }
    }

    warn!("No data file found in {} candidate paths", candidates.len());
    Err(DashboardError::ResourceUnavailable { tried: candidates.to_vec() })
}

/// Filesystem lookup relative to `dir`; root-anchored candidates are also
/// taken relative to `dir`. Files must be UTF-8.
pub fn read_from_dir(dir: &Path, candidates: &[String]) -> Result<(String, String), DashboardError> {
    load_first(candidates, |path| {
        let full = dir.join(path.trim_start_matches('/'));
        match std::fs::read(&full) {
            Ok(bytes) => String::from_utf8(bytes).map(Some).map_err(|_| DashboardError::NotUtf8 {
                path: full.display().to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DashboardError::Unreadable {
                path: full.display().to_string(),
                source: e,
            }),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_candidates() {
        let paths = candidate_paths(&DashboardConfig::default(), None);
        assert_eq!(paths, vec!["data.csv", "integration/achievements/data.csv"]);
    }

    #[test]
    fn test_candidates_with_base() {
        let paths = candidate_paths(&DashboardConfig::default(), Some("/reports/achievements/"));
        assert_eq!(
            paths,
            vec![
                "data.csv",
                "/reports/achievements/data.csv",
                "integration/achievements/data.csv",
            ]
        );

        let relative = candidate_paths(&DashboardConfig::default(), Some("reports"));
        assert_eq!(relative[1], "reports/data.csv");
        assert_eq!(relative[2], "/reports/data.csv");
    }

    #[test]
    fn test_root_base_adds_nothing() {
        let paths = candidate_paths(&DashboardConfig::default(), Some("/"));
        assert_eq!(paths, vec!["data.csv", "integration/achievements/data.csv"]);
    }

    #[test]
    fn test_first_success_wins() {
        let candidates = vec!["a.csv".to_string(), "b.csv".to_string(), "c.csv".to_string()];
        let mut tried = Vec::new();
        let (path, text) = load_first(&candidates, |p| {
            tried.push(p.to_string());
            if p == "a.csv" { Ok(None) } else { Ok(Some(format!("contents of {}", p))) }
        })
        .unwrap();

        assert_eq!(path, "b.csv");
        assert_eq!(text, "contents of b.csv");
        assert_eq!(tried, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn test_all_candidates_fail() {
        let candidates = vec!["a.csv".to_string(), "b.csv".to_string()];
        let err = load_first(&candidates, |_| Ok(None)).unwrap_err();
        match err {
            DashboardError::ResourceUnavailable { tried } => assert_eq!(tried, candidates),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_from_dir() {
        let dir = std::env::temp_dir().join("ops-dashboard-loader-test");
        std::fs::create_dir_all(dir.join("integration/achievements")).unwrap();
        std::fs::write(dir.join("integration/achievements/data.csv"), "date\n2024-05-01\n").unwrap();

        let candidates = candidate_paths(&DashboardConfig::default(), None);
        let (path, text) = read_from_dir(&dir, &candidates).unwrap();

        assert_eq!(path, "integration/achievements/data.csv");
        assert_eq!(text, "date\n2024-05-01\n");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_read_error_stops_lookup() {
        let candidates = vec!["a.csv".to_string(), "b.csv".to_string()];
        let mut tried = Vec::new();
        let err = load_first(&candidates, |p| {
            tried.push(p.to_string());
            Err(DashboardError::NotUtf8 { path: p.to_string() })
        })
        .unwrap_err();

        assert!(matches!(err, DashboardError::NotUtf8 { ref path } if path == "a.csv"));
        assert_eq!(tried, vec!["a.csv"]);
    }

    #[test]
    fn test_read_from_dir_rejects_non_utf8() {
        let dir = std::env::temp_dir().join("ops-dashboard-loader-sjis-test");
        std::fs::create_dir_all(dir.join("integration/achievements")).unwrap();
        // "日付" in Shift-JIS
        std::fs::write(dir.join("data.csv"), [0x93, 0xfa, 0x95, 0x74]).unwrap();
        std::fs::write(dir.join("integration/achievements/data.csv"), "date\n2024-05-01\n").unwrap();

        let candidates = candidate_paths(&DashboardConfig::default(), None);
        let err = read_from_dir(&dir, &candidates).unwrap_err();

        match err {
            DashboardError::NotUtf8 { path } => assert!(path.ends_with("data.csv") && !path.contains("integration")),
            other => panic!("unexpected error: {other}"),
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
