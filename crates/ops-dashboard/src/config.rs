//! Configuration for the operations dashboard

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::constants;
use crate::dataset::ColumnRole;

// =============================================================================
// File-based Configuration (dashboard.toml)
// =============================================================================

/// Configuration loaded from dashboard.toml. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub data: DataConfig,
    pub columns: ColumnsConfig,
    pub export: ExportConfig,
}

/// Where the CSV is looked up
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// File name tried relative to the page and to the base directory
    pub file_name: Option<String>,
    /// Extra paths tried after the base-relative ones
    pub fallback_paths: Option<Vec<String>>,
}

/// Column defaults and role aliases
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    /// Columns visible after load (intersected with the actual header)
    pub preferred: Option<Vec<String>>,
    /// Header names treated as the date column
    pub date: Option<Vec<String>>,
    /// Header names treated as the category column
    pub category: Option<Vec<String>>,
    /// Header names treated as the status column
    pub status: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: Option<String>,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| {
            "Invalid dashboard configuration. Check for:\n\
             - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
             - Lists given as plain strings (use [\"a\", \"b\"])\n\
             - Unknown value types (all values are strings or lists of strings)"
        })
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Header names that give a column its rendering role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAliases {
    pub date: Vec<String>,
    pub category: Vec<String>,
    pub status: Vec<String>,
}

impl Default for RoleAliases {
    fn default() -> Self {
        Self {
            date: to_owned_list(constants::DATE_COLUMN_ALIASES),
            category: to_owned_list(constants::CATEGORY_COLUMN_ALIASES),
            status: to_owned_list(constants::STATUS_COLUMN_ALIASES),
        }
    }
}

impl RoleAliases {
    /// Role of a header, `Plain` when it matches no alias list
    pub fn role_of(&self, header: &str) -> ColumnRole {
        let matches = |aliases: &[String]| aliases.iter().any(|alias| header_matches(header, alias));

        if matches(&self.date) {
            ColumnRole::Date
        } else if matches(&self.category) {
            ColumnRole::Category
        } else if matches(&self.status) {
            ColumnRole::Status
        } else {
            ColumnRole::Plain
        }
    }
}

/// Dashboard settings with defaults filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_file_name: String,
    pub fallback_paths: Vec<String>,
    pub preferred_columns: Vec<String>,
    pub roles: RoleAliases,
    pub export_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file_name: constants::DATA_FILE_NAME.to_string(),
            fallback_paths: to_owned_list(constants::FALLBACK_DATA_PATHS),
            preferred_columns: to_owned_list(constants::PREFERRED_COLUMNS),
            roles: RoleAliases::default(),
            export_file_name: constants::EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Overlay file values on the defaults
    pub fn from_file(file_config: &FileConfig) -> Self {
        let defaults = Self::default();
        let columns = &file_config.columns;

        Self {
            data_file_name: file_config.data.file_name.clone().unwrap_or(defaults.data_file_name),
            fallback_paths: file_config.data.fallback_paths.clone().unwrap_or(defaults.fallback_paths),
            preferred_columns: columns.preferred.clone().unwrap_or(defaults.preferred_columns),
            roles: RoleAliases {
                date: columns.date.clone().unwrap_or(defaults.roles.date),
                category: columns.category.clone().unwrap_or(defaults.roles.category),
                status: columns.status.clone().unwrap_or(defaults.roles.status),
            },
            export_file_name: file_config.export.file_name.clone().unwrap_or(defaults.export_file_name),
        }
    }

    /// Whether a header is in the default visible set
    pub fn is_preferred(&self, header: &str) -> bool {
        self.preferred_columns.iter().any(|name| header_matches(header, name))
    }
}

/// Header comparison: surrounding whitespace and ASCII case are ignored
pub fn header_matches(header: &str, name: &str) -> bool {
    header.trim().eq_ignore_ascii_case(name.trim())
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = FileConfig::parse("").unwrap();
        assert_eq!(DashboardConfig::from_file(&file), DashboardConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let file = FileConfig::parse(
            r#"
            [data]
            file_name = "results.csv"

            [columns]
            preferred = ["date", "status"]
            "#,
        )
        .unwrap();
        let config = DashboardConfig::from_file(&file);

        assert_eq!(config.data_file_name, "results.csv");
        assert_eq!(config.preferred_columns, vec!["date", "status"]);
        // untouched sections keep their defaults
        assert_eq!(config.fallback_paths, vec!["integration/achievements/data.csv"]);
        assert_eq!(config.export_file_name, "exported_data.csv");
        assert_eq!(config.roles, RoleAliases::default());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(FileConfig::parse("[columns]\npreferred = \"date\"").is_err());
    }

    #[test]
    fn test_role_resolution() {
        let roles = RoleAliases::default();
        assert_eq!(roles.role_of("date"), ColumnRole::Date);
        assert_eq!(roles.role_of(" Date "), ColumnRole::Date);
        assert_eq!(roles.role_of("日付"), ColumnRole::Date);
        assert_eq!(roles.role_of("カテゴリ"), ColumnRole::Category);
        assert_eq!(roles.role_of("status"), ColumnRole::Status);
        assert_eq!(roles.role_of("remarks"), ColumnRole::Plain);
    }

    #[test]
    fn test_is_preferred() {
        let config = DashboardConfig::default();
        assert!(config.is_preferred("item name"));
        assert!(config.is_preferred("Measured Value"));
        assert!(!config.is_preferred("operator"));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("ops-dashboard-missing-config.toml");
        let err = FileConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
