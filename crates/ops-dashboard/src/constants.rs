//! Centralized constants for the operations dashboard
//!
//! Fixed lookup tables and user-facing text. Site-specific overrides
//! (file names, column aliases) are loaded from dashboard.toml.

// =============================================================================
// Data Source
// =============================================================================

/// Data file looked up first, relative to the page (or data directory)
pub const DATA_FILE_NAME: &str = "data.csv";

/// Fallback locations tried after the page-relative and base-relative paths
pub const FALLBACK_DATA_PATHS: &[&str] = &["integration/achievements/data.csv"];

// =============================================================================
// Columns
// =============================================================================

/// Columns shown by default, in this order of preference
pub const PREFERRED_COLUMNS: &[&str] = &[
    "date",
    "category",
    "item name",
    "measured value",
    "unit",
    "status",
    "remarks",
];

/// Header names recognized as the date column
pub const DATE_COLUMN_ALIASES: &[&str] = &["date", "日付"];

/// Header names recognized as the category column
pub const CATEGORY_COLUMN_ALIASES: &[&str] = &["category", "カテゴリ"];

/// Header names recognized as the status column
pub const STATUS_COLUMN_ALIASES: &[&str] = &["status", "状態"];

/// Category id → display label
pub const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("disposal", "Processing / Disposal"),
    ("equipment", "Equipment / Control"),
    ("extraction", "Extraction / Removal"),
    ("maintenance", "Maintenance"),
    ("measurement", "Measurement"),
    ("plant", "Plant / Facilities"),
    ("storage", "Storage"),
    ("supply", "Supply / Feed"),
    ("transport", "Transport / Conveying"),
];

/// Status labels rendered with the warning badge
pub const WARNING_STATUS_LABELS: &[&str] = &["warning", "注意"];

/// Status labels rendered with the error badge
pub const ERROR_STATUS_LABELS: &[&str] = &["error", "異常"];

/// Status labels rendered with the normal badge (also the fallback)
pub const NORMAL_STATUS_LABELS: &[&str] = &["normal", "正常"];

// =============================================================================
// Export
// =============================================================================

/// Download name for exported CSV
pub const EXPORT_FILE_NAME: &str = "exported_data.csv";

/// MIME type attached to the exported blob
pub const EXPORT_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// UTF-8 byte-order mark prefixed to exported files
pub const UTF8_BOM: char = '\u{FEFF}';

// =============================================================================
// Column Panel Placement
// =============================================================================

/// Minimum gap kept between the column panel and the viewport edges (px)
pub const PANEL_VIEWPORT_MARGIN: f64 = 8.0;

// =============================================================================
// Messages
// =============================================================================

pub const MSG_LOADING: &str = "Loading data...";
pub const MSG_LOAD_FAILED: &str = "Failed to load data.";
pub const MSG_NO_DATE_COLUMN: &str = "The data file has no date column.";
pub const MSG_NO_MATCHING_ROWS: &str = "No matching data.";
pub const MSG_NO_COLUMNS: &str = "No columns selected.";
pub const MSG_INVALID_DATE_RANGE: &str = "Error: the end date must be on or after the start date.";
pub const MSG_INVALID_DATE: &str = "Error: please enter a valid date.";
pub const MSG_NOTHING_TO_EXPORT: &str = "There is no data to export.";

/// Column span for placeholders shown before any header is known
pub const DEFAULT_PLACEHOLDER_SPAN: usize = PREFERRED_COLUMNS.len();
