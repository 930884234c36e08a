//! Operations dashboard core
//!
//! Loads a CSV of plant measurements and work records, filters it by date
//! range and category, renders the visible columns as HTML and exports the
//! filtered view back to CSV. Everything here is free of DOM access so the
//! browser app and the CLI share one implementation.

pub mod columns;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod panel;
pub mod render;
pub mod session;

pub use config::{DashboardConfig, FileConfig};
pub use dataset::{Column, ColumnRole, Dataset, Row, Schema};
pub use error::{DashboardError, ErrorKind};
pub use export::Download;
pub use filter::FilterCriteria;
pub use panel::Anchor;
pub use render::{Cell, StatusClass, TableBody, TableHtml, TableModel};
pub use session::{Command, Effect, Session, Status};
