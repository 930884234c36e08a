//! Session state and command dispatch
//!
//! A `Session` owns everything one page view needs: the loaded dataset, the
//! active filter, the visible columns and the column panel. Every user
//! action is a `Command`; dispatching it mutates the session and returns the
//! `Effect` the surface has to apply. Rendering reads the session and is
//! deterministic.

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::columns::{ColumnOption, ColumnSelection};
use crate::config::DashboardConfig;
use crate::constants;
use crate::dataset::{ColumnRole, Dataset, Row};
use crate::error::{DashboardError, ErrorKind};
use crate::export::{self, Download};
use crate::filter::FilterCriteria;
use crate::panel::{Anchor, ColumnPanel};
use crate::render::{self, TableHtml, TableModel};

/// A discrete user intent
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace all filter criteria (search button)
    Search(FilterCriteria),
    /// Change the date range, keeping the category
    SetDateRange { from: Option<NaiveDate>, to: Option<NaiveDate> },
    /// Change the category, keeping the date range
    SetCategory(Option<String>),
    ToggleColumn { index: usize, checked: bool },
    SelectAllColumns,
    SelectNoColumns,
    Export,
    ToggleColumnPanel(Anchor),
    RepositionColumnPanel(Anchor),
    /// Outside click or Escape
    CloseColumnPanel,
}

/// What the surface must do after a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// State changed, re-render
    Render,
    /// Blocking message; state unchanged
    Alert(String),
    /// Offer a file for download
    Download(Download),
    Unchanged,
}

impl Effect {
    /// How a failed command reaches the user. Load failures never get here;
    /// `Session::fail` shows them in place of the table.
    pub fn from_error(err: &DashboardError) -> Self {
        match err.kind() {
            ErrorKind::Validation | ErrorKind::EmptyResult => warn!("Command rejected: {}", err),
            ErrorKind::ResourceUnavailable => error!("Command failed: {}", err),
        }
        Effect::Alert(err.user_message().to_string())
    }
}

/// Externally visible lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready,
}

#[derive(Debug)]
struct Board {
    dataset: Dataset,
    criteria: FilterCriteria,
    /// Indices into `dataset`, in dataset order
    filtered: Vec<usize>,
    columns: ColumnSelection,
}

impl Board {
    fn filtered_rows(&self) -> Vec<&Row> {
        self.filtered.iter().filter_map(|idx| self.dataset.row(*idx)).collect()
    }

    /// Refilter; on error the board is left as it was
    fn apply(&mut self, criteria: FilterCriteria) -> Result<(), DashboardError> {
        self.filtered = criteria.apply(&self.dataset)?;
        self.criteria = criteria;
        Ok(())
    }
}

#[derive(Debug)]
enum Phase {
    Loading,
    Failed(String),
    Ready(Board),
}

#[derive(Debug)]
pub struct Session {
    config: DashboardConfig,
    phase: Phase,
    panel: ColumnPanel,
}

impl Session {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            phase: Phase::Loading,
            panel: ColumnPanel::default(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// A failed load still reports `Loading`: there is no data to act on
    pub fn status(&self) -> Status {
        match self.phase {
            Phase::Ready(_) => Status::Ready,
            Phase::Loading | Phase::Failed(_) => Status::Loading,
        }
    }

    /// Parse the fetched text and enter `Ready` with the default view.
    /// The dataset is loaded once; later loads are ignored.
    pub fn load(&mut self, source: &str, text: &str) -> Result<(), DashboardError> {
        if matches!(self.phase, Phase::Ready(_)) {
            warn!("Ignoring reload from {}: dataset already loaded", source);
            return Ok(());
        }

        let dataset = match Self::parse(text, &self.config) {
            Ok(dataset) => dataset,
            Err(e) => {
                self.fail(&e);
                return Err(e);
            }
        };

        let columns = ColumnSelection::with_defaults(dataset.schema(), &self.config);
        let criteria = FilterCriteria::default();
        let filtered = criteria.apply(&dataset)?;

        info!(
            "Loaded {} rows from {} ({} visible columns, {} rows with a valid date)",
            dataset.len(),
            source,
            columns.visible_count(),
            filtered.len()
        );

        self.phase = Phase::Ready(Board {
            dataset,
            criteria,
            filtered,
            columns,
        });
        Ok(())
    }

    /// Without a date column no row can ever pass the filter
    fn parse(text: &str, config: &DashboardConfig) -> Result<Dataset, DashboardError> {
        let dataset = Dataset::parse(text, &config.roles)?;
        if dataset.schema().by_role(ColumnRole::Date).is_none() {
            return Err(DashboardError::NoDateColumn);
        }
        Ok(dataset)
    }

    /// Show a load failure in place of the table. Only resource failures
    /// replace the table; anything else is logged and ignored.
    pub fn fail(&mut self, err: &DashboardError) {
        if matches!(self.phase, Phase::Ready(_)) {
            return;
        }
        match err.kind() {
            ErrorKind::ResourceUnavailable => {
                warn!("Failed to load dashboard data: {}", err);
                self.phase = Phase::Failed(err.user_message().to_string());
            }
            ErrorKind::Validation | ErrorKind::EmptyResult => {
                warn!("Ignoring non-load error while loading: {}", err);
            }
        }
    }

    /// Apply the outcome of a fetch: `(path, text)` or the fetch error
    pub fn finish_load(&mut self, result: Result<(String, String), DashboardError>) {
        match result {
            Ok((source, text)) => {
                // parse failures are already recorded by load()
                let _ = self.load(&source, &text);
            }
            Err(e) => self.fail(&e),
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Effect {
        match command {
            Command::ToggleColumnPanel(anchor) => {
                self.panel.toggle(&anchor);
                return Effect::Render;
            }
            Command::RepositionColumnPanel(anchor) => {
                return if self.panel.reposition(&anchor) { Effect::Render } else { Effect::Unchanged };
            }
            Command::CloseColumnPanel => {
                return if self.panel.close() { Effect::Render } else { Effect::Unchanged };
            }
            Command::Export => return self.export_effect(),
            _ => {}
        }

        let Phase::Ready(board) = &mut self.phase else {
            return Effect::Unchanged;
        };

        let refiltered = match command {
            Command::Search(criteria) => board.apply(criteria),
            Command::SetDateRange { from, to } => {
                let criteria = FilterCriteria { from, to, ..board.criteria.clone() };
                board.apply(criteria)
            }
            Command::SetCategory(category) => {
                let criteria = FilterCriteria { category, ..board.criteria.clone() };
                board.apply(criteria)
            }
            // column changes re-render the already filtered rows
            Command::ToggleColumn { index, checked } => {
                board.columns.set(index, checked);
                Ok(())
            }
            Command::SelectAllColumns => {
                board.columns.select_all();
                Ok(())
            }
            Command::SelectNoColumns => {
                board.columns.select_none();
                Ok(())
            }
            Command::Export
            | Command::ToggleColumnPanel(_)
            | Command::RepositionColumnPanel(_)
            | Command::CloseColumnPanel => return Effect::Unchanged,
        };

        match refiltered {
            Ok(()) => Effect::Render,
            Err(e) => Effect::from_error(&e),
        }
    }

    fn export_effect(&self) -> Effect {
        match self.export() {
            Ok(download) => Effect::Download(download),
            Err(e) => Effect::from_error(&e),
        }
    }

    /// Download for the currently filtered rows
    pub fn export(&self) -> Result<Download, DashboardError> {
        let rows = self.filtered_rows();
        match &self.phase {
            Phase::Ready(board) => export::export(board.dataset.schema(), &rows, &self.config.export_file_name),
            Phase::Loading | Phase::Failed(_) => Err(DashboardError::NothingToExport),
        }
    }

    /// What the table currently shows
    pub fn table_model(&self) -> TableModel {
        match &self.phase {
            Phase::Loading => TableModel::message(constants::MSG_LOADING, constants::DEFAULT_PLACEHOLDER_SPAN),
            Phase::Failed(message) => TableModel::message(message, constants::DEFAULT_PLACEHOLDER_SPAN),
            Phase::Ready(board) => {
                let visible = board.columns.visible(board.dataset.schema());
                TableModel::build(&visible, board.filtered_rows())
            }
        }
    }

    /// Current table markup
    pub fn table(&self) -> TableHtml {
        self.table_model().to_html()
    }

    /// Checkboxes for the column selector; empty until loaded
    pub fn column_options(&self) -> Vec<ColumnOption> {
        match &self.phase {
            Phase::Ready(board) => board.columns.options(board.dataset.schema()),
            Phase::Loading | Phase::Failed(_) => Vec::new(),
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.phase {
            Phase::Ready(board) => Some(&board.dataset),
            Phase::Loading | Phase::Failed(_) => None,
        }
    }

    pub fn filtered_rows(&self) -> Vec<&Row> {
        match &self.phase {
            Phase::Ready(board) => board.filtered_rows(),
            Phase::Loading | Phase::Failed(_) => Vec::new(),
        }
    }

    pub fn panel(&self) -> &ColumnPanel {
        &self.panel
    }

    /// One-line description of the current view
    pub fn summary(&self) -> String {
        let Phase::Ready(board) = &self.phase else {
            return String::new();
        };

        let mut summary = format!("Showing {} of {} rows", board.filtered.len(), board.dataset.len());
        let criteria = &board.criteria;
        match (criteria.from, criteria.to) {
            (Some(from), Some(to)) => summary.push_str(&format!(" from {} to {}", from, to)),
            (Some(from), None) => summary.push_str(&format!(" from {}", from)),
            (None, Some(to)) => summary.push_str(&format!(" up to {}", to)),
            (None, None) => {}
        }
        if let Some(category) = &criteria.category {
            summary.push_str(&format!(" in {}", render::category_label(category)));
        }
        summary
    }
}
