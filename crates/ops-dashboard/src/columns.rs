//! Visible column selection
//!
//! One checkbox per discovered column. The visible list is always read back
//! in header order, whatever order the boxes were clicked in.

use crate::config::DashboardConfig;
use crate::dataset::{Column, Schema};

/// Checked state per schema column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    checked: Vec<bool>,
}

/// A checkbox in the column selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOption {
    pub index: usize,
    /// DOM id, `col-opt-<index>`
    pub id: String,
    pub name: String,
    pub checked: bool,
}

impl ColumnSelection {
    /// Preferred columns that exist in the header start checked
    pub fn with_defaults(schema: &Schema, config: &DashboardConfig) -> Self {
        Self {
            checked: schema.columns().iter().map(|c| config.is_preferred(&c.name)).collect(),
        }
    }

    /// Set one checkbox. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, checked: bool) {
        if let Some(slot) = self.checked.get_mut(index) {
            *slot = checked;
        }
    }

    pub fn select_all(&mut self) {
        self.checked.iter_mut().for_each(|c| *c = true);
    }

    pub fn select_none(&mut self) {
        self.checked.iter_mut().for_each(|c| *c = false);
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// Visible columns in header order
    pub fn visible<'a>(&self, schema: &'a Schema) -> Vec<&'a Column> {
        schema.columns().iter().filter(|c| self.is_checked(c.index)).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.checked.iter().filter(|c| **c).count()
    }

    pub fn options(&self, schema: &Schema) -> Vec<ColumnOption> {
        schema
            .columns()
            .iter()
            .map(|c| ColumnOption {
                index: c.index,
                id: format!("col-opt-{}", c.index),
                name: c.name.clone(),
                checked: self.is_checked(c.index),
            })
            .collect()
    }
}
