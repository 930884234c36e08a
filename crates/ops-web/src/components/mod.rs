mod column_dropdown;
mod data_table;
mod filter_bar;
mod section;

pub use column_dropdown::ColumnDropdown;
pub use data_table::{DataTable, LoadingTable};
pub use filter_bar::FilterBar;
pub use section::Section;
