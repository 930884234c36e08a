mod data;
mod http;

pub use data::fetch_first;
