use tracing::{debug, error};

use super::http::get_text;

/// Fetch the first candidate path that answers; returns `(path, text)`
pub async fn fetch_first(candidates: &[String]) -> Option<(String, String)> {
    for path in candidates {
        if let Some(text) = get_text(path).await {
            debug!("Loaded dashboard data from {}", path);
            return Some((path.clone(), text));
        }
    }

    error!("No data file found, tried: {}", candidates.join(", "));
    None
}
