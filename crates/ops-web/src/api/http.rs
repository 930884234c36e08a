//! HTTP client for the browser, built on gloo-net

use tracing::{debug, warn};

/// GET a text resource. Network errors and non-2xx statuses yield `None`.
pub async fn get_text(url: &str) -> Option<String> {
    let response = match gloo_net::http::Request::get(url)
        .header("Accept", "text/csv, text/plain")
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warn!("Request for {} failed: {}", url, e);
            return None;
        }
    };

    if !response.ok() {
        debug!("HTTP error {} for {}", response.status(), url);
        return None;
    }

    response.text().await.ok()
}
