//! Thin wrappers over the browser APIs the dashboard needs

use gloo_timers::callback::Timeout;
use leptos::prelude::{document, window};
use ops_dashboard::{Anchor, Download};
use tracing::error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlElement, Node, Url};

/// How long a download's object URL outlives the click that started it
const REVOKE_DELAY_MS: u32 = 10_000;

/// Blocking message box
pub fn alert(message: &str) {
    if let Err(e) = window().alert_with_message(message) {
        error!("alert failed: {:?}", e);
    }
}

/// Offer `download` as a file through a temporary object URL
pub fn save(download: &Download) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(&download.contents));
    let options = BlobPropertyBag::new();
    options.set_type(download.mime_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let link: HtmlAnchorElement = document().create_element("a")?.dyn_into().map_err(JsValue::from)?;
    link.set_href(&url);
    link.set_download(&download.file_name);

    let body = document().body().ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;

    // the download may not have started yet when click() returns
    Timeout::new(REVOKE_DELAY_MS, move || {
        if let Err(e) = Url::revoke_object_url(&url) {
            error!("Failed to revoke {}: {:?}", url, e);
        }
    })
    .forget();
    Ok(())
}

/// Geometry for placing the column panel beneath `trigger`
pub fn measure_anchor(trigger: &HtmlElement, panel: Option<&HtmlElement>) -> Anchor {
    let rect = trigger.get_bounding_client_rect();
    let viewport_width = window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or_else(|| rect.right());

    Anchor {
        left: rect.left(),
        bottom: rect.bottom(),
        panel_width: panel.map(|p| f64::from(p.offset_width())).unwrap_or_default(),
        viewport_width,
    }
}

/// Directory of the current page, e.g. `/reports/achievements/`
pub fn page_base() -> Option<String> {
    let path = window().location().pathname().ok()?;
    let end = path.rfind('/')?;
    Some(path[..=end].to_string())
}

/// The element matching `selector`, if the page has one
pub fn find_element(selector: &str) -> Option<HtmlElement> {
    document().query_selector(selector).ok().flatten()?.dyn_into().ok()
}

/// The node an event was dispatched to, if it is still in the document.
/// Targets detached by a re-render during dispatch yield `None`.
pub fn attached_target(ev: &web_sys::Event) -> Option<Node> {
    ev.target()?.dyn_into::<Node>().ok().filter(Node::is_connected)
}
