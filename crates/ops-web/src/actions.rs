use leptos::prelude::*;
use ops_dashboard::{Command, Effect, Session};
use tracing::error;

use crate::browser;

/// Apply a command to the session, then carry out its effect on the page.
/// Re-rendering follows from the signal update.
pub fn dispatch(session: RwSignal<Session>, command: Command) {
    if let Some(effect) = session.try_update(|s| s.dispatch(command)) {
        apply(effect);
    }
}

/// Carry out the page side of an effect
pub fn apply(effect: Effect) {
    match effect {
        Effect::Alert(message) => browser::alert(&message),
        Effect::Download(download) => {
            if let Err(e) = browser::save(&download) {
                error!("Failed to offer {} for download: {:?}", download.file_name, e);
            }
        }
        Effect::Render | Effect::Unchanged => {}
    }
}
