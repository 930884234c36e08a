use leptos::prelude::*;
use ops_dashboard::{DashboardConfig, DashboardError, Session, loader};

use crate::api::fetch_first;
use crate::browser;
use crate::components::{ColumnDropdown, DataTable, FilterBar, LoadingTable, Section};
use crate::config::CONFIG;

#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new(Session::new(DashboardConfig::default()));
    let base = browser::page_base();
    let candidates = session.with_untracked(|s| loader::candidate_paths(s.config(), base.as_deref()));

    let data = LocalResource::new({
        let candidates = candidates.clone();
        move || {
            let candidates = candidates.clone();
            async move { fetch_first(&candidates).await }
        }
    });

    // hand the fetched file to the session once; later loads are ignored there
    Effect::new(move |_| {
        let Some(result) = data.get() else {
            return;
        };
        let fetched = (*result).clone().ok_or_else(|| DashboardError::ResourceUnavailable {
            tried: candidates.clone(),
        });
        session.update(|s| s.finish_load(fetched));
    });

    view! {
        <main class="dashboard">
            <header class="dashboard-header">
                <h1>{CONFIG.title}</h1>
            </header>

            <Section id="filters" title="Filters">
                <FilterBar session=session />
                <ColumnDropdown session=session />
            </Section>

            <Section id="results" title="Results">
                <Suspense fallback=move || view! { <LoadingTable /> }>
                    {move || data.get().map(|_| view! { <DataTable session=session /> })}
                </Suspense>
            </Section>
        </main>
    }
}
