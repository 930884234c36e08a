use leptos::ev::MouseEvent;
use leptos::prelude::*;
use ops_dashboard::constants::CATEGORY_LABELS;
use ops_dashboard::{Command, Effect, FilterCriteria, Session, Status};

use crate::actions::{apply, dispatch};
use crate::config::CONFIG;

/// Date range, category, search and export controls
#[component]
pub fn FilterBar(session: RwSignal<Session>) -> impl IntoView {
    let labels = &CONFIG.labels;
    let from = RwSignal::new(String::new());
    let to = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());

    // inputs are only read when searching
    let search = move |_: MouseEvent| {
        let parsed = FilterCriteria::parse(&from.get_untracked(), &to.get_untracked(), &category.get_untracked());
        match parsed {
            Ok(criteria) => dispatch(session, Command::Search(criteria)),
            Err(e) => apply(Effect::from_error(&e)),
        }
    };
    let loading = move || session.with(|s| s.status() == Status::Loading);

    view! {
        <div class="filter-bar">
            <label class="filter-field">
                <span>{labels.date_from}</span>
                <input
                    type="date"
                    data-jshook="date-from"
                    prop:value=move || from.get()
                    on:input=move |ev| from.set(event_target_value(&ev))
                />
            </label>
            <label class="filter-field">
                <span>{labels.date_to}</span>
                <input
                    type="date"
                    data-jshook="date-to"
                    prop:value=move || to.get()
                    on:input=move |ev| to.set(event_target_value(&ev))
                />
            </label>
            <label class="filter-field">
                <span>{labels.category}</span>
                <select data-jshook="category-select" on:change=move |ev| category.set(event_target_value(&ev))>
                    <option value="">{labels.all_categories}</option>
                    {CATEGORY_LABELS
                        .iter()
                        .map(|&(id, label)| view! { <option value=id>{label}</option> })
                        .collect_view()}
                </select>
            </label>
            <button type="button" class="button" data-jshook="search-button" disabled=loading on:click=search>
                {labels.search}
            </button>
            <button
                type="button"
                class="button"
                data-jshook="export-button"
                disabled=loading
                on:click=move |_| dispatch(session, Command::Export)
            >
                {labels.export}
            </button>
        </div>
    }
}
