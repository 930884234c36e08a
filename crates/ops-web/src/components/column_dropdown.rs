use leptos::ev::{self, MouseEvent};
use leptos::html;
use leptos::prelude::*;
use ops_dashboard::{Anchor, Command, Session, Status};

use crate::actions::dispatch;
use crate::browser;
use crate::config::CONFIG;

/// Column selector: a trigger button and a fixed-position checkbox panel.
///
/// The panel closes on a second trigger click, a click anywhere outside it,
/// or Escape. While open it follows the trigger on resize and scroll.
#[component]
pub fn ColumnDropdown(session: RwSignal<Session>) -> impl IntoView {
    let labels = &CONFIG.labels;
    let trigger = NodeRef::<html::Button>::new();
    let panel = NodeRef::<html::Div>::new();

    let anchor = move || -> Option<Anchor> {
        let trigger = trigger.get_untracked()?;
        let panel = panel.get_untracked();
        Some(browser::measure_anchor(&trigger, panel.as_deref()))
    };
    let is_open = move || session.with_untracked(|s| s.panel().is_open());

    let reposition = move || {
        if !is_open() {
            return;
        }
        if let Some(anchor) = anchor() {
            dispatch(session, Command::RepositionColumnPanel(anchor));
        }
    };

    let on_trigger = move |ev: MouseEvent| {
        ev.stop_propagation();
        let Some(anchor) = anchor() else {
            return;
        };
        dispatch(session, Command::ToggleColumnPanel(anchor));
        // the panel has no width until it is displayed; measure again once laid out
        if is_open() {
            request_animation_frame(reposition);
        }
    };

    let close = move || {
        if is_open() {
            dispatch(session, Command::CloseColumnPanel);
        }
    };

    let click = window_event_listener(ev::click, move |ev| {
        let Some(target) = browser::attached_target(&ev) else {
            return;
        };
        let inside_panel = panel.get_untracked().is_some_and(|p| p.contains(Some(&target)));
        let inside_trigger = trigger.get_untracked().is_some_and(|t| t.contains(Some(&target)));
        if !inside_panel && !inside_trigger {
            close();
        }
    });
    let keydown = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            close();
        }
    });
    let resize = window_event_listener(ev::resize, move |_| reposition());
    let scroll = window_event_listener(ev::scroll, move |_| reposition());
    on_cleanup(move || {
        click.remove();
        keydown.remove();
        resize.remove();
        scroll.remove();
    });

    let options = Memo::new(move |_| session.with(Session::column_options));

    view! {
        <div class="column-dropdown">
            <button
                type="button"
                class="button"
                id="column-dropdown-button"
                data-jshook="column-dropdown-button"
                node_ref=trigger
                disabled=move || session.with(|s| s.status() == Status::Loading)
                on:click=on_trigger
            >
                {labels.columns}
            </button>
            <div
                class="column-dropdown-panel"
                id="column-dropdown-panel"
                data-jshook="column-dropdown-panel"
                node_ref=panel
                style=move || session.with(|s| s.panel().style())
                aria-hidden=move || session.with(|s| s.panel().aria_hidden())
            >
                <div class="column-actions">
                    <button
                        type="button"
                        id="col-select-all"
                        data-jshook="col-select-all"
                        on:click=move |_| dispatch(session, Command::SelectAllColumns)
                    >
                        {labels.select_all}
                    </button>
                    <button
                        type="button"
                        id="col-select-none"
                        data-jshook="col-select-none"
                        on:click=move |_| dispatch(session, Command::SelectNoColumns)
                    >
                        {labels.select_none}
                    </button>
                </div>
                <div class="column-options" id="column-options" data-jshook="column-options">
                    {move || {
                        options
                            .get()
                            .into_iter()
                            .map(move |option| {
                                let index = option.index;
                                view! {
                                    <label class="column-option">
                                        <input
                                            type="checkbox"
                                            id=option.id
                                            value=option.name.clone()
                                            prop:checked=option.checked
                                            on:change=move |ev| {
                                                dispatch(
                                                    session,
                                                    Command::ToggleColumn {
                                                        index,
                                                        checked: event_target_checked(&ev),
                                                    },
                                                )
                                            }
                                        />
                                        <span>{option.name}</span>
                                    </label>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </div>
        </div>
    }
}
