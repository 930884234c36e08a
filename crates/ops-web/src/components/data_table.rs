use leptos::prelude::*;
use ops_dashboard::constants::{DEFAULT_PLACEHOLDER_SPAN, MSG_LOADING};
use ops_dashboard::{Cell, Session, TableBody, TableModel};

/// The results table, drawn from the session's table model
#[component]
pub fn DataTable(session: RwSignal<Session>) -> impl IntoView {
    let table = Memo::new(move |_| session.with(Session::table_model));
    let summary = Memo::new(move |_| session.with(Session::summary));

    view! {
        <div class="summary">{move || summary.get()}</div>
        <div class="table-wrapper">
            <table class="data-table">
                <thead>{move || table.with(head_row)}</thead>
                <tbody data-jshook="table-body">{move || table.with(|t| body_rows(&t.body))}</tbody>
            </table>
        </div>
    }
}

/// Placeholder table while the data file is being fetched
#[component]
pub fn LoadingTable() -> impl IntoView {
    let model = TableModel::message(MSG_LOADING, DEFAULT_PLACEHOLDER_SPAN);

    view! {
        <div class="summary"></div>
        <div class="table-wrapper">
            <table class="data-table">
                <thead></thead>
                <tbody data-jshook="table-body">{body_rows(&model.body)}</tbody>
            </table>
        </div>
    }
}

fn head_row(model: &TableModel) -> Option<AnyView> {
    if model.head.is_empty() {
        return None;
    }
    let cells = model.head.iter().map(|name| view! { <th>{name.clone()}</th> }).collect_view();
    Some(view! { <tr>{cells}</tr> }.into_any())
}

fn body_rows(body: &TableBody) -> AnyView {
    match body {
        TableBody::Placeholder { message, span } => view! {
            <tr>
                <td colspan=span.to_string() class="placeholder">{message.clone()}</td>
            </tr>
        }
        .into_any(),
        TableBody::Rows(rows) => rows
            .iter()
            .map(|row| view! { <tr>{row.iter().map(body_cell).collect_view()}</tr> })
            .collect_view()
            .into_any(),
    }
}

fn body_cell(cell: &Cell) -> AnyView {
    match cell.status {
        Some(status) => view! {
            <td>
                <span class=status.css_class()>{cell.text.clone()}</span>
            </td>
        }
        .into_any(),
        None => view! { <td>{cell.text.clone()}</td> }.into_any(),
    }
}
