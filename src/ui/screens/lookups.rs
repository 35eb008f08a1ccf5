use chrono::{Datelike, Local};
use dioxus::prelude::*;

use crate::domain::entities::forms::{DuesLookupForm, DuesStatusForm, LevyLookupForm};
use crate::domain::entities::record::{DuesStatus, LevyContribution, MonthlyDue, TableRecord};
use crate::domain::table_view::{LoadState, TableView};
use crate::platform::desktop::blocking::run_in_background;
use crate::ui::components::fields::{
    ContributionTypeSelect, MonthSelect, OutcomeLine, TextField, CARD_STYLE, PRIMARY_BUTTON_STYLE,
};
use crate::ui::components::table::{
    export_table, sort_key_at, table_container_style, table_header_cell_style, table_model,
    DataTable,
};
use crate::ui::state::app_state::{AppServices, LookupState};
use crate::usecase::services::outcome::Outcome;
use crate::usecase::services::query_service::Lookup;

fn apply_lookup<R: TableRecord + 'static>(
    result: Result<Lookup<R>, String>,
    mut table: Signal<TableView<R>>,
    mut outcome: Signal<Option<Outcome>>,
) {
    match result {
        Ok(lookup) => {
            outcome.set(Some(Outcome::Success(lookup.message)));
            table.write().load(Ok::<_, String>(lookup.records));
        }
        Err(message) => {
            outcome.set(Some(Outcome::Error(message.clone())));
            table.write().load(Err::<Vec<R>, _>(message));
        }
    }
}

fn lookup_results<R>(
    mut table: Signal<TableView<R>>,
    searched: bool,
    export_name: &'static str,
    mut export_status: Signal<String>,
) -> Element
where
    R: TableRecord + Clone + Send + Sync + 'static,
{
    let failed = matches!(table.read().state(), LoadState::Failed(_));
    if !searched || failed {
        return rsx! {};
    }
    let model = table_model(&*table.read());
    let filter = table.read().filter().to_string();

    rsx! {
        div { style: "max-width: 900px; margin: 16px auto 0;",
            div { style: "display: flex; gap: 8px; align-items: center;",
                input {
                    style: "flex: 1; padding: 8px; border: 1px solid #ccc; border-radius: 8px;",
                    value: filter,
                    placeholder: "Filter results...",
                    oninput: move |event| table.write().set_filter(event.value()),
                }
                button {
                    onclick: move |_| export_status.set(export_table(table, export_name)),
                    "Export CSV"
                }
            }
            if !export_status().is_empty() {
                p { style: "color: #555;", "{export_status}" }
            }
            DataTable {
                model: model,
                on_sort: move |idx: usize| {
                    if let Some(key) = sort_key_at::<R>(idx) {
                        table.write().set_sort(key);
                    }
                },
                on_page: move |page: usize| table.write().set_page(page),
            }
        }
    }
}

#[component]
pub fn DuesListScreen(services: AppServices) -> Element {
    let LookupState {
        mut form,
        mut busy,
        mut outcome,
        mut table,
        mut searched,
    } = LookupState::<DuesLookupForm, MonthlyDue>::new(
        || DuesLookupForm::new(Local::now().year()),
        services.config.page_size,
    );
    let export_status = use_signal(String::new);
    let queries = services.queries.clone();
    let snapshot = form();

    rsx! {
        div { style: CARD_STYLE,
            h1 { style: "text-align: center;", "Monthly Dues" }
            TextField {
                label: "Reg Number",
                value: snapshot.reg_number.clone(),
                placeholder: "Registration number (optional)",
                on_input: move |value: String| form.write().reg_number = value,
            }
            MonthSelect {
                value: snapshot.month.clone(),
                on_change: move |value: String| form.write().month = value,
            }
            TextField {
                label: "Year",
                value: snapshot.year.clone(),
                placeholder: "Enter year",
                input_type: "number",
                on_input: move |value: String| form.write().year = value,
            }
            OutcomeLine { outcome: outcome() }
            button {
                style: PRIMARY_BUTTON_STYLE,
                disabled: busy(),
                onclick: move |_| {
                    busy.set(true);
                    outcome.set(None);
                    table.write().begin_loading();
                    let submitted = form.peek().clone();
                    let queries = queries.clone();
                    spawn(async move {
                        let fetched =
                            run_in_background("list monthly dues", move || queries.list_monthly_dues(&submitted)).await;
                        if let Some(result) = fetched {
                            apply_lookup(result, table, outcome);
                        }
                        searched.set(true);
                        busy.set(false);
                    });
                },
                if busy() { "Fetching..." } else { "Fetch Dues" }
            }
        }
        {lookup_results(table, searched(), "monthly-dues.csv", export_status)}
    }
}

#[component]
pub fn LevyListScreen(services: AppServices) -> Element {
    let LookupState {
        mut form,
        mut busy,
        mut outcome,
        mut table,
        mut searched,
    } = LookupState::<LevyLookupForm, LevyContribution>::new(
        || LevyLookupForm::new(Local::now().year()),
        services.config.page_size,
    );
    let export_status = use_signal(String::new);
    let queries = services.queries.clone();
    let snapshot = form();

    rsx! {
        div { style: CARD_STYLE,
            h1 { style: "text-align: center;", "Levy Contributions" }
            TextField {
                label: "Owner Name",
                value: snapshot.owner_name.clone(),
                placeholder: "Owner name (optional)",
                on_input: move |value: String| form.write().owner_name = value,
            }
            TextField {
                label: "Contributor Name",
                value: snapshot.contributor_name.clone(),
                placeholder: "Contributor name (optional)",
                on_input: move |value: String| form.write().contributor_name = value,
            }
            MonthSelect {
                value: snapshot.month.clone(),
                on_change: move |value: String| form.write().month = value,
            }
            TextField {
                label: "Year",
                value: snapshot.year.clone(),
                placeholder: "Enter year",
                input_type: "number",
                on_input: move |value: String| form.write().year = value,
            }
            ContributionTypeSelect {
                value: snapshot.contribution_type.clone(),
                with_any: true,
                on_change: move |value: String| form.write().contribution_type = value,
            }
            OutcomeLine { outcome: outcome() }
            button {
                style: PRIMARY_BUTTON_STYLE,
                disabled: busy(),
                onclick: move |_| {
                    busy.set(true);
                    outcome.set(None);
                    table.write().begin_loading();
                    let submitted = form.peek().clone();
                    let queries = queries.clone();
                    spawn(async move {
                        let fetched =
                            run_in_background("list levies", move || queries.list_levies(&submitted)).await;
                        if let Some(result) = fetched {
                            apply_lookup(result, table, outcome);
                        }
                        searched.set(true);
                        busy.set(false);
                    });
                },
                if busy() { "Fetching..." } else { "Fetch Contributions" }
            }
        }
        {lookup_results(table, searched(), "levy-contributions.csv", export_status)}
    }
}

#[component]
pub fn DuesStatusScreen(services: AppServices) -> Element {
    let mut form = use_signal(DuesStatusForm::default);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut status = use_signal(|| None::<DuesStatus>);
    let queries = services.queries.clone();
    let snapshot = form();

    rsx! {
        div { style: CARD_STYLE,
            h1 { style: "text-align: center;", "Check Monthly Dues" }
            TextField {
                label: "Year",
                value: snapshot.year.clone(),
                placeholder: "Enter year",
                input_type: "number",
                on_input: move |value: String| form.write().year = value,
            }
            TextField {
                label: "Registration Number",
                value: snapshot.reg_number.clone(),
                placeholder: "Enter registration number",
                on_input: move |value: String| form.write().reg_number = value,
            }
            if let Some(message) = error() {
                p { style: "color: #dc2626; text-align: center;", "{message}" }
            }
            button {
                style: PRIMARY_BUTTON_STYLE,
                disabled: busy(),
                onclick: move |_| {
                    busy.set(true);
                    error.set(None);
                    status.set(None);
                    let submitted = form.peek().clone();
                    let queries = queries.clone();
                    spawn(async move {
                        let checked =
                            run_in_background("check dues", move || queries.check_dues(&submitted)).await;
                        match checked {
                            Some(Ok(found)) => status.set(Some(found)),
                            Some(Err(message)) => error.set(Some(message)),
                            None => {}
                        }
                        busy.set(false);
                    });
                },
                if busy() { "Checking..." } else { "Check Dues" }
            }
        }
        if let Some(found) = status() {
            DuesStatusTable { status: found }
        }
    }
}

#[component]
fn DuesStatusTable(status: DuesStatus) -> Element {
    let heading = format!(
        "{} (Reg: {}) - {}",
        status.full_name, status.reg_number, status.year
    );
    let rows = status.month_rows();

    rsx! {
        div { style: "max-width: 600px; margin: 16px auto 0;",
            h3 { style: "text-align: center;", "{heading}" }
            div { style: table_container_style(),
                table { style: "width: 100%; border-collapse: collapse;",
                    thead {
                        tr {
                            th { style: table_header_cell_style(false), "Paid Months" }
                            th { style: table_header_cell_style(false), "Unpaid Months" }
                        }
                    }
                    tbody {
                        {rows.into_iter().enumerate().map(|(idx, (paid, unpaid))| rsx!(
                            tr { key: "{idx}",
                                td { style: "padding: 8px; color: #15803d;", "{paid}" }
                                td { style: "padding: 8px; color: #dc2626;", "{unpaid}" }
                            }
                        ))}
                    }
                }
            }
        }
    }
}
