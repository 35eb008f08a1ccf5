use std::sync::Arc;

use dioxus::prelude::*;

use crate::domain::entities::record::Member;
use crate::domain::table_view::{TableNotice, TableView};
use crate::platform::desktop::blocking::run_in_background;
use crate::ui::components::fields::FIELD_STYLE;
use crate::ui::components::table::{export_table, sort_key_at, table_model, DataTable};
use crate::ui::state::app_state::AppServices;
use crate::usecase::services::query_service::QueryService;

/// The table shows Loading until the background fetch lands.
fn load_members(queries: Arc<QueryService>, mut table: Signal<TableView<Member>>) {
    table.write().begin_loading();
    spawn(async move {
        let fetched = run_in_background("fetch members", move || queries.fetch_members()).await;
        if let Some(result) = fetched {
            table.write().load(result);
        }
    });
}

#[component]
pub fn MembersScreen(services: AppServices) -> Element {
    let page_size = services.config.page_size;
    let mut table = use_signal(move || TableView::<Member>::new(page_size));
    let mut status = use_signal(String::new);

    let queries_for_mount = services.queries.clone();
    use_effect(move || {
        load_members(queries_for_mount.clone(), table);
    });

    let queries_for_reload = services.queries.clone();
    let filter = table.read().filter().to_string();
    let model = table_model(&*table.read());
    let loading = table.read().notice() == Some(TableNotice::Loading);

    rsx! {
        div { style: "max-width: 900px; margin: 0 auto;",
            h1 { style: "text-align: center;", "Mikados Members" }
            div { style: "display: flex; gap: 8px; align-items: center;",
                input {
                    style: FIELD_STYLE,
                    value: filter,
                    placeholder: "Search by name...",
                    oninput: move |event| table.write().set_filter(event.value()),
                }
                button {
                    disabled: loading,
                    onclick: move |_| {
                        status.set(String::new());
                        load_members(queries_for_reload.clone(), table);
                    },
                    "Reload"
                }
                button {
                    disabled: loading,
                    onclick: move |_| status.set(export_table(table, "members.csv")),
                    "Export CSV"
                }
            }
            if !status().is_empty() {
                p { style: "color: #555;", "{status}" }
            }
            DataTable {
                model: model,
                on_sort: move |idx: usize| {
                    if let Some(key) = sort_key_at::<Member>(idx) {
                        table.write().set_sort(key);
                    }
                },
                on_page: move |page: usize| table.write().set_page(page),
            }
        }
    }
}
