use dioxus::prelude::*;
use rfd::FileDialog;

use crate::domain::entities::record::TableRecord;
use crate::domain::table_view::{TableNotice, TableView};
use crate::infra::export::csv::export_visible_to_csv;
use crate::platform::desktop::blocking::run_blocking;
use crate::usecase::services::query_service::NO_RECORDS_MESSAGE;

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub label: String,
    pub sortable: bool,
    pub indicator: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub key: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<TableRow>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    pub notice: Option<TableNotice>,
}

pub fn table_model<R: TableRecord>(view: &TableView<R>) -> TableModel {
    let active = view.sort();
    let headers = R::columns()
        .into_iter()
        .map(|column| {
            let indicator = match (column.sort_key, active) {
                (Some(key), Some(spec)) if spec.key == key => spec.direction.indicator(),
                _ => "",
            };
            HeaderCell {
                label: column.label.to_string(),
                sortable: column.sort_key.is_some(),
                indicator,
            }
        })
        .collect();

    let page = view.get_page();
    let rows = page
        .rows
        .iter()
        .map(|row| TableRow {
            key: row.key(),
            cells: row.record.cells(),
        })
        .collect();

    TableModel {
        headers,
        rows,
        page: page.page,
        page_count: page.page_count.max(1),
        total: page.total,
        notice: view.notice(),
    }
}

pub fn sort_key_at<R: TableRecord>(column_idx: usize) -> Option<R::SortKey> {
    R::columns()
        .get(column_idx)
        .and_then(|column| column.sort_key)
}

pub fn notice_message(notice: &TableNotice) -> String {
    match notice {
        TableNotice::Loading => "Loading...".to_string(),
        TableNotice::NoRecords => NO_RECORDS_MESSAGE.to_string(),
        TableNotice::NoMatches => "No records match your search.".to_string(),
        TableNotice::Failed(message) => format!("Could not load records: {message}"),
    }
}

/// Asks for a destination and writes the visible rows there. Returns the
/// status line to show.
pub fn export_table<R>(table: Signal<TableView<R>>, file_name: &str) -> String
where
    R: TableRecord + Clone + Send + Sync + 'static,
{
    let Some(csv_path) = FileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_file_name(file_name)
        .save_file()
    else {
        return "Export cancelled".to_string();
    };

    let snapshot: TableView<R> = (*table.peek()).clone();
    match run_blocking("export csv", || export_visible_to_csv(&snapshot, &csv_path)) {
        Ok(count) => format!("Exported {count} records to {}", csv_path.display()),
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "csv export failed");
            format!("Export failed: {err:#}")
        }
    }
}

pub fn table_container_style() -> &'static str {
    "overflow-x: auto; margin-top: 12px;"
}

pub fn table_header_cell_style(sortable: bool) -> &'static str {
    if sortable {
        "padding: 8px; text-align: left; background: #1d1d41; color: #fff; cursor: pointer; white-space: nowrap;"
    } else {
        "padding: 8px; text-align: left; background: #1d1d41; color: #fff; white-space: nowrap;"
    }
}

const TABLE_CELL_STYLE: &str = "padding: 8px; border-bottom: 1px solid #ddd;";

#[component]
pub fn DataTable(
    model: TableModel,
    on_sort: EventHandler<usize>,
    on_page: EventHandler<usize>,
) -> Element {
    let page = model.page;
    let page_count = model.page_count;
    let total = model.total;
    let notice_text = model.notice.as_ref().map(notice_message);

    rsx! {
        div { style: table_container_style(),
            if let Some(text) = notice_text {
                p { style: "color: #555; padding: 6px 0;", "{text}" }
            }
            table { style: "width: 100%; border-collapse: collapse;",
                thead {
                    tr {
                        {model.headers.iter().enumerate().map(|(idx, header)| {
                            let sortable = header.sortable;
                            let label = header.label.clone();
                            let indicator = header.indicator;
                            rsx!(
                                th {
                                    key: "{idx}",
                                    style: table_header_cell_style(sortable),
                                    onclick: move |_| {
                                        if sortable {
                                            on_sort.call(idx);
                                        }
                                    },
                                    "{label} {indicator}"
                                }
                            )
                        })}
                    }
                }
                tbody {
                    {model.rows.iter().map(|row| {
                        let cells = row.cells.clone();
                        rsx!(
                            tr { key: "{row.key}",
                                {cells.into_iter().map(|cell| rsx!(
                                    td { style: TABLE_CELL_STYLE, "{cell}" }
                                ))}
                            }
                        )
                    })}
                }
            }
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-top: 12px;",
                button {
                    disabled: page <= 1,
                    onclick: move |_| on_page.call(page.saturating_sub(1)),
                    "‹ Prev"
                }
                span { "Page {page} of {page_count} ({total} records)" }
                button {
                    disabled: page >= page_count,
                    onclick: move |_| on_page.call(page + 1),
                    "Next ›"
                }
            }
        }
    }
}
