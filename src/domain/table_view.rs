//! Client-side search, sort and pagination over a fetched record list.
//!
//! [`TableView`] owns the records of one screen. Everything it shows is
//! derived on demand by [`visible_set`] and [`page_slice`], so the fetched
//! list itself is never reordered or trimmed.

use std::fmt::Display;

use crate::domain::entities::record::{compare_values, SortDirection, SortSpec, TableRecord};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableNotice {
    Loading,
    NoRecords,
    NoMatches,
    Failed(String),
}

/// A record together with its position in the fetched list.
#[derive(Debug)]
pub struct Row<'a, R> {
    pub position: usize,
    pub record: &'a R,
}

impl<R> Clone for Row<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Row<'_, R> {}

impl<R: TableRecord> Row<'_, R> {
    /// `_id` when the API sent one, otherwise the fetch position.
    pub fn key(&self) -> String {
        self.record
            .record_id()
            .map(str::to_string)
            .unwrap_or_else(|| format!("row-{}", self.position))
    }
}

#[derive(Debug)]
pub struct TablePage<'a, R> {
    pub rows: Vec<Row<'a, R>>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

pub fn visible_set<'a, R: TableRecord>(
    records: &'a [R],
    filter: &str,
    sort: Option<SortSpec<R::SortKey>>,
) -> Vec<Row<'a, R>> {
    let needle = filter.to_lowercase();
    let mut rows: Vec<Row<'a, R>> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            needle.is_empty() || record.display_field().to_lowercase().contains(&needle)
        })
        .map(|(position, record)| Row { position, record })
        .collect();

    if let Some(spec) = sort {
        rows.sort_by(|a, b| {
            compare_values(&a.record.sort_value(spec.key), &b.record.sort_value(spec.key))
        });
        if spec.direction == SortDirection::Desc {
            rows.reverse();
        }
    }

    rows
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

pub fn clamp_page(requested: usize, page_count: usize) -> usize {
    requested.clamp(1, page_count.max(1))
}

/// Returns `[(page-1)*size, page*size)` cut to the bounds of `visible`.
pub fn page_slice<T>(visible: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= visible.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(visible.len());
    &visible[start..end]
}

#[derive(Debug, Clone)]
pub struct TableView<R: TableRecord> {
    records: Vec<R>,
    state: LoadState,
    filter: String,
    sort: Option<SortSpec<R::SortKey>>,
    page: usize,
    page_size: usize,
}

impl<R: TableRecord> TableView<R> {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            state: LoadState::Loading,
            filter: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    #[cfg(test)]
    pub fn with_records(page_size: usize, records: Vec<R>) -> Self {
        let mut view = Self::new(page_size);
        view.load(Ok::<_, String>(records));
        view
    }

    /// Filter, sort and page survive a refetch; `load` re-clamps the page.
    pub fn begin_loading(&mut self) {
        self.records.clear();
        self.state = LoadState::Loading;
    }

    /// Replaces the record set wholesale. A failed fetch leaves the table
    /// empty and keeps the error for display.
    pub fn load<E: Display>(&mut self, result: Result<Vec<R>, E>) {
        match result {
            Ok(records) => {
                self.records = records;
                self.state = LoadState::Ready;
            }
            Err(err) => {
                self.records = Vec::new();
                self.state = LoadState::Failed(err.to_string());
            }
        }
        self.page = clamp_page(self.page, self.page_count());
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[cfg(test)]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> Option<SortSpec<R::SortKey>> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
        self.page = 1;
    }

    pub fn set_sort(&mut self, key: R::SortKey) {
        self.sort = Some(match self.sort {
            Some(active) if active.key == key => SortSpec {
                key,
                direction: active.direction.flipped(),
            },
            _ => SortSpec {
                key,
                direction: SortDirection::Asc,
            },
        });
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = clamp_page(page, self.page_count());
    }

    pub fn visible(&self) -> Vec<Row<'_, R>> {
        visible_set(&self.records, &self.filter, self.sort)
    }

    pub fn visible_len(&self) -> usize {
        if self.filter.is_empty() {
            return self.records.len();
        }
        self.visible().len()
    }

    pub fn page_count(&self) -> usize {
        page_count(self.visible_len(), self.page_size)
    }

    pub fn get_page(&self) -> TablePage<'_, R> {
        let visible = self.visible();
        let total = visible.len();
        let count = page_count(total, self.page_size);
        let page = clamp_page(self.page, count);
        let rows = page_slice(&visible, page, self.page_size).to_vec();
        TablePage {
            rows,
            page,
            page_count: count,
            total,
        }
    }

    pub fn notice(&self) -> Option<TableNotice> {
        match &self.state {
            LoadState::Loading => Some(TableNotice::Loading),
            LoadState::Failed(message) => Some(TableNotice::Failed(message.clone())),
            LoadState::Ready if self.records.is_empty() => Some(TableNotice::NoRecords),
            LoadState::Ready if self.visible_len() == 0 => Some(TableNotice::NoMatches),
            LoadState::Ready => None,
        }
    }
}
