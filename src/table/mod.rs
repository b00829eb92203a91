//! Generic client-side data table.
//!
//! A [`DataTable`] owns the fetched rows and a query (search text, column
//! filters, sort and page). Views are recomputed from the full row set on every
//! call so the table never drifts from its inputs.

mod cell;
mod column;
pub mod export;
mod filter;
mod pagination;
pub mod render;
mod sort;

pub use cell::CellValue;
pub use column::{Column, Tabular};
pub use filter::{matches_search, ColumnFilter, FilterOp};
pub use pagination::Pagination;
pub use sort::{compare_cells, SortDirection, SortSpec};

use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;

use crate::errors::ServiceError;

pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    pub search: String,
    pub filters: Vec<ColumnFilter>,
    pub sort: Option<SortSpec>,
    pub pagination: Pagination,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: Vec::new(),
            sort: None,
            pagination: Pagination::new(1, DEFAULT_PAGE_SIZE),
        }
    }
}

/// One page of a table view.
#[derive(Debug, Serialize)]
pub struct TablePage<'a, T> {
    pub rows: Vec<&'a T>,
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone)]
pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    query: TableQuery,
}

impl<T: Tabular> DataTable<T> {
    pub fn from_rows(rows: Vec<T>) -> Self {
        Self::new(T::columns(), rows)
    }
}

impl<T> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>) -> Self {
        Self {
            columns,
            rows,
            query: TableQuery::default(),
        }
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn query(&self) -> &TableQuery {
        &self.query
    }

    /// Replaces the data keeping the query, as after a reload.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.query.pagination.page = 1;
    }

    pub fn add_filter(&mut self, filter: ColumnFilter) -> Result<(), ServiceError> {
        let column = self.column(&filter.key)?;
        if !column.filterable {
            return Err(ServiceError::InvalidInput(format!(
                "Column '{}' cannot be filtered",
                filter.key
            )));
        }
        self.query.filters.retain(|f| f.key != filter.key);
        self.query.filters.push(filter);
        self.query.pagination.page = 1;
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.query.filters.clear();
        self.query.search.clear();
        self.query.pagination.page = 1;
    }

    /// Header-click behaviour: the same column flips direction, a new column
    /// starts ascending.
    pub fn toggle_sort(&mut self, key: &str) -> Result<SortDirection, ServiceError> {
        self.sortable_column(key)?;
        let direction = match &self.query.sort {
            Some(current) if current.key == key => current.direction.flipped(),
            _ => SortDirection::Ascending,
        };
        self.query.sort = Some(SortSpec {
            key: key.to_string(),
            direction,
        });
        Ok(direction)
    }

    pub fn set_sort(&mut self, sort: SortSpec) -> Result<(), ServiceError> {
        self.sortable_column(&sort.key)?;
        self.query.sort = Some(sort);
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.query.sort = None;
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.pagination = Pagination::new(page, self.query.pagination.page_size);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.query.pagination = Pagination::new(1, page_size);
    }

    fn column(&self, key: &str) -> Result<&Column<T>, ServiceError> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| ServiceError::InvalidInput(format!("Unknown column '{}'", key)))
    }

    fn sortable_column(&self, key: &str) -> Result<&Column<T>, ServiceError> {
        let column = self.column(key)?;
        if !column.sortable {
            return Err(ServiceError::InvalidInput(format!(
                "Column '{}' cannot be sorted",
                key
            )));
        }
        Ok(column)
    }

    fn row_matches(&self, row: &T) -> bool {
        if !matches_search(&self.columns, row, &self.query.search) {
            return false;
        }
        self.query.filters.iter().all(|filter| {
            self.columns
                .iter()
                .find(|c| c.key == filter.key)
                .map_or(true, |c| filter.matches(&c.value(row)))
        })
    }

    /// Filtered rows in display order.
    pub fn visible_rows(&self) -> Vec<&T> {
        let mut rows: Vec<&T> = self.rows.iter().filter(|r| self.row_matches(r)).collect();

        if let Some(sort) = &self.query.sort {
            if let Some(column) = self.columns.iter().find(|c| c.key == sort.key) {
                let mut keyed: Vec<(CellValue, &T)> =
                    rows.into_iter().map(|r| (column.value(r), r)).collect();
                keyed.sort_by(|a, b| compare_cells(&a.0, &b.0, sort.direction));
                rows = keyed.into_iter().map(|(_, r)| r).collect();
            }
        }
        rows
    }

    pub fn page(&self) -> TablePage<'_, T> {
        let visible = self.visible_rows();
        let pagination = self.query.pagination;
        let total_rows = visible.len();
        let range = pagination.range(total_rows);
        TablePage {
            page: pagination.effective_page(total_rows),
            page_size: pagination.page_size,
            total_pages: pagination.total_pages(total_rows),
            total_rows,
            rows: visible[range].to_vec(),
        }
    }

    /// Sum of each totalized column over the filtered rows.
    pub fn totals(&self) -> Vec<(&'static str, Decimal)> {
        let visible = self.visible_rows();
        self.columns
            .iter()
            .filter(|c| c.totalize)
            .map(|c| {
                let sum = visible
                    .iter()
                    .filter_map(|r| c.value(r).as_number())
                    .sum::<Decimal>();
                (c.key, sum)
            })
            .collect()
    }

    /// Exports every filtered row in display order, ignoring pagination.
    pub fn export_csv<W: std::io::Write>(
        &self,
        writer: W,
        delimiter: u8,
    ) -> Result<usize, ServiceError> {
        export::write_csv(&self.columns, self.visible_rows(), writer, delimiter)
    }

    pub fn export_to_path(&self, path: &Path, delimiter: u8) -> Result<usize, ServiceError> {
        export::export_to_path(&self.columns, self.visible_rows(), path, delimiter)
    }

    pub fn render_page(&self) -> String {
        render::render_text(&self.columns, self.page().rows)
    }
}
