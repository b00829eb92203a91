use super::cell::CellValue;

/// A table column: how to read a cell from a row and what the user may do with it.
pub struct Column<T> {
    pub key: &'static str,
    pub label: &'static str,
    accessor: fn(&T) -> CellValue,
    pub sortable: bool,
    pub filterable: bool,
    /// Summed into the totals row.
    pub totalize: bool,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label,
            accessor: self.accessor,
            sortable: self.sortable,
            filterable: self.filterable,
            totalize: self.totalize,
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("totalize", &self.totalize)
            .finish()
    }
}

impl<T> Column<T> {
    pub fn new(key: &'static str, label: &'static str, accessor: fn(&T) -> CellValue) -> Self {
        Self {
            key,
            label,
            accessor,
            sortable: true,
            filterable: true,
            totalize: false,
        }
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn totalized(mut self) -> Self {
        self.totalize = true;
        self
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }
}

/// Rows that know their default column set.
pub trait Tabular: Sized {
    fn columns() -> Vec<Column<Self>>;
}
