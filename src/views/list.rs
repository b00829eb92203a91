use tracing::warn;
use uuid::Uuid;

use crate::client::{CrudApi, Resource};
use crate::table::{DataTable, Tabular};

/// A list page: the fetched collection in a data table plus the last error.
#[derive(Debug)]
pub struct ListScreen<R> {
    table: DataTable<R>,
    error: Option<String>,
}

impl<R: Resource + Tabular> ListScreen<R> {
    pub fn new(page_size: usize) -> Self {
        let mut table = DataTable::from_rows(Vec::new());
        table.set_page_size(page_size);
        Self { table, error: None }
    }

    /// Fetches every record. On failure the rows are cleared and the message
    /// kept in [`ListScreen::error`]. The table query survives reloads.
    pub async fn load(&mut self, api: &dyn CrudApi<R>) -> bool {
        match api.get_all().await {
            Ok(rows) => {
                self.table.set_rows(rows);
                self.error = None;
                true
            }
            Err(err) => {
                warn!(resource = R::PATH, error = %err, "Failed to load list");
                self.table.set_rows(Vec::new());
                self.error = Some(err.user_message());
                false
            }
        }
    }

    /// Deletes a record and drops it from the table when the API accepts.
    pub async fn delete(&mut self, api: &dyn CrudApi<R>, id: Uuid) -> bool {
        match api.delete(id).await {
            Ok(()) => {
                let rows = self
                    .table
                    .rows()
                    .iter()
                    .filter(|r| r.id() != id)
                    .cloned()
                    .collect();
                self.table.set_rows(rows);
                self.error = None;
                true
            }
            Err(err) => {
                warn!(resource = R::PATH, %id, error = %err, "Failed to delete record");
                self.error = Some(err.user_message());
                false
            }
        }
    }

    pub fn rows(&self) -> &[R] {
        self.table.rows()
    }

    pub fn table(&self) -> &DataTable<R> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<R> {
        &mut self.table
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
