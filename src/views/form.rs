use tracing::{info, warn};
use uuid::Uuid;

use crate::client::{CrudApi, Resource};
use crate::errors::ServiceError;
use crate::models::{Budget, DeliveryNote, Invoice, Order};
use crate::services::pricing::DocumentTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

/// Create/edit state over a draft record.
#[derive(Debug)]
pub struct EditForm<R> {
    mode: FormMode,
    draft: R,
    error: Option<String>,
}

impl<R: Resource> EditForm<R> {
    pub fn create(draft: R) -> Self {
        Self {
            mode: FormMode::Create,
            draft,
            error: None,
        }
    }

    pub fn edit(record: R) -> Self {
        Self {
            mode: FormMode::Edit(record.id()),
            draft: record,
            error: None,
        }
    }

    /// Loads a record from the API into an edit form.
    pub async fn open(api: &dyn CrudApi<R>, id: Uuid) -> Result<Self, ServiceError> {
        let record = api.get_by_id(id).await?;
        Ok(Self::edit(record))
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &R {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R {
        &mut self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Creates or updates depending on the mode. On success the form holds the
    /// server's copy in edit mode; on failure the draft is kept untouched.
    pub async fn save(&mut self, api: &dyn CrudApi<R>) -> bool {
        let result = match self.mode {
            FormMode::Create => api.create(&self.draft).await,
            FormMode::Edit(_) => api.update(&self.draft).await,
        };
        match result {
            Ok(saved) => {
                info!(resource = R::PATH, id = %saved.id(), "{} saved", R::LABEL);
                self.mode = FormMode::Edit(saved.id());
                self.draft = saved;
                self.error = None;
                true
            }
            Err(err) => {
                warn!(resource = R::PATH, error = %err, "Failed to save record");
                self.error = Some(err.user_message());
                false
            }
        }
    }

    /// Deletes the edited record. New records cannot be deleted.
    pub async fn delete(&mut self, api: &dyn CrudApi<R>) -> bool {
        let id = match self.mode {
            FormMode::Edit(id) => id,
            FormMode::Create => {
                self.error = Some(
                    ServiceError::InvalidOperation(format!("{} has not been saved yet", R::LABEL))
                        .user_message(),
                );
                return false;
            }
        };
        match api.delete(id).await {
            Ok(()) => {
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
}

/// Documents whose lines roll up into priced totals.
pub trait PricedDocument {
    fn totals(&self) -> DocumentTotals;
}

impl PricedDocument for Order {
    fn totals(&self) -> DocumentTotals {
        Order::totals(self)
    }
}

impl PricedDocument for Budget {
    fn totals(&self) -> DocumentTotals {
        Budget::totals(self)
    }
}

impl PricedDocument for Invoice {
    fn totals(&self) -> DocumentTotals {
        Invoice::totals(self)
    }
}

impl PricedDocument for DeliveryNote {
    fn totals(&self) -> DocumentTotals {
        DeliveryNote::totals(self)
    }
}

impl<R: Resource + PricedDocument> EditForm<R> {
    /// Totals of the current draft. Pure: calling it never changes the form.
    pub fn totals(&self) -> DocumentTotals {
        self.draft.totals()
    }
}
