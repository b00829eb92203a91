//! Screen state for list pages and edit forms.
//!
//! Screens call the CRUD API, keep the outcome and store any failure as a
//! short message for inline display. Nothing is retried.

mod form;
mod list;

pub use form::{EditForm, FormMode, PricedDocument};
pub use list::ListScreen;
