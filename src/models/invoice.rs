use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{validate_non_negative_decimal, validate_percentage};
use crate::client::Resource;
use crate::services::pricing::{compute_totals, DocumentTotals, Priced};
use crate::table::{Column, Tabular};

/// A priced line of a sales document (budget, delivery note, invoice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SalesLine {
    pub id: Uuid,
    #[serde(default)]
    pub article_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom = "validate_non_negative_decimal")]
    pub quantity: Decimal,
    #[validate(custom = "validate_non_negative_decimal")]
    pub unit_price: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_percentage")]
    pub discount: Option<Decimal>,
    #[serde(default)]
    #[validate(custom = "validate_percentage")]
    pub tax_percentage: Option<Decimal>,
}

impl SalesLine {
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            article_id: None,
            description: description.into(),
            quantity,
            unit_price,
            discount: None,
            tax_percentage: None,
        }
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn with_tax(mut self, tax_percentage: Decimal) -> Self {
        self.tax_percentage = Some(tax_percentage);
        self
    }
}

impl Priced for SalesLine {
    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn discount(&self) -> Option<Decimal> {
        self.discount
    }

    fn tax_percentage(&self) -> Option<Decimal> {
        self.tax_percentage
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    pub customer_id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub status: InvoiceStatus,
    #[serde(default)]
    #[validate]
    pub items: Vec<SalesLine>,
    /// Delivery notes billed by this invoice.
    #[serde(default)]
    pub delivery_note_ids: Vec<Uuid>,
}

impl Invoice {
    pub fn totals(&self) -> DocumentTotals {
        compute_totals(&self.items)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == InvoiceStatus::Pending && self.due_date.is_some_and(|due| due < now)
    }
}

impl Resource for Invoice {
    const PATH: &'static str = "invoice";
    const LABEL: &'static str = "Invoice";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for Invoice {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |i: &Invoice| i.code.as_str().into()),
            Column::new("date", "Date", |i: &Invoice| i.date.into()),
            Column::new("dueDate", "Due date", |i: &Invoice| i.due_date.into()),
            Column::new("status", "Status", |i: &Invoice| i.status.to_string().into()),
            Column::new("subtotal", "Subtotal", |i: &Invoice| i.totals().subtotal.into())
                .totalized(),
            Column::new("total", "Total", |i: &Invoice| i.totals().total.into()).totalized(),
        ]
    }
}
