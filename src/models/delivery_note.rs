use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::invoice::SalesLine;
use crate::client::Resource;
use crate::services::pricing::{compute_totals, DocumentTotals};
use crate::table::{Column, Tabular};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum DeliveryNoteStatus {
    Pending,
    Invoiced,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryNote {
    pub id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    pub customer_id: Uuid,
    pub date: DateTime<Utc>,
    pub status: DeliveryNoteStatus,
    #[serde(default)]
    #[validate]
    pub items: Vec<SalesLine>,
}

impl DeliveryNote {
    pub fn totals(&self) -> DocumentTotals {
        compute_totals(&self.items)
    }

    /// Only pending notes can be billed.
    pub fn is_billable(&self) -> bool {
        self.status == DeliveryNoteStatus::Pending
    }
}

impl Resource for DeliveryNote {
    const PATH: &'static str = "deliverynote";
    const LABEL: &'static str = "Delivery note";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for DeliveryNote {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |d: &DeliveryNote| d.code.as_str().into()),
            Column::new("date", "Date", |d: &DeliveryNote| d.date.into()),
            Column::new("status", "Status", |d: &DeliveryNote| d.status.to_string().into()),
            Column::new("total", "Total", |d: &DeliveryNote| d.totals().total.into())
                .totalized(),
        ]
    }
}
