use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{default_true, validate_non_negative_decimal};
use crate::client::Resource;
use crate::table::{Column, Tabular};

/// A spare part kept in the maintenance store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SparePart {
    pub id: Uuid,
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub provider_id: Option<Uuid>,
    /// Reference of the part in the provider's catalogue.
    #[serde(default)]
    pub ref_provider: Option<String>,
    #[serde(default)]
    pub stock: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_non_negative_decimal")]
    pub minimum_stock: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_non_negative_decimal")]
    pub maximum_stock: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_non_negative_decimal")]
    pub price: Decimal,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl SparePart {
    pub fn needs_restock(&self) -> bool {
        self.stock < self.minimum_stock
    }

    /// Quantity that brings the stock back to the maximum, zero when no restock
    /// is needed.
    pub fn restock_quantity(&self) -> Decimal {
        if !self.needs_restock() {
            return Decimal::ZERO;
        }
        (self.maximum_stock - self.stock).max(Decimal::ZERO)
    }

    pub fn stock_value(&self) -> Decimal {
        self.stock.max(Decimal::ZERO) * self.price
    }
}

impl Resource for SparePart {
    const PATH: &'static str = "sparepart";
    const LABEL: &'static str = "Spare part";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for SparePart {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |s: &SparePart| s.code.as_str().into()),
            Column::new("description", "Description", |s: &SparePart| {
                s.description.as_str().into()
            }),
            Column::new("refProvider", "Provider ref.", |s: &SparePart| {
                s.ref_provider.clone().into()
            }),
            Column::new("location", "Location", |s: &SparePart| s.location.clone().into()),
            Column::new("stock", "Stock", |s: &SparePart| s.stock.into()).totalized(),
            Column::new("minimumStock", "Min.", |s: &SparePart| s.minimum_stock.into()),
            Column::new("price", "Price", |s: &SparePart| s.price.into()),
            Column::new("stockValue", "Stock value", |s: &SparePart| s.stock_value().into())
                .totalized(),
        ]
    }
}
