use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{default_true, validate_non_negative_decimal};
use crate::client::Resource;
use crate::table::{CellValue, Column, Tabular};

/// A technician that can be assigned to work orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub operator_type: Option<String>,
    /// Hourly labour rate.
    #[serde(default)]
    #[validate(custom = "validate_non_negative_decimal")]
    pub price_hour: Option<Decimal>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Resource for Operator {
    const PATH: &'static str = "operator";
    const LABEL: &'static str = "Operator";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for Operator {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |o: &Operator| o.code.as_str().into()),
            Column::new("name", "Name", |o: &Operator| o.name.as_str().into()),
            Column::new("operatorType", "Type", |o: &Operator| {
                o.operator_type.clone().into()
            }),
            Column::new("priceHour", "Price/hour", |o: &Operator| o.price_hour.into()),
            Column::new("active", "Active", |o: &Operator| CellValue::Bool(o.active))
                .not_filterable(),
        ]
    }
}
