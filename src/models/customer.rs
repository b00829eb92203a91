use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::default_true;
use crate::client::Resource;
use crate::table::{CellValue, Column, Tabular};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Resource for Customer {
    const PATH: &'static str = "customer";
    const LABEL: &'static str = "Customer";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for Customer {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |c: &Customer| c.code.as_str().into()),
            Column::new("name", "Name", |c: &Customer| c.name.as_str().into()),
            Column::new("taxId", "Tax id", |c: &Customer| c.tax_id.clone().into()),
            Column::new("email", "Email", |c: &Customer| c.email.clone().into()),
            Column::new("active", "Active", |c: &Customer| CellValue::Bool(c.active))
                .not_filterable(),
        ]
    }
}
