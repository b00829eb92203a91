use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::default_true;
use crate::client::Resource;
use crate::table::{CellValue, Column, Tabular};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub nif: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Resource for Provider {
    const PATH: &'static str = "provider";
    const LABEL: &'static str = "Provider";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for Provider {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name", |p: &Provider| p.name.as_str().into()),
            Column::new("nif", "NIF", |p: &Provider| p.nif.clone().into()),
            Column::new("city", "City", |p: &Provider| p.city.clone().into()),
            Column::new("phone", "Phone", |p: &Provider| p.phone.clone().into()).not_sortable(),
            Column::new("email", "Email", |p: &Provider| p.email.clone().into()),
            Column::new("active", "Active", |p: &Provider| CellValue::Bool(p.active))
                .not_filterable(),
        ]
    }
}
