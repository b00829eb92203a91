use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::default_true;
use crate::client::Resource;
use crate::table::{CellValue, Column, Tabular};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Technician,
    Operator,
    Viewer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Resource for User {
    const PATH: &'static str = "user";
    const LABEL: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for User {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("username", "Username", |u: &User| u.username.as_str().into()),
            Column::new("name", "Name", |u: &User| u.name.as_str().into()),
            Column::new("email", "Email", |u: &User| u.email.as_str().into()),
            Column::new("role", "Role", |u: &User| u.role.to_string().into()),
            Column::new("active", "Active", |u: &User| CellValue::Bool(u.active)).not_filterable(),
        ]
    }
}
