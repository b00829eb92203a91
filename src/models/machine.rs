use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::default_true;
use crate::client::Resource;
use crate::errors::ServiceError;
use crate::table::{CellValue, Column, Tabular};

/// Machine status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum MachineStatus {
    Operational,
    #[strum(serialize = "Under Maintenance")]
    UnderMaintenance,
    Breakdown,
    Retired,
}

impl FromStr for MachineStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-', '_'], "").as_str() {
            "operational" => Ok(MachineStatus::Operational),
            "undermaintenance" => Ok(MachineStatus::UnderMaintenance),
            "breakdown" => Ok(MachineStatus::Breakdown),
            "retired" => Ok(MachineStatus::Retired),
            _ => Err(ServiceError::InvalidInput(format!(
                "Invalid machine status: {}",
                s
            ))),
        }
    }
}

/// An asset under maintenance. Machines may hang from a parent asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: Uuid,
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub status: MachineStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Machine {
    /// A machine that is stopped for a known cause.
    pub fn is_stopped(&self) -> bool {
        matches!(
            self.status,
            MachineStatus::Breakdown | MachineStatus::UnderMaintenance
        )
    }
}

impl Resource for Machine {
    const PATH: &'static str = "machine";
    const LABEL: &'static str = "Machine";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for Machine {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |m: &Machine| m.code.as_str().into()),
            Column::new("description", "Description", |m: &Machine| {
                m.description.as_str().into()
            }),
            Column::new("status", "Status", |m: &Machine| m.status.to_string().into()),
            Column::new("location", "Location", |m: &Machine| m.location.clone().into()),
            Column::new("brand", "Brand", |m: &Machine| m.brand.clone().into()),
            Column::new("serialNumber", "Serial number", |m: &Machine| {
                m.serial_number.clone().into()
            })
            .not_sortable(),
            Column::new("active", "Active", |m: &Machine| CellValue::Bool(m.active))
                .not_filterable(),
        ]
    }
}
