use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::default_true;
use crate::client::Resource;
use crate::table::{CellValue, Column, Tabular};

/// Recurring maintenance schedule for a machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Preventive {
    pub id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub machine_id: Uuid,
    #[validate(range(min = 1, max = 3650))]
    pub frequency_days: u32,
    pub start_execution: DateTime<Utc>,
    #[serde(default)]
    pub last_execution: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub operator_ids: Vec<Uuid>,
    #[serde(default)]
    pub inspection_point_ids: Vec<Uuid>,
}

impl Preventive {
    /// Next run: one period after the last execution, or after the start date
    /// when it never ran.
    pub fn next_execution(&self) -> DateTime<Utc> {
        let base = self.last_execution.unwrap_or(self.start_execution);
        base + Duration::days(i64::from(self.frequency_days))
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.active && self.next_execution() <= now
    }

    /// Days until the next execution; negative when overdue.
    pub fn days_until_due(&self, now: DateTime<Utc>) -> i64 {
        (self.next_execution() - now).num_days()
    }
}

impl Resource for Preventive {
    const PATH: &'static str = "preventive";
    const LABEL: &'static str = "Preventive";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for Preventive {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |p: &Preventive| p.code.as_str().into()),
            Column::new("description", "Description", |p: &Preventive| {
                p.description.as_str().into()
            }),
            Column::new("frequencyDays", "Every (days)", |p: &Preventive| {
                p.frequency_days.into()
            }),
            Column::new("lastExecution", "Last run", |p: &Preventive| {
                p.last_execution.into()
            }),
            Column::new("nextExecution", "Next run", |p: &Preventive| {
                p.next_execution().into()
            }),
            Column::new("active", "Active", |p: &Preventive| CellValue::Bool(p.active))
                .not_filterable(),
        ]
    }
}
