use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

use super::operator::Operator;
use super::validate_non_negative_decimal;
use crate::client::Resource;
use crate::table::{Column, Tabular};

/// Lifecycle state of a work order. Transitions are owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum WorkOrderState {
    Requested,
    Waiting,
    #[strum(serialize = "On going")]
    OnGoing,
    Paused,
    #[strum(serialize = "Pending to validate")]
    PendingToValidate,
    Finished,
    Cancelled,
}

impl WorkOrderState {
    pub fn is_open(&self) -> bool {
        !matches!(self, WorkOrderState::Finished | WorkOrderState::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum WorkOrderType {
    Corrective,
    Preventive,
    Predictive,
    Ticket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, strum::Display)]
pub enum InspectionResult {
    Pending,
    Ok,
    #[serde(rename = "NOk")]
    #[strum(serialize = "NOk")]
    NOk,
    #[strum(serialize = "N/A")]
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InspectionPoint {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub description: String,
    pub result: InspectionResult,
    #[serde(default)]
    pub observations: Option<String>,
}

/// A stretch of time an operator spent on the work order. Open while `end` is
/// missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderOperatorTime {
    pub operator_id: Uuid,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl WorkOrderOperatorTime {
    pub fn minutes(&self) -> Option<i64> {
        self.end.map(|end| (end - self.start).num_minutes().max(0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderSparePart {
    pub spare_part_id: Uuid,
    #[serde(default)]
    pub code: Option<String>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub quantity: Decimal,
    #[validate(custom = "validate_non_negative_decimal")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub machine_id: Uuid,
    #[serde(default)]
    pub preventive_id: Option<Uuid>,
    pub work_order_type: WorkOrderType,
    pub state: WorkOrderState,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate]
    pub operator_times: Vec<WorkOrderOperatorTime>,
    #[serde(default)]
    #[validate]
    pub spare_parts: Vec<WorkOrderSparePart>,
    #[serde(default)]
    #[validate]
    pub inspection_points: Vec<InspectionPoint>,
}

impl WorkOrder {
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Minutes over closed operator intervals.
    pub fn labor_minutes(&self) -> i64 {
        self.operator_times.iter().filter_map(|t| t.minutes()).sum()
    }

    /// Labour cost using each operator's hourly rate. Operators without a rate
    /// or missing from `operators` contribute nothing.
    pub fn labor_cost(&self, operators: &[Operator]) -> Decimal {
        self.operator_times
            .iter()
            .filter_map(|time| {
                let minutes = time.minutes()?;
                let rate = operators
                    .iter()
                    .find(|o| o.id == time.operator_id)?
                    .price_hour?;
                Some(Decimal::from(minutes) * rate / Decimal::from(60))
            })
            .sum()
    }

    pub fn spare_parts_cost(&self) -> Decimal {
        self.spare_parts
            .iter()
            .map(|p| p.quantity * p.unit_price)
            .sum()
    }

    pub fn inspection_summary(&self) -> BTreeMap<InspectionResult, usize> {
        let mut summary = BTreeMap::new();
        for point in &self.inspection_points {
            *summary.entry(point.result).or_insert(0) += 1;
        }
        summary
    }

    pub fn operator_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.operator_times.iter().map(|t| t.operator_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

impl Resource for WorkOrder {
    const PATH: &'static str = "workorder";
    const LABEL: &'static str = "Work order";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for WorkOrder {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |w: &WorkOrder| w.code.as_str().into()),
            Column::new("description", "Description", |w: &WorkOrder| {
                w.description.clone().into()
            }),
            Column::new("type", "Type", |w: &WorkOrder| w.work_order_type.to_string().into()),
            Column::new("state", "State", |w: &WorkOrder| w.state.to_string().into()),
            Column::new("startTime", "Start", |w: &WorkOrder| w.start_time.into()),
            Column::new("endTime", "End", |w: &WorkOrder| w.end_time.into()),
            Column::new("laborMinutes", "Minutes", |w: &WorkOrder| {
                Decimal::from(w.labor_minutes()).into()
            })
            .totalized(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, hour, minute, 0).unwrap()
    }

    fn operator(price_hour: Option<Decimal>) -> Operator {
        Operator {
            id: Uuid::new_v4(),
            code: "OP1".into(),
            name: "Marta".into(),
            operator_type: None,
            price_hour,
            active: true,
        }
    }

    fn work_order(operators: &[Operator]) -> WorkOrder {
        WorkOrder {
            id: Uuid::new_v4(),
            code: "WO-1001".into(),
            description: Some("Replace conveyor belt".into()),
            machine_id: Uuid::new_v4(),
            preventive_id: None,
            work_order_type: WorkOrderType::Corrective,
            state: WorkOrderState::OnGoing,
            start_time: Some(at(8, 0)),
            end_time: None,
            operator_times: vec![
                WorkOrderOperatorTime {
                    operator_id: operators[0].id,
                    start: at(8, 0),
                    end: Some(at(9, 30)),
                },
                WorkOrderOperatorTime {
                    operator_id: operators[1].id,
                    start: at(8, 15),
                    end: Some(at(8, 45)),
                },
                WorkOrderOperatorTime {
                    operator_id: operators[0].id,
                    start: at(10, 0),
                    end: None,
                },
            ],
            spare_parts: vec![WorkOrderSparePart {
                spare_part_id: Uuid::new_v4(),
                code: Some("BELT-A42".into()),
                quantity: dec!(2),
                unit_price: dec!(18.5),
            }],
            inspection_points: vec![
                InspectionPoint {
                    id: Uuid::new_v4(),
                    description: "Belt tension".into(),
                    result: InspectionResult::Ok,
                    observations: None,
                },
                InspectionPoint {
                    id: Uuid::new_v4(),
                    description: "Roller wear".into(),
                    result: InspectionResult::NOk,
                    observations: Some("Replace next stop".into()),
                },
                InspectionPoint {
                    id: Uuid::new_v4(),
                    description: "Guards".into(),
                    result: InspectionResult::Ok,
                    observations: None,
                },
            ],
        }
    }

    #[test]
    fn labor_ignores_open_intervals() {
        let ops = vec![operator(Some(dec!(30))), operator(None)];
        let wo = work_order(&ops);
        assert_eq!(wo.labor_minutes(), 120);
        assert_eq!(wo.labor_cost(&ops), dec!(45));
        assert_eq!(wo.operator_ids().len(), 2);
    }

    #[test]
    fn negative_interval_counts_as_zero() {
        let time = WorkOrderOperatorTime {
            operator_id: Uuid::new_v4(),
            start: at(10, 0),
            end: Some(at(10, 0) - Duration::minutes(5)),
        };
        assert_eq!(time.minutes(), Some(0));
    }

    #[test]
    fn costs_and_inspections() {
        let ops = vec![operator(None), operator(None)];
        let wo = work_order(&ops);
        assert_eq!(wo.spare_parts_cost(), dec!(37));
        let summary = wo.inspection_summary();
        assert_eq!(summary[&InspectionResult::Ok], 2);
        assert_eq!(summary[&InspectionResult::NOk], 1);
        assert!(wo.is_open());
    }

    #[test]
    fn finished_and_cancelled_are_closed() {
        assert!(!WorkOrderState::Finished.is_open());
        assert!(!WorkOrderState::Cancelled.is_open());
        assert!(WorkOrderState::Paused.is_open());
    }
}
