//! Maintenance planning views built from fetched collections: what to
//! restock, which preventive schedules are due and how much a work order cost.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Operator, Preventive, SparePart, WorkOrder};
use crate::table::{Column, Tabular};

/// A spare part that fell below its minimum stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockLine {
    pub spare_part_id: Uuid,
    pub code: String,
    pub description: String,
    pub provider_id: Option<Uuid>,
    pub stock: Decimal,
    pub minimum_stock: Decimal,
    pub quantity: Decimal,
    pub estimated_cost: Decimal,
}

/// Active parts needing restock, ordered by code.
pub fn restock_plan(parts: &[SparePart]) -> Vec<RestockLine> {
    let mut lines: Vec<RestockLine> = parts
        .iter()
        .filter(|p| p.active && p.needs_restock())
        .map(|p| {
            let quantity = p.restock_quantity();
            RestockLine {
                spare_part_id: p.id,
                code: p.code.clone(),
                description: p.description.clone(),
                provider_id: p.provider_id,
                stock: p.stock,
                minimum_stock: p.minimum_stock,
                quantity,
                estimated_cost: quantity * p.price,
            }
        })
        .collect();
    lines.sort_by(|a, b| a.code.cmp(&b.code));
    lines
}

impl Tabular for RestockLine {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |r: &RestockLine| r.code.as_str().into()),
            Column::new("description", "Description", |r: &RestockLine| {
                r.description.as_str().into()
            }),
            Column::new("stock", "Stock", |r: &RestockLine| r.stock.into()),
            Column::new("minimumStock", "Min.", |r: &RestockLine| r.minimum_stock.into()),
            Column::new("quantity", "To order", |r: &RestockLine| r.quantity.into()),
            Column::new("estimatedCost", "Est. cost", |r: &RestockLine| {
                r.estimated_cost.into()
            })
            .totalized(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuePreventive {
    pub preventive_id: Uuid,
    pub code: String,
    pub description: String,
    pub machine_id: Uuid,
    pub next_execution: DateTime<Utc>,
    pub days_overdue: i64,
}

/// Active schedules whose next execution is at or before `now`, most overdue
/// first.
pub fn due_preventives(preventives: &[Preventive], now: DateTime<Utc>) -> Vec<DuePreventive> {
    let mut due: Vec<DuePreventive> = preventives
        .iter()
        .filter(|p| p.is_due(now))
        .map(|p| DuePreventive {
            preventive_id: p.id,
            code: p.code.clone(),
            description: p.description.clone(),
            machine_id: p.machine_id,
            next_execution: p.next_execution(),
            days_overdue: -p.days_until_due(now),
        })
        .collect();
    due.sort_by(|a, b| a.next_execution.cmp(&b.next_execution));
    due
}

impl Tabular for DuePreventive {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |p: &DuePreventive| p.code.as_str().into()),
            Column::new("description", "Description", |p: &DuePreventive| {
                p.description.as_str().into()
            }),
            Column::new("nextExecution", "Due", |p: &DuePreventive| {
                p.next_execution.into()
            }),
            Column::new("daysOverdue", "Days overdue", |p: &DuePreventive| {
                Decimal::from(p.days_overdue).into()
            }),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderCost {
    pub labor_minutes: i64,
    pub labor: Decimal,
    pub spare_parts: Decimal,
    pub total: Decimal,
}

pub fn work_order_cost(work_order: &WorkOrder, operators: &[Operator]) -> WorkOrderCost {
    let labor = work_order.labor_cost(operators);
    let spare_parts = work_order.spare_parts_cost();
    WorkOrderCost {
        labor_minutes: work_order.labor_minutes(),
        labor,
        spare_parts,
        total: labor + spare_parts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn part(code: &str, stock: Decimal, min: Decimal, max: Decimal) -> SparePart {
        SparePart {
            id: Uuid::new_v4(),
            code: code.into(),
            description: format!("Part {}", code),
            provider_id: None,
            ref_provider: None,
            stock,
            minimum_stock: min,
            maximum_stock: max,
            price: dec!(2.5),
            location: None,
            active: true,
        }
    }

    #[test]
    fn restock_plan_lists_only_parts_below_minimum() {
        let parts = vec![
            part("SEAL-30", dec!(1), dec!(4), dec!(10)),
            part("BRG-6204", dec!(8), dec!(4), dec!(10)),
            part("BELT-A42", dec!(0), dec!(2), dec!(6)),
        ];
        let plan = restock_plan(&parts);
        let codes: Vec<&str> = plan.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["BELT-A42", "SEAL-30"]);
        assert_eq!(plan[0].quantity, dec!(6));
        assert_eq!(plan[0].estimated_cost, dec!(15));
        assert_eq!(plan[1].quantity, dec!(9));
    }

    #[test]
    fn restock_plan_skips_inactive_parts() {
        let mut retired = part("OLD-1", dec!(0), dec!(4), dec!(10));
        retired.active = false;
        let plan = restock_plan(&[retired, part("NEW-1", dec!(0), dec!(4), dec!(10))]);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].code, "NEW-1");
    }

    #[test]
    fn due_preventives_are_ordered_by_due_date() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let schedule = |code: &str, last_days_ago: i64, frequency: u32| Preventive {
            id: Uuid::new_v4(),
            code: code.into(),
            description: "Lubrication".into(),
            machine_id: Uuid::new_v4(),
            frequency_days: frequency,
            start_execution: now - Duration::days(365),
            last_execution: Some(now - Duration::days(last_days_ago)),
            active: true,
            operator_ids: vec![],
            inspection_point_ids: vec![],
        };
        let preventives = vec![
            schedule("P-1", 10, 7),
            schedule("P-2", 40, 30),
            schedule("P-3", 2, 30),
        ];
        let due = due_preventives(&preventives, now);
        let codes: Vec<&str> = due.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["P-2", "P-1"]);
        assert_eq!(due[0].days_overdue, 10);
        assert_eq!(due[1].days_overdue, 3);
    }

    #[test]
    fn never_run_schedules_wait_one_period_from_start() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let schedule = |code: &str, started_days_ago: i64| Preventive {
            id: Uuid::new_v4(),
            code: code.into(),
            description: "Filter change".into(),
            machine_id: Uuid::new_v4(),
            frequency_days: 30,
            start_execution: now - Duration::days(started_days_ago),
            last_execution: None,
            active: true,
            operator_ids: vec![],
            inspection_point_ids: vec![],
        };
        let due = due_preventives(&[schedule("NEW", 20), schedule("OLD", 45)], now);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].code, "OLD");
        assert_eq!(due[0].days_overdue, 15);
    }
}
