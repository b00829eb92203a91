use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::client::Resource;
use crate::table::{Column, Tabular};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum DowntimeCategory {
    Production,
    Maintenance,
    Quality,
    Supply,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DowntimeReason {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub category: DowntimeCategory,
}

/// An interval during which a machine was stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_interval"))]
pub struct Downtime {
    pub id: Uuid,
    pub machine_id: Uuid,
    #[serde(default)]
    pub work_order_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[validate]
    pub reason: DowntimeReason,
}

fn validate_interval(downtime: &Downtime) -> Result<(), ValidationError> {
    match downtime.end_time {
        Some(end) if end < downtime.start_time => {
            let mut err = ValidationError::new("downtime_interval");
            err.message = Some("Downtime cannot end before it starts".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl Downtime {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Length of the stop. Open downtimes are measured up to `now`.
    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        let end = self.end_time.unwrap_or(now);
        (end - self.start_time).max(Duration::zero())
    }
}

/// Total stopped time per reason category.
pub fn summarize_by_category(
    downtimes: &[Downtime],
    now: DateTime<Utc>,
) -> BTreeMap<DowntimeCategory, Duration> {
    let mut summary = BTreeMap::new();
    for downtime in downtimes {
        let total = summary
            .entry(downtime.reason.category)
            .or_insert_with(Duration::zero);
        *total = *total + downtime.duration(now);
    }
    summary
}

impl Resource for Downtime {
    const PATH: &'static str = "downtime";
    const LABEL: &'static str = "Downtime";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for Downtime {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("start", "Start", |d: &Downtime| d.start_time.into()),
            Column::new("end", "End", |d: &Downtime| d.end_time.into()),
            Column::new("reason", "Reason", |d: &Downtime| d.reason.description.as_str().into()),
            Column::new("category", "Category", |d: &Downtime| {
                d.reason.category.to_string().into()
            }),
            Column::new("minutes", "Minutes", |d: &Downtime| {
                rust_decimal::Decimal::from(d.duration(Utc::now()).num_minutes()).into()
            })
            .totalized(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn downtime(category: DowntimeCategory, start_h: u32, end_h: Option<u32>) -> Downtime {
        Downtime {
            id: Uuid::new_v4(),
            machine_id: Uuid::new_v4(),
            work_order_id: None,
            start_time: Utc.with_ymd_and_hms(2024, 5, 2, start_h, 0, 0).unwrap(),
            end_time: end_h.map(|h| Utc.with_ymd_and_hms(2024, 5, 2, h, 0, 0).unwrap()),
            reason: DowntimeReason {
                code: "R1".into(),
                description: "Stop".into(),
                category,
            },
        }
    }

    #[test]
    fn open_downtime_measured_until_now() {
        let d = downtime(DowntimeCategory::Maintenance, 8, None);
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 11, 0, 0).unwrap();
        assert!(d.is_open());
        assert_eq!(d.duration(now), Duration::hours(3));
    }

    #[test]
    fn summary_groups_by_category() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
        let downtimes = vec![
            downtime(DowntimeCategory::Maintenance, 8, Some(9)),
            downtime(DowntimeCategory::Quality, 9, Some(11)),
            downtime(DowntimeCategory::Maintenance, 10, None),
        ];
        let summary = summarize_by_category(&downtimes, now);
        assert_eq!(summary[&DowntimeCategory::Maintenance], Duration::hours(3));
        assert_eq!(summary[&DowntimeCategory::Quality], Duration::hours(2));
        assert!(!summary.contains_key(&DowntimeCategory::Supply));
    }

    #[test]
    fn end_before_start_fails_validation() {
        let d = downtime(DowntimeCategory::Production, 10, Some(9));
        assert!(d.validate().is_err());
    }
}
