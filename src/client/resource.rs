use serde::{de::DeserializeOwned, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::errors::ServiceError;

/// A record exposed by the REST API under `/{PATH}`.
pub trait Resource:
    Serialize + DeserializeOwned + Validate + Clone + Send + Sync + 'static
{
    /// Collection path segment, e.g. `sparepart`.
    const PATH: &'static str;
    /// Human-readable singular name used in messages.
    const LABEL: &'static str;

    fn id(&self) -> Uuid;
}

/// Every collection the API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum ResourceKind {
    Article,
    Family,
    Provider,
    Customer,
    User,
    Machine,
    SparePart,
    WorkOrder,
    Operator,
    Preventive,
    Downtime,
    Order,
    Budget,
    Invoice,
    DeliveryNote,
}

impl ResourceKind {
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Article => "article",
            ResourceKind::Family => "family",
            ResourceKind::Provider => "provider",
            ResourceKind::Customer => "customer",
            ResourceKind::User => "user",
            ResourceKind::Machine => "machine",
            ResourceKind::SparePart => "sparepart",
            ResourceKind::WorkOrder => "workorder",
            ResourceKind::Operator => "operator",
            ResourceKind::Preventive => "preventive",
            ResourceKind::Downtime => "downtime",
            ResourceKind::Order => "order",
            ResourceKind::Budget => "budget",
            ResourceKind::Invoice => "invoice",
            ResourceKind::DeliveryNote => "deliverynote",
        }
    }

    pub fn all() -> impl Iterator<Item = ResourceKind> {
        <ResourceKind as strum::IntoEnumIterator>::iter()
    }
}

impl FromStr for ResourceKind {
    type Err = ServiceError;

    /// Accepts the path segment as well as dashed or underscored spellings
    /// (`spare-part`, `delivery_note`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace(['-', '_', ' '], "");
        Self::all()
            .find(|kind| kind.path() == normalized)
            .ok_or_else(|| ServiceError::InvalidInput(format!("Unknown resource: {}", s)))
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryNote, SparePart, WorkOrder};
    use assert_matches::assert_matches;

    #[test]
    fn kinds_match_record_paths() {
        assert_eq!(ResourceKind::SparePart.path(), SparePart::PATH);
        assert_eq!(ResourceKind::WorkOrder.path(), WorkOrder::PATH);
        assert_eq!(ResourceKind::DeliveryNote.path(), DeliveryNote::PATH);
        assert_eq!(ResourceKind::all().count(), 15);
    }

    #[test]
    fn parses_loose_spellings() {
        assert_eq!("spare-part".parse::<ResourceKind>().unwrap(), ResourceKind::SparePart);
        assert_eq!("Delivery_Note".parse::<ResourceKind>().unwrap(), ResourceKind::DeliveryNote);
        assert_matches!("gizmo".parse::<ResourceKind>(), Err(ServiceError::InvalidInput(_)));
    }
}
