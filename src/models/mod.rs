//! Records mirrored from the maintenance REST API.
//!
//! Every record is a flat serde struct with camelCase field names. Amounts and
//! quantities are exact decimals. The backend owns lifecycle and referential
//! consistency; helpers here are pure functions over fetched data.

use rust_decimal::Decimal;
use validator::ValidationError;

pub mod article;
pub mod budget;
pub mod customer;
pub mod delivery_note;
pub mod downtime;
pub mod family;
pub mod invoice;
pub mod machine;
pub mod operator;
pub mod order;
pub mod preventive;
pub mod provider;
pub mod spare_part;
pub mod user;
pub mod work_order;

pub use article::{Article, ArticleComponent, ArticleType};
pub use budget::{AssemblyArticle, AssemblyFolder, AssemblyNode, Budget, BudgetStatus};
pub use customer::Customer;
pub use delivery_note::{DeliveryNote, DeliveryNoteStatus};
pub use downtime::{Downtime, DowntimeCategory, DowntimeReason};
pub use family::Family;
pub use invoice::{Invoice, InvoiceStatus, SalesLine};
pub use machine::{Machine, MachineStatus};
pub use operator::Operator;
pub use order::{Order, OrderItem, OrderStatus, OrderType};
pub use preventive::Preventive;
pub use provider::Provider;
pub use spare_part::SparePart;
pub use user::{User, UserRole};
pub use work_order::{
    InspectionPoint, InspectionResult, WorkOrder, WorkOrderOperatorTime, WorkOrderSparePart,
    WorkOrderState, WorkOrderType,
};

pub(crate) fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Value must not be negative".into());
        return Err(err);
    }
    Ok(())
}

pub(crate) fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("percentage");
        err.message = Some("Percentage must be between 0 and 100".into());
        return Err(err);
    }
    Ok(())
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_one() -> Decimal {
    Decimal::ONE
}
