use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{validate_non_negative_decimal, validate_percentage};
use crate::client::Resource;
use crate::services::pricing::{compute_totals, DocumentTotals, Priced};
use crate::table::{Column, Tabular};

/// Enum representing the possible statuses of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum OrderStatus {
    Pending,
    Ordered,
    #[strum(serialize = "Partially received")]
    PartiallyReceived,
    Received,
    Cancelled,
}

/// Purchase orders go to providers; delivery orders move stock out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum OrderType {
    Purchase,
    Delivery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    #[serde(default)]
    pub article_id: Option<Uuid>,
    #[serde(default)]
    pub spare_part_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom = "validate_non_negative_decimal")]
    pub quantity: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_non_negative_decimal")]
    pub quantity_received: Decimal,
    #[validate(custom = "validate_non_negative_decimal")]
    pub unit_price: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_percentage")]
    pub discount: Option<Decimal>,
    #[serde(default)]
    #[validate(custom = "validate_percentage")]
    pub tax_percentage: Option<Decimal>,
}

impl OrderItem {
    pub fn pending_quantity(&self) -> Decimal {
        (self.quantity - self.quantity_received).max(Decimal::ZERO)
    }
}

impl Priced for OrderItem {
    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn discount(&self) -> Option<Decimal> {
        self.discount
    }

    fn tax_percentage(&self) -> Option<Decimal> {
        self.tax_percentage
    }
}

/// The `order` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    pub provider_id: Uuid,
    pub date: DateTime<Utc>,
    pub order_type: OrderType,
    pub status: OrderStatus,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    #[validate]
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn totals(&self) -> DocumentTotals {
        compute_totals(&self.items)
    }

    pub fn is_fully_received(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| i.pending_quantity().is_zero())
    }

    /// Status implied by the received quantities; cancelled orders stay cancelled.
    pub fn reception_status(&self) -> OrderStatus {
        if self.status == OrderStatus::Cancelled {
            return OrderStatus::Cancelled;
        }
        if self.is_fully_received() {
            OrderStatus::Received
        } else if self.items.iter().any(|i| i.quantity_received > Decimal::ZERO) {
            OrderStatus::PartiallyReceived
        } else {
            self.status
        }
    }
}

impl Resource for Order {
    const PATH: &'static str = "order";
    const LABEL: &'static str = "Order";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for Order {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |o: &Order| o.code.as_str().into()),
            Column::new("date", "Date", |o: &Order| o.date.into()),
            Column::new("type", "Type", |o: &Order| o.order_type.to_string().into()),
            Column::new("status", "Status", |o: &Order| o.status.to_string().into()),
            Column::new("total", "Total", |o: &Order| o.totals().total.into()).totalized(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: Decimal, received: Decimal) -> OrderItem {
        OrderItem {
            id: Uuid::new_v4(),
            article_id: None,
            spare_part_id: Some(Uuid::new_v4()),
            description: "V-belt A42".into(),
            quantity,
            quantity_received: received,
            unit_price: dec!(12),
            discount: Some(dec!(5)),
            tax_percentage: Some(dec!(21)),
        }
    }

    fn order(items: Vec<OrderItem>) -> Order {
        Order {
            id: Uuid::new_v4(),
            code: "PO-0042".into(),
            provider_id: Uuid::new_v4(),
            date: Utc::now(),
            order_type: OrderType::Purchase,
            status: OrderStatus::Ordered,
            comment: None,
            items,
        }
    }

    #[test]
    fn over_received_item_has_no_pending_quantity() {
        assert_eq!(item(dec!(4), dec!(6)).pending_quantity(), Decimal::ZERO);
    }

    #[test]
    fn reception_status_tracks_items() {
        assert_eq!(
            order(vec![item(dec!(4), dec!(0))]).reception_status(),
            OrderStatus::Ordered
        );
        assert_eq!(
            order(vec![item(dec!(4), dec!(1)), item(dec!(2), dec!(0))]).reception_status(),
            OrderStatus::PartiallyReceived
        );
        assert_eq!(
            order(vec![item(dec!(4), dec!(4))]).reception_status(),
            OrderStatus::Received
        );
    }

    #[test]
    fn totals_apply_discount_before_tax() {
        let totals = order(vec![item(dec!(10), dec!(0))]).totals();
        assert_eq!(totals.subtotal, dec!(114));
        assert_eq!(totals.tax_total, dec!(23.94));
        assert_eq!(totals.total, dec!(137.94));
    }
}
