#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::{TimeZone, Utc};
use maintenance_hub::{
    mock::{self, MockStore},
    models::{Invoice, InvoiceStatus, Machine, MachineStatus, SalesLine, SparePart},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// Mock REST backend driven in-process through `oneshot`.
pub struct TestApp {
    router: Router,
    pub store: Arc<MockStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(MockStore::new())
    }

    pub fn with_seed(seed: Value) -> Self {
        Self::with_store(MockStore::from_seed(seed).expect("valid seed"))
    }

    fn with_store(store: MockStore) -> Self {
        let store = Arc::new(store);
        Self {
            router: mock::router(store.clone()),
            store,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }
}

pub async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body is not JSON")
}

pub fn spare_part(code: &str, stock: Decimal, minimum: Decimal, maximum: Decimal) -> SparePart {
    SparePart {
        id: Uuid::new_v4(),
        code: code.to_string(),
        description: format!("Spare part {}", code),
        provider_id: None,
        ref_provider: None,
        stock,
        minimum_stock: minimum,
        maximum_stock: maximum,
        price: dec!(4.75),
        location: Some("A-01".to_string()),
        active: true,
    }
}

pub fn machine(code: &str, status: MachineStatus) -> Machine {
    Machine {
        id: Uuid::new_v4(),
        code: code.to_string(),
        description: format!("Machine {}", code),
        status,
        location: Some("Plant 1".to_string()),
        brand: None,
        model: None,
        serial_number: None,
        parent_id: None,
        active: true,
    }
}

/// Invoice with the two reference lines: 2 x 10 at 21% and 1 x 5 with 10%
/// discount at 21%.
pub fn reference_invoice() -> Invoice {
    Invoice {
        id: Uuid::new_v4(),
        code: "INV-0001".to_string(),
        customer_id: Uuid::new_v4(),
        date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        due_date: None,
        status: InvoiceStatus::Pending,
        items: vec![
            SalesLine::new("Filter", dec!(2), dec!(10)).with_tax(dec!(21)),
            SalesLine::new("Gasket", dec!(1), dec!(5))
                .with_discount(dec!(10))
                .with_tax(dec!(21)),
        ],
        delivery_note_ids: vec![],
    }
}
