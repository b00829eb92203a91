//! Client, screens and planning helpers against a live mock server.

mod common;

use std::{sync::Arc, time::Duration};

use assert_matches::assert_matches;
use maintenance_hub::{
    client::ApiClient,
    mock::{self, MockStore},
    models::SparePart,
    services::maintenance::restock_plan,
    views::{EditForm, FormMode, ListScreen},
    ServiceError,
};
use rust_decimal_macros::dec;
use tokio::net::TcpListener;

async fn spawn_server() -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = mock::router(Arc::new(MockStore::new()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ApiClient::new(&format!("http://{}", addr), None, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn parts_flow_through_forms_lists_and_restock() {
    let client = spawn_server().await;
    let parts = client.service::<SparePart>();

    for part in [
        common::spare_part("BRG-6204", dec!(2), dec!(5), dec!(20)),
        common::spare_part("SEAL-30", dec!(9), dec!(4), dec!(10)),
    ] {
        let mut form = EditForm::create(part);
        assert!(form.save(&parts).await, "save failed: {:?}", form.error());
        assert_matches!(form.mode(), FormMode::Edit(_));
    }

    let mut screen = ListScreen::<SparePart>::new(25);
    assert!(screen.load(&parts).await);
    assert_eq!(screen.rows().len(), 2);

    let plan = restock_plan(screen.rows());
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].code, "BRG-6204");
    assert_eq!(plan[0].quantity, dec!(18));

    let bearing = plan[0].spare_part_id;
    let mut form = EditForm::<SparePart>::open(&parts, bearing).await.unwrap();
    form.draft_mut().stock = dec!(20);
    assert!(form.save(&parts).await);

    screen.load(&parts).await;
    assert!(restock_plan(screen.rows()).is_empty());

    assert!(form.delete(&parts).await);
    let err = parts.get_by_id(bearing).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}
