mod common;

use async_trait::async_trait;
use maintenance_hub::{
    client::CrudApi,
    models::{Invoice, SparePart},
    views::{EditForm, FormMode, ListScreen},
    ServiceError,
};
use mockall::{mock, predicate::eq};
use rust_decimal_macros::dec;
use uuid::Uuid;

mock! {
    pub PartsApi {}

    #[async_trait]
    impl CrudApi<SparePart> for PartsApi {
        async fn get_all(&self) -> Result<Vec<SparePart>, ServiceError>;
        async fn get_by_id(&self, id: Uuid) -> Result<SparePart, ServiceError>;
        async fn create(&self, record: &SparePart) -> Result<SparePart, ServiceError>;
        async fn update(&self, record: &SparePart) -> Result<SparePart, ServiceError>;
        async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
    }
}

mock! {
    pub InvoiceApi {}

    #[async_trait]
    impl CrudApi<Invoice> for InvoiceApi {
        async fn get_all(&self) -> Result<Vec<Invoice>, ServiceError>;
        async fn get_by_id(&self, id: Uuid) -> Result<Invoice, ServiceError>;
        async fn create(&self, record: &Invoice) -> Result<Invoice, ServiceError>;
        async fn update(&self, record: &Invoice) -> Result<Invoice, ServiceError>;
        async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
    }
}

fn parts() -> Vec<SparePart> {
    vec![
        common::spare_part("BRG-6204", dec!(2), dec!(5), dec!(20)),
        common::spare_part("SEAL-30", dec!(9), dec!(4), dec!(10)),
    ]
}

#[tokio::test]
async fn list_load_fills_the_table() {
    let mut api = MockPartsApi::new();
    api.expect_get_all().times(1).returning(|| Ok(parts()));

    let mut screen = ListScreen::<SparePart>::new(10);
    assert!(screen.load(&api).await);
    assert_eq!(screen.rows().len(), 2);
    assert!(screen.error().is_none());
    assert_eq!(screen.table().page().total_rows, 2);
}

#[tokio::test]
async fn list_failure_clears_rows_and_stores_message() {
    let mut api = MockPartsApi::new();
    let mut calls = 0;
    api.expect_get_all().times(2).returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(parts())
        } else {
            Err(ServiceError::NotFound("Spare parts unavailable".into()))
        }
    });

    let mut screen = ListScreen::<SparePart>::new(10);
    assert!(screen.load(&api).await);
    assert!(!screen.load(&api).await);
    assert!(screen.rows().is_empty());
    assert_eq!(screen.error(), Some("Spare parts unavailable"));
}

#[tokio::test]
async fn list_keeps_query_across_reloads() {
    let mut api = MockPartsApi::new();
    api.expect_get_all().times(2).returning(|| Ok(parts()));

    let mut screen = ListScreen::<SparePart>::new(10);
    screen.load(&api).await;
    screen.table_mut().set_search("seal");
    screen.load(&api).await;
    assert_eq!(screen.table().query().search, "seal");
    assert_eq!(screen.table().visible_rows().len(), 1);
}

#[tokio::test]
async fn list_delete_drops_the_row() {
    let rows = parts();
    let target = rows[0].id;
    let mut api = MockPartsApi::new();
    api.expect_get_all().returning(move || Ok(rows.clone()));
    api.expect_delete()
        .with(eq(target))
        .times(1)
        .returning(|_| Ok(()));

    let mut screen = ListScreen::<SparePart>::new(10);
    screen.load(&api).await;
    assert!(screen.delete(&api, target).await);
    assert_eq!(screen.rows().len(), 1);
    assert!(screen.rows().iter().all(|p| p.id != target));
}

#[tokio::test]
async fn create_form_switches_to_edit_with_server_copy() {
    let draft = common::spare_part("BRG-6204", dec!(2), dec!(5), dec!(20));
    let mut server_copy = draft.clone();
    server_copy.location = Some("B-07".into());
    let returned = server_copy.clone();

    let mut api = MockPartsApi::new();
    api.expect_create()
        .times(1)
        .returning(move |_| Ok(returned.clone()));
    api.expect_update().times(0);

    let mut form = EditForm::create(draft);
    assert_eq!(form.mode(), FormMode::Create);
    assert!(form.save(&api).await);
    assert_eq!(form.mode(), FormMode::Edit(server_copy.id));
    assert_eq!(form.draft(), &server_copy);
}

#[tokio::test]
async fn failed_save_keeps_the_draft() {
    let draft = common::spare_part("BRG-6204", dec!(2), dec!(5), dec!(20));
    let mut api = MockPartsApi::new();
    api.expect_update()
        .times(1)
        .returning(|_| Err(ServiceError::Conflict("Code already used".into())));

    let mut form = EditForm::edit(draft.clone());
    form.draft_mut().stock = dec!(7);
    assert!(!form.save(&api).await);
    assert_eq!(form.error(), Some("Code already used"));
    assert_eq!(form.draft().stock, dec!(7));
    assert_eq!(form.mode(), FormMode::Edit(draft.id));
}

#[tokio::test]
async fn unsaved_forms_cannot_be_deleted() {
    let mut api = MockPartsApi::new();
    api.expect_delete().times(0);

    let mut form = EditForm::create(common::spare_part("X", dec!(0), dec!(0), dec!(0)));
    assert!(!form.delete(&api).await);
    assert!(form.error().is_some());
}

#[tokio::test]
async fn document_form_totals_follow_the_draft() {
    let invoice = common::reference_invoice();
    let id = invoice.id;
    let mut api = MockInvoiceApi::new();
    api.expect_get_by_id()
        .with(eq(id))
        .times(1)
        .returning(move |_| Ok(invoice.clone()));

    let mut form = EditForm::<Invoice>::open(&api, id).await.unwrap();
    let first = form.totals();
    assert_eq!(first.subtotal, dec!(24.5));
    assert_eq!(first.tax_total, dec!(5.145));
    assert_eq!(first.total, dec!(29.645));
    assert_eq!(form.totals(), first);

    form.draft_mut().items[0].quantity = dec!(3);
    assert_eq!(form.totals().subtotal, dec!(34.5));
}
