//! End-to-end panel flows: access gate, catalog rendering, product
//! management and cart, over HTTP against the mock backend.
//!
//! Run with: cargo test -p catalog-panel-integration-tests

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use catalog_panel::catalog::{CatalogView, FormMode, SubmitOutcome};
use catalog_panel::panel::messages;
use catalog_panel::session::{SessionManager, keys};
use catalog_panel::storage::{FileStore, Scope, Storage};
use catalog_panel::{PanelError, PanelView};
use catalog_panel_core::{ProductId, Role};
use catalog_panel_integration_tests::{
    FALLBACK_IMAGE, MockBackend, RecordingUi, UiEvent, VALID_TOKEN, logged_in_storage, panel,
};
use serde_json::{Value, json};

fn catalog() -> Vec<Value> {
    vec![
        json!({"id": 1, "nome": "Caneca", "preco": "19.90", "quantidade": 3, "status": 1, "imagem": "http://img/1.png"}),
        json!({"id": 2, "nome": "Camiseta", "preco": "49", "quantidade": 0, "status": 0, "imagem": ""}),
    ]
}

// ============================================================================
// Access gate
// ============================================================================

#[tokio::test]
async fn test_admin_start_shows_management_list() {
    let backend = MockBackend::start(json!(2), catalog()).await;
    let storage = logged_in_storage(VALID_TOKEN);
    let mut panel = panel(&backend, RecordingUi::default(), storage.clone());

    let view = panel.start().await.unwrap();

    assert_eq!(view, PanelView::Admin);
    assert_eq!(
        panel.ui().events[..2],
        [UiEvent::CartCount(0), UiEvent::View(PanelView::Admin)]
    );
    let Some(CatalogView::Management(rows)) = panel.ui().last_catalog() else {
        panic!("expected management list");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].status_label(), "Inactive");
    assert_eq!(
        SessionManager::new(storage).cached_role().unwrap(),
        Some(Role::Admin)
    );
    assert_eq!(backend.request_lines(), vec!["GET /me", "GET /produto"]);
}

#[tokio::test]
async fn test_user_start_shows_grid_with_fallback_image() {
    let backend = MockBackend::start(json!("1"), catalog()).await;
    let mut panel = panel(
        &backend,
        RecordingUi::default(),
        logged_in_storage(VALID_TOKEN),
    );

    assert_eq!(panel.start().await.unwrap(), PanelView::User);

    let Some(CatalogView::Grid(cards)) = panel.ui().last_catalog() else {
        panic!("expected product grid");
    };
    assert_eq!(cards[0].add_to_cart_target(), Some(ProductId::new(1)));
    assert_eq!(cards[1].add_to_cart_target(), None);
    assert_eq!(cards[1].image_url, FALLBACK_IMAGE);
}

#[tokio::test]
async fn test_null_account_status_falls_back_to_user_view() {
    let backend = MockBackend::start(json!(null), catalog()).await;
    let storage = logged_in_storage(VALID_TOKEN);
    let mut panel = panel(&backend, RecordingUi::default(), storage.clone());

    assert_eq!(panel.check_admin_status().await.unwrap(), PanelView::User);
    assert!(!panel.ui().went_to_login());
    assert!(storage.get(Scope::Device, keys::TOKEN).unwrap().is_some());
}

#[tokio::test]
async fn test_rejected_token_clears_session_and_goes_to_login() {
    let backend = MockBackend::admin().await;
    let storage = logged_in_storage("stale-token");
    let mut panel = panel(&backend, RecordingUi::default(), storage.clone());

    let err = panel.check_admin_status().await.unwrap_err();

    assert!(err.requires_login());
    assert!(panel.ui().went_to_login());
    for key in [keys::TOKEN, keys::LOGIN_TIME, keys::USER_STATUS] {
        assert!(storage.get(Scope::Session, key).unwrap().is_none());
        assert!(storage.get(Scope::Device, key).unwrap().is_none());
    }
}

#[tokio::test]
async fn test_missing_token_never_reaches_backend() {
    let backend = MockBackend::admin().await;
    let mut panel = panel(&backend, RecordingUi::default(), Storage::in_memory());

    let err = panel.check_admin_status().await.unwrap_err();

    assert!(matches!(err, PanelError::Gate(_)));
    assert!(panel.ui().went_to_login());
    assert!(backend.requests().is_empty());
}

// ============================================================================
// Product management
// ============================================================================

#[tokio::test]
async fn test_create_then_edit_product() {
    let backend = MockBackend::admin().await;
    let mut panel = panel(
        &backend,
        RecordingUi::default(),
        logged_in_storage(VALID_TOKEN),
    );
    panel.check_admin_status().await.unwrap();

    let form = panel.form_mut();
    form.name = "Caneca".to_string();
    form.price = "19.90".to_string();
    form.quantity = "3".to_string();
    form.status = "1".to_string();

    let outcome = panel.submit_product_form().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Created);
    assert_eq!(panel.form().mode(), FormMode::Create);
    assert!(panel.form().name.is_empty());
    assert_eq!(panel.ui().alerts(), vec![messages::PRODUCT_CREATED]);
    assert!(matches!(
        panel.ui().last_catalog(),
        Some(CatalogView::Management(rows)) if rows.len() == 1
    ));

    let id = ProductId::new(backend.products()[0]["id"].as_i64().unwrap());
    panel.edit_product(id).await.unwrap();
    assert_eq!(panel.form().mode(), FormMode::Update(id));
    assert_eq!(panel.form().name, "Caneca");

    panel.form_mut().quantity = "0".to_string();
    let outcome = panel.submit_product_form().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Updated(id));
    assert_eq!(backend.products()[0]["quantidade"], json!(0));

    let lines = backend.request_lines();
    assert!(lines.contains(&"POST /produto".to_string()));
    assert!(lines.contains(&format!("PUT /produto/{id}")));
}

#[tokio::test]
async fn test_failed_save_keeps_form_and_alerts() {
    let backend = MockBackend::admin().await;
    let mut panel = panel(
        &backend,
        RecordingUi::default(),
        logged_in_storage("stale-token"),
    );
    panel.form_mut().name = "Caneca".to_string();

    assert!(panel.submit_product_form().await.is_err());

    assert_eq!(panel.ui().alerts(), vec![messages::SAVE_FAILED]);
    assert_eq!(panel.form().name, "Caneca");
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let backend = MockBackend::start(json!(2), catalog()).await;
    let storage = logged_in_storage(VALID_TOKEN);

    let mut declining = panel(&backend, RecordingUi::default(), storage.clone());
    assert!(!declining.delete_product(ProductId::new(1)).await.unwrap());
    assert!(backend.requests().is_empty());

    let mut confirming = panel(&backend, RecordingUi::confirming(), storage);
    assert!(confirming.delete_product(ProductId::new(1)).await.unwrap());
    assert_eq!(confirming.ui().alerts(), vec![messages::PRODUCT_DELETED]);
    assert_eq!(backend.products().len(), 1);
    assert_eq!(
        backend.request_lines(),
        vec!["DELETE /produto/1", "GET /produto"]
    );
}

// ============================================================================
// Cart and persistence
// ============================================================================

#[tokio::test]
async fn test_cart_is_local_only() {
    let backend = MockBackend::user().await;
    let mut panel = panel(
        &backend,
        RecordingUi::default(),
        logged_in_storage(VALID_TOKEN),
    );

    panel.add_to_cart(ProductId::new(42)).unwrap();
    panel.add_to_cart(ProductId::new(42)).unwrap();
    let count = panel.add_to_cart(ProductId::new(7)).unwrap();

    assert_eq!(count, 3);
    assert_eq!(panel.cart().entries().unwrap().len(), 2);
    assert_eq!(panel.ui().alerts().len(), 3);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_file_storage_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MockBackend::start(json!(2), catalog()).await;
    let open = || {
        Storage::new(
            Arc::new(FileStore::in_dir(&dir.path().join("session"))),
            Arc::new(FileStore::in_dir(&dir.path().join("device"))),
        )
    };

    let storage = open();
    SessionManager::new(storage.clone())
        .set_token(&secrecy::SecretString::from(VALID_TOKEN.to_string()))
        .unwrap();
    let mut first = panel(&backend, RecordingUi::default(), storage);
    first.add_to_cart(ProductId::new(1)).unwrap();
    first.check_admin_status().await.unwrap();
    drop(first);

    let mut second = panel(&backend, RecordingUi::default(), open());
    assert_eq!(second.update_cart_count().unwrap(), 1);
    assert_eq!(second.session().cached_role().unwrap(), Some(Role::Admin));
    assert_eq!(second.check_admin_status().await.unwrap(), PanelView::Admin);

    second.logout().unwrap();
    assert!(open().get(Scope::Device, keys::TOKEN).unwrap().is_none());
    assert_eq!(second.cart().count().unwrap(), 1);
}
