//! Test doubles shared by the unit tests.

use std::str::FromStr;
use std::sync::Mutex;

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};

use catalog_panel_core::{Product, ProductId, ProductStatus, Role};

use crate::api::{AccountStatus, ApiError, CatalogApi, ProductPayload};
use crate::catalog::{CatalogView, ProductForm};
use crate::gate::PanelView;
use crate::ui::PanelUi;

/// Two products: one in stock and active, one sold out and inactive.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Caneca".to_string(),
            price: Decimal::from_str("19.90").unwrap(),
            quantity: 3,
            status: ProductStatus::Active,
            image_url: Some("http://img/1.png".to_string()),
        },
        Product {
            id: ProductId::new(2),
            name: "Camiseta".to_string(),
            price: Decimal::from_str("49").unwrap(),
            quantity: 0,
            status: ProductStatus::Inactive,
            image_url: None,
        },
    ]
}

#[derive(Default)]
struct FakeState {
    calls: Vec<String>,
    tokens: Vec<String>,
    last_payload: Option<ProductPayload>,
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct FakeApi {
    role: Role,
    me_status: Option<u16>,
    mutation_status: Option<u16>,
    list_status: Option<u16>,
    unreachable: bool,
    products: Vec<Product>,
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Make `/me` answer with a non-success status.
    pub fn with_me_status(mut self, status: u16) -> Self {
        self.me_status = Some(status);
        self
    }

    /// Make create, update and delete answer with a non-success status.
    pub fn with_mutation_status(mut self, status: u16) -> Self {
        self.mutation_status = Some(status);
        self
    }

    /// Make the product listing answer with a non-success status.
    pub fn with_list_status(mut self, status: u16) -> Self {
        self.list_status = Some(status);
        self
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    /// Fail every call before a response is received.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn tokens_seen(&self) -> Vec<String> {
        self.state.lock().unwrap().tokens.clone()
    }

    pub fn last_payload(&self) -> Option<ProductPayload> {
        self.state.lock().unwrap().last_payload.clone()
    }

    fn record(&self, call: String, token: &SecretString) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.tokens.push(token.expose_secret().to_string());
        if self.unreachable {
            return Err(ApiError::Parse("connection refused".to_string()));
        }
        Ok(())
    }

    fn mutation_result(&self) -> Result<(), ApiError> {
        match self.mutation_status {
            Some(status) => Err(ApiError::Api {
                status,
                message: "rejected".to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl CatalogApi for FakeApi {
    async fn me(&self, token: &SecretString) -> Result<AccountStatus, ApiError> {
        self.record("GET /me".to_string(), token)?;
        match self.me_status {
            Some(status) => Err(ApiError::Api {
                status,
                message: "unauthorized".to_string(),
            }),
            None => Ok(AccountStatus { status: self.role }),
        }
    }

    async fn list_products(&self, token: &SecretString) -> Result<Vec<Product>, ApiError> {
        self.record("GET /produto".to_string(), token)?;
        match self.list_status {
            Some(status) => Err(ApiError::Api {
                status,
                message: "listing failed".to_string(),
            }),
            None => Ok(self.products.clone()),
        }
    }

    async fn get_product(&self, token: &SecretString, id: ProductId) -> Result<Product, ApiError> {
        self.record(format!("GET /produto/{id}"), token)?;
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Api {
                status: 404,
                message: "not found".to_string(),
            })
    }

    async fn create_product(
        &self,
        token: &SecretString,
        payload: &ProductPayload,
    ) -> Result<(), ApiError> {
        self.record("POST /produto".to_string(), token)?;
        self.state.lock().unwrap().last_payload = Some(payload.clone());
        self.mutation_result()
    }

    async fn update_product(
        &self,
        token: &SecretString,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), ApiError> {
        self.record(format!("PUT /produto/{id}"), token)?;
        self.state.lock().unwrap().last_payload = Some(payload.clone());
        self.mutation_result()
    }

    async fn delete_product(&self, token: &SecretString, id: ProductId) -> Result<(), ApiError> {
        self.record(format!("DELETE /produto/{id}"), token)?;
        self.mutation_result()
    }
}

/// Something the panel asked the UI to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    View(PanelView),
    Catalog(CatalogView),
    Form(ProductForm),
    CartCount(u32),
    Alert(String),
    Confirm(String),
    Login,
}

/// UI adapter that records calls and answers confirmations with a fixed
/// reply.
#[derive(Debug, Default)]
pub struct RecordingUi {
    events: Vec<UiEvent>,
    confirm_reply: bool,
}

impl RecordingUi {
    /// A UI that answers "yes" to every confirmation.
    pub fn confirming() -> Self {
        Self {
            events: Vec::new(),
            confirm_reply: true,
        }
    }

    /// Events except form redraws and confirmations.
    pub fn events(&self) -> Vec<UiEvent> {
        self.events
            .iter()
            .filter(|e| !matches!(e, UiEvent::Form(_) | UiEvent::Confirm(_)))
            .cloned()
            .collect()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Alert(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_cart_count(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|e| match e {
            UiEvent::CartCount(count) => Some(*count),
            _ => None,
        })
    }
}

impl PanelUi for RecordingUi {
    fn show_view(&mut self, view: PanelView) {
        self.events.push(UiEvent::View(view));
    }

    fn render_catalog(&mut self, catalog: &CatalogView) {
        self.events.push(UiEvent::Catalog(catalog.clone()));
    }

    fn show_form(&mut self, form: &ProductForm) {
        self.events.push(UiEvent::Form(form.clone()));
    }

    fn set_cart_count(&mut self, count: u32) {
        self.events.push(UiEvent::CartCount(count));
    }

    fn alert(&mut self, message: &str) {
        self.events.push(UiEvent::Alert(message.to_string()));
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.events.push(UiEvent::Confirm(message.to_string()));
        self.confirm_reply
    }

    fn navigate_to_login(&mut self) {
        self.events.push(UiEvent::Login);
    }
}
