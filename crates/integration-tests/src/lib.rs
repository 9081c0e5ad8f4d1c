//! Integration tests for the catalog panel.
//!
//! The tests drive the real [`CatalogClient`] and [`Panel`] against
//! [`MockBackend`], an in-process axum server speaking the backend's REST
//! surface (`/me`, `/produto`, `/produto/{id}`) on `127.0.0.1:0`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-panel-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, Method, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use catalog_panel::api::CatalogClient;
use catalog_panel::catalog::{CatalogView, ProductForm};
use catalog_panel::session::SessionManager;
use catalog_panel::storage::Storage;
use catalog_panel::{Panel, PanelUi, PanelView};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use url::Url;

/// Token the mock backend accepts unless configured otherwise.
pub const VALID_TOKEN: &str = "valid-token";

/// Prefix of the image URL handed out for uploads.
const UPLOAD_URL_PREFIX: &str = "http://mock.local/uploads/";

// =============================================================================
// Mock backend
// =============================================================================

/// A file part received in a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    /// Raw `Authorization` header.
    pub authorization: Option<String>,
    /// Text parts of a multipart body.
    pub fields: BTreeMap<String, String>,
    pub file: Option<UploadedFile>,
}

#[derive(Debug)]
struct BackendState {
    token: String,
    account_status: Value,
    products: BTreeMap<i64, Value>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<BackendState>>;

fn lock(state: &Shared) -> MutexGuard<'_, BackendState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process stand-in for the catalog backend.
pub struct MockBackend {
    url: Url,
    state: Shared,
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Start a backend whose `/me` reports the admin status code.
    pub async fn admin() -> Self {
        Self::start(json!(2), Vec::new()).await
    }

    /// Start a backend whose `/me` reports a regular user.
    pub async fn user() -> Self {
        Self::start(json!(1), Vec::new()).await
    }

    /// Start a backend reporting `account_status` from `/me` and serving
    /// `products` (each must carry a numeric `id`).
    pub async fn start(account_status: Value, products: Vec<Value>) -> Self {
        let products: BTreeMap<i64, Value> = products
            .into_iter()
            .filter_map(|p| Some((p.get("id")?.as_i64()?, p)))
            .collect();
        let next_id = products.keys().max().map_or(1, |max| max + 1);

        let state = Arc::new(Mutex::new(BackendState {
            token: VALID_TOKEN.to_string(),
            account_status,
            products,
            next_id,
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/me", get(me))
            .route("/produto", get(list_products).post(create_product))
            .route(
                "/produto/{id}",
                get(get_product).put(update_product).delete(delete_product),
            )
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener
            .local_addr()
            .expect("Failed to read mock backend address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let url = Url::parse(&format!("http://{addr}/")).expect("Invalid mock backend URL");
        Self { url, state, handle }
    }

    /// Base URL to point a client at.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    /// `METHOD /path` for each request received so far.
    #[must_use]
    pub fn request_lines(&self) -> Vec<String> {
        lock(&self.state)
            .requests
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// Stored products, ordered by id.
    #[must_use]
    pub fn products(&self) -> Vec<Value> {
        lock(&self.state).products.values().cloned().collect()
    }

    /// Change what `/me` reports.
    pub fn set_account_status(&self, status: Value) {
        lock(&self.state).account_status = status;
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn record(
    state: &Shared,
    method: Method,
    path: String,
    headers: &HeaderMap,
    fields: BTreeMap<String, String>,
    file: Option<UploadedFile>,
) -> bool {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut state = lock(state);
    let authorized = authorization.as_deref() == Some(format!("Bearer {}", state.token).as_str());
    state.requests.push(RecordedRequest {
        method,
        path,
        authorization,
        fields,
        file,
    });
    authorized
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "invalid token" })),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "product not found" })),
    )
        .into_response()
}

async fn read_form(mut multipart: Multipart) -> (BTreeMap<String, String>, Option<UploadedFile>) {
    let mut fields = BTreeMap::new();
    let mut file = None;

    while let Ok(Some(part)) = multipart.next_field().await {
        let name = part.name().unwrap_or_default().to_string();
        if let Some(file_name) = part.file_name().map(str::to_string) {
            let content_type = part.content_type().unwrap_or_default().to_string();
            let bytes = part.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            file = Some(UploadedFile {
                field: name,
                file_name,
                content_type,
                bytes,
            });
        } else {
            fields.insert(name, part.text().await.unwrap_or_default());
        }
    }

    (fields, file)
}

/// Build the stored product from form fields, keeping `image` when no new
/// file was sent.
fn product_json(
    id: i64,
    fields: &BTreeMap<String, String>,
    file: Option<&UploadedFile>,
    image: Option<Value>,
) -> Value {
    let image = file
        .map(|f| json!(format!("{UPLOAD_URL_PREFIX}{}", f.file_name)))
        .or(image)
        .unwrap_or(Value::Null);

    json!({
        "id": id,
        "nome": fields.get("nome").cloned().unwrap_or_default(),
        "preco": fields.get("preco").cloned().unwrap_or_else(|| "0".to_string()),
        "quantidade": fields
            .get("quantidade")
            .and_then(|q| q.trim().parse::<u32>().ok())
            .unwrap_or(0),
        "status": fields
            .get("status")
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(1),
        "imagem": image,
    })
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&state, Method::GET, "/me".into(), &headers, BTreeMap::new(), None) {
        return unauthorized();
    }
    let status = lock(&state).account_status.clone();
    Json(json!({ "status": status })).into_response()
}

async fn list_products(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&state, Method::GET, "/produto".into(), &headers, BTreeMap::new(), None) {
        return unauthorized();
    }
    let products: Vec<Value> = lock(&state).products.values().cloned().collect();
    Json(products).into_response()
}

async fn get_product(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let path = format!("/produto/{id}");
    if !record(&state, Method::GET, path, &headers, BTreeMap::new(), None) {
        return unauthorized();
    }
    match lock(&state).products.get(&id) {
        Some(product) => Json(product.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let (fields, file) = read_form(multipart).await;
    let product_fields = fields.clone();
    let upload = file.clone();
    if !record(&state, Method::POST, "/produto".into(), &headers, fields, file) {
        return unauthorized();
    }

    let mut state = lock(&state);
    let id = state.next_id;
    state.next_id += 1;
    let product = product_json(id, &product_fields, upload.as_ref(), None);
    state.products.insert(id, product.clone());
    (StatusCode::CREATED, Json(product)).into_response()
}

async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let (fields, file) = read_form(multipart).await;
    let product_fields = fields.clone();
    let upload = file.clone();
    let path = format!("/produto/{id}");
    if !record(&state, Method::PUT, path, &headers, fields, file) {
        return unauthorized();
    }

    let mut state = lock(&state);
    let Some(existing) = state.products.get(&id) else {
        return not_found();
    };
    let image = existing.get("imagem").filter(|v| !v.is_null()).cloned();
    let product = product_json(id, &product_fields, upload.as_ref(), image);
    state.products.insert(id, product.clone());
    Json(product).into_response()
}

async fn delete_product(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let path = format!("/produto/{id}");
    if !record(&state, Method::DELETE, path, &headers, BTreeMap::new(), None) {
        return unauthorized();
    }
    match lock(&state).products.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// =============================================================================
// Panel helpers
// =============================================================================

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

/// UI that records every call and answers confirmations with a fixed reply.
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub events: Vec<UiEvent>,
    pub confirm_reply: bool,
}

impl RecordingUi {
    /// A UI that accepts every confirmation.
    #[must_use]
    pub fn confirming() -> Self {
        Self {
            events: Vec::new(),
            confirm_reply: true,
        }
    }

    /// Messages shown with `alert`.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Alert(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Most recently rendered catalog.
    #[must_use]
    pub fn last_catalog(&self) -> Option<&CatalogView> {
        self.events.iter().rev().find_map(|e| match e {
            UiEvent::Catalog(view) => Some(view),
            _ => None,
        })
    }

    /// Whether the panel navigated to login.
    #[must_use]
    pub fn went_to_login(&self) -> bool {
        self.events.contains(&UiEvent::Login)
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

/// Fallback image used by panels built with [`panel`].
pub const FALLBACK_IMAGE: &str = "http://mock.local/fallback.png";

/// In-memory storage holding a fresh login with `token`.
#[must_use]
pub fn logged_in_storage(token: &str) -> Storage {
    let storage = Storage::in_memory();
    SessionManager::new(storage.clone())
        .set_token(&SecretString::from(token.to_string()))
        .expect("Failed to store token");
    storage
}

/// Panel talking to `backend` over HTTP.
#[must_use]
pub fn panel(
    backend: &MockBackend,
    ui: RecordingUi,
    storage: Storage,
) -> Panel<CatalogClient, RecordingUi> {
    let client = CatalogClient::new(backend.url()).expect("Failed to build client");
    Panel::new(client, ui, storage, FALLBACK_IMAGE.to_string())
}
