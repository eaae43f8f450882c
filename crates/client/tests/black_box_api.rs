//! Drives the real reqwest transport and standard pipeline against a stub
//! products backend served on an ephemeral port.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{Value, json};

use catalog_client::{HttpPipeline, ListQuery, ProductsApi, ProductsBackend, ReqwestTransport};
use catalog_core::ProductId;
use catalog_products::Product;
use catalog_toast::{ToastKind, ToastService};

type Db = Arc<Mutex<Vec<Product>>>;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(db: Db) -> Self {
        let app = Router::new()
            .route("/bp/products", get(list).post(create))
            .route("/bp/products/verification/:id", get(verify))
            .route("/bp/products/:id", get(fetch).put(update).delete(remove))
            .with_state(db);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/bp", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "name": "NotFoundError", "message": "Not product found with that identifier" })),
    )
        .into_response()
}

async fn list(State(db): State<Db>) -> Json<Value> {
    let items = db.lock().unwrap().clone();
    Json(json!({ "data": items }))
}

async fn verify(State(db): State<Db>, Path(id): Path<String>) -> Json<Value> {
    let exists = db.lock().unwrap().iter().any(|p| p.id.as_str() == id);
    Json(json!(exists))
}

async fn fetch(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.lock().unwrap().iter().find(|p| p.id.as_str() == id) {
        Some(product) => Json(json!({ "data": product })).into_response(),
        None => not_found(),
    }
}

async fn create(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    match serde_json::from_value::<Product>(body) {
        Ok(product) if product.name.len() >= 6 => {
            db.lock().unwrap().push(product.clone());
            Json(json!({ "message": "Product added successfully", "data": product })).into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "name": "BadRequestError",
                "message": "Invalid body, check 'errors' property for more info.",
                "errors": [{ "property": "name", "constraints": {} }]
            })),
        )
            .into_response(),
    }
}

async fn update(State(db): State<Db>, Path(id): Path<String>, Json(body): Json<Product>) -> Response {
    let mut db = db.lock().unwrap();
    match db.iter_mut().find(|p| p.id.as_str() == id) {
        Some(slot) => {
            *slot = body.clone();
            Json(json!({ "message": "Product updated successfully", "data": body })).into_response()
        }
        None => not_found(),
    }
}

async fn remove(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let mut db = db.lock().unwrap();
    let before = db.len();
    db.retain(|p| p.id.as_str() != id);
    if db.len() == before {
        not_found()
    } else {
        Json(json!({ "message": "Product removed successfully" })).into_response()
    }
}

fn sample(id: &str, name: &str) -> Product {
    Product::new(
        ProductId::new(id).unwrap(),
        name,
        "Producto financiero de prueba",
        "https://cdn.example.com/logo.png",
        NaiveDate::from_ymd_opt(2030, 5, 20).unwrap(),
    )
    .unwrap()
}

fn client(base_url: &str, toasts: &ToastService) -> ProductsApi<ReqwestTransport> {
    ProductsApi::new(HttpPipeline::standard(ReqwestTransport::new(base_url), toasts.clone()))
}

#[tokio::test]
async fn crud_round_trip_through_envelopes() {
    let server = TestServer::spawn(Db::default()).await;
    let toasts = ToastService::new();
    let sub = toasts.subscribe();
    let api = client(&server.base_url, &toasts);

    let product = sample("trj-crd", "Tarjeta de crédito");
    let id = product.id.clone();

    assert!(!api.verify_id(&id).await.unwrap());
    assert_eq!(api.create(&product).await.unwrap(), product);
    assert!(api.verify_id(&id).await.unwrap());

    let page = api.list(&ListQuery::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0], product);

    let renamed = Product { name: "Tarjeta Platinum".into(), ..product.clone() };
    api.update(&id, &renamed).await.unwrap();
    assert_eq!(api.get(&id).await.unwrap().name, "Tarjeta Platinum");

    api.remove(&id).await.unwrap();
    assert_eq!(api.list(&ListQuery::default()).await.unwrap().total, 0);

    assert!(sub.drain().is_empty(), "successful calls must not toast");
}

#[tokio::test]
async fn failures_are_toasted_and_reraised() {
    let server = TestServer::spawn(Db::default()).await;
    let toasts = ToastService::new();
    let sub = toasts.subscribe();
    let api = client(&server.base_url, &toasts);

    let missing = ProductId::new("nope").unwrap();
    let err = api.remove(&missing).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let err = api.create(&sample("short", "Corta")).await.unwrap_err();
    assert_eq!(err.status(), Some(400));

    let err = api.get(&missing).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let messages: Vec<_> = sub.drain().into_iter().map(|e| (e.kind, e.message)).collect();
    assert_eq!(
        messages,
        vec![
            (ToastKind::Error, "No se pudo eliminar el producto. No se encontró el recurso solicitado.".to_string()),
            (ToastKind::Error, "No se pudo crear el producto. Datos inválidos.".to_string()),
            (ToastKind::Error, "Ocurrió un error. Not product found with that identifier".to_string()),
        ]
    );
}

#[tokio::test]
async fn unreachable_backend_reports_no_connection() {
    let server = TestServer::spawn(Db::default()).await;
    let base_url = server.base_url.clone();
    drop(server);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let toasts = ToastService::new();
    let sub = toasts.subscribe();
    let api = client(&base_url, &toasts);

    let err = api.verify_id(&ProductId::new("x").unwrap()).await.unwrap_err();
    assert_eq!(err.status(), Some(0));
    assert_eq!(
        sub.drain()[0].message,
        "No se pudo verificar el ID. Sin conexión con el servidor"
    );
}
