//! Fake admin backend for shopdesk-core integration tests

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use shopdesk_core::{ApiConfig, Console, KeyValueStorage, ReqwestTransport};
use tokio::net::TcpListener;

pub const TOKEN: &str = "tok-1";
pub const PASSWORD: &str = "secret";

/// What the backend saw
#[derive(Default)]
pub struct Seen {
    /// `(path, Authorization header)` for every request
    pub requests: Vec<(String, Option<String>)>,
    pub last_query: Option<String>,
}

pub type Recorder = Arc<Mutex<Seen>>;

fn record(seen: &Recorder, path: &str, headers: &HeaderMap) -> bool {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let authorized = auth.as_deref() == Some(&format!("Bearer {}", TOKEN));
    seen.lock().unwrap().requests.push((path.to_string(), auth));
    authorized
}

async fn login(
    State(seen): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&seen, "/auth/login", &headers);
    if body["password"] == PASSWORD {
        Json(json!({
            "token": TOKEN,
            "user": {"id": 1, "name": "Ada", "email": body["email"], "role": "admin"}
        }))
        .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad credentials"}))).into_response()
    }
}

async fn refresh(State(seen): State<Recorder>, headers: HeaderMap) -> Response {
    record(&seen, "/auth/refresh", &headers);
    StatusCode::UNAUTHORIZED.into_response()
}

async fn categories(
    State(seen): State<Recorder>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let authorized = record(&seen, "/categories", &headers);
    seen.lock().unwrap().last_query = query;
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "data": [
            {"ID": 1, "Name": "Shoes", "Icon": "shoe", "Status": "active", "Parent_ID": null},
            {"ID": 2, "Name": "Sneakers", "Icon": "shoe", "Status": "active", "Parent_ID": 1}
        ],
        "pagination": {"total": 12, "page": 1, "limit": 10, "totalPages": 2}
    }))
    .into_response()
}

async fn inventories(State(seen): State<Recorder>, headers: HeaderMap) -> Response {
    if !record(&seen, "/inventory/get-all/inventories", &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "data": [
            {"id": 7, "product_name": "Linen Kurta", "brand": "Attire", "price": 1499.0,
             "status": "Active", "category": "M", "available_online": true}
        ]
    }))
    .into_response()
}

async fn online_rentals(
    State(seen): State<Recorder>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let authorized = record(&seen, "/inventory/online-rentals/filter", &headers);
    seen.lock().unwrap().last_query = query;
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([
        {"id": 11, "productName": "Velvet Sherwani", "brand": "Attire",
         "prices": 45, "isAvailableOnRent": true, "category": "M"}
    ]))
    .into_response()
}

async fn admin_only(State(seen): State<Recorder>, headers: HeaderMap) -> StatusCode {
    record(&seen, "/admin/stats", &headers);
    StatusCode::FORBIDDEN
}

async fn broken(State(seen): State<Recorder>, headers: HeaderMap) -> StatusCode {
    record(&seen, "/products/broken", &headers);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn revoked(State(seen): State<Recorder>, headers: HeaderMap) -> StatusCode {
    record(&seen, "/business/revoked", &headers);
    StatusCode::UNAUTHORIZED
}

/// Spawns the fake backend, returns its address and request recorder
pub async fn spawn_backend() -> (SocketAddr, Recorder) {
    let seen: Recorder = Arc::default();
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/categories", get(categories))
        .route("/inventory/get-all/inventories", get(inventories))
        .route("/inventory/online-rentals/filter", get(online_rentals))
        .route("/admin/stats", get(admin_only))
        .route("/products/broken", get(broken))
        .route("/business/revoked", get(revoked))
        .with_state(seen.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, seen)
}

/// Console talking to the fake backend over real HTTP
pub async fn console(addr: SocketAddr, storage: Arc<dyn KeyValueStorage>) -> Console {
    let config = ApiConfig::with_base_url(format!("http://{}", addr));
    let transport = ReqwestTransport::new(std::time::Duration::from_secs(5)).unwrap();
    Console::with_transport(config, storage, Arc::new(transport)).await
}
