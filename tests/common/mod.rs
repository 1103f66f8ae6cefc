#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use flight_search::config::Config;
use flight_search::router::create_router;
use flight_search::AppState;

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";

/// 本地假服务商：令牌、地点、航班三个接口，记录调用次数
pub struct FakeProvider {
    pub token_calls: AtomicUsize,
    pub location_calls: AtomicUsize,
    pub flight_calls: AtomicUsize,
    pub token_status: AtomicU16,
    pub location_status: AtomicU16,
    pub flight_status: AtomicU16,
    pub token_delay_ms: AtomicU64,
    pub token_ttls: Mutex<VecDeque<u64>>,
    pub last_bearer: Mutex<Option<String>>,
    pub last_flight_query: Mutex<HashMap<String, String>>,
}

impl FakeProvider {
    fn new() -> Self {
        Self {
            token_calls: AtomicUsize::new(0),
            location_calls: AtomicUsize::new(0),
            flight_calls: AtomicUsize::new(0),
            token_status: AtomicU16::new(200),
            location_status: AtomicU16::new(200),
            flight_status: AtomicU16::new(200),
            token_delay_ms: AtomicU64::new(0),
            token_ttls: Mutex::new(VecDeque::new()),
            last_bearer: Mutex::new(None),
            last_flight_query: Mutex::new(HashMap::new()),
        }
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn location_calls(&self) -> usize {
        self.location_calls.load(Ordering::SeqCst)
    }

    pub fn flight_calls(&self) -> usize {
        self.flight_calls.load(Ordering::SeqCst)
    }

    pub fn set_token_status(&self, status: u16) {
        self.token_status.store(status, Ordering::SeqCst);
    }

    pub fn set_location_status(&self, status: u16) {
        self.location_status.store(status, Ordering::SeqCst);
    }

    pub fn set_flight_status(&self, status: u16) {
        self.flight_status.store(status, Ordering::SeqCst);
    }

    pub fn set_token_delay(&self, delay: Duration) {
        self.token_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// 依次作为后续令牌响应的 `expires_in`，用完后回到 1799
    pub fn push_token_ttls(&self, ttls: &[u64]) {
        self.token_ttls.lock().unwrap().extend(ttls.iter().copied());
    }

    pub fn last_bearer(&self) -> Option<String> {
        self.last_bearer.lock().unwrap().clone()
    }

    pub fn last_flight_query(&self) -> HashMap<String, String> {
        self.last_flight_query.lock().unwrap().clone()
    }
}

async fn issue_token(
    State(provider): State<Arc<FakeProvider>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let call = provider.token_calls.fetch_add(1, Ordering::SeqCst) + 1;

    let delay = provider.token_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let status = provider.token_status.load(Ordering::SeqCst);
    let credentials_ok = form.get("grant_type").map(String::as_str) == Some("client_credentials")
        && form.get("client_id").map(String::as_str) == Some(CLIENT_ID)
        && form.get("client_secret").map(String::as_str) == Some(CLIENT_SECRET);
    if status != 200 || !credentials_ok {
        let status = if status == 200 { 401 } else { status };
        return (
            StatusCode::from_u16(status).unwrap(),
            Json(serde_json::json!({ "error": "invalid_client" })),
        )
            .into_response();
    }

    let ttl = provider
        .token_ttls
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or(1799);
    Json(serde_json::json!({
        "type": "amadeusOAuth2Token",
        "access_token": format!("token-{call}"),
        "token_type": "Bearer",
        "expires_in": ttl,
    }))
    .into_response()
}

fn remember_bearer(provider: &FakeProvider, headers: &HeaderMap) {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *provider.last_bearer.lock().unwrap() = bearer;
}

async fn locations(
    State(provider): State<Arc<FakeProvider>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    provider.location_calls.fetch_add(1, Ordering::SeqCst);
    remember_bearer(&provider, &headers);

    let status = provider.location_status.load(Ordering::SeqCst);
    if status != 200 {
        return (
            StatusCode::from_u16(status).unwrap(),
            Json(serde_json::json!({ "errors": [{ "status": status, "title": "upstream" }] })),
        )
            .into_response();
    }

    let keyword = query.get("keyword").cloned().unwrap_or_default();
    Json(serde_json::json!({
        "meta": { "count": 2 },
        "data": [
            {
                "type": "location",
                "subType": "AIRPORT",
                "id": "AXQA",
                "name": format!("{} INTERNATIONAL", keyword.to_uppercase()),
                "iataCode": "XQA",
                "address": { "cityName": "XQ CITY", "countryName": "NOWHERE" }
            },
            {
                "type": "location",
                "subType": "CITY",
                "id": "CNOCODE",
                "name": "NO CODE"
            }
        ]
    }))
    .into_response()
}

async fn flight_offers(
    State(provider): State<Arc<FakeProvider>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    provider.flight_calls.fetch_add(1, Ordering::SeqCst);
    remember_bearer(&provider, &headers);
    *provider.last_flight_query.lock().unwrap() = query;

    let status = provider.flight_status.load(Ordering::SeqCst);
    if status != 200 {
        return (
            StatusCode::from_u16(status).unwrap(),
            Json(serde_json::json!({ "errors": [{ "status": status, "title": "INVALID DATE" }] })),
        )
            .into_response();
    }

    Json(serde_json::json!({
        "meta": { "count": 1 },
        "data": [{ "id": "1", "price": { "total": "412.30", "currency": "EUR" } }],
        "dictionaries": { "carriers": { "BG": "BIMAN" } }
    }))
    .into_response()
}

pub async fn spawn_provider() -> (Arc<FakeProvider>, String) {
    let provider = Arc::new(FakeProvider::new());
    let app = Router::new()
        .route("/v1/security/oauth2/token", post(issue_token))
        .route("/v1/reference-data/locations", get(locations))
        .route("/v2/shopping/flight-offers", get(flight_offers))
        .with_state(provider.clone());

    let addr = serve(app).await;
    (provider, format!("http://{addr}"))
}

pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app.into_make_service()).await;
    });
    addr
}

pub fn test_config(provider_url: &str) -> Config {
    Config::with_credentials(provider_url, CLIENT_ID, CLIENT_SECRET)
}

pub fn app(provider_url: &str) -> Router {
    create_router(AppState::new(test_config(provider_url)))
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}
