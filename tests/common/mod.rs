#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use meal_planner_client::{ApiClient, ClientConfig};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};

const DEFAULT_LIMIT: usize = 50;

/// In-process stand-in for the meal planner backend, serving the `/api`
/// surface on a random local port.
pub struct MockBackend {
    pub addr: SocketAddr,
    pub client: ApiClient,
    state: Arc<Backend>,
}

#[derive(Default)]
struct Collection {
    records: Vec<Value>,
    next_id: u64,
}

#[derive(Default)]
struct Backend {
    pantry: RwLock<Collection>,
    recipes: RwLock<Collection>,
    queries: Mutex<Vec<Option<String>>>,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        let state = Arc::new(Backend::default());
        let app = Router::new()
            .route("/api/health", get(health))
            .route("/api/pantry", get(list_pantry).post(create_pantry))
            .route(
                "/api/pantry/{id}",
                get(get_pantry).put(update_pantry).delete(delete_pantry),
            )
            .route("/api/recipes", get(list_recipes).post(create_recipe))
            .route(
                "/api/recipes/{id}",
                get(get_recipe).put(update_recipe).delete(delete_recipe),
            )
            .with_state(state.clone());

        let addr = serve(app).await?;
        let client = ApiClient::new(ClientConfig::new(format!("http://{}/api", addr)))?;
        Ok(Self { addr, client, state })
    }

    /// Raw query strings received by the list endpoints, oldest first.
    pub async fn list_queries(&self) -> Vec<Option<String>> {
        self.state.queries.lock().await.clone()
    }
}

/// A request captured by [`StubServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub content_type: Option<String>,
    pub body: String,
}

struct Stub {
    status: StatusCode,
    body: String,
    content_type: &'static str,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Answers every request with the same canned response and records what it
/// received.
pub struct StubServer {
    pub addr: SocketAddr,
    pub client: ApiClient,
    stub: Arc<Stub>,
}

impl StubServer {
    pub async fn json(status: u16, body: Value) -> Result<Self> {
        Self::start(status, body.to_string(), "application/json").await
    }

    pub async fn text(status: u16, body: &str) -> Result<Self> {
        Self::start(status, body.to_string(), "text/html").await
    }

    pub async fn empty(status: u16) -> Result<Self> {
        Self::start(status, String::new(), "application/json").await
    }

    async fn start(status: u16, body: String, content_type: &'static str) -> Result<Self> {
        let stub = Arc::new(Stub {
            status: StatusCode::from_u16(status)?,
            body,
            content_type,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(canned).with_state(stub.clone());
        let addr = serve(app).await?;
        let client = ApiClient::new(ClientConfig::new(format!("http://{}/api", addr)))?;
        Ok(Self { addr, client, stub })
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.stub.requests.lock().await.clone()
    }

    pub async fn last_request(&self) -> RecordedRequest {
        self.requests()
            .await
            .pop()
            .expect("stub server received no requests")
    }
}

async fn serve(app: Router) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("mock server stopped: {}", e);
        }
    });
    Ok(addr)
}

async fn canned(
    State(stub): State<Arc<Stub>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    stub.requests.lock().await.push(RecordedRequest {
        method,
        uri,
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    if stub.status == StatusCode::NO_CONTENT {
        return StatusCode::NO_CONTENT.into_response();
    }
    (
        stub.status,
        [(CONTENT_TYPE, stub.content_type)],
        stub.body.clone(),
    )
        .into_response()
}

fn error_body(status: StatusCode, code: &str, message: String, details: Option<Value>) -> Response {
    let mut body = json!({
        "code": code,
        "message": message,
        "traceId": "5f3a9c1e",
    });
    if let Some(details) = details {
        body["details"] = details;
    }
    (status, Json(body)).into_response()
}

fn not_found(kind: &str, id: &str) -> Response {
    error_body(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        format!("{} not found with id: {}", kind, id),
        None,
    )
}

fn validation_failed(details: Map<String, Value>) -> Response {
    error_body(
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        "Request validation failed".to_string(),
        Some(Value::Object(details)),
    )
}

fn blank(body: &Value, field: &str) -> bool {
    body.get(field)
        .and_then(Value::as_str)
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
}

fn validate_pantry(body: &Value) -> Map<String, Value> {
    let mut details = Map::new();
    if blank(body, "name") {
        details.insert("name".into(), json!("Name is required"));
    }
    if body.get("type").and_then(Value::as_str).is_none() {
        details.insert("type".into(), json!("Type is required"));
    }
    if body.get("quantity").and_then(Value::as_f64).map_or(true, |q| q < 0.0) {
        details.insert("quantity".into(), json!("Quantity must be non-negative"));
    }
    if blank(body, "unit") {
        details.insert("unit".into(), json!("Unit is required"));
    }
    details
}

fn validate_recipe(body: &Value) -> Map<String, Value> {
    let mut details = Map::new();
    if blank(body, "name") {
        details.insert("name".into(), json!("Name is required"));
    }
    if body
        .get("ingredients")
        .and_then(Value::as_array)
        .map_or(true, |i| i.is_empty())
    {
        details.insert("ingredients".into(), json!("At least one ingredient is required"));
    }
    if body
        .get("instructions")
        .and_then(Value::as_array)
        .map_or(true, |i| i.is_empty())
    {
        details.insert("instructions".into(), json!("At least one instruction is required"));
    }
    if body.get("servings").and_then(Value::as_u64).map_or(true, |s| s < 1) {
        details.insert("servings".into(), json!("Servings must be at least 1"));
    }
    details
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn stamp_new(collection: &mut Collection, prefix: &str, mut body: Value) -> Value {
    collection.next_id += 1;
    let ts = now();
    body["id"] = json!(format!("{}-{}", prefix, collection.next_id));
    body["createdAt"] = json!(ts);
    body["updatedAt"] = json!(ts);
    if prefix == "recipe" && body.get("tags").is_none() {
        body["tags"] = json!([]);
    }
    collection.records.push(body.clone());
    body
}

fn replace(collection: &mut Collection, id: &str, mut body: Value) -> Option<Value> {
    let record = collection
        .records
        .iter_mut()
        .find(|r| r["id"] == json!(id))?;
    body["id"] = record["id"].clone();
    body["createdAt"] = record["createdAt"].clone();
    body["updatedAt"] = json!(now());
    if record.get("tags").is_some() && body.get("tags").is_none() {
        body["tags"] = json!([]);
    }
    *record = body.clone();
    Some(body)
}

fn remove(collection: &mut Collection, id: &str) -> bool {
    let before = collection.records.len();
    collection.records.retain(|r| r["id"] != json!(id));
    collection.records.len() != before
}

fn page(matches: Vec<Value>, params: &HashMap<String, String>) -> Value {
    let limit = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(DEFAULT_LIMIT);
    let offset = params
        .get("offset")
        .and_then(|o| o.parse().ok())
        .unwrap_or(0);
    let total = matches.len();
    let items: Vec<Value> = matches.into_iter().skip(offset).take(limit).collect();
    json!({ "items": items, "total": total })
}

fn name_matches(record: &Value, params: &HashMap<String, String>) -> bool {
    match params.get("name") {
        Some(name) => record["name"]
            .as_str()
            .map(|n| n.to_lowercase().contains(&name.to_lowercase()))
            .unwrap_or(false),
        None => true,
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "UP", "version": "1.0.0", "time": now() }))
}

async fn list_pantry(
    State(state): State<Arc<Backend>>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.queries.lock().await.push(raw);
    let pantry = state.pantry.read().await;
    let matches = pantry
        .records
        .iter()
        .filter(|r| match params.get("type") {
            Some(t) => r["type"] == json!(t),
            None => true,
        })
        .filter(|r| name_matches(r, &params))
        .cloned()
        .collect();
    Json(page(matches, &params))
}

async fn create_pantry(State(state): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    let details = validate_pantry(&body);
    if !details.is_empty() {
        return validation_failed(details);
    }
    let lot = stamp_new(&mut *state.pantry.write().await, "lot", body);
    (StatusCode::CREATED, Json(lot)).into_response()
}

async fn get_pantry(State(state): State<Arc<Backend>>, Path(id): Path<String>) -> Response {
    let pantry = state.pantry.read().await;
    match pantry.records.iter().find(|r| r["id"] == json!(id)) {
        Some(lot) => Json(lot.clone()).into_response(),
        None => not_found("Pantry lot", &id),
    }
}

async fn update_pantry(
    State(state): State<Arc<Backend>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let details = validate_pantry(&body);
    if !details.is_empty() {
        return validation_failed(details);
    }
    match replace(&mut *state.pantry.write().await, &id, body) {
        Some(lot) => Json(lot).into_response(),
        None => not_found("Pantry lot", &id),
    }
}

async fn delete_pantry(State(state): State<Arc<Backend>>, Path(id): Path<String>) -> Response {
    if remove(&mut *state.pantry.write().await, &id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("Pantry lot", &id)
    }
}

async fn list_recipes(
    State(state): State<Arc<Backend>>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.queries.lock().await.push(raw);
    let recipes = state.recipes.read().await;
    let matches = recipes
        .records
        .iter()
        .filter(|r| match params.get("tag") {
            Some(tag) => r["tags"]
                .as_array()
                .map(|tags| tags.contains(&json!(tag)))
                .unwrap_or(false),
            None => true,
        })
        .filter(|r| name_matches(r, &params))
        .cloned()
        .collect();
    Json(page(matches, &params))
}

async fn create_recipe(State(state): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    let details = validate_recipe(&body);
    if !details.is_empty() {
        return validation_failed(details);
    }
    let recipe = stamp_new(&mut *state.recipes.write().await, "recipe", body);
    (StatusCode::CREATED, Json(recipe)).into_response()
}

async fn get_recipe(State(state): State<Arc<Backend>>, Path(id): Path<String>) -> Response {
    let recipes = state.recipes.read().await;
    match recipes.records.iter().find(|r| r["id"] == json!(id)) {
        Some(recipe) => Json(recipe.clone()).into_response(),
        None => not_found("Recipe", &id),
    }
}

async fn update_recipe(
    State(state): State<Arc<Backend>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let details = validate_recipe(&body);
    if !details.is_empty() {
        return validation_failed(details);
    }
    match replace(&mut *state.recipes.write().await, &id, body) {
        Some(recipe) => Json(recipe).into_response(),
        None => not_found("Recipe", &id),
    }
}

async fn delete_recipe(State(state): State<Arc<Backend>>, Path(id): Path<String>) -> Response {
    if remove(&mut *state.recipes.write().await, &id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("Recipe", &id)
    }
}

/// An address nothing is listening on.
pub async fn closed_addr() -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

pub fn init_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
