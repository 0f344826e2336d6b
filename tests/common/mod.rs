//! Shared test utilities: an in-process mock of the portfolio backend.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Recorded traffic and canned data for the mock backend.
#[derive(Default)]
pub struct MockState {
    pub projects: Mutex<Vec<Value>>,
    pub testimonials: Mutex<Vec<Value>>,
    pub project_lists: AtomicUsize,
    pub testimonial_lists: AtomicUsize,
    pub contacts: Mutex<Vec<Value>>,
    pub auth_headers: Mutex<Vec<Option<String>>>,
    /// `METHOD /path` of every update and registration call, in arrival order.
    pub requests: Mutex<Vec<String>>,
    pub registrations: Mutex<Vec<Value>>,
    /// Status forced onto every list response when set.
    pub list_status: Mutex<Option<u16>>,
    /// Status and optional message forced onto every create response when set.
    pub create_failure: Mutex<Option<(u16, Option<String>)>>,
    /// Delay before list responses are sent.
    pub list_delay: Mutex<Duration>,
}

impl MockState {
    pub fn project_lists(&self) -> usize {
        self.project_lists.load(Ordering::SeqCst)
    }

    pub fn testimonial_lists(&self) -> usize {
        self.testimonial_lists.load(Ordering::SeqCst)
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

/// Serve the mock on an ephemeral port. The base URL carries the `/api` prefix.
pub async fn spawn_backend() -> MockBackend {
    let state = Arc::new(MockState::default());
    let base_url = serve(router(Arc::clone(&state))).await;
    MockBackend { base_url, state }
}

/// Serve an arbitrary router and return `http://addr/api`.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    format!("http://{addr}/api")
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/health", get(|| async { Json(json!({"status": "OK"})) }))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/featured", get(list_projects))
        .route("/api/testimonials", get(list_testimonials))
        .route("/api/testimonials/featured", get(list_testimonials))
        .route("/api/contact", post(create_contact))
        .route("/api/admin/projects", post(create_project))
        .route(
            "/api/admin/projects/{id}",
            put(update_project).delete(delete_item),
        )
        .route("/api/admin/testimonials", post(create_testimonial))
        .route(
            "/api/admin/testimonials/{id}",
            put(update_testimonial).delete(delete_item),
        )
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .with_state(state)
}

async fn list_response(state: &MockState, items: Vec<Value>) -> Response {
    let delay = *state.list_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let forced = *state.list_status.lock().unwrap();
    match forced {
        Some(status) => (
            StatusCode::from_u16(status).unwrap(),
            Json(json!({"message": "forced failure"})),
        )
            .into_response(),
        None => Json(json!({ "data": items })).into_response(),
    }
}

async fn list_projects(State(state): State<Arc<MockState>>) -> Response {
    state.project_lists.fetch_add(1, Ordering::SeqCst);
    let items = state.projects.lock().unwrap().clone();
    list_response(&state, items).await
}

async fn list_testimonials(State(state): State<Arc<MockState>>) -> Response {
    state.testimonial_lists.fetch_add(1, Ordering::SeqCst);
    let items = state.testimonials.lock().unwrap().clone();
    list_response(&state, items).await
}

fn forced_create_failure(state: &MockState) -> Option<Response> {
    let forced = state.create_failure.lock().unwrap().clone();
    forced.map(|(status, message)| {
        let body = message.map_or_else(|| json!({}), |m| json!({ "message": m }));
        (StatusCode::from_u16(status).unwrap(), Json(body)).into_response()
    })
}

fn record_auth(state: &MockState, headers: &HeaderMap) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.auth_headers.lock().unwrap().push(auth);
}

fn record_request(state: &MockState, method: &Method, uri: &Uri) {
    state
        .requests
        .lock()
        .unwrap()
        .push(format!("{method} {}", uri.path()));
}

async fn create_contact(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    if let Some(failure) = forced_create_failure(&state) {
        return failure;
    }
    state.contacts.lock().unwrap().push(body);
    (
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "Message sent"})),
    )
        .into_response()
}

async fn create_project(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    record_auth(&state, &headers);
    if let Some(failure) = forced_create_failure(&state) {
        return failure;
    }
    let mut projects = state.projects.lock().unwrap();
    body["id"] = json!(projects.len() + 1);
    projects.push(body.clone());
    (StatusCode::CREATED, Json(json!({"success": true, "data": body}))).into_response()
}

async fn create_testimonial(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    record_auth(&state, &headers);
    if let Some(failure) = forced_create_failure(&state) {
        return failure;
    }
    let mut testimonials = state.testimonials.lock().unwrap();
    body["id"] = json!(testimonials.len() + 1);
    testimonials.push(body.clone());
    (StatusCode::CREATED, Json(json!({"success": true, "data": body}))).into_response()
}

async fn update_project(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    record_auth(&state, &headers);
    body["id"] = json!(id);
    Json(json!({"success": true, "message": "Project updated", "data": body})).into_response()
}

async fn update_testimonial(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    record_request(&state, &method, &uri);
    record_auth(&state, &headers);
    body["id"] = json!(id);
    Json(json!({"success": true, "message": "Testimonial updated", "data": body})).into_response()
}

async fn delete_item(
    State(state): State<Arc<MockState>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> StatusCode {
    record_auth(&state, &headers);
    StatusCode::NO_CONTENT
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "correct horse" {
        Json(json!({"token": "session-token-123", "message": "Welcome"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn register(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    record_request(&state, &method, &uri);
    state.registrations.lock().unwrap().push(body.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "accessToken": "fresh-account-token",
            "message": "Account created",
            "user": {"name": body["name"], "email": body["email"]}
        })),
    )
        .into_response()
}

pub fn project_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "category": "web",
        "techStack": ["React", "Node.js"],
        "featured": true,
        "images": []
    })
}
