//! In-process stand-in for the product service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

/// Code whose lookup never answers in time.
pub const SLOW_CODE: &str = "999";

/// Code whose lookup answers 500.
pub const FAILING_CODE: &str = "500";

/// Code the service accepts on POST but never serves.
pub const PHANTOM_CODE: &str = "555";

/// Mock service state.
///
/// - `known`: code → raw body served with 200
/// - `registrable`: code → body that becomes `known` on POST (201)
/// - any other POST answers 500
#[derive(Default)]
pub struct MockService {
    known: Mutex<HashMap<String, String>>,
    registrable: HashMap<String, String>,
    posts: AtomicUsize,
    gets: AtomicUsize,
}

impl MockService {
    pub fn post_count(&self) -> usize {
        self.posts.load(Ordering::SeqCst)
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

/// Starts the mock on an ephemeral port and returns its base URL.
///
/// Preloaded with:
/// - "111": unknown, registrable as Milk
/// - "222": unknown, registration fails
/// - "333": known as Bread by Acme
/// - "444": known, but the body is not JSON
/// - [`FAILING_CODE`]: lookup fails with 500
/// - [`PHANTOM_CODE`]: registration succeeds, lookup stays 404
pub async fn spawn_service() -> (String, Arc<MockService>) {
    let known = HashMap::from([
        (
            "333".to_string(),
            r#"{"product_name":"Bread","brand":"Acme"}"#.to_string(),
        ),
        ("444".to_string(), "<html>oops</html>".to_string()),
    ]);
    let registrable = HashMap::from([(
        "111".to_string(),
        r#"{"product_name":"Milk"}"#.to_string(),
    )]);

    let service = Arc::new(MockService {
        known: Mutex::new(known),
        registrable,
        ..Default::default()
    });

    let app = Router::new()
        .route("/products/{code}", get(lookup))
        .route("/products/", post(register))
        .with_state(service.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), service)
}

async fn lookup(State(service): State<Arc<MockService>>, Path(code): Path<String>) -> Response {
    service.gets.fetch_add(1, Ordering::SeqCst);

    if code == SLOW_CODE {
        tokio::time::sleep(Duration::from_secs(30)).await;
    }
    if code == FAILING_CODE {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let body = service.known.lock().unwrap().get(&code).cloned();
    match body {
        Some(body) => (
            StatusCode::OK,
            [("content-type", "application/json")],
            body,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn register(
    State(service): State<Arc<MockService>>,
    Query(params): Query<HashMap<String, String>>,
) -> StatusCode {
    service.posts.fetch_add(1, Ordering::SeqCst);

    let code = params.get("barcode").cloned().unwrap_or_default();
    if code == PHANTOM_CODE {
        return StatusCode::CREATED;
    }
    match service.registrable.get(&code) {
        Some(body) => {
            service.known.lock().unwrap().insert(code, body.clone());
            StatusCode::CREATED
        }
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
