use super::*;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use shared::domain::ClusterId;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    queries: Arc<Mutex<Vec<String>>>,
}

async fn handle_search(
    State(state): State<ServerState>,
    Json(body): Json<SearchRequest>,
) -> Json<Value> {
    state.queries.lock().await.push(body.query.clone());
    Json(json!({
        "query": body.query,
        "results": [
            {"rank": 1, "title": "Markets rally", "description": "...", "score": 0.92, "cluster": 3},
            {"rank": 4, "title": "Oil steadies", "description": "", "score": 0.37, "cluster": 8}
        ]
    }))
}

async fn handle_rebuild() -> Json<Value> {
    Json(json!({"status": "Pipeline rebuilt successfully"}))
}

async fn handle_html() -> &'static str {
    "<html><body>Internal Server Error</body></html>"
}

async fn handle_failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "index missing"})),
    )
}

async fn handle_slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!({"results": []}))
}

async fn handle_no_results() -> Json<Value> {
    Json(json!({"query": ""}))
}

async fn spawn_backend_server() -> anyhow::Result<(String, ServerState)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let app = Router::new()
        .route("/ok/search", post(handle_search))
        .route("/ok/rebuild", post(handle_rebuild))
        .route("/html/search", post(handle_html))
        .route("/html/rebuild", post(handle_html))
        .route("/fail/search", post(handle_failure))
        .route("/fail/rebuild", post(handle_failure))
        .route("/slow/search", post(handle_slow))
        .route("/empty/search", post(handle_no_results))
        .route("/empty/rebuild", post(handle_no_results))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

fn backend_at(server_url: &str, prefix: &str) -> HttpBackend {
    let settings = Settings {
        server_url: format!("{server_url}/{prefix}"),
        request_timeout_secs: 5,
    };
    HttpBackend::new(&settings).expect("backend")
}

#[tokio::test]
async fn search_posts_query_and_decodes_ranked_results() {
    let (server_url, state) = spawn_backend_server().await.expect("spawn server");
    let backend = backend_at(&server_url, "ok");

    let response = backend
        .search(SearchRequest {
            query: "stock market".into(),
        })
        .await
        .expect("search");

    assert_eq!(response.query.as_deref(), Some("stock market"));
    assert_eq!(response.results.len(), 2);
    assert_eq!(response.results[0].title, "Markets rally");
    assert_eq!(response.results[1].rank, 4);
    assert_eq!(response.results[1].cluster, ClusterId(8));
    assert_eq!(*state.queries.lock().await, vec!["stock market".to_string()]);
}

#[tokio::test]
async fn search_without_results_key_is_empty_success() {
    let (server_url, _) = spawn_backend_server().await.expect("spawn server");
    let response = backend_at(&server_url, "empty")
        .search(SearchRequest {
            query: String::new(),
        })
        .await
        .expect("search");
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn rebuild_returns_status_text_verbatim() {
    let (server_url, _) = spawn_backend_server().await.expect("spawn server");
    let response = backend_at(&server_url, "ok").rebuild().await.expect("rebuild");
    assert_eq!(response.status, "Pipeline rebuilt successfully");
}

#[tokio::test]
async fn rebuild_without_status_is_malformed() {
    let (server_url, _) = spawn_backend_server().await.expect("spawn server");
    let err = backend_at(&server_url, "empty")
        .rebuild()
        .await
        .expect_err("missing status");
    assert!(matches!(err, ClientError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn non_json_body_is_malformed_response() {
    let (server_url, _) = spawn_backend_server().await.expect("spawn server");
    let backend = backend_at(&server_url, "html");

    let search_err = backend
        .search(SearchRequest {
            query: "x".into(),
        })
        .await
        .expect_err("html body");
    assert!(matches!(search_err, ClientError::MalformedResponse(_)));

    let rebuild_err = backend.rebuild().await.expect_err("html body");
    assert!(matches!(rebuild_err, ClientError::MalformedResponse(_)));
}

#[tokio::test]
async fn server_error_status_is_reported() {
    let (server_url, _) = spawn_backend_server().await.expect("spawn server");
    let err = backend_at(&server_url, "fail")
        .search(SearchRequest {
            query: "x".into(),
        })
        .await
        .expect_err("500");
    assert_eq!(err, ClientError::Status { code: 500 });
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = backend_at(&format!("http://{addr}"), "ok")
        .rebuild()
        .await
        .expect_err("refused");
    assert!(matches!(err, ClientError::Transport(_)), "{err:?}");
    assert!(err.is_transport());
}

#[tokio::test]
async fn slow_server_hits_request_timeout() {
    let (server_url, _) = spawn_backend_server().await.expect("spawn server");
    let base = Url::parse(&format!("{server_url}/slow/")).expect("url");
    let backend =
        HttpBackend::with_timeout(base, Some(Duration::from_millis(100))).expect("backend");

    let err = backend
        .search(SearchRequest {
            query: "x".into(),
        })
        .await
        .expect_err("timeout");
    assert!(matches!(err, ClientError::Timeout(_)), "{err:?}");
}
