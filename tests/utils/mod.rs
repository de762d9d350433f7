// Integration test utilities
//
// A local HTTP server that exposes the fixture kernel tree the way
// raw.githubusercontent.com exposes the real one:
// GET /linux/<version>/<path>

#![allow(dead_code)]

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

/// Root of the fixture kernel tree
pub fn fixture_tree() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/linux")
}

/// Golden Rust output for the fixture tree at v6.13
pub fn expected_rust_output() -> String {
    fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/expected/syscalls_linux.rs"),
    )
    .expect("Failed to read golden file")
}

/// Running fixture server
pub struct FixtureServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    /// Request paths received so far, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct TreeState {
    root: Arc<PathBuf>,
    version: Arc<String>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TreeState {
    fn record(&self, uri: &Uri) {
        self.requests.lock().unwrap().push(uri.path().to_string());
    }
}

/// Serve `root` under `/linux/<version>/` on an ephemeral local port
///
/// The server gets its own thread and runtime so the blocking reqwest
/// client under test never runs inside one. It lives until the test
/// process exits.
pub fn serve_tree(root: PathBuf, version: &str) -> FixtureServer {
    // bound here so the port is accepting before the first request
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    listener
        .set_nonblocking(true)
        .expect("Failed to make test listener non-blocking");
    let addr = listener.local_addr().unwrap();

    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = TreeState {
        root: Arc::new(root),
        version: Arc::new(version.to_string()),
        requests: Arc::clone(&requests),
    };

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build test server runtime");

        runtime.block_on(async move {
            let listener = match tokio::net::TcpListener::from_std(listener) {
                Ok(listener) => listener,
                Err(e) => {
                    eprintln!("fixture server: failed to register listener on {addr}: {e}");
                    return;
                }
            };

            let app = Router::new()
                .route("/linux/{version}/{*path}", get(serve_file))
                .fallback(not_found)
                .with_state(state);

            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("fixture server on {addr} stopped: {e}");
            }
        });
    });

    FixtureServer {
        base_url: format!("http://{}/linux", addr),
        requests,
    }
}

async fn serve_file(
    State(state): State<TreeState>,
    UrlPath((version, rel)): UrlPath<(String, String)>,
    uri: Uri,
) -> Response {
    state.record(&uri);

    if version != *state.version || rel.contains("..") {
        return (StatusCode::NOT_FOUND, "404: Not Found").into_response();
    }

    let path = state.root.join(&rel);
    match tokio::fs::read(&path).await {
        Ok(body) => ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, "404: Not Found").into_response()
        }
        Err(e) => {
            eprintln!("fixture server: failed to read {}: {e}", path.display());
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn not_found(State(state): State<TreeState>, uri: Uri) -> Response {
    state.record(&uri);
    (StatusCode::NOT_FOUND, "404: Not Found").into_response()
}

/// Environment variables that would route local requests through a proxy
pub const PROXY_VARS: [&str; 6] = [
    "http_proxy",
    "HTTP_PROXY",
    "https_proxy",
    "HTTPS_PROXY",
    "all_proxy",
    "ALL_PROXY",
];
