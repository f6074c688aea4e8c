#![allow(dead_code)]

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const ADMIN_KEY: &str = "edd1c9f034335f136f87ad84b625c8f1";
pub const LAST_IMPORT: &str = "2024-01-01T00:00:00Z";
pub const IMPORTED_AT: &str = "2024-06-01T12:00:00Z";
pub const EXPORT_BODY: &str = "routes:\n  - uri: /hello\n    upstream_id: 1\n";

/// One request seen by the mock admin API
#[derive(Debug, Clone)]
pub struct Received {
    pub path: String,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct MockAdmin {
    pub received: Arc<Mutex<Vec<Received>>>,
}

impl MockAdmin {
    pub fn requests(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    pub fn imports(&self) -> Vec<Received> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == "/apisix/admin/import")
            .collect()
    }

    fn record(&self, path: &str, headers: &HeaderMap, body: String) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.received.lock().unwrap().push(Received {
            path: path.to_string(),
            api_key: header("x-api-key"),
            content_type: header(CONTENT_TYPE.as_str()),
            body,
        });
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == ADMIN_KEY)
}

/// Start a mock admin API on an ephemeral port.
///
/// Requests without the right `X-API-KEY` get 401 (403 for export).
/// Imports whose body contains `invalid` fail with 500 and `bad yaml`;
/// imports whose body contains `silent` fail with an empty 422.
pub async fn start_mock_admin() -> anyhow::Result<(String, MockAdmin)> {
    let mock = MockAdmin::default();

    let last = mock.clone();
    let import = mock.clone();
    let export = mock.clone();
    let app = Router::new()
        .route(
            "/apisix/admin/import/last",
            get(move |headers: HeaderMap| {
                let mock = last.clone();
                async move {
                    mock.record("/apisix/admin/import/last", &headers, String::new());
                    if !authorized(&headers) {
                        return StatusCode::UNAUTHORIZED.into_response();
                    }
                    Json(serde_json::json!({ "last_import": LAST_IMPORT }))
                        .into_response()
                }
            }),
        )
        .route(
            "/apisix/admin/import",
            post(move |headers: HeaderMap, body: String| {
                let mock = import.clone();
                async move {
                    mock.record("/apisix/admin/import", &headers, body.clone());
                    import_response(&headers, &body)
                }
            }),
        )
        .route(
            "/apisix/admin/export",
            get(move |headers: HeaderMap| {
                let mock = export.clone();
                async move {
                    mock.record("/apisix/admin/export", &headers, String::new());
                    if !authorized(&headers) {
                        return StatusCode::FORBIDDEN.into_response();
                    }
                    (
                        [(CONTENT_TYPE, "application/x-yaml")],
                        EXPORT_BODY,
                    )
                        .into_response()
                }
            }),
        );

    let listener =
        tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("mock admin server error: {e}");
        }
    });

    Ok((base_url, mock))
}

fn import_response(headers: &HeaderMap, body: &str) -> Response {
    if !authorized(headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if body.contains("invalid") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "bad yaml").into_response();
    }
    if body.contains("silent") {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    }
    Json(serde_json::json!({ "message": "ok", "last_import": IMPORTED_AT }))
        .into_response()
}

/// Write a CLI config whose only context points at `admin_url`
pub async fn write_cli_config(
    dir: &TempDir,
    admin_url: &str,
    admin_key: Option<&str>,
) -> anyhow::Result<std::path::PathBuf> {
    let cfg = serde_yaml::to_string(&serde_json::json!({
        "contexts": {
            "default": {
                "admin_url": admin_url,
                "admin_key": admin_key,
                "timeout_secs": 10,
            }
        },
        "current_context": "default"
    }))?;

    let path = dir.path().join("config.yml");
    tokio::fs::write(&path, cfg).await?;
    Ok(path)
}
