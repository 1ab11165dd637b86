//! In-process fake of the VK and Yandex.Disk endpoints for tests.
//!
//! Routes mirror the real APIs under a local base URL:
//! `/method/photos.get`, `/disk/resources/`, `/disk/resources/upload`,
//! `/upload-target` (the href handed out) and `/images/:name`.

use crate::types::{DiskConfig, VkConfig};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Request counters per route.
#[derive(Default)]
pub(crate) struct Hits {
    pub photos: AtomicUsize,
    pub images: AtomicUsize,
    pub probe: AtomicUsize,
    pub create: AtomicUsize,
    pub upload_link: AtomicUsize,
    pub upload_put: AtomicUsize,
}

struct Behaviour {
    photos_status: u16,
    photos_body: Value,
    probe_status: u16,
    create_status: u16,
    upload_link_status: u16,
    upload_link_body: Option<Value>,
    upload_put_status: u16,
}

#[derive(Default)]
struct Recorded {
    photos_query: HashMap<String, String>,
    last_path: Option<String>,
    last_auth: Option<String>,
    transfer_auth: Vec<Option<String>>,
    upload_paths: Vec<String>,
    uploaded: Vec<Vec<u8>>,
}

struct Inner {
    base: String,
    hits: Arc<Hits>,
    behaviour: Mutex<Behaviour>,
    recorded: Mutex<Recorded>,
}

type Shared = Arc<Inner>;

/// Handle to a running fake server.
pub(crate) struct FakeApi {
    pub base: String,
    pub hits: Arc<Hits>,
    inner: Shared,
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

fn auth_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn photos_get(
    State(api): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    api.hits.photos.fetch_add(1, Ordering::SeqCst);
    api.recorded.lock().unwrap().photos_query = query;
    let behaviour = api.behaviour.lock().unwrap();
    (
        status(behaviour.photos_status),
        Json(behaviour.photos_body.clone()),
    )
}

async fn image(State(api): State<Shared>, Path(name): Path<String>) -> impl IntoResponse {
    api.hits.images.fetch_add(1, Ordering::SeqCst);
    if name == "missing" {
        (StatusCode::NOT_FOUND, Vec::new())
    } else {
        (StatusCode::OK, format!("jpeg-bytes:{}", name).into_bytes())
    }
}

async fn probe_folder(
    State(api): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    api.hits.probe.fetch_add(1, Ordering::SeqCst);
    record_disk_call(&api, &query, &headers);
    let code = api.behaviour.lock().unwrap().probe_status;
    (status(code), Json(json!({"path": query.get("path")})))
}

async fn create_folder(
    State(api): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    api.hits.create.fetch_add(1, Ordering::SeqCst);
    record_disk_call(&api, &query, &headers);
    let code = api.behaviour.lock().unwrap().create_status;
    (status(code), Json(json!({"method": "GET"})))
}

async fn upload_link(
    State(api): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    api.hits.upload_link.fetch_add(1, Ordering::SeqCst);
    record_disk_call(&api, &query, &headers);
    if let Some(path) = query.get("path") {
        api.recorded.lock().unwrap().upload_paths.push(path.clone());
    }
    let behaviour = api.behaviour.lock().unwrap();
    let body = behaviour.upload_link_body.clone().unwrap_or_else(|| {
        json!({
            "href": format!("{}/upload-target", api.base),
            "method": "PUT",
            "templated": false
        })
    });
    (status(behaviour.upload_link_status), Json(body))
}

async fn upload_put(State(api): State<Shared>, headers: HeaderMap, body: Bytes) -> StatusCode {
    api.hits.upload_put.fetch_add(1, Ordering::SeqCst);
    {
        let mut recorded = api.recorded.lock().unwrap();
        recorded.transfer_auth.push(auth_of(&headers));
        recorded.uploaded.push(body.to_vec());
    }
    let code = api.behaviour.lock().unwrap().upload_put_status;
    status(code)
}

fn record_disk_call(api: &Inner, query: &HashMap<String, String>, headers: &HeaderMap) {
    let mut recorded = api.recorded.lock().unwrap();
    recorded.last_path = query.get("path").cloned();
    recorded.last_auth = auth_of(headers);
}

impl FakeApi {
    /// Binds to an ephemeral port and serves until the runtime shuts down.
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(Hits::default());
        let inner = Arc::new(Inner {
            base: base.clone(),
            hits: Arc::clone(&hits),
            behaviour: Mutex::new(Behaviour {
                photos_status: 200,
                photos_body: json!({"response": {"count": 0, "items": []}}),
                probe_status: 200,
                create_status: 201,
                upload_link_status: 200,
                upload_link_body: None,
                upload_put_status: 201,
            }),
            recorded: Mutex::new(Recorded::default()),
        });

        let app = Router::new()
            .route("/method/photos.get", get(photos_get))
            .route("/images/:name", get(image))
            .route("/disk/resources/", get(probe_folder).put(create_folder))
            .route("/disk/resources/upload", get(upload_link))
            .route("/upload-target", axum::routing::put(upload_put))
            .with_state(Arc::clone(&inner));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base, hits, inner }
    }

    pub fn image_url(&self, name: &str) -> String {
        format!("{}/images/{}", self.base, name)
    }

    pub fn set_photos_status(&self, code: u16) {
        self.inner.behaviour.lock().unwrap().photos_status = code;
    }

    pub fn set_photos_body(&self, body: Value) {
        self.inner.behaviour.lock().unwrap().photos_body = body;
    }

    pub fn set_probe_status(&self, code: u16) {
        self.inner.behaviour.lock().unwrap().probe_status = code;
    }

    pub fn set_create_status(&self, code: u16) {
        self.inner.behaviour.lock().unwrap().create_status = code;
    }

    pub fn set_upload_link_status(&self, code: u16) {
        self.inner.behaviour.lock().unwrap().upload_link_status = code;
    }

    pub fn set_upload_link_body(&self, body: Value) {
        self.inner.behaviour.lock().unwrap().upload_link_body = Some(body);
    }

    pub fn set_upload_put_status(&self, code: u16) {
        self.inner.behaviour.lock().unwrap().upload_put_status = code;
    }

    pub fn last_photos_query(&self) -> HashMap<String, String> {
        self.inner.recorded.lock().unwrap().photos_query.clone()
    }

    pub fn last_path(&self) -> Option<String> {
        self.inner.recorded.lock().unwrap().last_path.clone()
    }

    pub fn last_auth(&self) -> Option<String> {
        self.inner.recorded.lock().unwrap().last_auth.clone()
    }

    pub fn transfer_auth(&self) -> Vec<Option<String>> {
        self.inner.recorded.lock().unwrap().transfer_auth.clone()
    }

    pub fn upload_paths(&self) -> Vec<String> {
        self.inner.recorded.lock().unwrap().upload_paths.clone()
    }

    pub fn uploaded(&self) -> Vec<Vec<u8>> {
        self.inner.recorded.lock().unwrap().uploaded.clone()
    }
}

pub(crate) fn vk_config(api: &FakeApi) -> VkConfig {
    VkConfig {
        token: "vk-token".to_string(),
        base_url: format!("{}/method", api.base),
        timeout: Duration::from_secs(5),
        ..VkConfig::default()
    }
}

pub(crate) fn disk_config(api: &FakeApi) -> DiskConfig {
    DiskConfig {
        token: "yd-token".to_string(),
        base_url: format!("{}/disk/resources/", api.base),
        timeout: Duration::from_secs(5),
    }
}
