//! In-process CRUD API used by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::Value;

#[derive(Default)]
struct ApiState {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicI64,
    reject_writes: AtomicBool,
}

impl ApiState {
    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn rejecting(&self) -> bool {
        self.reject_writes.load(Ordering::SeqCst)
    }
}

/// Serves `/api/{collection}` and `/api/{collection}/{id}` from memory on a
/// random local port.
pub struct TestApi {
    base_url: String,
    handle: ServerHandle,
    state: web::Data<ApiState>,
}

impl TestApi {
    pub async fn start(clients: Value, projects: Value) -> Self {
        let state = web::Data::new(ApiState {
            next_id: AtomicI64::new(100),
            ..ApiState::default()
        });
        {
            let mut collections = state.collections.lock().unwrap();
            collections.insert("clientes".into(), as_rows(clients));
            collections.insert("proyectos".into(), as_rows(projects));
        }

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/api/{collection}", web::get().to(list))
                .route("/api/{collection}", web::post().to(create))
                .route("/api/{collection}/{id}", web::put().to(update))
                .route("/api/{collection}/{id}", web::delete().to(remove))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}"),
            handle,
            state,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every request served so far, as `"METHOD /path"`.
    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn rows(&self, collection: &str) -> Vec<Value> {
        self.state
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Makes every create, update and delete answer `500`.
    pub fn reject_writes(&self, reject: bool) {
        self.state.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

fn as_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        _ => Vec::new(),
    }
}

fn row_id(row: &Value) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}

async fn list(state: web::Data<ApiState>, path: web::Path<String>) -> HttpResponse {
    let collection = path.into_inner();
    state.record(format!("GET /api/{collection}"));
    match state.collections.lock().unwrap().get(&collection) {
        Some(rows) => HttpResponse::Ok().json(rows),
        None => HttpResponse::NotFound().finish(),
    }
}

async fn create(
    state: web::Data<ApiState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let collection = path.into_inner();
    state.record(format!("POST /api/{collection}"));
    if state.rejecting() {
        return HttpResponse::InternalServerError().finish();
    }
    let mut row = body.into_inner();
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    if let Value::Object(fields) = &mut row {
        fields.insert("id".into(), Value::from(id));
    }
    let mut collections = state.collections.lock().unwrap();
    match collections.get_mut(&collection) {
        Some(rows) => {
            rows.push(row.clone());
            HttpResponse::Created().json(vec![row])
        }
        None => HttpResponse::NotFound().finish(),
    }
}

async fn update(
    state: web::Data<ApiState>,
    path: web::Path<(String, i64)>,
    body: web::Json<Value>,
) -> HttpResponse {
    let (collection, id) = path.into_inner();
    state.record(format!("PUT /api/{collection}/{id}"));
    if state.rejecting() {
        return HttpResponse::InternalServerError().finish();
    }
    let mut collections = state.collections.lock().unwrap();
    let Some(row) = collections
        .get_mut(&collection)
        .and_then(|rows| rows.iter_mut().find(|row| row_id(row) == Some(id)))
    else {
        return HttpResponse::NotFound().finish();
    };
    if let (Value::Object(fields), Value::Object(changes)) = (row, body.into_inner()) {
        fields.extend(changes);
    }
    HttpResponse::Ok().json(serde_json::json!({"ok": true}))
}

async fn remove(state: web::Data<ApiState>, path: web::Path<(String, i64)>) -> HttpResponse {
    let (collection, id) = path.into_inner();
    state.record(format!("DELETE /api/{collection}/{id}"));
    if state.rejecting() {
        return HttpResponse::InternalServerError().finish();
    }
    let mut collections = state.collections.lock().unwrap();
    let Some(rows) = collections.get_mut(&collection) else {
        return HttpResponse::NotFound().finish();
    };
    let before = rows.len();
    rows.retain(|row| row_id(row) != Some(id));
    if rows.len() == before {
        HttpResponse::NotFound().finish()
    } else {
        HttpResponse::NoContent().finish()
    }
}
