#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use cafe_server::{Config, RedbStore, ServerState};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::MenuItem;
use tower::ServiceExt;

pub fn menu_item(id: &str, name: &str, price: f64, created_at: i64) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        price,
        category: "coffee".to_string(),
        image: None,
        created_at,
    }
}

/// In-memory state with two menu items (`m1` Flat white, `m2` Croissant)
pub fn test_state() -> ServerState {
    let store = RedbStore::open_in_memory().unwrap();
    store.put_menu_item(&menu_item("m1", "Flat white", 4.75, 1)).unwrap();
    store.put_menu_item(&menu_item("m2", "Croissant", 3.20, 2)).unwrap();
    ServerState::with_store(Config::with_work_dir("unused"), store)
}

pub fn staff_token(state: &ServerState) -> String {
    state.jwt.generate_token("u1", "barista", "staff").unwrap()
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
