//! Fake listings backend shared by the integration tests

#![allow(dead_code)]

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Listings the fake backend serves, newest first
#[derive(Clone, Default)]
pub struct Backend {
    pub listings: Arc<Mutex<Vec<Value>>>,
    pub uploads: Arc<Mutex<usize>>,
}

impl Backend {
    pub fn with_listings(listings: Vec<Value>) -> Self {
        Self {
            listings: Arc::new(Mutex::new(listings)),
            uploads: Arc::default(),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/v1/books", get(list_books))
            .route("/api/v1/books/upload", post(upload_book))
            .with_state(self.clone())
    }
}

async fn list_books(State(backend): State<Backend>) -> Json<Value> {
    Json(Value::Array(backend.listings.lock().unwrap().clone()))
}

/// Echo the `book` part back as record 42
async fn upload_book(
    State(backend): State<Backend>,
    mut multipart: axum_extra::extract::Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    let mut book: Option<Value> = None;
    let mut has_photo = false;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        match name.as_str() {
            "book" => {
                book = Some(
                    serde_json::from_slice(&bytes)
                        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
                )
            }
            "photo" => has_photo = !bytes.is_empty(),
            _ => {}
        }
    }

    let mut book = book.ok_or((StatusCode::BAD_REQUEST, "No book part".to_string()))?;
    if !has_photo {
        return Err((StatusCode::BAD_REQUEST, "No photo part".to_string()));
    }
    book["id"] = json!(42);
    book["photoUrl"] = json!("/api/v1/books/42/photo");

    *backend.uploads.lock().unwrap() += 1;
    backend.listings.lock().unwrap().insert(0, book.clone());
    Ok(Json(book))
}

/// Start a router on an ephemeral port, returning its API base
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

/// An API base nothing is listening on
pub fn dead_api_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

pub fn phone_listing(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "author": "Jane Austen",
        "price": 0,
        "photoUrl": format!("/api/v1/books/{}/photo", id),
        "type": "GIVEAWAY",
        "description": "Free to a good home",
        "ownerName": "Cleo",
        "contactMethod": "PHONE",
        "contactInfo": "555-0101"
    })
}
