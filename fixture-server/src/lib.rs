//! HTTP fixtures for exercising data sources end to end.
//!
//! Serves a small blog-like API plus a few endpoints that misbehave on
//! purpose: `/broken` answers 200 with invalid JSON, `/status/{code}`
//! answers with any status, and the post listing carries one record that
//! does not match the post schema.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const GREETING: &str = "hello, world";

/// Body served by `/broken`: a JSON document cut off mid-value.
pub const BROKEN_BODY: &str = r#"{"id": "00000000-0000-0000-0000-000000000001", "title": "#;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
}

/// Request payload for creating a post. Clients send flat string maps.
#[derive(Deserialize)]
pub struct CreatePost {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

pub type Db = Arc<RwLock<Vec<Post>>>;

pub fn seed_posts() -> Vec<Post> {
    vec![
        Post {
            id: Uuid::from_u128(1),
            title: "First post".to_string(),
            body: "Welcome.".to_string(),
        },
        Post {
            id: Uuid::from_u128(2),
            title: "Second post".to_string(),
            body: "More words.".to_string(),
        },
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            username: "ada".to_string(),
            name: "Ada Lovelace".to_string(),
        },
        User {
            username: "grace".to_string(),
            name: "Grace Hopper".to_string(),
        },
    ]
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(seed_posts()));
    Router::new()
        .route("/greeting", get(greeting))
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        .route("/users", get(list_users))
        .route("/broken", get(broken))
        .route("/status/{code}", get(status))
        .route("/headers", get(echo_headers))
        .route("/search", get(echo_query))
        .route("/echo", get(echo_body).post(echo_body).put(echo_body).delete(echo_body))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn greeting() -> &'static str {
    GREETING
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Value>> {
    let posts = db.read().await;
    let mut listing: Vec<Value> = posts.iter().map(|p| json!(p)).collect();
    listing.insert(1, json!({ "id": "not-a-post", "title": null }));
    Json(listing)
}

async fn create_post(State(db): State<Db>, Json(input): Json<CreatePost>) -> Json<Post> {
    let post = Post {
        id: Uuid::new_v4(),
        title: input.title,
        body: input.body,
    };
    tracing::debug!(id = %post.id, "created post");
    db.write().await.push(post.clone());
    Json(post)
}

async fn get_post(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Post>, StatusCode> {
    let posts = db.read().await;
    posts
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_users() -> Json<Vec<User>> {
    Json(users())
}

async fn broken() -> &'static str {
    BROKEN_BODY
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

async fn echo_headers(headers: HeaderMap) -> Json<BTreeMap<String, String>> {
    Json(
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect(),
    )
}

async fn echo_query(Query(params): Query<HashMap<String, String>>) -> Json<HashMap<String, String>> {
    Json(params)
}

/// Echoes a JSON body back. Requests without a body get an empty object.
async fn echo_body(body: String) -> Result<Json<Value>, StatusCode> {
    if body.is_empty() {
        return Ok(Json(json!({})));
    }
    serde_json::from_str(&body).map(Json).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)
}
