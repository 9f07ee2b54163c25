// --------------------------------------------------
// Handles API endpoints for post CRUD operations.
//
// Responsibilities:
// - Create / read / update / delete posts
// - Each mutating handler runs a full load -> modify -> save cycle
//   against posts.json (no cross-request locking; last save wins)
// -------------------------------------------------

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::errors::ApiError;
use crate::models::{Post, now_fixed_offset};

// An id that doesn't even parse certainly names no post.
fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound)
}

// -----------------------------
// GET /api/posts
// Returns all posts stored in posts.json
// -----------------------------
pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let posts = state.store.load_posts()?;
    Ok(Json(posts))
}

// -----------------------------
// GET /api/posts/:id
// Returns a single post by ID
// -----------------------------
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let posts = state.store.load_posts()?;
    let post = posts
        .into_iter()
        .find(|p| p.id == id)
        .ok_or(ApiError::NotFound)?;
    Ok(Json(post))
}

#[derive(Debug, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    pub body: String,
    pub image: Option<String>, // relative path from the upload endpoint
}

// -----------------------------
// POST /api/posts
// Creates a new post and saves it to posts.json
// -----------------------------
pub async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<CreatePostInput>,
) -> Result<impl IntoResponse, ApiError> {
    if input.title.trim().is_empty() {
        return Err(ApiError::Validation("title required".to_string()));
    }
    if input.body.trim().is_empty() {
        return Err(ApiError::Validation("body required".to_string()));
    }

    let now = now_fixed_offset();
    let post = Post {
        id: Uuid::new_v4(),
        title: input.title,
        body: input.body,
        image: input.image,
        created_at: now,
        updated_at: now,
    };

    let mut posts = state.store.load_posts()?;
    posts.push(post.clone());
    state.store.save_posts(&posts)?;

    Ok((StatusCode::CREATED, Json(post)))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
}

// -----------------------------
// PUT /api/posts/:id
// Updates an existing post by ID; only supplied fields change
// -----------------------------
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePostInput>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;

    if matches!(&input.title, Some(t) if t.trim().is_empty()) {
        return Err(ApiError::Validation("title must not be empty".to_string()));
    }
    if matches!(&input.body, Some(b) if b.trim().is_empty()) {
        return Err(ApiError::Validation("body must not be empty".to_string()));
    }

    let mut posts = state.store.load_posts()?;
    let post = posts
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(ApiError::NotFound)?;

    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(body) = input.body {
        post.body = body;
    }
    if let Some(image) = input.image {
        post.image = Some(image);
    }
    post.updated_at = now_fixed_offset();

    let updated = post.clone();
    state.store.save_posts(&posts)?;

    Ok(Json(updated))
}

// -----------------------------
// DELETE /api/posts/:id
// Removes a post permanently (its image, if any, stays on disk)
// -----------------------------
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;

    let mut posts = state.store.load_posts()?;
    let before = posts.len();
    posts.retain(|p| p.id != id);

    if posts.len() == before {
        return Err(ApiError::NotFound);
    }

    state.store.save_posts(&posts)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
