//! Post HTTP Handlers
//!
//! Every route here is protected. Ownership is checked against the
//! token's user id, never against anything in the request body.

use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use super::types::{Comment, CommentRemoval, Like, Post, TextRequest};
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::shared::{MessageBody, Validator};

const POST_NOT_FOUND: &str = "Post not found";
const NOT_AUTHORIZED: &str = "User not authorized";

fn validate_text(request: &TextRequest) -> Result<String, ApiError> {
    Validator::new()
        .required("text", request.text.as_deref(), "Text is required")
        .finish()
        .map_err(ApiError::Validation)?;
    Ok(request.text.as_deref().unwrap_or_default().trim().to_string())
}

async fn current_user(pool: &SqlitePool, user_id: Uuid) -> Result<User, ApiError> {
    get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// Load a post by its path id; malformed ids are treated as missing
async fn load_post(pool: &SqlitePool, id: &str) -> Result<Post, ApiError> {
    let id = Uuid::parse_str(id).map_err(|_| ApiError::not_found(POST_NOT_FOUND))?;
    db::get_post(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(POST_NOT_FOUND))
}

/// POST /api/posts
pub async fn create_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Json(request): Json<TextRequest>,
) -> Result<Json<Post>, ApiError> {
    let text = validate_text(&request)?;
    let author = current_user(&pool, auth.user_id).await?;

    let post = db::create_post(&pool, &author, &text).await?;
    tracing::info!("User {} created post {}", author.id, post.id);

    Ok(Json(post))
}

/// GET /api/posts
pub async fn list_posts(State(pool): State<SqlitePool>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(db::list_posts(&pool).await?))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(load_post(&pool, &id).await?))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let post = load_post(&pool, &id).await?;

    if post.user != auth.user_id {
        tracing::warn!("User {} tried to delete post {} of {}", auth.user_id, post.id, post.user);
        return Err(ApiError::not_authorized(NOT_AUTHORIZED));
    }

    db::delete_post(&pool, post.id).await?;
    Ok(Json(MessageBody::new("Post removed")))
}

/// PUT /api/posts/like/{id}
pub async fn like_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let mut post = load_post(&pool, &id).await?;

    if !post.add_like(auth.user_id) {
        return Err(ApiError::bad_request("Post already liked"));
    }

    db::set_likes(&pool, post.id, &post.likes).await?;
    Ok(Json(post.likes))
}

/// PUT /api/posts/unlike/{id}
pub async fn unlike_post(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let mut post = load_post(&pool, &id).await?;

    if !post.remove_like(auth.user_id) {
        return Err(ApiError::bad_request("Post has not yet been liked"));
    }

    db::set_likes(&pool, post.id, &post.likes).await?;
    Ok(Json(post.likes))
}

/// POST /api/posts/comment/{id}
pub async fn add_comment(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
    Json(request): Json<TextRequest>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let text = validate_text(&request)?;
    let author = current_user(&pool, auth.user_id).await?;
    let mut post = load_post(&pool, &id).await?;

    post.comments.insert(
        0,
        Comment {
            id: Uuid::new_v4(),
            user: author.id,
            text,
            name: author.name,
            avatar: author.avatar,
            date: chrono::Utc::now(),
        },
    );

    db::set_comments(&pool, post.id, &post.comments).await?;
    Ok(Json(post.comments))
}

/// DELETE /api/posts/comment/{id}/{comment_id}
pub async fn delete_comment(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let mut post = load_post(&pool, &id).await?;

    let comment_id = Uuid::parse_str(&comment_id)
        .map_err(|_| ApiError::not_found("Comment does not exist"))?;

    match post.remove_comment(comment_id, auth.user_id) {
        Ok(_) => {}
        Err(CommentRemoval::NotFound) => return Err(ApiError::not_found("Comment does not exist")),
        Err(CommentRemoval::NotOwner) => return Err(ApiError::not_authorized(NOT_AUTHORIZED)),
    }

    db::set_comments(&pool, post.id, &post.comments).await?;
    Ok(Json(post.comments))
}
