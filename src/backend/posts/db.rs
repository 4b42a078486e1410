//! Database operations for posts

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::posts::types::{Comment, Like, Post, PostRow};

/// Create a post authored by `author`
pub async fn create_post(pool: &SqlitePool, author: &User, text: &str) -> Result<Post, sqlx::Error> {
    let post = Post {
        id: Uuid::new_v4(),
        user: author.id,
        text: text.to_string(),
        name: author.name.clone(),
        avatar: author.avatar.clone(),
        likes: Vec::new(),
        comments: Vec::new(),
        date: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO posts (id, user_id, text, name, avatar, likes, comments, created_at)
        VALUES ($1, $2, $3, $4, $5, '[]', '[]', $6)
        "#
    )
    .bind(post.id)
    .bind(post.user)
    .bind(&post.text)
    .bind(&post.name)
    .bind(&post.avatar)
    .bind(post.date)
    .execute(pool)
    .await?;

    Ok(post)
}

/// All posts, newest first
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<Post>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, user_id, text, name, avatar, likes, comments, created_at
        FROM posts
        ORDER BY julianday(created_at) DESC, rowid DESC
        "#
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Post::from).collect())
}

/// Get a post by ID
pub async fn get_post(pool: &SqlitePool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, user_id, text, name, avatar, likes, comments, created_at
        FROM posts
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Post::from))
}

/// Delete a post; `true` if it existed
pub async fn delete_post(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Replace a post's likes
pub async fn set_likes(pool: &SqlitePool, id: Uuid, likes: &[Like]) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE posts SET likes = $1 WHERE id = $2")
        .bind(Json(likes))
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Replace a post's comments
pub async fn set_comments(pool: &SqlitePool, id: Uuid, comments: &[Comment]) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE posts SET comments = $1 WHERE id = $2")
        .bind(Json(comments))
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
