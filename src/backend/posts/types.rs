/**
 * Post Types
 *
 * Posts carry a copy of the author's name and avatar taken at creation
 * time, so they still render after the author's account is gone.
 * Likes and comments are embedded, newest first.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// One user's like on a post
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Like {
    pub id: Uuid,
    pub user: Uuid,
}

/// A comment embedded in a post
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

/// Post row as stored
#[derive(Debug, sqlx::FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub likes: Json<Vec<Like>>,
    pub comments: Json<Vec<Comment>>,
    pub created_at: DateTime<Utc>,
}

/// Post as sent to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            user: row.user_id,
            text: row.text,
            name: row.name,
            avatar: row.avatar,
            likes: row.likes.0,
            comments: row.comments.0,
            date: row.created_at,
        }
    }
}

/// Why a comment could not be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentRemoval {
    NotFound,
    NotOwner,
}

impl Post {
    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }

    /// Prepend a like from `user_id`; `false` if already liked
    pub fn add_like(&mut self, user_id: Uuid) -> bool {
        if self.is_liked_by(user_id) {
            return false;
        }
        self.likes.insert(0, Like { id: Uuid::new_v4(), user: user_id });
        true
    }

    /// Remove `user_id`'s like; `false` if there was none
    pub fn remove_like(&mut self, user_id: Uuid) -> bool {
        let before = self.likes.len();
        self.likes.retain(|like| like.user != user_id);
        self.likes.len() != before
    }

    /// Remove the comment `comment_id`, provided `user_id` wrote it
    pub fn remove_comment(&mut self, comment_id: Uuid, user_id: Uuid) -> Result<Comment, CommentRemoval> {
        let index = self
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or(CommentRemoval::NotFound)?;

        if self.comments[index].user != user_id {
            return Err(CommentRemoval::NotOwner);
        }

        Ok(self.comments.remove(index))
    }
}

/// Body of POST /api/posts and POST /api/posts/comment/{id}
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct TextRequest {
    pub text: Option<String>,
}
