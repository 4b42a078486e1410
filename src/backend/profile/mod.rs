//! Profile Module
//!
//! Developer profiles: one per user, with embedded experience and
//! education lists, plus the GitHub repository proxy shown on profile
//! pages.

pub mod types;
pub mod db;
pub mod handlers;
pub mod github;

pub use github::GithubClient;
pub use handlers::*;
