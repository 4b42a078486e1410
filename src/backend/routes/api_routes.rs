/**
 * API Routes
 *
 * Route tables for `/api`. Routes are split into a public table and a
 * protected table; the protected table gets the token middleware as a
 * route layer, so it only runs for requests that matched one of its
 * routes.
 *
 * # Public
 * - `POST /api/users` - Register
 * - `POST /api/auth` - Login
 * - `GET  /api/profile` - All profiles
 * - `GET  /api/profile/user/{user_id}` - Profile by user
 * - `GET  /api/profile/github/{username}` - GitHub repositories
 *
 * # Protected (`x-auth-token`)
 * - `GET    /api/auth` - Current user
 * - `GET    /api/profile/me`
 * - `POST   /api/profile`, `DELETE /api/profile`
 * - `PUT    /api/profile/experience`, `DELETE /api/profile/experience/{exp_id}`
 * - `PUT    /api/profile/education`, `DELETE /api/profile/education/{edu_id}`
 * - Everything under `/api/posts`
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::posts;
use crate::backend::profile;
use crate::backend::server::state::AppState;

/// Routes reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(register))
        .route("/api/auth", post(login))
        .route("/api/profile", get(profile::list_profiles))
        .route("/api/profile/user/{user_id}", get(profile::get_profile_by_user_id))
        .route("/api/profile/github/{username}", get(profile::github_repos))
}

/// Routes that require a valid token
pub fn protected_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth", get(get_me))
        // Profile
        .route("/api/profile/me", get(profile::get_my_profile))
        .route(
            "/api/profile",
            post(profile::upsert_profile).delete(profile::delete_account),
        )
        .route("/api/profile/experience", put(profile::add_experience))
        .route("/api/profile/experience/{exp_id}", delete(profile::delete_experience))
        .route("/api/profile/education", put(profile::add_education))
        .route("/api/profile/education/{edu_id}", delete(profile::delete_education))
        // Posts
        .route("/api/posts", post(posts::create_post).get(posts::list_posts))
        .route("/api/posts/{id}", get(posts::get_post).delete(posts::delete_post))
        .route("/api/posts/like/{id}", put(posts::like_post))
        .route("/api/posts/unlike/{id}", put(posts::unlike_post))
        .route("/api/posts/comment/{id}", post(posts::add_comment))
        .route(
            "/api/posts/comment/{id}/{comment_id}",
            delete(posts::delete_comment),
        )
        .route_layer(from_fn_with_state(app_state, auth_middleware))
}
