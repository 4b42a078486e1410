//! Profile HTTP Handlers
//!
//! Handlers for `/api/profile`. Reads by user id and the GitHub proxy are
//! public; everything that touches the caller's own profile sits behind
//! the auth middleware.

use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use super::github::GithubClient;
use super::types::{
    parse_date, split_skills, Education, EducationRequest, Experience, ExperienceRequest, Profile,
    ProfileFields, ProfileRequest, Social,
};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::shared::validation::non_blank;
use crate::shared::{MessageBody, Validator};

const NO_PROFILE: &str = "There is no profile for this user";
const PROFILE_NOT_FOUND: &str = "Profile not found";

async fn own_profile(pool: &SqlitePool, user_id: Uuid) -> Result<Profile, ApiError> {
    db::get_profile_by_user(pool, user_id)
        .await?
        .ok_or_else(|| ApiError::bad_request(NO_PROFILE))
}

/// `from` must be present and a date; `to`, if given, must be a date
fn check_dates(validator: &mut Validator, from: Option<&str>, to: Option<&str>) {
    validator.required("from", from, "From date is required");
    if let Some(from) = from.filter(|f| !f.trim().is_empty()) {
        validator.check("from", parse_date(from).is_some(), "From date is not a valid date");
    }
    if let Some(to) = to.filter(|t| !t.trim().is_empty()) {
        validator.check("to", parse_date(to).is_some(), "To date is not a valid date");
    }
}

/// Optional date field; blank counts as absent
fn optional_date(value: Option<String>) -> Option<chrono::NaiveDate> {
    non_blank(value).as_deref().and_then(parse_date)
}

/// GET /api/profile/me
pub async fn get_my_profile(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(own_profile(&pool, auth.user_id).await?))
}

/// POST /api/profile
///
/// Creates the caller's profile or updates it in place.
pub async fn upsert_profile(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let skills = split_skills(request.skills.as_deref().unwrap_or_default());
    Validator::new()
        .required("status", request.status.as_deref(), "Status is required")
        .check("skills", !skills.is_empty(), "Skills are required")
        .finish()
        .map_err(ApiError::Validation)?;

    // A token can outlive its account
    if get_user_by_id(&pool, auth.user_id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    let fields = ProfileFields {
        company: non_blank(request.company),
        website: non_blank(request.website),
        location: non_blank(request.location),
        status: request.status.unwrap_or_default().trim().to_string(),
        skills,
        bio: non_blank(request.bio),
        githubusername: non_blank(request.githubusername),
        social: Social {
            youtube: non_blank(request.youtube),
            twitter: non_blank(request.twitter),
            facebook: non_blank(request.facebook),
            linkedin: non_blank(request.linkedin),
            instagram: non_blank(request.instagram),
        },
    };

    let profile = db::upsert_profile(&pool, auth.user_id, fields)
        .await?
        .ok_or_else(|| ApiError::Internal("profile missing after upsert".to_string()))?;

    tracing::info!("Saved profile for user {}", auth.user_id);
    Ok(Json(profile))
}

/// GET /api/profile
pub async fn list_profiles(State(pool): State<SqlitePool>) -> Result<Json<Vec<Profile>>, ApiError> {
    Ok(Json(db::list_profiles(&pool).await?))
}

/// GET /api/profile/user/{user_id}
///
/// A malformed id is answered the same as an unknown one.
pub async fn get_profile_by_user_id(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let user_id = Uuid::parse_str(&user_id).map_err(|_| ApiError::bad_request(PROFILE_NOT_FOUND))?;

    db::get_profile_by_user(&pool, user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::bad_request(PROFILE_NOT_FOUND))
}

/// DELETE /api/profile
///
/// Removes the caller's posts, profile and user record.
pub async fn delete_account(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<MessageBody>, ApiError> {
    db::delete_account(&pool, auth.user_id).await?;
    Ok(Json(MessageBody::new("User deleted")))
}

/// PUT /api/profile/experience
pub async fn add_experience(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Json(request): Json<ExperienceRequest>,
) -> Result<Json<Profile>, ApiError> {
    let mut validator = Validator::new();
    validator
        .required("title", request.title.as_deref(), "Title is required")
        .required("company", request.company.as_deref(), "Company is required");
    check_dates(&mut validator, request.from.as_deref(), request.to.as_deref());
    validator.finish().map_err(ApiError::Validation)?;

    let from = request
        .from
        .as_deref()
        .and_then(parse_date)
        .ok_or_else(|| ApiError::field("from", "From date is required"))?;

    let mut profile = own_profile(&pool, auth.user_id).await?;

    let entry = Experience {
        id: Uuid::new_v4(),
        title: request.title.unwrap_or_default().trim().to_string(),
        company: request.company.unwrap_or_default().trim().to_string(),
        location: non_blank(request.location),
        from,
        to: optional_date(request.to),
        current: request.current,
        description: non_blank(request.description),
    };

    profile.experience.insert(0, entry);
    db::set_experience(&pool, auth.user_id, &profile.experience).await?;

    Ok(Json(profile))
}

/// DELETE /api/profile/experience/{exp_id}
pub async fn delete_experience(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let mut profile = own_profile(&pool, auth.user_id).await?;

    let index = Uuid::parse_str(&exp_id)
        .ok()
        .and_then(|id| profile.experience.iter().position(|e| e.id == id))
        .ok_or_else(|| ApiError::not_found("Experience not found"))?;

    profile.experience.remove(index);
    db::set_experience(&pool, auth.user_id, &profile.experience).await?;

    Ok(Json(profile))
}

/// PUT /api/profile/education
pub async fn add_education(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Json(request): Json<EducationRequest>,
) -> Result<Json<Profile>, ApiError> {
    let mut validator = Validator::new();
    validator
        .required("school", request.school.as_deref(), "School is required")
        .required("degree", request.degree.as_deref(), "Degree is required")
        .required("fieldofstudy", request.fieldofstudy.as_deref(), "Field of study is required");
    check_dates(&mut validator, request.from.as_deref(), request.to.as_deref());
    validator.finish().map_err(ApiError::Validation)?;

    let from = request
        .from
        .as_deref()
        .and_then(parse_date)
        .ok_or_else(|| ApiError::field("from", "From date is required"))?;

    let mut profile = own_profile(&pool, auth.user_id).await?;

    let entry = Education {
        id: Uuid::new_v4(),
        school: request.school.unwrap_or_default().trim().to_string(),
        degree: request.degree.unwrap_or_default().trim().to_string(),
        fieldofstudy: request.fieldofstudy.unwrap_or_default().trim().to_string(),
        from,
        to: optional_date(request.to),
        current: request.current,
        description: non_blank(request.description),
    };

    profile.education.insert(0, entry);
    db::set_education(&pool, auth.user_id, &profile.education).await?;

    Ok(Json(profile))
}

/// DELETE /api/profile/education/{edu_id}
pub async fn delete_education(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let mut profile = own_profile(&pool, auth.user_id).await?;

    let index = Uuid::parse_str(&edu_id)
        .ok()
        .and_then(|id| profile.education.iter().position(|e| e.id == id))
        .ok_or_else(|| ApiError::not_found("Education not found"))?;

    profile.education.remove(index);
    db::set_education(&pool, auth.user_id, &profile.education).await?;

    Ok(Json(profile))
}

/// GET /api/profile/github/{username}
pub async fn github_repos(
    State(github): State<GithubClient>,
    Path(username): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    github
        .user_repos(&username)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No Github profile found"))
}
