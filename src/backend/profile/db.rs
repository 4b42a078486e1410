//! Database operations for profiles
//!
//! Every read joins the owner so responses carry `{ id, name, avatar }`.
//! Experience and education live in JSON columns and are rewritten whole.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::delete_user;
use crate::backend::profile::types::{Education, Experience, Profile, ProfileFields, ProfileRow};

const SELECT_PROFILE: &str = r#"
    SELECT p.id, p.user_id, u.name AS user_name, u.avatar AS user_avatar,
           p.company, p.website, p.location, p.status, p.skills, p.bio,
           p.githubusername, p.experience, p.education, p.social, p.created_at
    FROM profiles p
    JOIN users u ON u.id = p.user_id
"#;

/// Get the profile owned by a user
pub async fn get_profile_by_user(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Option<Profile>, sqlx::Error> {
    let sql = format!("{SELECT_PROFILE} WHERE p.user_id = $1");
    let row = sqlx::query_as::<_, ProfileRow>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Profile::from))
}

/// List every profile, oldest first
pub async fn list_profiles(pool: &SqlitePool) -> Result<Vec<Profile>, sqlx::Error> {
    let sql = format!("{SELECT_PROFILE} ORDER BY julianday(p.created_at) ASC, p.rowid ASC");
    let rows = sqlx::query_as::<_, ProfileRow>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Profile::from).collect())
}

/// Create the user's profile, or update it if one exists
///
/// On update, optional fields that are `None` keep their stored value.
pub async fn upsert_profile(
    pool: &SqlitePool,
    user_id: Uuid,
    fields: ProfileFields,
) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO profiles
            (id, user_id, company, website, location, status, skills, bio, githubusername, social, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT(user_id) DO UPDATE SET
            company        = COALESCE(excluded.company, profiles.company),
            website        = COALESCE(excluded.website, profiles.website),
            location       = COALESCE(excluded.location, profiles.location),
            status         = excluded.status,
            skills         = excluded.skills,
            bio            = COALESCE(excluded.bio, profiles.bio),
            githubusername = COALESCE(excluded.githubusername, profiles.githubusername),
            social         = excluded.social
        "#
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&fields.company)
    .bind(&fields.website)
    .bind(&fields.location)
    .bind(&fields.status)
    .bind(Json(&fields.skills))
    .bind(&fields.bio)
    .bind(&fields.githubusername)
    .bind(Json(&fields.social))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    get_profile_by_user(pool, user_id).await
}

/// Replace the experience list of a user's profile
pub async fn set_experience(
    pool: &SqlitePool,
    user_id: Uuid,
    experience: &[Experience],
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE profiles SET experience = $1 WHERE user_id = $2")
        .bind(Json(experience))
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Replace the education list of a user's profile
pub async fn set_education(
    pool: &SqlitePool,
    user_id: Uuid,
    education: &[Education],
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE profiles SET education = $1 WHERE user_id = $2")
        .bind(Json(education))
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove a user's posts, profile and account together
///
/// Either all three go or none do.
pub async fn delete_account(pool: &SqlitePool, user_id: Uuid) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let posts = sqlx::query("DELETE FROM posts WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    delete_user(&mut tx, user_id).await?;

    tx.commit().await?;

    tracing::info!("Deleted account {} and {} posts", user_id, posts);
    Ok(())
}
