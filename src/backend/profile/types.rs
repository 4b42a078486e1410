/**
 * Profile Types
 *
 * The developer profile attached to a user, its embedded experience and
 * education entries, and the request bodies that edit them.
 *
 * Reads always populate `user` with the owner's id, name and avatar.
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// Owner fields copied into every profile response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

/// A job held by the profile owner
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A course of study
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Social network links
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// Profile row joined with its owner
#[derive(Debug, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_avatar: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Json<Vec<String>>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub experience: Json<Vec<Experience>>,
    pub education: Json<Vec<Education>>,
    pub social: Json<Social>,
    pub created_at: DateTime<Utc>,
}

/// Profile as sent to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub user: UserSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub social: Social,
    pub date: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            user: UserSummary {
                id: row.user_id,
                name: row.user_name,
                avatar: row.user_avatar,
            },
            company: row.company,
            website: row.website,
            location: row.location,
            status: row.status,
            skills: row.skills.0,
            bio: row.bio,
            githubusername: row.githubusername,
            experience: row.experience.0,
            education: row.education.0,
            social: row.social.0,
            date: row.created_at,
        }
    }
}

/// Fields written by a create-or-update
///
/// Absent optional fields leave the stored value untouched on update;
/// `social` is always replaced whole.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: Social,
}

/// POST /api/profile body
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    /// Comma-separated list
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// PUT /api/profile/experience body
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

/// PUT /api/profile/education body
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

/// Split a comma-separated skills string, dropping empty entries
pub fn split_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a date sent by a form (`2020-01-31`) or a JS client
/// (`2020-01-31T00:00:00.000Z`)
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_skills() {
        assert_eq!(
            split_skills(" HTML, CSS ,JavaScript,, "),
            vec!["HTML".to_string(), "CSS".to_string(), "JavaScript".to_string()]
        );
        assert!(split_skills(" , ").is_empty());
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();
        assert_eq!(parse_date("2020-01-31"), Some(expected));
        assert_eq!(parse_date("2020-01-31T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_date("31/01/2020"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_social_omits_empty_links() {
        let social = Social {
            twitter: Some("https://twitter.com/dev".into()),
            ..Social::default()
        };
        assert_eq!(
            serde_json::to_value(&social).unwrap(),
            serde_json::json!({ "twitter": "https://twitter.com/dev" })
        );
    }
}
