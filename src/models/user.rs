use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::country_label;

/// Site account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// Personal data attached to a user account
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Profile {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub first_name_rus: String,
    pub middle_name_rus: String,
    pub last_name_rus: String,
    /// ISO 3166-1 alpha-2 code
    pub country: String,
    pub city: String,
    pub affiliation: String,
    pub degree: String,
    pub role: String,
    pub avatar: Option<String>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn full_name_rus(&self) -> String {
        [&self.first_name_rus, &self.middle_name_rus, &self.last_name_rus]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn country_display(&self) -> String {
        country_label(&self.country)
    }
}

/// A user together with their profile, if one was ever filled in.
///
/// Every accessor yields an empty string when the profile is missing so that
/// listings and exports never have to special-case it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub user: User,
    pub profile: Option<Profile>,
}

impl Member {
    pub fn id(&self) -> i64 {
        self.user.id
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }

    pub fn full_name(&self) -> String {
        self.profile.as_ref().map(Profile::full_name).unwrap_or_default()
    }

    pub fn full_name_rus(&self) -> String {
        self.profile
            .as_ref()
            .map(Profile::full_name_rus)
            .unwrap_or_default()
    }

    pub fn country_code(&self) -> &str {
        self.profile.as_ref().map(|p| p.country.as_str()).unwrap_or("")
    }

    pub fn country_display(&self) -> String {
        self.profile
            .as_ref()
            .map(Profile::country_display)
            .unwrap_or_default()
    }

    pub fn city(&self) -> &str {
        self.profile.as_ref().map(|p| p.city.as_str()).unwrap_or("")
    }

    pub fn affiliation(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.affiliation.as_str())
            .unwrap_or("")
    }

    pub fn degree(&self) -> &str {
        self.profile.as_ref().map(|p| p.degree.as_str()).unwrap_or("")
    }

    pub fn role(&self) -> &str {
        self.profile.as_ref().map(|p| p.role.as_str()).unwrap_or("")
    }

    pub fn avatar(&self) -> String {
        self.profile
            .as_ref()
            .and_then(|p| p.avatar.clone())
            .unwrap_or_default()
    }
}

/// A member plus the number of their authorships in one conference
#[derive(Debug, Clone)]
pub struct MemberActivity {
    pub member: Member,
    pub num_submissions: usize,
}

impl MemberActivity {
    pub fn is_participant(&self) -> bool {
        self.num_submissions > 0
    }
}
