use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Conference record (matches database schema)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Conference {
    pub id: i64,
    pub short_name: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl Conference {
    /// Heading used by the chair pages, e.g. "DCCN 2024"
    pub fn title(&self) -> String {
        if self.short_name.is_empty() {
            self.full_name.clone()
        } else {
            self.short_name.clone()
        }
    }
}

/// Submission type declared by a conference (paper, poster, ...)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SubmissionType {
    pub id: i64,
    pub conference_id: i64,
    pub name: String,
    /// Language code of the manuscript, e.g. `en` or `ru`
    pub language: String,
}

const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("ru", "Russian")];

impl SubmissionType {
    /// Human readable language label; unknown codes are shown as-is.
    pub fn language_display(&self) -> String {
        language_label(&self.language)
    }
}

pub fn language_label(code: &str) -> String {
    LANGUAGES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| code.to_string())
}
