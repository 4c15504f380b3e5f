use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Member, SubmissionType};

/// Review status enum matching the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "submission_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::Submitted,
        SubmissionStatus::UnderReview,
        SubmissionStatus::Accepted,
        SubmissionStatus::Rejected,
    ];

    /// Numeric code used by templates to pick a status style
    pub fn code(self) -> i16 {
        match self {
            SubmissionStatus::Submitted => 0,
            SubmissionStatus::UnderReview => 1,
            SubmissionStatus::Accepted => 2,
            SubmissionStatus::Rejected => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "Submitted",
            SubmissionStatus::UnderReview => "Under review",
            SubmissionStatus::Accepted => "Accepted",
            SubmissionStatus::Rejected => "Rejected",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::UnderReview => "under_review",
            SubmissionStatus::Accepted => "accepted",
            SubmissionStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubmissionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Submission row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Submission {
    pub id: i64,
    pub conference_id: i64,
    pub title: String,
    #[sqlx(rename = "abstract")]
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub status: SubmissionStatus,
    pub stype_id: Option<i64>,
    pub created_by: Option<i64>,
    /// Stored file name of the review manuscript
    pub review_manuscript: Option<String>,
}

/// Authorship linking a user to a submission
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Authorship {
    pub id: i64,
    pub submission_id: i64,
    pub user_id: i64,
    #[sqlx(rename = "author_order")]
    pub order: i32,
}

/// An author of a submission, resolved to the linked member
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionAuthor {
    pub order: i32,
    pub member: Member,
}

/// A submission with everything the chair views need already resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionRecord {
    pub submission: Submission,
    pub stype: Option<SubmissionType>,
    /// Authors in authorship order
    pub authors: Vec<SubmissionAuthor>,
    /// Corresponding author (the submission's creator)
    pub owner: Option<Member>,
}

impl SubmissionRecord {
    pub fn id(&self) -> i64 {
        self.submission.id
    }

    pub fn has_author(&self, user_id: i64) -> bool {
        self.authors.iter().any(|a| a.member.id() == user_id)
    }

    /// Problems a chair should look at before the submission goes to review.
    pub fn warnings(&self) -> Vec<String> {
        let sub = &self.submission;
        let mut warnings = Vec::new();
        if sub.title.trim().is_empty() {
            warnings.push("Title is empty".to_string());
        }
        if sub.abstract_text.trim().is_empty() {
            warnings.push("Abstract is empty".to_string());
        }
        if self.authors.is_empty() {
            warnings.push("No authors specified".to_string());
        }
        if self.stype.is_none() {
            warnings.push("Submission type is not set".to_string());
        }
        if sub.review_manuscript.is_none() {
            warnings.push("Review manuscript is not uploaded".to_string());
        }
        warnings
    }
}
