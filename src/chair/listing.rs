//! Display records for the chair listings.
//!
//! Everything here is a pure transformation of already fetched records; the
//! order of the input is preserved.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use utoipa::ToSchema;

use crate::filters::{
    apply_or_all, FilterStatus, QueryPairs, SubmissionFilter, UserFilter,
};
use crate::models::{Member, MemberActivity, SubmissionRecord, SubmissionStatus, SubmissionType};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorEntry {
    pub name: String,
    pub user_pk: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmissionEntry {
    pub pk: i64,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub authors: Vec<AuthorEntry>,
    pub authors_display: String,
    pub warnings: Vec<String>,
    /// Numeric status code, see `SubmissionStatus::code`
    pub status: i16,
    pub status_display: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserEntry {
    pub pk: i64,
    pub name: String,
    pub name_rus: String,
    pub avatar: String,
    pub country: String,
    pub city: String,
    pub affiliation: String,
    pub degree: String,
    pub role: String,
    pub num_submissions: usize,
    pub is_participant: bool,
}

pub fn submission_entry(rec: &SubmissionRecord) -> SubmissionEntry {
    let authors: Vec<AuthorEntry> = rec
        .authors
        .iter()
        .map(|a| AuthorEntry {
            name: a.member.full_name(),
            user_pk: a.member.id(),
        })
        .filter(|a| !a.name.is_empty())
        .collect();
    let authors_display = authors
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    SubmissionEntry {
        pk: rec.submission.id,
        title: rec.submission.title.clone(),
        abstract_text: rec.submission.abstract_text.clone(),
        authors,
        authors_display,
        warnings: rec.warnings(),
        status: rec.submission.status.code(),
        status_display: rec.submission.status.label().to_string(),
    }
}

pub fn user_entry(activity: &MemberActivity) -> UserEntry {
    let member = &activity.member;
    UserEntry {
        pk: member.id(),
        name: member.full_name(),
        name_rus: member.full_name_rus(),
        avatar: member.avatar(),
        country: member.country_display(),
        city: member.city().to_string(),
        affiliation: member.affiliation().to_string(),
        degree: member.degree().to_string(),
        role: member.role().to_string(),
        num_submissions: activity.num_submissions,
        is_participant: activity.is_participant(),
    }
}

/// Pair every member with their authorship count in the conference.
/// Members missing from `counts` have no authorships there.
pub fn member_activity(members: Vec<Member>, counts: &HashMap<i64, usize>) -> Vec<MemberActivity> {
    members
        .into_iter()
        .map(|member| {
            let num_submissions = counts.get(&member.id()).copied().unwrap_or(0);
            MemberActivity { member, num_submissions }
        })
        .collect()
}

pub struct SubmissionListing {
    pub submissions: Vec<SubmissionEntry>,
    /// Parsed filter, default when the query was invalid
    pub filter: SubmissionFilter,
    pub status: FilterStatus,
}

/// Filter and shape the submissions of a conference.
pub fn list_submissions(
    records: Vec<SubmissionRecord>,
    params: &QueryPairs,
    stypes: &[SubmissionType],
) -> SubmissionListing {
    let parsed = SubmissionFilter::parse(params, stypes);
    let filter = parsed.clone().unwrap_or_default();
    let (records, status) = apply_or_all(parsed, records);

    SubmissionListing {
        submissions: records.iter().map(submission_entry).collect(),
        filter,
        status,
    }
}

pub struct UserListing {
    pub users: Vec<UserEntry>,
    pub filter: UserFilter,
    pub status: FilterStatus,
}

/// Filter and shape all site users as seen from one conference.
pub fn list_users(
    members: Vec<Member>,
    counts: &HashMap<i64, usize>,
    params: &QueryPairs,
) -> UserListing {
    let parsed = UserFilter::parse(params);
    let filter = parsed.clone().unwrap_or_default();
    let (activities, status) = apply_or_all(parsed, member_activity(members, counts));

    UserListing {
        users: activities.iter().map(user_entry).collect(),
        filter,
        status,
    }
}

/// Submissions of the conference authored by `user_id`
pub fn submissions_of(records: &[SubmissionRecord], user_id: i64) -> Vec<SubmissionEntry> {
    records
        .iter()
        .filter(|rec| rec.has_author(user_id))
        .map(submission_entry)
        .collect()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: i16,
    pub label: String,
    pub count: usize,
}

/// Numbers shown on the chair dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConferenceSummary {
    pub total_submissions: usize,
    pub by_status: Vec<StatusCount>,
    pub num_authors: usize,
    pub num_submission_types: usize,
    pub submissions_with_warnings: usize,
}

pub fn summarize(records: &[SubmissionRecord], stypes: &[SubmissionType]) -> ConferenceSummary {
    let by_status = SubmissionStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: status.code(),
            label: status.label().to_string(),
            count: records.iter().filter(|r| r.submission.status == *status).count(),
        })
        .collect();

    let authors: BTreeSet<i64> = records
        .iter()
        .flat_map(|r| r.authors.iter().map(|a| a.member.id()))
        .collect();

    ConferenceSummary {
        total_submissions: records.len(),
        by_status,
        num_authors: authors.len(),
        num_submission_types: stypes.len(),
        submissions_with_warnings: records.iter().filter(|r| !r.warnings().is_empty()).count(),
    }
}
