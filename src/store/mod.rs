//! Read access to conference data.
//!
//! Handlers only talk to [`ChairStore`]; the Postgres implementation backs
//! the server and the export tool, the in-memory one backs tests.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::models::{
    Conference, Member, Submission, SubmissionAuthor, SubmissionRecord, SubmissionType,
};

#[async_trait]
pub trait ChairStore: Send + Sync {
    async fn conference(&self, id: i64) -> Result<Option<Conference>, sqlx::Error>;

    async fn is_chair(&self, conference_id: i64, user_id: i64) -> Result<bool, sqlx::Error>;

    async fn submission_types(&self, conference_id: i64) -> Result<Vec<SubmissionType>, sqlx::Error>;

    /// Submissions of the conference with authors, type and owner resolved.
    /// No particular order is guaranteed.
    async fn submissions(&self, conference_id: i64) -> Result<Vec<SubmissionRecord>, sqlx::Error>;

    /// All site users with their profiles
    async fn members(&self) -> Result<Vec<Member>, sqlx::Error>;

    async fn member(&self, user_id: i64) -> Result<Option<Member>, sqlx::Error>;

    /// Number of authorships per user within the conference; users without
    /// any are absent from the map.
    async fn authorship_counts(&self, conference_id: i64) -> Result<HashMap<i64, usize>, sqlx::Error>;
}

/// Join fetched rows into [`SubmissionRecord`]s, keeping submission order.
///
/// `authors` are `(submission_id, order, member)` triples; each submission's
/// authors end up sorted by order.
pub(crate) fn assemble_records(
    submissions: Vec<Submission>,
    stypes: &[SubmissionType],
    authors: Vec<(i64, i32, Member)>,
    owners: Vec<Member>,
) -> Vec<SubmissionRecord> {
    let mut by_submission: HashMap<i64, Vec<SubmissionAuthor>> = HashMap::new();
    for (submission_id, order, member) in authors {
        by_submission
            .entry(submission_id)
            .or_default()
            .push(SubmissionAuthor { order, member });
    }
    let owners: HashMap<i64, Member> = owners.into_iter().map(|m| (m.id(), m)).collect();

    submissions
        .into_iter()
        .map(|submission| {
            let mut authors = by_submission.remove(&submission.id).unwrap_or_default();
            authors.sort_by_key(|a| a.order);
            SubmissionRecord {
                stype: submission
                    .stype_id
                    .and_then(|id| stypes.iter().find(|t| t.id == id).cloned()),
                owner: submission.created_by.and_then(|id| owners.get(&id).cloned()),
                authors,
                submission,
            }
        })
        .collect()
}
