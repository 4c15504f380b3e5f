use std::collections::HashMap;

use async_trait::async_trait;

use super::{assemble_records, ChairStore};
use crate::models::{
    Authorship, Conference, Member, Profile, Submission, SubmissionRecord, SubmissionType, User,
};

/// Store kept entirely in memory.
///
/// Records come back in insertion order, which makes it easy to reproduce
/// an arbitrary database fetch order in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    conferences: Vec<Conference>,
    chairs: Vec<(i64, i64)>,
    stypes: Vec<SubmissionType>,
    submissions: Vec<Submission>,
    members: Vec<Member>,
    authorships: Vec<Authorship>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conference(mut self, conference: Conference) -> Self {
        self.conferences.push(conference);
        self
    }

    pub fn with_chair(mut self, conference_id: i64, user_id: i64) -> Self {
        self.chairs.push((conference_id, user_id));
        self
    }

    pub fn with_submission_type(mut self, stype: SubmissionType) -> Self {
        self.stypes.push(stype);
        self
    }

    pub fn with_user(mut self, user: User, profile: Option<Profile>) -> Self {
        self.members.push(Member { user, profile });
        self
    }

    pub fn with_submission(mut self, submission: Submission) -> Self {
        self.submissions.push(submission);
        self
    }

    /// Link `user_id` to `submission_id`; ids are assigned sequentially.
    pub fn with_author(mut self, submission_id: i64, user_id: i64) -> Self {
        let order = self
            .authorships
            .iter()
            .filter(|a| a.submission_id == submission_id)
            .count() as i32
            + 1;
        self.authorships.push(Authorship {
            id: self.authorships.len() as i64 + 1,
            submission_id,
            user_id,
            order,
        });
        self
    }

    fn find_member(&self, user_id: i64) -> Option<&Member> {
        self.members.iter().find(|m| m.id() == user_id)
    }

    fn conference_submission_ids(&self, conference_id: i64) -> Vec<i64> {
        self.submissions
            .iter()
            .filter(|s| s.conference_id == conference_id)
            .map(|s| s.id)
            .collect()
    }
}

#[async_trait]
impl ChairStore for MemoryStore {
    async fn conference(&self, id: i64) -> Result<Option<Conference>, sqlx::Error> {
        Ok(self.conferences.iter().find(|c| c.id == id).cloned())
    }

    async fn is_chair(&self, conference_id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.chairs.contains(&(conference_id, user_id)))
    }

    async fn submission_types(&self, conference_id: i64) -> Result<Vec<SubmissionType>, sqlx::Error> {
        Ok(self
            .stypes
            .iter()
            .filter(|t| t.conference_id == conference_id)
            .cloned()
            .collect())
    }

    async fn submissions(&self, conference_id: i64) -> Result<Vec<SubmissionRecord>, sqlx::Error> {
        let submissions: Vec<Submission> = self
            .submissions
            .iter()
            .filter(|s| s.conference_id == conference_id)
            .cloned()
            .collect();
        let stypes = self.submission_types(conference_id).await?;

        let authors = self
            .authorships
            .iter()
            .filter(|a| submissions.iter().any(|s| s.id == a.submission_id))
            .filter_map(|a| {
                self.find_member(a.user_id)
                    .map(|m| (a.submission_id, a.order, m.clone()))
            })
            .collect();

        let owners = submissions
            .iter()
            .filter_map(|s| s.created_by)
            .filter_map(|id| self.find_member(id).cloned())
            .collect();

        Ok(assemble_records(submissions, &stypes, authors, owners))
    }

    async fn members(&self) -> Result<Vec<Member>, sqlx::Error> {
        Ok(self.members.clone())
    }

    async fn member(&self, user_id: i64) -> Result<Option<Member>, sqlx::Error> {
        Ok(self.find_member(user_id).cloned())
    }

    async fn authorship_counts(&self, conference_id: i64) -> Result<HashMap<i64, usize>, sqlx::Error> {
        let ids = self.conference_submission_ids(conference_id);
        let mut counts = HashMap::new();
        for a in self.authorships.iter().filter(|a| ids.contains(&a.submission_id)) {
            *counts.entry(a.user_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmissionStatus;
    use chrono::Utc;

    fn submission(id: i64, conference_id: i64) -> Submission {
        Submission {
            id,
            conference_id,
            title: format!("Paper {}", id),
            abstract_text: String::new(),
            status: SubmissionStatus::Submitted,
            stype_id: Some(1),
            created_by: Some(2),
            review_manuscript: None,
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_conference(Conference {
                id: 1,
                short_name: "DCCN".to_string(),
                full_name: String::new(),
                created_at: Utc::now(),
            })
            .with_submission_type(SubmissionType {
                id: 1,
                conference_id: 1,
                name: "Paper".to_string(),
                language: "en".to_string(),
            })
            .with_user(User { id: 1, email: "one@example.org".to_string() }, None)
            .with_user(User { id: 2, email: "two@example.org".to_string() }, None)
            .with_submission(submission(5, 1))
            .with_submission(submission(3, 1))
            .with_submission(submission(8, 2))
            .with_author(5, 2)
            .with_author(5, 1)
            .with_author(3, 2)
            .with_author(8, 1)
    }

    #[tokio::test]
    async fn test_submissions_are_resolved_in_insertion_order() {
        let records = store().submissions(1).await.unwrap();
        let ids: Vec<i64> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![5, 3]);

        let first = &records[0];
        let authors: Vec<i64> = first.authors.iter().map(|a| a.member.id()).collect();
        assert_eq!(authors, vec![2, 1]);
        assert_eq!(first.owner.as_ref().map(|o| o.id()), Some(2));
        assert_eq!(first.stype.as_ref().map(|t| t.name.as_str()), Some("Paper"));
    }

    #[tokio::test]
    async fn test_counts_are_scoped_to_conference() {
        let counts = store().authorship_counts(1).await.unwrap();
        assert_eq!(counts.get(&2), Some(&2));
        assert_eq!(counts.get(&1), Some(&1));

        let other = store().authorship_counts(2).await.unwrap();
        assert_eq!(other.get(&1), Some(&1));
        assert_eq!(other.get(&2), None);
    }
}
