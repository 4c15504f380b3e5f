#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use chrono::{TimeZone, Utc};

use chairdesk::models::{
    Conference, Profile, Submission, SubmissionStatus, SubmissionType, User,
};
use chairdesk::{create_app, AppState, Config, MemoryStore};

/// Chair of conference 1
pub const CHAIR_TOKEN: &str = "chair-token-0123456789abcdefghijklmnop";
/// Valid token of a user who chairs nothing
pub const OUTSIDER_TOKEN: &str = "outsider-token-0123456789abcdefghijklm";

fn profile(user_id: i64, first: &str, last: &str, country: &str, affiliation: &str) -> Profile {
    Profile {
        user_id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        country: country.to_string(),
        affiliation: affiliation.to_string(),
        ..Default::default()
    }
}

fn user(id: i64, email: &str) -> User {
    User {
        id,
        email: email.to_string(),
    }
}

fn submission(
    id: i64,
    conference_id: i64,
    title: &str,
    abstract_text: &str,
    status: SubmissionStatus,
    created_by: i64,
    review_manuscript: Option<&str>,
) -> Submission {
    Submission {
        id,
        conference_id,
        title: title.to_string(),
        abstract_text: abstract_text.to_string(),
        status,
        stype_id: Some(10),
        created_by: Some(created_by),
        review_manuscript: review_manuscript.map(str::to_string),
    }
}

/// Two conferences; in conference 1 submission 5 is stored before
/// submission 3, and user 4 has no profile.
pub fn fixture_store() -> MemoryStore {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

    MemoryStore::new()
        .with_conference(Conference {
            id: 1,
            short_name: "DCCN 2024".to_string(),
            full_name: "Distributed Computer and Communication Networks".to_string(),
            created_at,
        })
        .with_conference(Conference {
            id: 2,
            short_name: "QIP 2024".to_string(),
            full_name: "Quantum Information Processing".to_string(),
            created_at,
        })
        .with_chair(1, 1)
        .with_submission_type(SubmissionType {
            id: 10,
            conference_id: 1,
            name: "Full paper".to_string(),
            language: "en".to_string(),
        })
        .with_user(user(1, "chair@example.org"), Some(profile(1, "Olga", "Chair", "RU", "RUDN")))
        .with_user(user(2, "ivan@example.org"), Some(profile(2, "Ivan", "Petrov", "RU", "MSU")))
        .with_user(user(3, "anna@example.org"), Some(profile(3, "Anna", "Schmidt", "DE", "TU Berlin")))
        .with_user(user(4, "ghost@example.org"), None)
        .with_user(user(5, "john@example.org"), Some(profile(5, "John", "Smith", "US", "MIT")))
        .with_submission(submission(
            5,
            1,
            "Quantum routing",
            "Routing of entangled pairs",
            SubmissionStatus::Accepted,
            2,
            Some("paper5.pdf"),
        ))
        .with_submission(submission(
            3,
            1,
            "Queue analysis",
            "",
            SubmissionStatus::Submitted,
            3,
            None,
        ))
        .with_submission(submission(
            9,
            2,
            "Error correction",
            "Surface codes",
            SubmissionStatus::UnderReview,
            5,
            None,
        ))
        .with_author(5, 2)
        .with_author(5, 3)
        .with_author(3, 3)
        .with_author(3, 4)
        .with_author(9, 5)
}

pub fn test_config(public_base_url: Option<&str>) -> Config {
    let mut chair_tokens = HashMap::new();
    chair_tokens.insert(CHAIR_TOKEN.to_string(), 1);
    chair_tokens.insert(OUTSIDER_TOKEN.to_string(), 5);

    Config {
        database_url: String::new(),
        bind_addr: "127.0.0.1:0".to_string(),
        public_base_url: public_base_url.map(str::to_string),
        chair_tokens,
        run_migrations: false,
    }
}

/// Create the application router for testing
pub fn create_test_app(public_base_url: Option<&str>) -> Router {
    create_app(AppState::new(fixture_store(), test_config(public_base_url)))
}
