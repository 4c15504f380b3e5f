//! Query-string filters for the chair listings.
//!
//! A filter is parsed from the raw `(key, value)` pairs of the request. When
//! parsing fails the listing is shown unfiltered; the caller never sees an
//! error, only a [`FilterStatus::Ignored`] it may display next to the form.

pub mod submissions;
pub mod users;

pub use submissions::SubmissionFilter;
pub use users::{Participation, UserFilter};

use thiserror::Error;

/// Raw query pairs; keys may repeat (`status=accepted&status=rejected`)
pub type QueryPairs = [(String, String)];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidFilter {
    #[error("unknown status `{0}`")]
    UnknownStatus(String),
    #[error("`{field}` expects a number, got `{value}`")]
    NotANumber { field: &'static str, value: String },
    #[error("submission type {0} does not belong to this conference")]
    ForeignSubmissionType(i64),
    #[error("unknown country code `{0}`")]
    UnknownCountry(String),
    #[error("unknown participation value `{0}`")]
    UnknownParticipation(String),
}

/// Predicate over listing records
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterStatus {
    Applied,
    Ignored(InvalidFilter),
}

impl FilterStatus {
    pub fn error_message(&self) -> String {
        match self {
            FilterStatus::Applied => String::new(),
            FilterStatus::Ignored(e) => e.to_string(),
        }
    }
}

/// Narrow `items` with the parsed filter, or keep all of them when the
/// filter could not be parsed.
pub fn apply_or_all<T, F>(parsed: Result<F, InvalidFilter>, items: Vec<T>) -> (Vec<T>, FilterStatus)
where
    F: Filter<T>,
{
    match parsed {
        Ok(filter) => {
            let before = items.len();
            let kept: Vec<T> = items.into_iter().filter(|item| filter.matches(item)).collect();
            tracing::debug!("Filter kept {} of {} records", kept.len(), before);
            (kept, FilterStatus::Applied)
        }
        Err(e) => {
            tracing::debug!("Ignoring invalid filter: {}", e);
            (items, FilterStatus::Ignored(e))
        }
    }
}

/// Non-empty, trimmed values for `key`
pub(crate) fn values<'a>(params: &'a QueryPairs, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    params
        .iter()
        .filter(move |(k, _)| k == key)
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}

/// Last non-empty value for `key`
pub(crate) fn value<'a>(params: &'a QueryPairs, key: &'a str) -> Option<&'a str> {
    values(params, key).last()
}

pub(crate) fn parse_countries(params: &QueryPairs) -> Result<Vec<String>, InvalidFilter> {
    values(params, "country")
        .map(|code| {
            if crate::utils::is_country_code(code) {
                Ok(code.to_uppercase())
            } else {
                Err(InvalidFilter::UnknownCountry(code.to_string()))
            }
        })
        .collect()
}
