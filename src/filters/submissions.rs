use crate::models::{SubmissionRecord, SubmissionStatus, SubmissionType};
use crate::utils::matches_term;

use super::{parse_countries, value, values, Filter, InvalidFilter, QueryPairs};

/// Filter for the submissions listing
///
/// Recognized keys: `term`, `status`, `type`, `country`. Every other key is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    pub term: String,
    pub statuses: Vec<SubmissionStatus>,
    pub types: Vec<i64>,
    pub countries: Vec<String>,
}

impl SubmissionFilter {
    /// Parse the query against the conference's submission types.
    pub fn parse(params: &QueryPairs, stypes: &[SubmissionType]) -> Result<Self, InvalidFilter> {
        let term = value(params, "term").unwrap_or_default().to_string();

        let statuses = values(params, "status")
            .map(|s| s.parse::<SubmissionStatus>().map_err(InvalidFilter::UnknownStatus))
            .collect::<Result<Vec<_>, _>>()?;

        let mut types = Vec::new();
        for raw in values(params, "type") {
            let id = raw.parse::<i64>().map_err(|_| InvalidFilter::NotANumber {
                field: "type",
                value: raw.to_string(),
            })?;
            if !stypes.iter().any(|t| t.id == id) {
                return Err(InvalidFilter::ForeignSubmissionType(id));
            }
            types.push(id);
        }

        let countries = parse_countries(params)?;

        Ok(SubmissionFilter {
            term,
            statuses,
            types,
            countries,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.statuses.is_empty() && self.types.is_empty() && self.countries.is_empty()
    }
}

impl Filter<SubmissionRecord> for SubmissionFilter {
    fn matches(&self, rec: &SubmissionRecord) -> bool {
        let sub = &rec.submission;

        if !self.statuses.is_empty() && !self.statuses.contains(&sub.status) {
            return false;
        }

        if !self.types.is_empty() && !sub.stype_id.is_some_and(|id| self.types.contains(&id)) {
            return false;
        }

        if !self.countries.is_empty()
            && !rec.authors.iter().any(|a| {
                self.countries
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(a.member.country_code()))
            })
        {
            return false;
        }

        let names: Vec<String> = rec.authors.iter().map(|a| a.member.full_name()).collect();
        matches_term(
            &self.term,
            std::iter::once(sub.title.as_str()).chain(names.iter().map(String::as_str)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, Profile, Submission, SubmissionAuthor, User};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn stypes() -> Vec<SubmissionType> {
        vec![SubmissionType {
            id: 10,
            conference_id: 1,
            name: "Full paper".to_string(),
            language: "en".to_string(),
        }]
    }

    fn author(id: i64, first: &str, last: &str, country: &str) -> SubmissionAuthor {
        SubmissionAuthor {
            order: 1,
            member: Member {
                user: User { id, email: format!("u{}@example.org", id) },
                profile: Some(Profile {
                    user_id: id,
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    country: country.to_string(),
                    ..Default::default()
                }),
            },
        }
    }

    fn record(id: i64, title: &str, status: SubmissionStatus, stype_id: Option<i64>) -> SubmissionRecord {
        SubmissionRecord {
            submission: Submission {
                id,
                conference_id: 1,
                title: title.to_string(),
                abstract_text: String::new(),
                status,
                stype_id,
                created_by: None,
                review_manuscript: None,
            },
            stype: None,
            authors: vec![author(id * 100, "Jürgen", "Klein", "DE")],
            owner: None,
        }
    }

    #[test]
    fn test_empty_query_is_empty_filter() {
        let filter = SubmissionFilter::parse(&pairs(&[("term", ""), ("page", "2")]), &stypes()).unwrap();
        assert!(filter.is_empty());
        assert!(filter.matches(&record(1, "Anything", SubmissionStatus::Rejected, None)));
    }

    #[test]
    fn test_status_and_type() {
        let filter = SubmissionFilter::parse(
            &pairs(&[("status", "accepted"), ("status", "under_review"), ("type", "10")]),
            &stypes(),
        )
        .unwrap();
        assert!(filter.matches(&record(1, "A", SubmissionStatus::Accepted, Some(10))));
        assert!(!filter.matches(&record(2, "B", SubmissionStatus::Submitted, Some(10))));
        assert!(!filter.matches(&record(3, "C", SubmissionStatus::Accepted, None)));
    }

    #[test]
    fn test_term_searches_title_and_authors() {
        let filter = SubmissionFilter::parse(&pairs(&[("term", "jurgen")]), &stypes()).unwrap();
        assert!(filter.matches(&record(1, "Unrelated title", SubmissionStatus::Submitted, None)));

        let filter = SubmissionFilter::parse(&pairs(&[("term", "QUEUE")]), &stypes()).unwrap();
        assert!(filter.matches(&record(1, "Queueing systems", SubmissionStatus::Submitted, None)));
        assert!(!filter.matches(&record(2, "Networks", SubmissionStatus::Submitted, None)));
    }

    #[test]
    fn test_country() {
        let filter = SubmissionFilter::parse(&pairs(&[("country", "de")]), &stypes()).unwrap();
        assert!(filter.matches(&record(1, "A", SubmissionStatus::Submitted, None)));

        let filter = SubmissionFilter::parse(&pairs(&[("country", "FR")]), &stypes()).unwrap();
        assert!(!filter.matches(&record(1, "A", SubmissionStatus::Submitted, None)));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            SubmissionFilter::parse(&pairs(&[("status", "lost")]), &stypes()),
            Err(InvalidFilter::UnknownStatus("lost".to_string()))
        );
        assert_eq!(
            SubmissionFilter::parse(&pairs(&[("type", "ten")]), &stypes()),
            Err(InvalidFilter::NotANumber { field: "type", value: "ten".to_string() })
        );
        assert_eq!(
            SubmissionFilter::parse(&pairs(&[("type", "11")]), &stypes()),
            Err(InvalidFilter::ForeignSubmissionType(11))
        );
        assert_eq!(
            SubmissionFilter::parse(&pairs(&[("country", "Atlantis")]), &stypes()),
            Err(InvalidFilter::UnknownCountry("Atlantis".to_string()))
        );
    }
}
