//! CSV exports of a conference's submissions and authors.
//!
//! Rows are numbered from 1 in ascending primary-key order regardless of the
//! order the records were fetched in.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::models::{Member, SubmissionRecord};
use crate::utils::manuscript_download_url;

pub const SUBMISSIONS_HEADER: [&str; 9] = [
    "#", "ID", "TITLE", "AUTHORS", "COUNTRY", "CORR_AUTHOR", "CORR_EMAIL", "LANGUAGE", "LINK",
];

pub const AUTHORS_HEADER: [&str; 10] = [
    "#", "ID", "FULL_NAME", "FULL_NAME_RUS", "DEGREE", "COUNTRY", "CITY", "AFFILIATION", "ROLE",
    "EMAIL",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportEntity {
    Submissions,
    Authors,
}

impl ExportEntity {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportEntity::Submissions => "submissions",
            ExportEntity::Authors => "authors",
        }
    }
}

impl fmt::Display for ExportEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportEntity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submissions" => Ok(ExportEntity::Submissions),
            "authors" => Ok(ExportEntity::Authors),
            other => Err(format!("unknown export `{}`, expected submissions or authors", other)),
        }
    }
}

/// Attachment name, e.g. `submissions-20240131_0945.csv`
pub fn export_filename(entity: ExportEntity, generated_at: NaiveDateTime) -> String {
    format!("{}-{}.csv", entity, generated_at.format("%Y%m%d_%H%M"))
}

/// Author countries of a submission, de-duplicated and sorted by label
pub fn author_countries(rec: &SubmissionRecord) -> String {
    rec.authors
        .iter()
        .map(|a| a.member.country_display())
        .filter(|label| !label.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the submissions CSV.
///
/// `base_url` is the public origin used for manuscript download links.
pub fn submissions_csv(records: &[SubmissionRecord], base_url: &str) -> Result<Vec<u8>, csv::Error> {
    let mut sorted: Vec<&SubmissionRecord> = records.iter().collect();
    sorted.sort_by_key(|rec| rec.id());

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(SUBMISSIONS_HEADER)?;

    for (number, rec) in sorted.into_iter().enumerate() {
        let sub = &rec.submission;
        let authors = rec
            .authors
            .iter()
            .map(|a| a.member.full_name())
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let (corr_author, corr_email) = match &rec.owner {
            Some(owner) => (owner.full_name(), owner.email().to_string()),
            None => (String::new(), String::new()),
        };
        let language = rec
            .stype
            .as_ref()
            .map(|t| t.language_display())
            .unwrap_or_default();
        let link = if sub.review_manuscript.is_some() {
            manuscript_download_url(base_url, sub.id)
        } else {
            String::new()
        };

        wtr.write_record([
            (number + 1).to_string(),
            sub.id.to_string(),
            sub.title.clone(),
            authors,
            author_countries(rec),
            corr_author,
            corr_email,
            language,
            link,
        ])?;
    }

    finish(wtr)
}

/// Build the authors CSV: every user with at least one authorship in the
/// conference, per `counts`.
pub fn authors_csv(members: &[Member], counts: &HashMap<i64, usize>) -> Result<Vec<u8>, csv::Error> {
    let mut authors: Vec<&Member> = members
        .iter()
        .filter(|m| counts.get(&m.id()).is_some_and(|n| *n > 0))
        .collect();
    authors.sort_by_key(|m| m.id());

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(AUTHORS_HEADER)?;

    for (number, member) in authors.into_iter().enumerate() {
        wtr.write_record([
            (number + 1).to_string(),
            member.id().to_string(),
            member.full_name(),
            member.full_name_rus(),
            member.degree().to_string(),
            member.country_display(),
            member.city().to_string(),
            member.affiliation().to_string(),
            member.role().to_string(),
            member.email().to_string(),
        ])?;
    }

    finish(wtr)
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, csv::Error> {
    wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}
