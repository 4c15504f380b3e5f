pub mod export;
pub mod listing;

pub use export::{
    authors_csv, export_filename, submissions_csv, ExportEntity, AUTHORS_HEADER, SUBMISSIONS_HEADER,
};
pub use listing::{
    list_submissions, list_users, member_activity, submission_entry, submissions_of, summarize,
    user_entry, AuthorEntry, ConferenceSummary, StatusCount, SubmissionEntry, SubmissionListing,
    UserEntry, UserListing,
};
