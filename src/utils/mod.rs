pub mod countries;
pub mod search;
pub mod url;

pub use countries::{countries, country_label, is_country_code};
pub use search::{fold, matches_term};
pub use url::{manuscript_download_url, request_base_url};
