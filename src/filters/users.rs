use std::str::FromStr;

use crate::models::MemberActivity;
use crate::utils::matches_term;

use super::{parse_countries, value, Filter, InvalidFilter, QueryPairs};

/// Whether a user has authored anything in the conference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Participation {
    #[default]
    Any,
    Participants,
    NonParticipants,
}

impl Participation {
    pub fn as_str(self) -> &'static str {
        match self {
            Participation::Any => "any",
            Participation::Participants => "participants",
            Participation::NonParticipants => "non_participants",
        }
    }
}

impl FromStr for Participation {
    type Err = InvalidFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Participation::Any),
            "participants" => Ok(Participation::Participants),
            "non_participants" => Ok(Participation::NonParticipants),
            other => Err(InvalidFilter::UnknownParticipation(other.to_string())),
        }
    }
}

/// Filter for the users listing
///
/// Recognized keys: `term`, `country`, `participation`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub term: String,
    pub countries: Vec<String>,
    pub participation: Participation,
}

impl UserFilter {
    pub fn parse(params: &QueryPairs) -> Result<Self, InvalidFilter> {
        let participation = match value(params, "participation") {
            Some(raw) => raw.parse()?,
            None => Participation::Any,
        };

        Ok(UserFilter {
            term: value(params, "term").unwrap_or_default().to_string(),
            countries: parse_countries(params)?,
            participation,
        })
    }
}

impl Filter<MemberActivity> for UserFilter {
    fn matches(&self, item: &MemberActivity) -> bool {
        match self.participation {
            Participation::Participants if !item.is_participant() => return false,
            Participation::NonParticipants if item.is_participant() => return false,
            _ => {}
        }

        let member = &item.member;
        if !self.countries.is_empty()
            && !self
                .countries
                .iter()
                .any(|c| c.eq_ignore_ascii_case(member.country_code()))
        {
            return false;
        }

        let name = member.full_name();
        let name_rus = member.full_name_rus();
        matches_term(
            &self.term,
            [name.as_str(), name_rus.as_str(), member.email(), member.affiliation()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, Profile, User};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn activity(id: i64, profile: Option<Profile>, num_submissions: usize) -> MemberActivity {
        MemberActivity {
            member: Member {
                user: User { id, email: format!("user{}@rudn.ru", id) },
                profile,
            },
            num_submissions,
        }
    }

    fn profile(first: &str, last: &str, country: &str) -> Option<Profile> {
        Some(Profile {
            first_name: first.to_string(),
            last_name: last.to_string(),
            country: country.to_string(),
            affiliation: "RUDN University".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_participation() {
        let filter = UserFilter::parse(&pairs(&[("participation", "participants")])).unwrap();
        assert!(filter.matches(&activity(1, None, 2)));
        assert!(!filter.matches(&activity(2, None, 0)));

        let filter = UserFilter::parse(&pairs(&[("participation", "non_participants")])).unwrap();
        assert!(!filter.matches(&activity(1, None, 2)));
        assert!(filter.matches(&activity(2, None, 0)));
    }

    #[test]
    fn test_term_and_country() {
        let filter = UserFilter::parse(&pairs(&[("term", "rudn"), ("country", "RU")])).unwrap();
        assert!(filter.matches(&activity(1, profile("Ivan", "Ivanov", "RU"), 0)));
        assert!(!filter.matches(&activity(2, profile("Jan", "Nowak", "PL"), 0)));
    }

    #[test]
    fn test_user_without_profile_matches_by_email() {
        let filter = UserFilter::parse(&pairs(&[("term", "user9@")])).unwrap();
        assert!(filter.matches(&activity(9, None, 0)));

        let filter = UserFilter::parse(&pairs(&[("country", "RU")])).unwrap();
        assert!(!filter.matches(&activity(9, None, 0)));
    }

    #[test]
    fn test_invalid_participation() {
        assert_eq!(
            UserFilter::parse(&pairs(&[("participation", "maybe")])),
            Err(InvalidFilter::UnknownParticipation("maybe".to_string()))
        );
    }
}
