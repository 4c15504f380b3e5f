//! Text folding for the chair search boxes.
//!
//! Search terms and the searched fields are folded the same way before a
//! substring test, so "jose" finds "José" and "  ANNA " finds "Anna".

use unicode_normalization::UnicodeNormalization;

/// Fold text for accent- and case-insensitive comparison.
///
/// # Examples
/// ```
/// use chairdesk::utils::fold;
///
/// assert_eq!(fold("José  García"), "jose garcia");
/// assert_eq!(fold("Müller"), "muller");
/// ```
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// True when the folded `needle` occurs in any of the folded `haystacks`.
/// An empty needle matches everything.
pub fn matches_term<'a, I>(needle: &str, haystacks: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = fold(needle);
    if needle.is_empty() {
        return true;
    }
    haystacks.into_iter().any(|h| fold(h).contains(&needle))
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_accents_and_case() {
        assert_eq!(fold("Ångström"), "angstrom");
        assert_eq!(fold("\tZOË\n"), "zoe");
    }

    #[test]
    fn test_fold_cyrillic_is_lowercased() {
        assert_eq!(fold("ПЕТРОВА"), "петрова");
    }

    #[test]
    fn test_matches_term() {
        assert!(matches_term("garc", ["Title", "José García"]));
        assert!(!matches_term("smith", ["Title", "José García"]));
        assert!(matches_term("   ", ["anything"]));
        assert!(matches_term("", std::iter::empty::<&str>()));
    }
}
