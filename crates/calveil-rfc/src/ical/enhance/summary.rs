//! Event title normalization.

use once_cell::sync::Lazy;
use regex::Regex;

static COURSE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)k_[A-Z0-9_]+").unwrap()
});

static COURSE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^k_[A-Z0-9_]+\s*-\s*").unwrap()
});

/// Removes characters from the common emoji Unicode blocks.
#[must_use]
pub fn strip_emoji(text: &str) -> String {
    text.chars().filter(|c| !is_emoji(*c)).collect()
}

const fn is_emoji(c: char) -> bool {
    matches!(
        c,
        '\u{1F600}'..='\u{1F64F}'
            | '\u{1F300}'..='\u{1F5FF}'
            | '\u{1F680}'..='\u{1F6FF}'
            | '\u{1F1E0}'..='\u{1F1FF}'
            | '\u{2700}'..='\u{27BF}'
            | '\u{1F900}'..='\u{1F9FF}'
    )
}

/// Normalizes a raw SUMMARY value: strips emoji, drops a leading course-code
/// prefix (`k_…` followed by a dash separator), and removes duplicate words
/// while preserving first-occurrence order.
#[must_use]
pub fn normalize_title(summary: &str) -> String {
    let clean = strip_emoji(summary);
    let clean = COURSE_PREFIX.replace(&clean, "");
    let mut words: Vec<&str> = Vec::new();
    for word in clean.trim().split_whitespace() {
        if !words.contains(&word) {
            words.push(word);
        }
    }
    words.join(" ")
}

/// Extracts the first course identifier (`k_…`) found in the raw summary.
#[must_use]
pub fn course_id(summary: &str) -> Option<&str> {
    COURSE_ID.find(summary).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emoji_and_course_prefix() {
        assert_eq!(
            normalize_title("🔒 k_BCS_008 - Computer Security 💻"),
            "Computer Security"
        );
    }

    #[test]
    fn deduplicates_words_in_order() {
        assert_eq!(
            normalize_title("Applied Mathematics Applied Seminar"),
            "Applied Mathematics Seminar"
        );
    }

    #[test]
    fn plain_title_unchanged() {
        assert_eq!(normalize_title("Computer Security"), "Computer Security");
    }

    #[test]
    fn course_prefix_requires_dash_separator() {
        // Without the dash the identifier is part of the title and stays.
        assert_eq!(normalize_title("k_BCS_008 Security"), "k_BCS_008 Security");
    }

    #[test]
    fn course_id_extraction() {
        assert_eq!(course_id("🔒 k_BCS_008 - Computer Security"), Some("k_BCS_008"));
        assert_eq!(course_id("Mid-term k_mat_101 review"), Some("k_mat_101"));
        assert_eq!(course_id("Computer Security"), None);
    }

    #[test]
    fn empty_summary_stays_empty() {
        assert_eq!(normalize_title(""), "");
    }
}
