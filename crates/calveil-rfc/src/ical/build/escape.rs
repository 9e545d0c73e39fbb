//! iCalendar text escaping utilities.

/// Escapes the `,` and `;` value delimiters in a TEXT value.
///
/// Backslashes pass through untouched, so upstream text that already
/// carries RFC escapes is not escaped a second time. Generated values
/// never contain raw newlines; multi-line descriptions are joined with a
/// literal `\n` by the caller.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_text_delimiters() {
        assert_eq!(escape_text("hello, world"), "hello\\, world");
        assert_eq!(escape_text("semi;colon"), "semi\\;colon");
    }

    #[test]
    fn escape_text_address() {
        assert_eq!(
            escape_text("Sonnenallee 221A, 12059 Berlin"),
            "Sonnenallee 221A\\, 12059 Berlin"
        );
    }

    #[test]
    fn escape_text_keeps_existing_escapes() {
        // Input with an RFC-escaped comma gains no extra backslash.
        assert_eq!(escape_text("already\\, escaped"), "already\\\\, escaped");
    }
}
