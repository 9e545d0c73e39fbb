//! Content line folding for iCalendar (RFC 5545 §3.1).

/// Maximum line length in octets (not including CRLF).
const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line to comply with the 75-octet limit.
///
/// Lines are folded by inserting CRLF followed by a single space. The limit
/// counts octets, not characters, and a continuation line's leading space
/// counts against its budget. Care is taken not to split UTF-8 multi-byte
/// sequences. The returned string always ends with CRLF.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return format!("{line}\r\n");
    }

    let mut result = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS) * 3);
    let mut rest = line;
    let mut first_line = true;

    while !rest.is_empty() {
        // Continuation lines have one less octet available (the leading space)
        let budget = if first_line {
            MAX_LINE_OCTETS
        } else {
            result.push(' ');
            MAX_LINE_OCTETS - 1
        };

        if rest.len() <= budget {
            result.push_str(rest);
            result.push_str("\r\n");
            break;
        }

        // Back up to a character boundary so no UTF-8 sequence is split.
        let mut end = budget;
        while end > 0 && !rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            // Single character wider than the budget; take it whole.
            end = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }

        let (head, tail) = rest.split_at(end);
        result.push_str(head);
        result.push_str("\r\n");
        rest = tail;
        first_line = false;
    }

    result
}
