//! Per-event rewrite state machine.
//!
//! Buffers the logical lines of one `VEVENT` at a time, rewrites its
//! `SUMMARY`/`LOCATION`/`DESCRIPTION`, and filters every other property
//! through a strict allowlist. Lines outside events pass through unchanged.

mod location;
mod summary;

pub use location::{CampusRecord, ResolvedLocation, resolve_location};
pub use summary::{course_id, normalize_title, strip_emoji};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ical::build::escape_text;

/// Properties allowed to pass through an event unmodified. Everything else
/// is dropped; this is the privacy boundary.
const ALLOWED_PROPS: &[&str] = &[
    "DTSTART",
    "DTEND",
    "DTSTAMP",
    "UID",
    "RRULE",
    "EXDATE",
    "STATUS",
    "TRANSP",
    "SEQUENCE",
    "RECURRENCE-ID",
    "CLASS",
    "CREATED",
    "LAST-MODIFIED",
];

static CUBE_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)CUBE").unwrap()
});

#[derive(Debug)]
enum State {
    Outside,
    InEvent { lines: Vec<String> },
}

/// Two-state rewriter fed one unfolded logical line at a time.
///
/// Every buffer opened by `BEGIN:VEVENT` is consumed exactly once by the
/// matching `END:VEVENT`. An event left open at end of stream is discarded
/// by never emitting its buffer.
#[derive(Debug)]
pub struct EventEnhancer {
    state: State,
}

impl Default for EventEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

impl EventEnhancer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Outside,
        }
    }

    /// Feeds one logical line, returning the lines to emit in its place.
    pub fn process_line(&mut self, line: &str) -> Vec<String> {
        match &mut self.state {
            State::Outside => {
                if line.starts_with("BEGIN:VEVENT") {
                    self.state = State::InEvent {
                        lines: vec![line.to_string()],
                    };
                    Vec::new()
                } else {
                    // Calendar header/footer and non-event components,
                    // including an unmatched END:VEVENT, pass through.
                    vec![line.to_string()]
                }
            }
            State::InEvent { lines } => {
                if line.starts_with("END:VEVENT") {
                    let buffered = std::mem::take(lines);
                    self.state = State::Outside;
                    let mut out = enhance_event(&buffered);
                    out.push(line.to_string());
                    out
                } else {
                    lines.push(line.to_string());
                    Vec::new()
                }
            }
        }
    }

    /// True while a `BEGIN:VEVENT` is still open.
    #[must_use]
    pub fn in_event(&self) -> bool {
        matches!(self.state, State::InEvent { .. })
    }
}

/// Property name of a content line: text before the first `:`, with any
/// `;`-separated parameters stripped.
fn property_name(line: &str) -> &str {
    let head = line.split(':').next().unwrap_or("");
    head.split(';').next().unwrap_or(head)
}

/// Value of a content line: text after the first `:`.
fn property_value(line: &str) -> &str {
    line.split_once(':').map_or("", |(_, value)| value)
}

/// Rewrites one buffered event into its replacement lines. `END:VEVENT` is
/// appended by the caller.
fn enhance_event(lines: &[String]) -> Vec<String> {
    let mut title = String::new();
    let mut location_raw = String::new();
    let mut course = "N/A";
    let mut safe_lines: Vec<&String> = Vec::new();

    // Pass 1: extract and filter.
    for line in lines {
        match property_name(line) {
            "SUMMARY" => {
                let raw = property_value(line);
                if let Some(id) = course_id(raw) {
                    course = id;
                }
                title = normalize_title(raw);
            }
            "LOCATION" => location_raw = property_value(line).to_string(),
            // BEGIN:VEVENT and DESCRIPTION are regenerated below.
            "BEGIN" | "DESCRIPTION" => {}
            name => {
                if ALLOWED_PROPS.contains(&name) {
                    safe_lines.push(line);
                }
            }
        }
    }

    // Pass 2: resolve and emit in fixed order.
    let resolved = resolve_location(&location_raw);
    let mut event = Vec::with_capacity(safe_lines.len() + 5);
    event.push("BEGIN:VEVENT".to_string());
    event.push(format!("SUMMARY:{title}"));

    if resolved.is_online() {
        event.push("LOCATION:Online".to_string());
        event.push(structured_location("Online", "Online", resolved.record.coords));
    } else {
        let label = ui_label(&resolved, &location_raw);
        event.push(format!(
            "LOCATION:{}\\, {}",
            escape_text(&label),
            escape_text(resolved.record.address)
        ));
        event.push(structured_location(
            resolved.record.address,
            &label,
            resolved.record.coords,
        ));
    }

    let mut description = vec![format!("Course ID: {course}")];
    if !resolved.record.notes.is_empty() {
        description.push(resolved.record.notes.to_string());
    }
    description.push("--------------------------".to_string());
    description.push(format!("Original: {location_raw}"));
    event.push(format!("DESCRIPTION:{}", description.join("\\n")));

    for line in safe_lines {
        event.push(line.clone());
    }

    event
}

/// Apple structured-location extension. `X-ADDRESS` and `X-TITLE` carry the
/// raw, unescaped strings in quotes; the coordinate pair is used verbatim.
fn structured_location(address: &str, label: &str, coords: &str) -> String {
    format!(
        "X-APPLE-STRUCTURED-LOCATION;VALUE=URI;X-ADDRESS=\"{address}\";\
         X-APPLE-RADIUS=50;X-TITLE=\"{label}\";X-APPLE-REFERENCEFRAME=1:geo:{coords}"
    )
}

/// Human-facing map label: `"<room-or-raw> - <campus name>"`, with the CUBE
/// building rendered as `"<room-number> - CUBE"`.
fn ui_label(resolved: &ResolvedLocation, raw: &str) -> String {
    let room = if resolved.room.is_empty() {
        raw
    } else {
        &resolved.room
    };
    if resolved.record.key == "CUBE" {
        let number = CUBE_LITERAL.replace(room, "");
        format!("{} - CUBE", number.trim())
    } else {
        format!("{room} - {}", resolved.record.name)
    }
}
