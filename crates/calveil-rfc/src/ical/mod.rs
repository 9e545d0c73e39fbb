//! iCalendar streaming rewrite (RFC 5545).
//!
//! - `stream`: byte-stream to logical-line boundary translation
//! - `enhance`: per-event rewriting and location resolution
//! - `build`: content line folding and TEXT value escaping

pub mod build;
pub mod enhance;
pub mod stream;
