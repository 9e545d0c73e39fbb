//! iCalendar serialization helpers (RFC 5545).
//!
//! - Escape: TEXT value escaping
//! - Fold: content line folding at 75 octets

mod escape;
mod fold;

pub use escape::escape_text;
pub use fold::fold_line;
