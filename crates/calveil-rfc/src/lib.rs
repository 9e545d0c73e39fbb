//! RFC 5545 streaming primitives for Calveil.
//!
//! This crate contains the calendar-rewriting core: an octet-exact line
//! unfolder/folder that works across arbitrary byte-chunk boundaries, a
//! per-event rewrite state machine, and the campus location resolver.
//! It performs no I/O; transport is the caller's concern.

pub mod ical;
