//! Service layer for Calveil: sealed upstream-URL tokens, validated
//! upstream fetches, and the streaming rewrite pipeline.

pub mod error;
pub mod pipeline;
pub mod token;
pub mod upstream;
