//! Shared configuration, constants, and core error types for Calveil.

pub mod config;
pub mod constants;
pub mod error;
