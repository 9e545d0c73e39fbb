//! HTTP front end for Calveil: routing, static UI, and the streaming
//! calendar responses.

pub mod app;
pub mod config;
pub mod error;
pub mod http_client;
