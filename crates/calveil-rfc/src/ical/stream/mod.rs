//! Byte-stream to logical-line boundary translation (RFC 5545 §3.1).

mod decoder;
mod unfolder;

pub use decoder::ChunkDecoder;
pub use unfolder::LineUnfolder;
