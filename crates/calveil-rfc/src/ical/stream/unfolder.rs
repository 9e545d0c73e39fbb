//! Streaming line unfolder and re-folder.

use super::decoder::ChunkDecoder;
use crate::ical::build::fold_line;
use crate::ical::enhance::EventEnhancer;

/// Reconstructs logical content lines from a folded byte stream, hands each
/// one to the rewriter, and re-folds and re-encodes the rewritten lines.
///
/// Chunks may be split anywhere, including inside a multi-byte character or
/// inside the CRLF+space fold marker; the output is identical regardless of
/// chunking. Knows nothing about calendar semantics beyond the folding rule.
#[derive(Debug, Default)]
pub struct LineUnfolder {
    buffer: String,
    decoder: ChunkDecoder,
}

impl LineUnfolder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the next chunk in stream order, emitting any output that
    /// becomes available. Empty chunks are no-ops.
    pub fn process_chunk(
        &mut self,
        chunk: &[u8],
        emit: &mut impl FnMut(Vec<u8>),
        rewriter: &mut EventEnhancer,
    ) {
        if chunk.is_empty() {
            return;
        }
        self.decoder.decode(chunk, &mut self.buffer);
        self.drain_lines(false, emit, rewriter);
    }

    /// Finalizes the stream after the last chunk. A residual line without a
    /// trailing terminator is treated as the final logical line.
    pub fn flush(&mut self, emit: &mut impl FnMut(Vec<u8>), rewriter: &mut EventEnhancer) {
        self.decoder.finish(&mut self.buffer);
        self.drain_lines(true, emit, rewriter);
        if !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            Self::rewrite_and_emit(&line, emit, rewriter);
        }
    }

    /// Scans the buffer for line terminators, merging fold continuations and
    /// emitting complete logical lines.
    ///
    /// A terminator at the very end of the buffer is ambiguous while the
    /// stream is still running: the next chunk may begin with fold
    /// whitespace. `at_end` resolves the ambiguity.
    fn drain_lines(
        &mut self,
        at_end: bool,
        emit: &mut impl FnMut(Vec<u8>),
        rewriter: &mut EventEnhancer,
    ) {
        loop {
            let Some(eol) = self.buffer.find('\n') else {
                return;
            };
            let line_end = if eol > 0 && self.buffer.as_bytes()[eol - 1] == b'\r' {
                eol - 1
            } else {
                eol
            };

            match self.buffer.as_bytes().get(eol + 1) {
                None if !at_end => return,
                Some(b' ' | b'\t') => {
                    // Fold continuation: splice out the terminator and the
                    // single whitespace character, then keep scanning.
                    self.buffer.replace_range(line_end..=eol + 1, "");
                }
                _ => {
                    let line = self.buffer[..line_end].to_string();
                    Self::rewrite_and_emit(&line, emit, rewriter);
                    self.buffer.replace_range(..=eol, "");
                }
            }
        }
    }

    fn rewrite_and_emit(
        line: &str,
        emit: &mut impl FnMut(Vec<u8>),
        rewriter: &mut EventEnhancer,
    ) {
        for out in rewriter.process_line(line) {
            emit(fold_line(&out).into_bytes());
        }
    }
}
