//! Streaming rewrite pipeline: upstream bytes in, rewritten bytes out.
//!
//! Single-pass and in-order: each chunk is fully decoded, unfolded,
//! rewritten, re-folded, and re-encoded before the next chunk is pulled.
//! Each stream gets its own pipeline instance; nothing is shared.

use calveil_rfc::ical::enhance::EventEnhancer;
use calveil_rfc::ical::stream::LineUnfolder;
use futures::{Stream, StreamExt};

use crate::error::{ServiceError, ServiceResult};

/// One stream's worth of rewriting state.
#[derive(Debug, Default)]
pub struct EnhancePipeline {
    unfolder: LineUnfolder,
    enhancer: EventEnhancer,
}

impl EnhancePipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrites the next upstream chunk, returning the output bytes that
    /// became available (possibly none while a line or event is still
    /// incomplete).
    pub fn process_chunk(&mut self, chunk: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        self.unfolder
            .process_chunk(chunk, &mut |bytes| out.extend_from_slice(&bytes), &mut self.enhancer);
        out
    }

    /// Finalizes the stream after the last chunk. An event still open at
    /// this point never arrived at its `END:VEVENT` and is dropped.
    pub fn finish(mut self) -> Vec<u8> {
        let mut out = Vec::new();
        self.unfolder
            .flush(&mut |bytes| out.extend_from_slice(&bytes), &mut self.enhancer);
        if self.enhancer.in_event() {
            tracing::warn!("stream ended inside an open VEVENT; dropping unterminated event");
        }
        out
    }
}

enum StreamState<S> {
    Streaming {
        upstream: S,
        pipeline: EnhancePipeline,
        seen: u64,
        max_body_size: u64,
    },
    Done,
}

/// ## Summary
/// Drives a fallible upstream byte stream through the rewrite pipeline,
/// yielding rewritten output chunks in order.
///
/// The body size cap is enforced on the bytes actually received, not just
/// the declared length. On an upstream error mid-stream the pipeline is
/// abandoned without flushing, so no partial event is ever emitted.
pub fn enhance_stream<S, B>(
    upstream: S,
    max_body_size: u64,
) -> impl Stream<Item = ServiceResult<Vec<u8>>>
where
    S: Stream<Item = Result<B, reqwest::Error>> + Unpin,
    B: AsRef<[u8]>,
{
    let initial = StreamState::Streaming {
        upstream,
        pipeline: EnhancePipeline::new(),
        seen: 0,
        max_body_size,
    };
    futures::stream::try_unfold(initial, |state| async move {
        let StreamState::Streaming {
            mut upstream,
            mut pipeline,
            mut seen,
            max_body_size,
        } = state
        else {
            return Ok(None);
        };

        loop {
            match upstream.next().await {
                Some(Ok(chunk)) => {
                    let bytes = chunk.as_ref();
                    seen += bytes.len() as u64;
                    if seen > max_body_size {
                        return Err(ServiceError::BodyTooLarge(seen));
                    }
                    let out = pipeline.process_chunk(bytes);
                    if out.is_empty() {
                        // Nothing emitted yet (mid-line or mid-event); keep pulling.
                        continue;
                    }
                    let next = StreamState::Streaming {
                        upstream,
                        pipeline,
                        seen,
                        max_body_size,
                    };
                    return Ok(Some((out, next)));
                }
                Some(Err(err)) => return Err(ServiceError::HttpError(err)),
                None => return Ok(Some((pipeline.finish(), StreamState::Done))),
            }
        }
    })
}
