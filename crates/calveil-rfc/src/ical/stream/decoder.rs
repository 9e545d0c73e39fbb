//! Incremental UTF-8 decoding across chunk boundaries.

/// Decodes a byte stream as UTF-8 text, tolerating multi-byte sequences
/// split across chunks.
///
/// An incomplete trailing sequence is held back until more bytes arrive.
/// Invalid sequences decode to U+FFFD rather than failing; the decoder has
/// no error path.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    pending: Vec<u8>,
}

impl ChunkDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `chunk`, appending the decodable prefix to `out`.
    pub fn decode(&mut self, chunk: &[u8], out: &mut String) {
        self.pending.extend_from_slice(chunk);
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    return;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match err.error_len() {
                        Some(bad) => {
                            // Invalid sequence: substitute and keep going.
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + bad);
                        }
                        None => {
                            // Incomplete trailing sequence: wait for more input.
                            self.pending.drain(..valid);
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Finalizes the stream. An incomplete trailing sequence becomes U+FFFD.
    pub fn finish(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            out.push(char::REPLACEMENT_CHARACTER);
            self.pending.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_whole_chunk() {
        let mut decoder = ChunkDecoder::new();
        let mut out = String::new();
        decoder.decode("héllo".as_bytes(), &mut out);
        assert_eq!(out, "héllo");
    }

    #[test]
    fn decode_multibyte_split_across_chunks() {
        // é is 0xC3 0xA9
        let mut decoder = ChunkDecoder::new();
        let mut out = String::new();
        decoder.decode(&[b'h', 0xC3], &mut out);
        assert_eq!(out, "h");
        decoder.decode(&[0xA9, b'!'], &mut out);
        assert_eq!(out, "hé!");
    }

    #[test]
    fn decode_four_byte_char_split_three_ways() {
        let bytes = "🔒".as_bytes();
        let mut decoder = ChunkDecoder::new();
        let mut out = String::new();
        decoder.decode(&bytes[..1], &mut out);
        decoder.decode(&bytes[1..3], &mut out);
        decoder.decode(&bytes[3..], &mut out);
        assert_eq!(out, "🔒");
    }

    #[test]
    fn decode_invalid_sequence_substitutes() {
        let mut decoder = ChunkDecoder::new();
        let mut out = String::new();
        decoder.decode(&[b'a', 0xFF, b'b'], &mut out);
        assert_eq!(out, "a\u{FFFD}b");
    }

    #[test]
    fn finish_flushes_incomplete_tail() {
        let mut decoder = ChunkDecoder::new();
        let mut out = String::new();
        decoder.decode(&[b'x', 0xE2, 0x82], &mut out);
        assert_eq!(out, "x");
        decoder.finish(&mut out);
        assert_eq!(out, "x\u{FFFD}");
    }
}
