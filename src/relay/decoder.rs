/// Incremental UTF-8 decoder for PTY output.
///
/// PTY reads are byte-bounded, so a multi-byte sequence can be split across
/// two reads. The decoder carries the incomplete tail into the next call
/// instead of emitting replacement characters or failing. Invalid bytes
/// (not merely incomplete) are dropped.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    carry: Vec<u8>,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next raw chunk, combined with any carried-over tail.
    pub fn decode(&mut self, input: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.carry);
        bytes.extend_from_slice(input);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let (valid, tail) = rest.split_at(err.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        out.push_str(text);
                    }
                    match err.error_len() {
                        // Incomplete sequence at the end of the chunk:
                        // carry it into the next read. At most 3 bytes.
                        None => {
                            self.carry = tail.to_vec();
                            break;
                        }
                        // Invalid bytes in the middle: skip them.
                        Some(len) => rest = &tail[len..],
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::ChunkDecoder;

    #[test]
    fn ascii_passes_through() {
        let mut decoder = ChunkDecoder::new();
        assert_eq!(decoder.decode(b"installing mod...\n"), "installing mod...\n");
    }

    #[test]
    fn multibyte_split_across_chunks() {
        // "é" is 0xC3 0xA9
        let mut decoder = ChunkDecoder::new();
        assert_eq!(decoder.decode(&[b'o', b'k', 0xC3]), "ok");
        assert_eq!(decoder.decode(&[0xA9, b'!']), "é!");
    }

    #[test]
    fn four_byte_sequence_split_three_ways() {
        // U+1F600 is 0xF0 0x9F 0x98 0x80
        let mut decoder = ChunkDecoder::new();
        assert_eq!(decoder.decode(&[0xF0, 0x9F]), "");
        assert_eq!(decoder.decode(&[0x98]), "");
        assert_eq!(decoder.decode(&[0x80]), "\u{1F600}");
    }

    #[test]
    fn invalid_byte_is_dropped() {
        let mut decoder = ChunkDecoder::new();
        assert_eq!(decoder.decode(&[b'a', 0xFF, b'b']), "ab");
    }

    #[test]
    fn carry_does_not_leak_between_streams() {
        let mut decoder = ChunkDecoder::new();
        let _ = decoder.decode(&[0xC3]);
        let mut fresh = ChunkDecoder::new();
        assert_eq!(fresh.decode(b"clean"), "clean");
    }
}
