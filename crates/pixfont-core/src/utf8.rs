//! Byte-at-a-time UTF-8 decoding for streamed text output
//!
//! Text arrives one byte per call (a serial console, `fmt::Write`, a
//! string walked in place), so decoding is a three-state machine rather
//! than a slice decoder. Only the Basic Multilingual Plane is supported;
//! anything that does not decode falls back to the raw byte as an
//! extended-ASCII code point.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DecodeState {
    #[default]
    Clean,
    /// One continuation byte outstanding
    NeedOne,
    /// Two continuation bytes outstanding
    NeedTwo,
}

/// Incremental decoder state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8Decoder {
    state: DecodeState,
    acc: u16,
}

impl Utf8Decoder {
    pub const fn new() -> Self {
        Self {
            state: DecodeState::Clean,
            acc: 0,
        }
    }

    /// Drop any partial sequence
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Is a multi-byte sequence in progress?
    pub fn is_pending(&self) -> bool {
        self.state != DecodeState::Clean
    }

    /// Feed one byte; `None` means "keep accumulating, draw nothing"
    pub fn feed(&mut self, byte: u8) -> Option<u16> {
        if byte & 0x80 == 0 {
            self.reset();
            return Some(byte as u16);
        }

        match self.state {
            DecodeState::Clean => {
                if byte & 0xE0 == 0xC0 {
                    self.acc = ((byte & 0x1F) as u16) << 6;
                    self.state = DecodeState::NeedOne;
                    return None;
                }
                if byte & 0xF0 == 0xE0 {
                    self.acc = ((byte & 0x0F) as u16) << 12;
                    self.state = DecodeState::NeedTwo;
                    return None;
                }
                // stray continuation or 4-byte lead
            }
            DecodeState::NeedTwo if byte & 0xC0 == 0x80 => {
                self.acc |= ((byte & 0x3F) as u16) << 6;
                self.state = DecodeState::NeedOne;
                return None;
            }
            DecodeState::NeedOne if byte & 0xC0 == 0x80 => {
                let code = self.acc | (byte & 0x3F) as u16;
                self.reset();
                return Some(code);
            }
            _ => {}
        }

        self.reset();
        Some(byte as u16)
    }
}

/// Decode a whole byte slice, skipping intermediate steps
pub fn decode_all(bytes: &[u8]) -> impl Iterator<Item = u16> + '_ {
    let mut decoder = Utf8Decoder::new();
    bytes.iter().filter_map(move |&b| decoder.feed(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.feed(b'A'), Some(0x41));
        assert_eq!(d.feed(b'\n'), Some(0x0A));
    }

    #[test]
    fn three_byte_sequence() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.feed(0xE3), None);
        assert_eq!(d.feed(0x81), None);
        assert_eq!(d.feed(0x82), Some(0x3042));
        assert!(!d.is_pending());
    }

    #[test]
    fn two_byte_sequence() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.feed(0xC3), None);
        assert_eq!(d.feed(0xA9), Some(0xE9));
    }

    #[test]
    fn four_byte_lead_falls_back_to_raw_byte() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.feed(0xF0), Some(0xF0));
        assert_eq!(d.feed(0x9F), Some(0x9F));
        assert!(!d.is_pending());
    }

    #[test]
    fn broken_continuation_falls_back_and_resets() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.feed(0xE3), None);
        assert_eq!(d.feed(0xC3), Some(0xC3));
        assert!(!d.is_pending());
        // the decoder is clean again
        assert_eq!(d.feed(0xC3), None);
        assert_eq!(d.feed(0xA9), Some(0xE9));
    }

    #[test]
    fn ascii_interrupts_pending_sequence() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.feed(0xE3), None);
        assert_eq!(d.feed(b'x'), Some(b'x' as u16));
        assert!(!d.is_pending());
    }

    #[test]
    fn decode_all_matches_std_for_bmp_text() {
        let text = "Héllo あ";
        let decoded: Vec<u16> = decode_all(text.as_bytes()).collect();
        let expected: Vec<u16> = text.chars().map(|c| c as u16).collect();
        assert_eq!(decoded, expected);
    }
}
