//! Big-endian field decoding for the streamed font format
//!
//! Every integer in the format is stored as a big-endian 32-bit word.
//! Several fields are then narrowed; those narrowings live here so the
//! loader and the draw path agree on them.

/// Read a big-endian `u32` at `offset`
pub fn be_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let word = bytes.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([word[0], word[1], word[2], word[3]]))
}

/// Read a big-endian `i32` at `offset`
pub fn be_i32(bytes: &[u8], offset: usize) -> Option<i32> {
    be_u32(bytes, offset).map(|v| v as i32)
}

/// Read a big-endian `u16` at `offset`
pub fn be_u16(bytes: &[u8], offset: usize) -> Option<u16> {
    let word = bytes.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([word[0], word[1]]))
}

/// Keep the low 16 bits (code points are BMP only)
pub fn narrow_u16(word: u32) -> u16 {
    word as u16
}

/// Keep the low 16 bits, signed
pub fn narrow_i16(word: u32) -> i16 {
    word as u16 as i16
}

/// Keep the low 8 bits, signed
pub fn narrow_i8(word: u32) -> i8 {
    word as u8 as i8
}

/// Keep the low 8 bits
pub fn narrow_u8(word: u32) -> u8 {
    word as u8
}
