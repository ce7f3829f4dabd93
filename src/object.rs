//! Serializes an assembled memory image to the canonical DEC object (BIN)
//! paper-tape format.
//!
//! Byte I/O goes through `byteorder`'s `WriteBytesExt`, even though every
//! field here is a single byte (there is no multi-byte endianness concern
//! in this format: each 12-bit word is split into two 6-bit halves, high
//! half first).

use byteorder::WriteBytesExt;
use std::io::{self, Write};

pub const LEADER_BYTE: u8 = 0o200;
pub const LEADER_LEN: usize = 239;
pub const FIELD_ORIGIN_HEADER: [u8; 2] = [0x10, 0x00];
pub const MEMORY_SIZE: usize = 4096;
pub const OBJECT_FILE_LEN: usize = LEADER_LEN + 2 + 2 * (MEMORY_SIZE - 1) + 2 + 1;

/// Writes `image` (a full 4096-word memory image) as a DEC object tape.
///
/// Address 0 is deliberately skipped: the paper-tape loader format has no
/// use for it.
pub fn write<W: Write>(writer: &mut W, image: &[u16; MEMORY_SIZE]) -> io::Result<()> {
    for _ in 0..LEADER_LEN {
        writer.write_u8(LEADER_BYTE)?;
    }

    let mut checksum: u32 = 0;
    let mut emit = |writer: &mut W, byte: u8| -> io::Result<()> {
        checksum += byte as u32;
        writer.write_u8(byte)
    };

    for &b in &FIELD_ORIGIN_HEADER {
        emit(writer, b)?;
    }

    for &word in &image[1..] {
        emit(writer, ((word >> 6) & 0o77) as u8)?;
        emit(writer, (word & 0o77) as u8)?;
    }

    writer.write_u8(((checksum >> 6) & 0o77) as u8)?;
    writer.write_u8((checksum & 0o77) as u8)?;
    writer.write_u8(LEADER_BYTE)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_file_length_is_fixed() {
        let image = [0u16; MEMORY_SIZE];
        let mut out = Vec::new();
        write(&mut out, &image).unwrap();
        assert_eq!(out.len(), OBJECT_FILE_LEN);
        assert_eq!(out.len(), 8434);
    }

    #[test]
    fn leader_and_trailer_bytes() {
        let image = [0u16; MEMORY_SIZE];
        let mut out = Vec::new();
        write(&mut out, &image).unwrap();
        assert!(out[..LEADER_LEN].iter().all(|&b| b == LEADER_BYTE));
        assert_eq!(*out.last().unwrap(), LEADER_BYTE);
    }

    #[test]
    fn header_follows_leader() {
        let image = [0u16; MEMORY_SIZE];
        let mut out = Vec::new();
        write(&mut out, &image).unwrap();
        assert_eq!(&out[LEADER_LEN..LEADER_LEN + 2], &FIELD_ORIGIN_HEADER[..]);
    }

    #[test]
    fn checksum_matches_sum_of_payload_bytes() {
        let mut image = [0u16; MEMORY_SIZE];
        image[0o200] = 0o7402;
        let mut out = Vec::new();
        write(&mut out, &image).unwrap();

        let payload = &out[LEADER_LEN..out.len() - 3];
        let expected: u32 = payload.iter().map(|&b| b as u32).sum();
        let hi = out[out.len() - 3] as u32;
        let lo = out[out.len() - 2] as u32;
        let checksum = (hi << 6) | lo;
        assert_eq!(checksum, expected & 0o7777);
    }

    #[test]
    fn encodes_high_and_low_six_bits_per_word() {
        let mut image = [0u16; MEMORY_SIZE];
        image[1] = 0o7402;
        let mut out = Vec::new();
        write(&mut out, &image).unwrap();
        let start = LEADER_LEN + 2;
        assert_eq!(out[start], 0o74);
        assert_eq!(out[start + 1], 0o02);
    }
}
