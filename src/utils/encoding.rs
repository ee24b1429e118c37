use std::io::{self, Read};

/// A keystroke encoding: up to 4 input bytes packed high-to-low into a
/// fixed-width integer. `0` is reserved as the sequence terminator and as
/// the root key of the compiled tree; it is never a real key.
pub type KeyCode = u32;

/// Pack a keystroke of 1..=4 bytes, high byte first.
///
/// `"abcd"` packs to `0x61626364`; shorter keystrokes are zero-padded from
/// the high end (`"ab"` packs to `0x6162`).
pub fn pack_keystroke(bytes: &[u8]) -> KeyCode {
    debug_assert!(!bytes.is_empty() && bytes.len() <= 4);
    bytes.iter().fold(0, |acc, &b| (acc << 8) | KeyCode::from(b))
}

/// Read a single byte
pub fn read_u8<R: Read>(reader: &mut R) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a u32 in little-endian format
pub fn read_u32_le<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read an i32 in little-endian format
pub fn read_i32_le<R: Read>(reader: &mut R) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read an i64 in little-endian format
pub fn read_i64_le<R: Read>(reader: &mut R) -> io::Result<i64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(i64::from_le_bytes(buf))
}
