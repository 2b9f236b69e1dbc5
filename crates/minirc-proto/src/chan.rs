//! Channel name validation.

/// Maximum channel name length in bytes.
pub const MAX_CHANNEL_LEN: usize = 50;

/// Whether a channel name is acceptable: 1–50 bytes, starting with `#`
/// or `&`, and free of space, comma, colon, and BEL in the remainder.
pub fn is_valid_channel_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_CHANNEL_LEN {
        return false;
    }
    let bytes = name.as_bytes();
    if bytes[0] != b'#' && bytes[0] != b'&' {
        return false;
    }
    bytes[1..]
        .iter()
        .all(|b| !matches!(*b, b' ' | b',' | b':' | 0x07))
}
