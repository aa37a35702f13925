//! Handle validation and the handle <-> identifier codec.
//!
//! Handles follow a simple pattern:
//! - Pattern: ^[a-z0-9][a-z0-9_-]{1,30}[a-z0-9]$
//! - Length: 3-32 characters
//! - Lowercase letters, digits, hyphens, underscores
//! - Must not start or end with a hyphen or underscore
//! - Examples: abc, alice, bob_smith, crypto-fan-99
//!
//! The identifier is the handle's bytes left-packed into 32 bytes and
//! zero-padded, so the mapping is a bijection on valid handles.

use soroban_sdk::{BytesN, Env, String};

use crate::HandleError;

/// Minimum handle length.
pub const MIN_HANDLE_LENGTH: u32 = 3;

/// Maximum handle length. Equal to the identifier width.
pub const MAX_HANDLE_LENGTH: u32 = 32;

/// Fixed-width identifier derived from a handle.
pub type HandleId = BytesN<32>;

/// Validate raw handle bytes.
///
/// # Rules
/// - Length: 3-32 bytes
/// - Every byte: a-z, 0-9, `-` or `_`
/// - First and last byte: a-z or 0-9
pub fn is_valid_handle(handle: &[u8]) -> bool {
    let len = handle.len() as u32;
    if !(MIN_HANDLE_LENGTH..=MAX_HANDLE_LENGTH).contains(&len) {
        return false;
    }

    if !handle.iter().all(|b| is_handle_char(*b)) {
        return false;
    }

    is_edge_char(handle[0]) && is_edge_char(handle[handle.len() - 1])
}

/// Pack validated handle bytes into the 32-byte identifier layout.
pub fn pack(handle: &[u8]) -> Option<[u8; 32]> {
    if !is_valid_handle(handle) {
        return None;
    }

    let mut packed = [0u8; 32];
    packed[..handle.len()].copy_from_slice(handle);
    Some(packed)
}

/// Logical length of a packed identifier (bytes before the first zero).
pub fn packed_len(packed: &[u8; 32]) -> usize {
    packed.iter().position(|b| *b == 0).unwrap_or(packed.len())
}

/// Encode a handle string into its identifier.
pub fn encode(env: &Env, handle: &String) -> Result<HandleId, HandleError> {
    let len = handle.len();
    if !(MIN_HANDLE_LENGTH..=MAX_HANDLE_LENGTH).contains(&len) {
        return Err(HandleError::InvalidHandle);
    }

    let mut buf = [0u8; 32];
    handle.copy_into_slice(&mut buf[..len as usize]);

    let packed = pack(&buf[..len as usize]).ok_or(HandleError::InvalidHandle)?;
    Ok(BytesN::from_array(env, &packed))
}

/// Decode an identifier back into the handle string it was packed from.
pub fn decode(env: &Env, id: &HandleId) -> String {
    let packed = id.to_array();
    let len = packed_len(&packed);
    // Identifiers only ever come from `encode`, so the bytes are ASCII.
    let text = core::str::from_utf8(&packed[..len]).unwrap_or_default();
    String::from_str(env, text)
}

#[inline]
fn is_edge_char(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}

#[inline]
fn is_handle_char(b: u8) -> bool {
    is_edge_char(b) || b == b'-' || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_handles() {
        assert!(is_valid_handle(b"abc"));
        assert!(is_valid_handle(b"alice"));
        assert!(is_valid_handle(b"bob_smith"));
        assert!(is_valid_handle(b"crypto-fan-99"));
        assert!(is_valid_handle(b"007"));
        assert!(is_valid_handle(b"a-_b"));
        assert!(is_valid_handle(b"abcdefghijklmnopqrstuvwxyz012345")); // 32 chars max
    }

    #[test]
    fn test_invalid_handles() {
        // Length
        assert!(!is_valid_handle(b""));
        assert!(!is_valid_handle(b"ab"));
        assert!(!is_valid_handle(b"abcdefghijklmnopqrstuvwxyz0123456")); // 33 chars

        // Edge characters
        assert!(!is_valid_handle(b"-abc"));
        assert!(!is_valid_handle(b"_abc"));
        assert!(!is_valid_handle(b"abc-"));
        assert!(!is_valid_handle(b"abc_"));

        // Charset
        assert!(!is_valid_handle(b"Abc"));
        assert!(!is_valid_handle(b"a.bc"));
        assert!(!is_valid_handle(b"a bc"));
        assert!(!is_valid_handle(b"ab\0c"));
        assert!(!is_valid_handle("äbc".as_bytes()));
    }

    #[test]
    fn test_pack_is_left_aligned_and_zero_padded() {
        let packed = pack(b"alice").unwrap();
        assert_eq!(&packed[..5], b"alice");
        assert!(packed[5..].iter().all(|b| *b == 0));
        assert_eq!(packed_len(&packed), 5);

        let full = pack(b"abcdefghijklmnopqrstuvwxyz012345").unwrap();
        assert_eq!(packed_len(&full), 32);

        assert!(pack(b"-no").is_none());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let env = Env::default();

        for handle in ["abc", "bob_smith", "crypto-fan-99", "abcdefghijklmnopqrstuvwxyz012345"] {
            let s = String::from_str(&env, handle);
            let id = encode(&env, &s).unwrap();
            assert_eq!(decode(&env, &id), s);
        }
    }

    #[test]
    fn test_round_trip_every_length() {
        let env = Env::default();
        let alphabet = b"abcdefghijklmnopqrstuvwxyz0123456789-_";
        let edges = b"abcdefghijklmnopqrstuvwxyz0123456789";

        for len in MIN_HANDLE_LENGTH as usize..=MAX_HANDLE_LENGTH as usize {
            let mut buf = [0u8; 32];
            buf[0] = edges[len % edges.len()];
            for (i, b) in buf[1..len - 1].iter_mut().enumerate() {
                *b = alphabet[(len + i * 7) % alphabet.len()];
            }
            buf[len - 1] = edges[(len * 5) % edges.len()];
            // Separators in the middle at every length
            buf[len / 2] = if len % 2 == 0 { b'-' } else { b'_' };

            let text = core::str::from_utf8(&buf[..len]).unwrap();
            assert!(is_valid_handle(&buf[..len]), "{}", text);

            let s = String::from_str(&env, text);
            let id = encode(&env, &s).unwrap();
            assert_eq!(packed_len(&id.to_array()), len);
            assert_eq!(decode(&env, &id), s);
        }
    }

    #[test]
    fn test_encode_rejects_invalid() {
        let env = Env::default();

        for handle in ["ab", "_abc", "abc-", "ABC", "a.b.c", "abcdefghijklmnopqrstuvwxyz0123456"] {
            let s = String::from_str(&env, handle);
            assert_eq!(encode(&env, &s), Err(HandleError::InvalidHandle));
        }
    }

    #[test]
    fn test_distinct_handles_distinct_ids() {
        let env = Env::default();
        let a = encode(&env, &String::from_str(&env, "abc")).unwrap();
        let b = encode(&env, &String::from_str(&env, "abc0")).unwrap();
        assert_ne!(a, b);
    }
}
