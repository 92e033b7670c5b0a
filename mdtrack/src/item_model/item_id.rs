//! Stable item identifiers
//!
//! IDs are a pure function of an item's kind tag, start coordinate, and
//! content: re-parsing unchanged text yields unchanged IDs, and any change
//! to content or position produces a different ID with overwhelming
//! likelihood. Collisions are tolerated downstream, so a well-distributed
//! 64-bit FNV-1a digest rendered in base-36 is sufficient.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a digest of a byte string
///
/// Also used to fingerprint whole source texts so a parsed snapshot can
/// detect that the text it is later handed has changed.
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Derive the stable ID for an item
///
/// # Parameters
/// * `kind_tag` - Stable kind tag (`header`, `list_item`, `checkbox`)
/// * `line` - 1-indexed starting line of the item
/// * `column` - 1-indexed starting column of the item
/// * `content` - Flattened inline text of the item
///
/// # Returns
/// * `String` - Base-36 rendering of the 64-bit digest
pub fn generate_id(kind_tag: &str, line: u32, column: u32, content: &str) -> String {
    let canonical = format!("{kind_tag}:{line}:{column}:{content}");
    to_base36(fnv1a_64(canonical.as_bytes()))
}

/// Render a u64 in lowercase base-36
fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }

    digits.iter().rev().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_deterministic() {
        let first = generate_id("header", 1, 1, "Main Header");
        let second = generate_id("header", 1, 1, "Main Header");
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_id_varies_with_each_input() {
        let base = generate_id("header", 1, 1, "Main Header");

        assert_ne!(base, generate_id("list_item", 1, 1, "Main Header"));
        assert_ne!(base, generate_id("header", 2, 1, "Main Header"));
        assert_ne!(base, generate_id("header", 1, 3, "Main Header"));
        assert_ne!(base, generate_id("header", 1, 1, "Other Header"));
    }

    #[test]
    fn test_generate_id_is_base36() {
        let id = generate_id("checkbox", 12, 3, "write the tests");
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_fnv1a_known_vectors() {
        // Published FNV-1a test vectors.
        assert_eq!(fnv1a_64(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a_64(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv1a_64(b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn test_to_base36_zero() {
        assert_eq!(to_base36(0), "0");
    }

    #[test]
    fn test_to_base36_round_values() {
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
