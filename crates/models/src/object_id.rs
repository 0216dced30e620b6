//! Document-store style object ids: 4 bytes of Unix seconds, 5 bytes of per-process
//! randomness and a 3-byte counter, rendered as 24 lowercase hex characters.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use rand::Rng;

pub const OBJECT_ID_LEN: usize = 24;

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| rand::thread_rng().gen());

static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(rand::thread_rng().gen_range(0..0x00ff_ffff)));

/// Generate a fresh id. Ids from one process sort in generation order until the counter wraps.
pub fn generate() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or_default();
    let count = COUNTER.fetch_add(1, Ordering::SeqCst) & 0x00ff_ffff;
    encode(secs, &*PROCESS_UNIQUE, count)
}

fn encode(secs: u32, unique: &[u8; 5], count: u32) -> String {
    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    bytes[4..9].copy_from_slice(unique);
    bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Whether `s` has the shape of an object id (24 hex digits, either case).
pub fn is_valid(s: &str) -> bool {
    s.len() == OBJECT_ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_valid_and_distinct() {
        let a = generate();
        let b = generate();
        assert!(is_valid(&a), "{a}");
        assert!(is_valid(&b), "{b}");
        assert_ne!(a, b);
        assert_eq!(a, a.to_lowercase());
    }

    #[test]
    fn layout_is_seconds_unique_counter() {
        let id = encode(0x507f_1f77, &[0xbc, 0xf8, 0x6c, 0xd7, 0x99], 0x43_9011);
        assert_eq!(id, "507f1f77bcf86cd799439011");
    }

    #[test]
    fn counter_only_keeps_low_24_bits() {
        let id = encode(1, &[0; 5], 0x0100_0002);
        assert!(id.ends_with("000002"));
    }

    #[test]
    fn validity_checks_length_and_alphabet() {
        assert!(is_valid("507f1f77bcf86cd799439011"));
        assert!(is_valid("507F1F77BCF86CD799439011"));
        assert!(!is_valid("invalid-id"));
        assert!(!is_valid("507f1f77bcf86cd79943901"));
        assert!(!is_valid("507f1f77bcf86cd7994390111"));
        assert!(!is_valid("507f1f77bcf86cd79943901g"));
    }
}
