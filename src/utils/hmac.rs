//! HMAC-SHA256 signing primitives for stream access tokens.

use hmac::{Hmac, Mac, digest::InvalidLength};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hex length of an HMAC-SHA256 digest
pub const SIGNATURE_HEX_LEN: usize = 64;

/// Canonical string that gets signed: `user=<user>&exp=<expiry>`
///
/// The user is embedded verbatim, without any escaping.
pub fn canonical_payload(user: &str, expiry: u64) -> String {
    format!("user={user}&exp={expiry}")
}

fn keyed_mac(key: &[u8], user: &str, expiry: u64) -> Result<HmacSha256, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(key)?;
    mac.update(canonical_payload(user, expiry).as_bytes());
    Ok(mac)
}

/// Sign `user` and `expiry`, returning the digest as lowercase hex
pub fn sign(key: &[u8], user: &str, expiry: u64) -> Result<String, InvalidLength> {
    let mac = keyed_mac(key, user, expiry)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a candidate signature against the recomputed one
///
/// Only the exact lowercase-hex rendering is accepted. The digest comparison
/// itself runs in constant time.
pub fn signature_matches(
    key: &[u8],
    user: &str,
    expiry: u64,
    candidate: &str,
) -> Result<bool, InvalidLength> {
    if !is_lower_hex_digest(candidate) {
        return Ok(false);
    }

    let Ok(candidate_bytes) = hex::decode(candidate) else {
        return Ok(false);
    };

    let mac = keyed_mac(key, user, expiry)?;
    Ok(mac.verify_slice(&candidate_bytes).is_ok())
}

fn is_lower_hex_digest(candidate: &str) -> bool {
    candidate.len() == SIGNATURE_HEX_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_payload_format() {
        assert_eq!(
            canonical_payload("alice", 1_700_000_060),
            "user=alice&exp=1700000060"
        );
        assert_eq!(canonical_payload("a&exp=1", 5), "user=a&exp=1&exp=5");
    }

    #[test]
    fn test_sign_known_vector() {
        assert_eq!(
            sign(b"k", "bob", 42).unwrap(),
            "776ccedb2df003861b5daa3ce2d28f95a2b9323f60589caadb7f74331f68b2da"
        );
    }

    #[test]
    fn test_hmac_primitive_vector() {
        let mut mac = HmacSha256::new_from_slice(b"key").unwrap();
        mac.update(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(
            hex::encode(mac.finalize().into_bytes()),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_signature_matches_rejects_uppercase() {
        let signature = sign(b"k", "bob", 42).unwrap();
        assert!(signature_matches(b"k", "bob", 42, &signature).unwrap());
        assert!(!signature_matches(b"k", "bob", 42, &signature.to_uppercase()).unwrap());
    }

    #[test]
    fn test_signature_matches_rejects_garbage() {
        assert!(!signature_matches(b"k", "bob", 42, "").unwrap());
        assert!(!signature_matches(b"k", "bob", 42, "zz").unwrap());
        assert!(!signature_matches(b"k", "bob", 42, &"g".repeat(64)).unwrap());
    }
}
