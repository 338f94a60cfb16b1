//! Order-invariant record discovery.
//!
//! A lookup index value lets the storage layer find a person's record by
//! equality without ever holding the identity itself: it is a SHA-256
//! digest of the order-invariant normalization of the identity tuple.
//! Because the two names are sorted before hashing, a caller who swaps the
//! given and family name fields still computes the same index — discovery
//! tolerates the swap even though decryption does not.
//!
//! The index is used for equality lookup and uniqueness enforcement only,
//! never for decryption. On the wire it is 64 lowercase hex characters.

use ring::digest;

use crate::error::VitalsealError;
use crate::identity::Identity;

/// Size of a lookup index value in bytes (SHA-256 output).
pub const INDEX_LEN: usize = 32;

/// An order-invariant, non-reversible digest of an identity tuple.
///
/// Persisted permanently alongside a record. Collision-resistant under
/// SHA-256's assumptions; a collision would make two people's records
/// indistinguishable, so the storage layer must enforce uniqueness.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupIndex([u8; INDEX_LEN]);

/// Compute the lookup index value for an identity tuple.
///
/// Deterministic and order-invariant: `lookup_index` over `(a, b, d)` and
/// `(b, a, d)` are equal. Contrast with `keys::derive_key`, which is
/// order-sensitive on the same tuple.
pub fn lookup_index(identity: &Identity) -> LookupIndex {
    let material = identity.lookup_material();
    let digest = digest::digest(&digest::SHA256, &material);
    let mut bytes = [0u8; INDEX_LEN];
    bytes.copy_from_slice(digest.as_ref());
    LookupIndex(bytes)
}

impl LookupIndex {
    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; INDEX_LEN] {
        &self.0
    }

    /// The wire form: 64 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(INDEX_LEN * 2);
        for byte in &self.0 {
            use std::fmt::Write;
            write!(s, "{byte:02x}").expect("formatting cannot fail");
        }
        s
    }

    /// Parse an index value back from its stored hex form.
    pub fn from_hex(hex: &str) -> Result<Self, VitalsealError> {
        if hex.len() != INDEX_LEN * 2 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(VitalsealError::InvalidIndex);
        }
        let mut bytes = [0u8; INDEX_LEN];
        for (i, chunk) in hex.as_bytes().chunks_exact(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| VitalsealError::InvalidIndex)?;
            bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| VitalsealError::InvalidIndex)?;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for LookupIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for LookupIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LookupIndex({}...)", &self.to_hex()[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA-256("doejane2000-01-01") — the sorted pair plus the birth date.
    const JANE_DOE_INDEX_HEX: &str =
        "4958bd34d3fd786718b4622ecfdea1a0a018bd56a5303991fa888166d02ad8bf";

    #[test]
    fn index_is_order_invariant() {
        let ab = lookup_index(&Identity::new("Jane", "Doe", "2000-01-01"));
        let ba = lookup_index(&Identity::new("Doe", "Jane", "2000-01-01"));
        assert_eq!(ab, ba);
        assert_eq!(ab.to_hex(), JANE_DOE_INDEX_HEX);
    }

    #[test]
    fn index_normalization_is_idempotent() {
        let messy = lookup_index(&Identity::new("  Jane ", "DOE", "2000-01-01"));
        let clean = lookup_index(&Identity::new("jane", "doe", "2000-01-01"));
        assert_eq!(messy, clean);
    }

    #[test]
    fn different_birth_dates_differ() {
        let a = lookup_index(&Identity::new("Jane", "Doe", "2000-01-01"));
        let b = lookup_index(&Identity::new("Jane", "Doe", "2000-01-02"));
        assert_ne!(a, b);
    }

    #[test]
    fn empty_identity_matches_empty_digest() {
        // A fully empty tuple hashes the empty string. Degenerate, accepted.
        let index = lookup_index(&Identity::new("", "", ""));
        assert_eq!(
            index.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hex_round_trip() {
        let index = lookup_index(&Identity::new("Jane", "Doe", "2000-01-01"));
        let parsed = LookupIndex::from_hex(&index.to_hex()).unwrap();
        assert_eq!(index, parsed);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(LookupIndex::from_hex("").is_err());
        assert!(LookupIndex::from_hex("abc").is_err());
        let not_hex = "zz".repeat(INDEX_LEN);
        assert!(LookupIndex::from_hex(&not_hex).is_err());
    }

    #[test]
    fn debug_output_is_truncated() {
        let index = lookup_index(&Identity::new("Jane", "Doe", "2000-01-01"));
        let rendered = format!("{:?}", index);
        assert!(rendered.len() < JANE_DOE_INDEX_HEX.len());
    }
}
