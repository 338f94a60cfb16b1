//! Key derivation and ownership.
//!
//! This module owns two responsibilities:
//! 1. Deriving a symmetric key from an identity tuple using
//!    PBKDF2-HMAC-SHA256.
//! 2. Holding derived key material in a type that is opaque,
//!    non-cloneable, and zeroised on drop.
//!
//! ## Derivation structure
//!
//! ```text
//! PBKDF2-HMAC-SHA256(
//!     secret     = given_name || family_name || birth_date   (normalized, order-sensitive)
//!     salt       = KdfConfig::salt        (default: fixed constant)
//!     iterations = KdfConfig::iterations  (default: 100,000)
//!     out_len    = 32 bytes
//! )
//! ```
//!
//! The iteration count is a cost factor, not a tuning knob: each derivation
//! is meant to cost tens of milliseconds of CPU so that brute-forcing short,
//! guessable identity tuples (a common name plus a birth date) stays
//! expensive per attempt. Treat `derive_key` as a hot path and size worker
//! concurrency accordingly.
//!
//! The default salt is a fixed, non-secret constant. It defends against
//! precomputed rainbow tables over the derivation function — it is NOT a
//! per-record salt and is no substitute for entropy in the identity tuple,
//! since any attacker holding a deployment also holds the constant.

use std::num::NonZeroU32;

use ring::pbkdf2;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{HALF_KEY_LEN, KEY_LEN};
use crate::identity::Identity;

/// The salt used when no explicit [`KdfConfig`] is supplied.
///
/// Existing stored records were sealed under keys derived with this value;
/// changing it orphans every one of them.
pub const DEFAULT_SALT: &[u8] = b"medical_app_salt_2024";

/// The iteration count used when no explicit [`KdfConfig`] is supplied.
pub const DEFAULT_ITERATIONS: NonZeroU32 = match NonZeroU32::new(100_000) {
    Some(n) => n,
    None => unreachable!(),
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Parameters for the key-derivation function.
///
/// [`KdfConfig::default`] reproduces the embedded constants and is the only
/// configuration under which previously sealed records remain openable.
#[derive(Clone, Debug)]
pub struct KdfConfig {
    /// Non-secret salt mixed into every derivation.
    pub salt: Vec<u8>,
    /// PBKDF2 iteration count. Lowering this below the default weakens the
    /// brute-force cost floor for every record sealed under it.
    pub iterations: NonZeroU32,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            salt: DEFAULT_SALT.to_vec(),
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived key
// ---------------------------------------------------------------------------

/// A 32-byte symmetric key derived from an identity tuple.
///
/// - Not `Clone`. Recompute rather than duplicate.
/// - Zeroised on drop.
/// - Raw bytes never leave the crate; the halves are exposed `pub(crate)`
///   for the record cipher only.
///
/// The key splits into two independent halves, matching the sealed-token
/// construction: the first 16 bytes authenticate, the last 16 encrypt.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// The HMAC signing half (first 16 bytes).
    pub(crate) fn signing_half(&self) -> &[u8] {
        &self.bytes[..HALF_KEY_LEN]
    }

    /// The AES cipher half (last 16 bytes).
    pub(crate) fn cipher_half(&self) -> &[u8] {
        &self.bytes[HALF_KEY_LEN..]
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derive the key for an identity tuple under the default configuration.
///
/// Deterministic: the same tuple always yields the same key, across calls
/// and across processes. There are no error conditions — any text input is
/// accepted, including empty strings. A degenerate tuple still derives a
/// valid key; it is merely a guessable one.
///
/// Field order matters. `derive_key` over `(a, b, d)` and `(b, a, d)`
/// produce different keys even though the lookup index for both is the
/// same. See `lookup` for the other half of that asymmetry.
pub fn derive_key(identity: &Identity) -> DerivedKey {
    derive_key_with(&KdfConfig::default(), identity)
}

/// Derive the key for an identity tuple under an explicit configuration.
pub fn derive_key_with(config: &KdfConfig, identity: &Identity) -> DerivedKey {
    let material = identity.key_material();
    let mut bytes = [0u8; KEY_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        config.iterations,
        &config.salt,
        &material,
        &mut bytes,
    );
    DerivedKey { bytes }
}
