//! Sealing and opening record payloads.
//!
//! The record cipher ties the other modules together: a payload is
//! serialized to its canonical byte encoding, a key is derived from the
//! identity tuple (field order preserved), and the bytes are encrypted and
//! authenticated into a [`SealedToken`].
//!
//! `open` is the security boundary of the whole crate. Wrong key,
//! tampered or truncated token, unknown version, failed deserialization:
//! every one of them is the same `None`. A caller (and therefore an
//! attacker with valid staff access but wrong patient credentials) cannot
//! distinguish bad credentials from corrupted storage.
//!
//! Each call is stateless and pure apart from the fresh IV and the seal
//! timestamp; sealing the same payload twice yields different token bytes
//! that both open to the same payload.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use zeroize::Zeroizing;

use crate::crypto::{self, TAG_LEN};
use crate::error::VitalsealError;
use crate::identity::Identity;
use crate::keys::{self, KdfConfig};
use crate::token::{SealedToken, TokenParts};

/// Seal a payload under an identity tuple, default derivation config.
///
/// Succeeds for any serializable payload; the only other failure mode is
/// the system RNG. The identity's field order is captured in the key: a
/// token sealed as `(given, family)` will not open as `(family, given)`.
pub fn seal<T: Serialize>(payload: &T, identity: &Identity) -> Result<SealedToken, VitalsealError> {
    seal_with(&KdfConfig::default(), payload, identity)
}

/// Seal a payload under an explicit derivation config.
pub fn seal_with<T: Serialize>(
    config: &KdfConfig,
    payload: &T,
    identity: &Identity,
) -> Result<SealedToken, VitalsealError> {
    let plaintext = Zeroizing::new(
        serde_json::to_vec(payload).map_err(|_| VitalsealError::SerializationFailure)?,
    );

    let key = keys::derive_key_with(config, identity);
    let iv = crypto::generate_iv()?;
    let ciphertext = crypto::encrypt(key.cipher_half(), &iv, &plaintext)?;

    let mut parts = TokenParts {
        issued_at: Utc::now().timestamp() as u64,
        iv,
        ciphertext,
        tag: [0u8; TAG_LEN],
    };
    parts.tag = crypto::sign(key.signing_half(), &parts.signed_portion());

    Ok(parts.encode())
}

/// Open a sealed token under an identity tuple, default derivation config.
///
/// Returns the payload on success and `None` on ANY failure. The `None`
/// carries no information: "record doesn't decrypt, verify credentials"
/// is all a caller may learn.
pub fn open<T: DeserializeOwned>(token: &SealedToken, identity: &Identity) -> Option<T> {
    open_with(&KdfConfig::default(), token, identity)
}

/// Open a sealed token under an explicit derivation config.
pub fn open_with<T: DeserializeOwned>(
    config: &KdfConfig,
    token: &SealedToken,
    identity: &Identity,
) -> Option<T> {
    try_open(config, token, identity).ok()
}

/// The fallible path behind `open`. Never exposed: the distinct failure
/// modes exist for internal flow only and are collapsed at the boundary.
fn try_open<T: DeserializeOwned>(
    config: &KdfConfig,
    token: &SealedToken,
    identity: &Identity,
) -> Result<T, VitalsealError> {
    let parts = TokenParts::decode(token)?;
    let key = keys::derive_key_with(config, identity);

    // Authenticate before touching the cipher. CBC alone would happily
    // decrypt a tampered ciphertext into garbage.
    crypto::verify(key.signing_half(), &parts.signed_portion(), &parts.tag)?;

    let plaintext = Zeroizing::new(crypto::decrypt(
        key.cipher_half(),
        &parts.iv,
        &parts.ciphertext,
    )?);

    serde_json::from_slice(&plaintext).map_err(|_| VitalsealError::SerializationFailure)
}
