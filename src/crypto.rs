//! Low-level cryptographic operations.
//!
//! This module is the only place in the crate that touches the block
//! cipher. All sealing and opening flows through the functions exposed
//! here; the token format and record modules never see a cipher type.
//!
//! Primitive choices:
//! - **Cipher**: AES-128-CBC with PKCS#7 padding
//! - **Integrity**: HMAC-SHA256, verified in constant time before decryption
//! - **IV**: 128-bit (16 bytes), generated fresh per seal via `SystemRandom`
//! - **Key**: 32 bytes, split into a 16-byte signing half and a 16-byte
//!   cipher half (see `keys::DerivedKey`)
//!
//! CBC carries no integrity of its own; the HMAC tag is the only thing
//! standing between a tampered ciphertext and a garbage decode. `verify`
//! must succeed before `decrypt` is attempted.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use ring::hmac;
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::VitalsealError;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Size of a derived key in bytes.
pub const KEY_LEN: usize = 32;

/// Size of each key half (signing, cipher) in bytes.
pub const HALF_KEY_LEN: usize = KEY_LEN / 2;

/// Size of the CBC initialization vector in bytes (one AES block).
pub const IV_LEN: usize = 16;

/// Size of the HMAC-SHA256 tag in bytes.
pub const TAG_LEN: usize = 32;

/// Generate a cryptographically secure random IV.
///
/// `ring::rand::SystemRandom` is the only source of randomness in the
/// crate. A fresh IV is generated for every seal; there is no caching or
/// counter-based generation.
pub(crate) fn generate_iv() -> Result<[u8; IV_LEN], VitalsealError> {
    let rng = SystemRandom::new();
    let mut buf = [0u8; IV_LEN];
    rng.fill(&mut buf)
        .map_err(|_| VitalsealError::RandomnessFailure)?;
    Ok(buf)
}

/// Encrypt a plaintext payload using AES-128-CBC with PKCS#7 padding.
///
/// The output carries no integrity on its own — callers must compute a tag
/// over the framed token with [`sign`].
pub(crate) fn encrypt(
    cipher_key: &[u8],
    iv: &[u8; IV_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, VitalsealError> {
    let enc = Aes128CbcEnc::new_from_slices(cipher_key, iv)
        .map_err(|_| VitalsealError::InvalidKey)?;
    Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt a ciphertext payload using AES-128-CBC with PKCS#7 padding.
///
/// Only call after [`verify`] has accepted the tag. A wrong key or mangled
/// ciphertext surfaces as `DecryptionFailure`; the caller receives no
/// partial plaintext.
pub(crate) fn decrypt(
    cipher_key: &[u8],
    iv: &[u8; IV_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, VitalsealError> {
    if ciphertext.is_empty() || ciphertext.len() % IV_LEN != 0 {
        return Err(VitalsealError::DecryptionFailure);
    }

    let dec = Aes128CbcDec::new_from_slices(cipher_key, iv)
        .map_err(|_| VitalsealError::InvalidKey)?;
    dec.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| VitalsealError::DecryptionFailure)
}

/// Compute the HMAC-SHA256 tag over a framed token prefix.
pub(crate) fn sign(signing_key: &[u8], message: &[u8]) -> [u8; TAG_LEN] {
    let key = hmac::Key::new(hmac::HMAC_SHA256, signing_key);
    let tag = hmac::sign(&key, message);
    let mut out = [0u8; TAG_LEN];
    out.copy_from_slice(tag.as_ref());
    out
}

/// Verify an HMAC-SHA256 tag in constant time.
///
/// Any mismatch — wrong key, altered message, altered tag — is the same
/// `DecryptionFailure`.
pub(crate) fn verify(
    signing_key: &[u8],
    message: &[u8],
    tag: &[u8],
) -> Result<(), VitalsealError> {
    let key = hmac::Key::new(hmac::HMAC_SHA256, signing_key);
    hmac::verify(&key, message, tag).map_err(|_| VitalsealError::DecryptionFailure)
}
