//! Error types for vitalseal.
//!
//! Every variant is a distinct failure mode in the sealing core. Error
//! messages are intentionally minimal — they signal *what* failed without
//! revealing *why* in ways that could leak cryptographic state.
//!
//! Note what is deliberately absent: there is no "wrong credentials"
//! variant. A decryption that fails for any reason surfaces as `None` at
//! the `record::open` boundary, never as a distinguishable error.

use std::fmt;

/// The single error type for all vitalseal operations.
#[derive(Debug)]
pub enum VitalsealError {
    /// A cryptographic key was invalid (wrong length, malformed).
    InvalidKey,

    /// The system's random number generator failed to produce bytes.
    RandomnessFailure,

    /// A payload could not be serialized into its canonical byte encoding.
    SerializationFailure,

    /// Decryption failed: wrong key, tampered ciphertext, or a corrupted
    /// integrity tag. Collapsed to `None` before reaching callers.
    DecryptionFailure,

    /// A sealed token's structure is invalid: bad encoding, unknown
    /// version byte, or truncation. Collapsed to `None` before reaching
    /// callers.
    MalformedToken,

    /// A lookup index could not be parsed from its stored hex form.
    InvalidIndex,

    /// A patient record with the same lookup index already exists.
    PatientAlreadyExists,

    /// No patient record exists for the given handle.
    PatientNotFound,
}

impl fmt::Display for VitalsealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey => write!(f, "invalid key"),
            Self::RandomnessFailure => write!(f, "randomness source failed"),
            Self::SerializationFailure => write!(f, "payload serialization failed"),
            Self::DecryptionFailure => write!(f, "decryption failed"),
            Self::MalformedToken => write!(f, "malformed token"),
            Self::InvalidIndex => write!(f, "invalid lookup index"),
            Self::PatientAlreadyExists => write!(f, "patient record already exists"),
            Self::PatientNotFound => write!(f, "patient record not found"),
        }
    }
}

impl std::error::Error for VitalsealError {}
