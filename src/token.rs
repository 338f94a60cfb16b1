//! Sealed-token wire format.
//!
//! A sealed token is the entire stored form of a record's confidential
//! payload: opaque to storage, self-authenticating, versioned.
//!
//! # Layout of decoded bytes
//! ```text
//! [ version (1) ][ epoch seconds, u64 BE (8) ][ IV (16) ][ ciphertext ][ HMAC tag (32) ]
//! ```
//!
//! The whole structure is base64-URL encoded without padding and handled
//! as text. The HMAC tag covers everything before it, version byte
//! included. The embedded timestamp is a freshness marker only; nothing
//! in this crate enforces an expiry, so age can never become a failure
//! oracle.
//!
//! Decoding is strict about structure and lenient about exactly one thing:
//! trailing `=` padding, which tokens written by older producers of this
//! format carry.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::crypto::{IV_LEN, TAG_LEN};
use crate::error::VitalsealError;

/// The format version byte carried by every token.
pub const TOKEN_VERSION: u8 = 0x80;

const TS_LEN: usize = 8;
const HEADER_LEN: usize = 1 + TS_LEN + IV_LEN;
const MIN_DECODED_LEN: usize = HEADER_LEN + TAG_LEN;

/// An opaque sealed token, as persisted.
///
/// Constructed by `record::seal`; reconstructed from storage via `From<String>`.
/// No validation happens on construction; a token proves nothing until
/// `record::open` authenticates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedToken(String);

impl SealedToken {
    /// The token text, for handing to storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, yielding the owned text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SealedToken {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl std::fmt::Display for SealedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The decoded fields of a token, internal to the sealing flow.
pub(crate) struct TokenParts {
    /// Seconds since the Unix epoch at seal time.
    pub issued_at: u64,
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN],
}

impl TokenParts {
    /// The bytes the HMAC tag covers: version, timestamp, IV, ciphertext.
    pub(crate) fn signed_portion(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        out.push(TOKEN_VERSION);
        out.extend_from_slice(&self.issued_at.to_be_bytes());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Frame and encode the parts into token text.
    pub(crate) fn encode(&self) -> SealedToken {
        let mut raw = self.signed_portion();
        raw.extend_from_slice(&self.tag);
        SealedToken(URL_SAFE_NO_PAD.encode(raw))
    }

    /// Decode token text back into parts.
    ///
    /// Checks structure only (length, version byte). The tag is NOT
    /// verified here; that requires key material the format layer never
    /// sees.
    pub(crate) fn decode(token: &SealedToken) -> Result<Self, VitalsealError> {
        // Older producers of this format emit padded base64.
        let text = token.0.trim_end_matches('=');
        let raw = URL_SAFE_NO_PAD
            .decode(text)
            .map_err(|_| VitalsealError::MalformedToken)?;

        if raw.len() < MIN_DECODED_LEN {
            return Err(VitalsealError::MalformedToken);
        }
        if raw[0] != TOKEN_VERSION {
            return Err(VitalsealError::MalformedToken);
        }

        let mut ts_bytes = [0u8; TS_LEN];
        ts_bytes.copy_from_slice(&raw[1..1 + TS_LEN]);

        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&raw[1 + TS_LEN..HEADER_LEN]);

        let tag_start = raw.len() - TAG_LEN;
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&raw[tag_start..]);

        Ok(Self {
            issued_at: u64::from_be_bytes(ts_bytes),
            iv,
            ciphertext: raw[HEADER_LEN..tag_start].to_vec(),
            tag,
        })
    }
}
