//! Identity tuples and their normalization.
//!
//! An identity tuple — given name, family name, birth date — is the only
//! credential in the system. It is used transiently to derive keys and
//! lookup index values and is never persisted in plaintext.
//!
//! Normalization rules:
//! - Given and family names are trimmed of surrounding whitespace and
//!   lowercased at construction. `"  Jane "` and `"jane"` are the same
//!   person.
//! - The birth date is taken verbatim. Callers must supply it in one fixed
//!   format of their choosing (e.g. `YYYY-MM-DD`); two spellings of the
//!   same date are two different identities.
//!
//! Two byte-material views exist, and their difference is load-bearing:
//! - [`Identity::key_material`] preserves the order the fields were given
//!   in. Keys derived from `(a, b, d)` and `(b, a, d)` differ.
//! - [`Identity::lookup_material`] sorts the two names first. Lookup index
//!   values are reachable from either field order.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// A person's identifying credentials, normalized.
///
/// Field contents are zeroized on drop and redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Identity {
    given_name: String,
    family_name: String,
    birth_date: String,
}

impl Identity {
    /// Build an identity tuple, applying name normalization.
    ///
    /// Any text is accepted, including empty strings — a degenerate tuple
    /// still produces deterministic keys and index values. Rejecting weak
    /// identities is the job of the intake layer, not this type.
    pub fn new(given_name: &str, family_name: &str, birth_date: &str) -> Self {
        Self {
            given_name: given_name.trim().to_lowercase(),
            family_name: family_name.trim().to_lowercase(),
            birth_date: birth_date.to_string(),
        }
    }

    /// The normalized given name.
    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    /// The normalized family name.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// The birth date, exactly as supplied.
    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    /// Key-derivation material: `given || family || birth_date`, no
    /// separator, in the order the fields were given.
    pub(crate) fn key_material(&self) -> Zeroizing<Vec<u8>> {
        let mut material =
            Vec::with_capacity(self.given_name.len() + self.family_name.len() + self.birth_date.len());
        material.extend_from_slice(self.given_name.as_bytes());
        material.extend_from_slice(self.family_name.as_bytes());
        material.extend_from_slice(self.birth_date.as_bytes());
        Zeroizing::new(material)
    }

    /// Lookup material: the two names in ascending lexicographic order,
    /// then the birth date, no separator.
    pub(crate) fn lookup_material(&self) -> Zeroizing<Vec<u8>> {
        let (first, second) = if self.given_name <= self.family_name {
            (&self.given_name, &self.family_name)
        } else {
            (&self.family_name, &self.given_name)
        };
        let mut material =
            Vec::with_capacity(first.len() + second.len() + self.birth_date.len());
        material.extend_from_slice(first.as_bytes());
        material.extend_from_slice(second.as_bytes());
        material.extend_from_slice(self.birth_date.as_bytes());
        Zeroizing::new(material)
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print name or birth date fields.
        write!(f, "Identity(<redacted>)")
    }
}
