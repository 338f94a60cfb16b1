//! # vitalseal
//!
//! Credential-derived key management and sealed record storage core.
//!
//! Record contents are unreadable to anyone, the storage operator
//! included, unless they present the exact identifying credentials used
//! to create the record: given name, family name, date of birth. Nothing
//! identifying is ever persisted in plaintext; there is no master key and
//! no key escrow. The identity tuple IS the key material.
//!
//! Three components, leaves first:
//!
//! - **Key derivation** ([`keys`]): a slow, salted, deterministic hash of
//!   the normalized identity tuple, field order preserved.
//! - **Lookup index** ([`lookup`]): an order-invariant digest used to
//!   find a record without storing who it belongs to.
//! - **Record cipher** ([`record`]): authenticated encryption of
//!   structured payloads into opaque, versioned text tokens.
//!
//! The asymmetry between the first two is deliberate and preserved:
//! swapping the given and family name fields still *finds* a record (the
//! lookup index sorts the names) but cannot *decrypt* it (the key
//! derivation does not). Callers presenting swapped fields get the same
//! answer as callers presenting wrong credentials: no data.
//!
//! ## Public API
//!
//! The surface is intentionally narrow. Derive keys and index values from
//! an [`Identity`], seal and open payloads via [`seal`]/[`open`], and run
//! intake/retrieval flows through [`registry`]. The cipher internals are
//! not exposed.

pub(crate) mod crypto;
pub mod error;
pub mod identity;
pub mod keys;
pub mod lookup;
pub mod record;
pub mod registry;
pub mod schema;
pub mod token;

pub use error::VitalsealError;
pub use identity::Identity;
pub use keys::{derive_key, derive_key_with, DerivedKey, KdfConfig};
pub use lookup::{lookup_index, LookupIndex};
pub use record::{open, open_with, seal, seal_with};
pub use schema::{Demographics, VisitNote};
pub use token::SealedToken;
