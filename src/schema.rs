//! Versioned record payload schemas.
//!
//! Each record type has a fixed, versioned shape. The `schema_version`
//! field is read before anything else matters: tokens written by the
//! earliest producer of this format carry no version field at all and
//! deserialize as version 1 via the serde default. A payload that fails to
//! deserialize into the requested shape collapses to "no data" at
//! `record::open`, the same as any cryptographic failure.

use serde::{Deserialize, Serialize};

/// The current payload schema version, embedded in newly sealed records.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    1
}

/// The demographics payload sealed into a patient record at intake.
///
/// This is the only place the patient's identifying fields exist in
/// recoverable form; everything outside the sealed token sees only the
/// lookup index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub sex: String,
}

impl Demographics {
    pub fn new(first_name: &str, last_name: &str, dob: &str, sex: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            dob: dob.to_string(),
            sex: sex.to_string(),
        }
    }
}

/// The vitals payload sealed into each visit record.
///
/// Measurements are free-text, as entered by staff; validating units and
/// ranges belongs to the intake layer. `recorded_by` is the staff member's
/// display name at the time of the visit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitNote {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub date: String,
    pub weight: String,
    pub temperature: String,
    pub blood_pressure: String,
    pub pulse: String,
    pub respiration: String,
    pub pain_level: String,
    pub notes: String,
    pub recorded_by: String,
}

impl Default for VisitNote {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            date: String::new(),
            weight: String::new(),
            temperature: String::new(),
            blood_pressure: String::new(),
            pulse: String::new(),
            respiration: String::new(),
            pain_level: String::new(),
            notes: String::new(),
            recorded_by: String::new(),
        }
    }
}
