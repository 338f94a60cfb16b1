//! Record registry: intake and retrieval orchestration.
//!
//! This module owns the control flow the rest of the crate exists for.
//! On intake: compute the lookup index, enforce uniqueness, seal the
//! demographics, hand both to the store. On retrieval: re-derive
//! everything from the presented identity tuple; failure yields no data,
//! never a partial decode.
//!
//! The storage collaborator is behind [`RecordStore`]: a key-value
//! boundary holding exactly a lookup index (unique) and a sealed token
//! (opaque text that must round-trip byte-exact) per record, plus the
//! non-identifying bookkeeping fields. [`MemoryStore`] implements it for
//! tests and in-process embedding; a relational implementation lives with
//! the caller.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::VitalsealError;
use crate::identity::Identity;
use crate::lookup::{lookup_index, LookupIndex};
use crate::record;
use crate::schema::{Demographics, VisitNote};
use crate::token::SealedToken;

/// Opaque handle to a patient record within a store.
pub type PatientId = u64;

/// Opaque handle to a visit record within a store.
pub type VisitId = u64;

/// One patient: created once per distinct identity.
///
/// The sealed token is the only place the demographics exist in
/// recoverable form.
#[derive(Clone, Debug)]
pub struct PatientRecord {
    /// Order-invariant discovery digest. Unique across all records.
    pub lookup_index: LookupIndex,
    /// The sealed [`Demographics`] payload.
    pub sealed_demographics: SealedToken,
    /// Opaque reference to the attending staff member.
    pub attending_staff: String,
    pub created_at: DateTime<Utc>,
}

/// One visit: belongs to exactly one patient, never mutated after
/// creation.
#[derive(Clone, Debug)]
pub struct VisitRecord {
    pub patient: PatientId,
    /// The sealed [`VisitNote`] payload.
    pub sealed_visit: SealedToken,
    pub recorded_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Storage boundary
// ---------------------------------------------------------------------------

/// The persistence collaborator, reduced to what the core needs.
///
/// Implementations must:
/// - reject a patient insert whose lookup index already exists,
/// - return sealed tokens byte-exactly as inserted,
/// - return a patient's visits ordered by `recorded_at`, oldest first.
pub trait RecordStore {
    /// Insert a patient record, enforcing lookup-index uniqueness.
    fn insert_patient(&mut self, record: PatientRecord) -> Result<PatientId, VitalsealError>;

    /// Fetch a patient record by handle.
    fn patient(&self, id: PatientId) -> Option<&PatientRecord>;

    /// Find a patient by lookup index value.
    fn patient_by_index(&self, index: &LookupIndex) -> Option<PatientId>;

    /// Insert a visit record. Fails if the parent patient does not exist.
    fn insert_visit(&mut self, record: VisitRecord) -> Result<VisitId, VitalsealError>;

    /// All visits for a patient, ordered by `recorded_at`, oldest first.
    fn visits_for(&self, patient: PatientId) -> Vec<&VisitRecord>;
}

/// An in-memory [`RecordStore`].
#[derive(Default)]
pub struct MemoryStore {
    patients: HashMap<PatientId, PatientRecord>,
    by_index: HashMap<LookupIndex, PatientId>,
    visits: Vec<VisitRecord>,
    next_patient: PatientId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn insert_patient(&mut self, record: PatientRecord) -> Result<PatientId, VitalsealError> {
        if self.by_index.contains_key(&record.lookup_index) {
            return Err(VitalsealError::PatientAlreadyExists);
        }
        let id = self.next_patient;
        self.next_patient += 1;
        self.by_index.insert(record.lookup_index, id);
        self.patients.insert(id, record);
        Ok(id)
    }

    fn patient(&self, id: PatientId) -> Option<&PatientRecord> {
        self.patients.get(&id)
    }

    fn patient_by_index(&self, index: &LookupIndex) -> Option<PatientId> {
        self.by_index.get(index).copied()
    }

    fn insert_visit(&mut self, record: VisitRecord) -> Result<VisitId, VitalsealError> {
        if !self.patients.contains_key(&record.patient) {
            return Err(VitalsealError::PatientNotFound);
        }
        let id = self.visits.len() as VisitId;
        self.visits.push(record);
        Ok(id)
    }

    fn visits_for(&self, patient: PatientId) -> Vec<&VisitRecord> {
        let mut out: Vec<&VisitRecord> =
            self.visits.iter().filter(|v| v.patient == patient).collect();
        out.sort_by_key(|v| v.recorded_at);
        out
    }
}

// ---------------------------------------------------------------------------
// Flows
// ---------------------------------------------------------------------------

/// Register a new patient: uniqueness check, seal, insert.
///
/// The identity tuple both names the record (via the order-invariant
/// index) and locks it (via the order-sensitive key). A second
/// registration for the same identity, in either name order, fails.
pub fn register_patient<S: RecordStore>(
    store: &mut S,
    identity: &Identity,
    demographics: &Demographics,
    attending_staff: &str,
) -> Result<PatientId, VitalsealError> {
    let index = lookup_index(identity);
    if store.patient_by_index(&index).is_some() {
        return Err(VitalsealError::PatientAlreadyExists);
    }

    let sealed = record::seal(demographics, identity)?;
    store.insert_patient(PatientRecord {
        lookup_index: index,
        sealed_demographics: sealed,
        attending_staff: attending_staff.to_string(),
        created_at: Utc::now(),
    })
}

/// Find a patient by identity tuple.
///
/// Discovery is order-invariant: swapped given/family fields still locate
/// the record. Locating a record proves nothing about being able to open
/// it.
pub fn locate_patient<S: RecordStore>(store: &S, identity: &Identity) -> Option<PatientId> {
    store.patient_by_index(&lookup_index(identity))
}

/// Open a patient's demographics with the presented identity tuple.
///
/// `None` covers every failure: unknown handle, wrong credentials,
/// corrupted token. No distinction is surfaced.
pub fn open_demographics<S: RecordStore>(
    store: &S,
    patient: PatientId,
    identity: &Identity,
) -> Option<Demographics> {
    let stored = store.patient(patient)?;
    record::open(&stored.sealed_demographics, identity)
}

/// Seal and append a visit record for a patient.
pub fn record_visit<S: RecordStore>(
    store: &mut S,
    patient: PatientId,
    identity: &Identity,
    note: &VisitNote,
) -> Result<VisitId, VitalsealError> {
    if store.patient(patient).is_none() {
        return Err(VitalsealError::PatientNotFound);
    }

    let sealed = record::seal(note, identity)?;
    store.insert_visit(VisitRecord {
        patient,
        sealed_visit: sealed,
        recorded_at: Utc::now(),
    })
}

/// Open a patient's visit history, newest first.
///
/// Visits that fail to open with the presented identity are skipped
/// silently. A reader with wrong credentials sees an empty history, not
/// an error.
pub fn visit_history<S: RecordStore>(
    store: &S,
    patient: PatientId,
    identity: &Identity,
) -> Vec<VisitNote> {
    let mut notes: Vec<VisitNote> = store
        .visits_for(patient)
        .into_iter()
        .filter_map(|v| record::open(&v.sealed_visit, identity))
        .collect();
    notes.reverse();
    notes
}
