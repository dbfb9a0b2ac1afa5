//! Visits and the caregiver events that act on them.
//!
//! Field names serialize in camelCase to match the upstream event schema
//! (`tenantId`, `effectiveFrom`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caregiver id held by a visit nobody is assigned to.
pub const UNASSIGNED: &str = "";

/// One scheduled caregiving appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: String,
    /// Owning care agency. Carried, never filtered on.
    pub tenant_id: String,
    pub patient_id: String,
    /// Assigned caregiver, or [`UNASSIGNED`].
    pub caregiver_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Visit {
    pub fn new(
        id: impl Into<String>,
        tenant_id: impl Into<String>,
        patient_id: impl Into<String>,
        caregiver_id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            tenant_id: tenant_id.into(),
            patient_id: patient_id.into(),
            caregiver_id: caregiver_id.into(),
            start_time,
            end_time,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.caregiver_id != UNASSIGNED
    }
}

/// A caregiver is unavailable from `effective_from` onward, indefinitely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermanentUnavailabilityEvent {
    pub id: String,
    pub tenant_id: String,
    pub caregiver_id: String,
    pub effective_from: DateTime<Utc>,
}

/// A caregiver booked an absence over `[start_time, end_time)`.
///
/// No reconciliation rule exists for this event yet; it is accepted and
/// reported as unhandled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceBookedEvent {
    pub id: String,
    pub tenant_id: String,
    pub caregiver_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Any event delivered on the caregiver availability feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CaregiverEvent {
    PermanentUnavailability(PermanentUnavailabilityEvent),
    AbsenceBooked(AbsenceBookedEvent),
}

impl CaregiverEvent {
    pub fn id(&self) -> &str {
        match self {
            CaregiverEvent::PermanentUnavailability(e) => &e.id,
            CaregiverEvent::AbsenceBooked(e) => &e.id,
        }
    }

    pub fn caregiver_id(&self) -> &str {
        match self {
            CaregiverEvent::PermanentUnavailability(e) => &e.caregiver_id,
            CaregiverEvent::AbsenceBooked(e) => &e.caregiver_id,
        }
    }
}
