//! The visit calendar: range/caregiver queries and caregiver unassignment.
//!
//! [`VisitStore`] is the contract a persistent backend must honor:
//!
//! - `query` returns every visit overlapping `[from, to)` (see
//!   [`interval::overlaps`](crate::interval::overlaps)), optionally restricted
//!   to one caregiver, in insertion order.
//! - `unassign` clears the caregiver of the first visit matching both the visit
//!   id and the expected caregiver. No match is a no-op, not an error.
//! - Each `unassign` is atomic for the single visit it touches.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{AvailabilityError, Result};
use crate::interval::overlaps;
use crate::model::{Visit, UNASSIGNED};

#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Visits overlapping `[from, to)`, filtered to `caregiver_id` when given.
    async fn query(
        &self,
        caregiver_id: Option<&str>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Visit>>;

    /// Unassign `caregiver_id` from visit `visit_id` if it still holds it.
    async fn unassign(&self, visit_id: &str, caregiver_id: &str) -> Result<()>;
}

#[async_trait]
impl<S: VisitStore + ?Sized> VisitStore for Arc<S> {
    async fn query(
        &self,
        caregiver_id: Option<&str>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Visit>> {
        (**self).query(caregiver_id, from, to).await
    }

    async fn unassign(&self, visit_id: &str, caregiver_id: &str) -> Result<()> {
        (**self).unassign(visit_id, caregiver_id).await
    }
}

#[derive(Default)]
struct Calendar {
    /// Records in insertion order. Slots are never removed.
    visits: Vec<Visit>,
    /// Slots holding each visit id, ascending. Ids may repeat.
    slots_by_id: HashMap<String, Vec<usize>>,
}

impl Calendar {
    fn push(&mut self, visit: Visit) {
        let slot = self.visits.len();
        self.slots_by_id
            .entry(visit.id.clone())
            .or_default()
            .push(slot);
        self.visits.push(visit);
    }
}

/// In-memory [`VisitStore`].
///
/// Clones share the same calendar, so a test can hand one clone to a
/// reconciler and inspect the result through another.
#[derive(Clone, Default)]
pub struct InMemoryVisitStore {
    calendar: Arc<RwLock<Calendar>>,
}

impl InMemoryVisitStore {
    pub fn new(visits: impl IntoIterator<Item = Visit>) -> Self {
        let mut calendar = Calendar::default();
        for visit in visits {
            calendar.push(visit);
        }
        Self {
            calendar: Arc::new(RwLock::new(calendar)),
        }
    }

    pub fn insert(&self, visit: Visit) -> Result<()> {
        self.write()?.push(visit);
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.visits.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.visits.is_empty())
    }

    /// Copy of every record, in insertion order.
    pub fn snapshot(&self) -> Result<Vec<Visit>> {
        Ok(self.read()?.visits.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Calendar>> {
        self.calendar
            .read()
            .map_err(|_| AvailabilityError::StoreUnavailable("calendar lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Calendar>> {
        self.calendar
            .write()
            .map_err(|_| AvailabilityError::StoreUnavailable("calendar lock poisoned".into()))
    }
}

#[async_trait]
impl VisitStore for InMemoryVisitStore {
    async fn query(
        &self,
        caregiver_id: Option<&str>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Visit>> {
        let calendar = self.read()?;
        Ok(calendar
            .visits
            .iter()
            .filter(|v| caregiver_id.is_none_or(|c| v.caregiver_id == c))
            .filter(|v| overlaps(v.start_time, v.end_time, from, to))
            .cloned()
            .collect())
    }

    async fn unassign(&self, visit_id: &str, caregiver_id: &str) -> Result<()> {
        let mut calendar = self.write()?;
        let Calendar {
            visits,
            slots_by_id,
        } = &mut *calendar;

        let Some(slots) = slots_by_id.get(visit_id) else {
            return Ok(());
        };
        if let Some(&slot) = slots
            .iter()
            .find(|&&slot| visits[slot].caregiver_id == caregiver_id)
        {
            visits[slot].caregiver_id = UNASSIGNED.to_string();
        }
        Ok(())
    }
}
