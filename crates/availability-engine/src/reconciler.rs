//! Applies a permanent-unavailability event to the visit calendar.
//!
//! The store query is a plain overlap test over
//! `[effective_from, effective_from + horizon)`, which also returns visits that
//! started before `effective_from` but are still running. The reconciler then
//! keeps only the visits the
//! [`BoundaryPolicy`](crate::config::BoundaryPolicy) marks as affected and
//! unassigns them one at a time, in query order.
//!
//! Visits starting beyond the horizon are not reconciled by the event.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::ReconcilerConfig;
use crate::error::Result;
use crate::interval::TimeWindow;
use crate::model::PermanentUnavailabilityEvent;
use crate::store::VisitStore;

/// What one `handle` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationOutcome {
    pub event_id: String,
    /// Exclusive upper bound of the query window.
    pub horizon: DateTime<Utc>,
    /// Number of visits the store returned for the window.
    pub examined: usize,
    /// Ids of visits unassign was issued for, in processing order.
    pub unassigned: Vec<String>,
    /// Ids of visits that overlapped the window but were left alone.
    pub retained: Vec<String>,
}

pub struct UnavailabilityReconciler<S> {
    store: S,
    config: ReconcilerConfig,
}

impl<S: VisitStore> UnavailabilityReconciler<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, ReconcilerConfig::default())
    }

    pub fn with_config(store: S, config: ReconcilerConfig) -> Self {
        Self { store, config }
    }

    /// Unassign the event's caregiver from every affected visit in the horizon.
    ///
    /// Safe to call repeatedly with the same event: visits already unassigned
    /// no longer match the caregiver, so the second pass changes nothing.
    /// Store errors are returned as-is and abort the remaining unassignments.
    #[tracing::instrument(
        skip(self, event),
        fields(
            event_id = %event.id,
            tenant_id = %event.tenant_id,
            caregiver_id = %event.caregiver_id
        )
    )]
    pub async fn handle(
        &self,
        event: &PermanentUnavailabilityEvent,
    ) -> Result<ReconciliationOutcome> {
        let window = TimeWindow::days_from(event.effective_from, self.config.horizon_days);

        let visits = self
            .store
            .query(Some(event.caregiver_id.as_str()), window.start, window.end)
            .await?;

        let mut unassigned = Vec::new();
        let mut retained = Vec::new();

        for visit in &visits {
            if self
                .config
                .boundary
                .affects(visit.start_time, event.effective_from)
            {
                self.store
                    .unassign(&visit.id, &event.caregiver_id)
                    .await?;
                debug!(visit_id = %visit.id, start = %visit.start_time, "unassigned visit");
                unassigned.push(visit.id.clone());
            } else {
                debug!(visit_id = %visit.id, start = %visit.start_time, "visit not affected");
                retained.push(visit.id.clone());
            }
        }

        info!(
            examined = visits.len(),
            unassigned = unassigned.len(),
            horizon = %window.end,
            "reconciled permanent unavailability"
        );

        Ok(ReconciliationOutcome {
            event_id: event.id.clone(),
            horizon: window.end,
            examined: visits.len(),
            unassigned,
            retained,
        })
    }
}
