//! # availability-engine
//!
//! Reconciles caregiver availability changes against the visit calendar.
//!
//! When a caregiver declares permanent unavailability from some instant onward,
//! every visit they hold that starts after that instant (within a one-year
//! horizon) is unassigned. The store behind the calendar is abstract so a
//! persistent backend can replace the in-memory one.
//!
//! ## Quick start
//!
//! ```rust
//! use availability_engine::{InMemoryVisitStore, PermanentUnavailabilityEvent, UnavailabilityReconciler, Visit};
//! use chrono::{TimeZone, Utc};
//!
//! # tokio_test_runtime(async {
//! let store = InMemoryVisitStore::new(vec![Visit::new(
//!     "visit-1",
//!     "tenant-1",
//!     "patient-1",
//!     "caregiver-1",
//!     Utc.with_ymd_and_hms(2025, 11, 8, 10, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2025, 11, 8, 11, 0, 0).unwrap(),
//! )]);
//! let reconciler = UnavailabilityReconciler::new(store.clone());
//!
//! let event = PermanentUnavailabilityEvent {
//!     id: "unavailability-1".into(),
//!     tenant_id: "tenant-1".into(),
//!     caregiver_id: "caregiver-1".into(),
//!     effective_from: Utc.with_ymd_and_hms(2025, 11, 7, 0, 0, 0).unwrap(),
//! };
//! let outcome = reconciler.handle(&event).await.unwrap();
//! assert_eq!(outcome.unassigned, vec!["visit-1".to_string()]);
//! # });
//! # fn tokio_test_runtime<F: std::future::Future<Output = ()>>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`model`] — `Visit` and the caregiver event shapes
//! - [`interval`] — Half-open overlap predicate and `DateTime<Utc>` arithmetic helpers
//! - [`store`] — `VisitStore` contract and the in-memory implementation
//! - [`reconciler`] — Turns a permanent-unavailability event into unassignments
//! - [`config`] — Reconciler settings (horizon, boundary policy) loadable from TOML
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod interval;
pub mod model;
pub mod reconciler;
pub mod store;

pub use config::{BoundaryPolicy, ReconcilerConfig};
pub use error::AvailabilityError;
pub use interval::{overlaps, TimeWindow};
pub use model::{
    AbsenceBookedEvent, CaregiverEvent, PermanentUnavailabilityEvent, Visit, UNASSIGNED,
};
pub use reconciler::{ReconciliationOutcome, UnavailabilityReconciler};
pub use store::{InMemoryVisitStore, VisitStore};
