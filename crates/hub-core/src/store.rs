//! The `ResourceStore` trait, the hosted backend as seen by the core.
//!
//! The trait is implemented by backend clients (e.g. `hub-client`). The
//! directory and the submission form depend on this abstraction, not on any
//! concrete transport.

use std::future::Future;

use strum::Display;

use crate::{
  event::Event,
  resource::{NewResource, Resource},
};

// ─── Failure classification ──────────────────────────────────────────────────

/// Coarse reason a backend call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FailureKind {
  /// The backend refused the data or the caller's permissions. Retrying the
  /// same request will fail again.
  Validation,
  /// The backend could not be reached or failed internally. Retrying may
  /// succeed.
  Unavailable,
}

/// Implemented by store error types so callers can tell rejections apart from
/// outages without inspecting error internals.
pub trait StoreFailure {
  fn failure_kind(&self) -> FailureKind;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the hosted backend's resource and event tables.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait ResourceStore: Send + Sync {
  type Error: std::error::Error + StoreFailure + Send + Sync + 'static;

  /// Every approved resource, newest first.
  fn fetch_approved_resources(
    &self,
  ) -> impl Future<Output = Result<Vec<Resource>, Self::Error>> + Send + '_;

  /// Persist a new, unapproved resource. The payload already carries the
  /// submitter id.
  fn create_resource(
    &self,
    resource: NewResource,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every approved event, soonest first.
  fn fetch_approved_events(
    &self,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;
}
