//! The resource directory: cached collection, current criteria, derived view,
//! and the comparison selection, kept consistent with one another.

use std::{
  fmt,
  sync::{Arc, Weak},
};

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
  compare::{ComparisonSelection, ToggleOutcome},
  criteria::FilterCriteria,
  filter,
  resource::{Resource, ResourceId},
  store::ResourceStore,
};

/// Issued by [`Directory::begin_fetch`]; identifies which fetch a result
/// belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a started fetch must be finished"]
pub struct FetchTicket {
  generation: u64,
}

/// What [`Directory::finish_fetch`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
  /// The new collection replaced the old one.
  Applied,
  /// The fetch failed; the previous collection was kept and the error flag set.
  Failed,
  /// A newer fetch was started after this one; the result was dropped.
  Stale,
  /// The directory no longer exists.
  Discarded,
}

/// "Showing N of M resources".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
  pub shown: usize,
  pub total: usize,
}

impl fmt::Display for ViewSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Showing {} of {} resources", self.shown, self.total)
  }
}

#[derive(Debug, Default)]
pub struct Directory {
  resources:  Vec<Resource>,
  criteria:   FilterCriteria,
  view:       Vec<usize>,
  selection:  ComparisonSelection,
  loading:    bool,
  error:      Option<String>,
  generation: u64,
}

/// A directory shared between the front end and in-flight fetches.
pub type SharedDirectory = Arc<Mutex<Directory>>;

impl Directory {
  pub fn new() -> Self { Self::default() }

  /// Start from an already-loaded collection.
  pub fn with_resources(resources: Vec<Resource>) -> Self {
    let mut directory = Self {
      resources,
      ..Self::default()
    };
    directory.rederive();
    directory
  }

  pub fn shared(self) -> SharedDirectory { Arc::new(Mutex::new(self)) }

  // ── Accessors ──────────────────────────────────────────────────────────

  pub fn resources(&self) -> &[Resource] { &self.resources }

  pub fn criteria(&self) -> &FilterCriteria { &self.criteria }

  pub fn is_loading(&self) -> bool { self.loading }

  /// The message of the last failed fetch, cleared by the next success.
  pub fn error(&self) -> Option<&str> { self.error.as_deref() }

  /// The filtered, sorted resources for the current criteria.
  pub fn view(&self) -> Vec<&Resource> {
    self.view.iter().map(|&i| &self.resources[i]).collect()
  }

  pub fn summary(&self) -> ViewSummary {
    ViewSummary {
      shown: self.view.len(),
      total: self.resources.len(),
    }
  }

  pub fn get(&self, id: &ResourceId) -> Option<&Resource> {
    self.resources.iter().find(|r| r.id == *id)
  }

  // ── Criteria ───────────────────────────────────────────────────────────

  pub fn set_criteria(&mut self, criteria: FilterCriteria) {
    self.criteria = criteria;
    self.rederive();
  }

  /// Change one or more criteria fields in place.
  pub fn update_criteria(&mut self, update: impl FnOnce(&mut FilterCriteria)) {
    update(&mut self.criteria);
    self.rederive();
  }

  /// Reset every filter, keeping the sort order.
  pub fn clear_filters(&mut self) { self.update_criteria(FilterCriteria::clear_filters); }

  fn rederive(&mut self) {
    self.view = filter::derive_indices(&self.resources, &self.criteria);
  }

  // ── Fetch lifecycle ────────────────────────────────────────────────────

  /// Mark a fetch as in flight. Any ticket handed out earlier becomes stale.
  pub fn begin_fetch(&mut self) -> FetchTicket {
    self.generation += 1;
    self.loading = true;
    debug!(generation = self.generation, "resource fetch started");
    FetchTicket {
      generation: self.generation,
    }
  }

  /// Apply a fetch result.
  ///
  /// On success the collection is replaced and the criteria current *now*
  /// are applied to it; compared ids that disappeared are dropped. On
  /// failure the previous collection stays in place.
  pub fn finish_fetch<E: fmt::Display>(
    &mut self,
    ticket: FetchTicket,
    result: Result<Vec<Resource>, E>,
  ) -> FetchOutcome {
    if ticket.generation != self.generation {
      debug!(
        generation = ticket.generation,
        current = self.generation,
        "dropping stale fetch result"
      );
      return FetchOutcome::Stale;
    }
    self.loading = false;
    match result {
      Ok(resources) => {
        debug!(count = resources.len(), "resource fetch applied");
        self.resources = resources;
        self.error = None;
        let resources = &self.resources;
        self
          .selection
          .retain_known(|id| resources.iter().any(|r| r.id == *id));
        self.rederive();
        FetchOutcome::Applied
      }
      Err(err) => {
        warn!(error = %err, "resource fetch failed; keeping previous collection");
        self.error = Some(err.to_string());
        FetchOutcome::Failed
      }
    }
  }

  // ── Comparison ─────────────────────────────────────────────────────────

  /// Toggle `id` in the comparison selection. Ids outside the collection
  /// are refused.
  pub fn toggle_compare(&mut self, id: &ResourceId) -> ToggleOutcome {
    if self.get(id).is_none() {
      return ToggleOutcome::Unknown;
    }
    self.selection.toggle(id.clone())
  }

  pub fn clear_compare(&mut self) { self.selection.clear(); }

  pub fn selection(&self) -> &ComparisonSelection { &self.selection }

  /// The compared resources, once at least two are selected.
  pub fn comparison(&self) -> Option<Vec<&Resource>> { self.selection.compared(&self.resources) }
}

/// Fetch approved resources into the directory behind `directory`.
///
/// Only a weak handle is held across the store call, so a directory dropped
/// meanwhile is not kept alive and the result is discarded.
pub async fn refresh<S: ResourceStore>(directory: Weak<Mutex<Directory>>, store: &S) -> FetchOutcome {
  let ticket = {
    let Some(shared) = directory.upgrade() else {
      return FetchOutcome::Discarded;
    };
    let mut guard = shared.lock().await;
    guard.begin_fetch()
  };

  let result = store.fetch_approved_resources().await;

  let Some(shared) = directory.upgrade() else {
    debug!("directory dropped before fetch completed");
    return FetchOutcome::Discarded;
  };
  let mut guard = shared.lock().await;
  guard.finish_fetch(ticket, result)
}
