//! Side-by-side comparison selection.

use serde::Serialize;

use crate::resource::{Resource, ResourceId};

/// Maximum number of resources compared at once.
pub const MAX_COMPARED: usize = 3;

/// What a [`ComparisonSelection::toggle`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
  Added,
  Removed,
  /// The selection was already full; nothing changed.
  Full,
  /// The id is not part of the known collection; nothing changed.
  Unknown,
}

/// An ordered, duplicate-free set of at most [`MAX_COMPARED`] resource ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonSelection {
  ids: Vec<ResourceId>,
}

impl ComparisonSelection {
  pub fn new() -> Self { Self::default() }

  /// Remove `id` if selected, otherwise append it while there is room.
  pub fn toggle(&mut self, id: ResourceId) -> ToggleOutcome {
    if let Some(pos) = self.ids.iter().position(|selected| *selected == id) {
      self.ids.remove(pos);
      return ToggleOutcome::Removed;
    }
    if self.ids.len() >= MAX_COMPARED {
      return ToggleOutcome::Full;
    }
    self.ids.push(id);
    ToggleOutcome::Added
  }

  pub fn clear(&mut self) { self.ids.clear(); }

  /// Drop every id `is_known` rejects, keeping the order of the rest.
  pub fn retain_known(&mut self, mut is_known: impl FnMut(&ResourceId) -> bool) {
    self.ids.retain(|id| is_known(id));
  }

  pub fn ids(&self) -> &[ResourceId] { &self.ids }

  pub fn len(&self) -> usize { self.ids.len() }

  pub fn is_empty(&self) -> bool { self.ids.is_empty() }

  pub fn contains(&self, id: &ResourceId) -> bool { self.ids.contains(id) }

  /// Comparison needs at least two resources.
  pub fn can_compare(&self) -> bool { self.ids.len() >= 2 }

  /// The selected resources in selection order, or `None` while fewer than
  /// two are selected.
  pub fn compared<'a>(&self, resources: &'a [Resource]) -> Option<Vec<&'a Resource>> {
    if !self.can_compare() {
      return None;
    }
    Some(
      self
        .ids
        .iter()
        .filter_map(|id| resources.iter().find(|r| r.id == *id))
        .collect(),
    )
  }
}
