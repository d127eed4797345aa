//! The filter/sort engine.
//!
//! [`derive_view`] turns a resource collection plus [`FilterCriteria`] into
//! the ordered subset to display. Filtering runs to completion before any
//! sorting, so counts and order always come from the same criteria snapshot.
//!
//! Dimensions combine with AND. Inside a multi-select dimension (service type,
//! availability, accessibility, language) any one selected label is enough.
//! A resource missing the field a dimension looks at never matches it.

use std::{cmp::Ordering, collections::BTreeMap};

use crate::{
  criteria::{FilterCriteria, SortKey},
  resource::Resource,
  vocabulary::Category,
};

/// Filter then sort `resources`, borrowing from the input.
pub fn derive_view<'a>(
  resources: &'a [Resource],
  criteria: &FilterCriteria,
) -> Vec<&'a Resource> {
  derive_indices(resources, criteria)
    .into_iter()
    .map(|i| &resources[i])
    .collect()
}

/// Same as [`derive_view`] but yields positions into `resources`.
pub fn derive_indices(resources: &[Resource], criteria: &FilterCriteria) -> Vec<usize> {
  let needle = criteria.search_needle();

  let mut selected: Vec<usize> = resources
    .iter()
    .enumerate()
    .filter(|(_, r)| matches(r, criteria, needle.as_deref()))
    .map(|(i, _)| i)
    .collect();

  sort_indices(resources, &mut selected, criteria.sort);
  selected
}

/// Whether `resource` passes every active dimension of `criteria`.
///
/// `needle` is the lower-cased search text, see
/// [`FilterCriteria::search_needle`].
pub fn matches(resource: &Resource, criteria: &FilterCriteria, needle: Option<&str>) -> bool {
  if !criteria.category.admits(resource.category) {
    return false;
  }

  if let Some(needle) = needle
    && !matches_text(resource, needle)
  {
    return false;
  }

  if !criteria.service_types.is_empty() {
    let Some(cost) = resource.cost.as_deref() else {
      return false;
    };
    if !criteria.service_types.iter().any(|t| t.matches(cost)) {
      return false;
    }
  }

  if !criteria.availability.is_empty() {
    let Some(hours) = resource.hours.as_deref() else {
      return false;
    };
    if !criteria.availability.iter().any(|a| a.matches(hours)) {
      return false;
    }
  }

  if !criteria.accessibility.is_empty()
    && criteria
      .accessibility
      .is_disjoint(&resource.accessibility_features)
  {
    return false;
  }

  if !criteria.languages.is_empty() && criteria.languages.is_disjoint(&resource.languages) {
    return false;
  }

  true
}

/// Case-insensitive containment against name, description, and each tag.
fn matches_text(resource: &Resource, needle: &str) -> bool {
  resource.name.to_lowercase().contains(needle)
    || resource.description.to_lowercase().contains(needle)
    || resource
      .tags
      .iter()
      .any(|tag| tag.to_lowercase().contains(needle))
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

fn sort_indices(resources: &[Resource], indices: &mut [usize], key: SortKey) {
  // `sort_by` is stable, so equal keys keep their incoming order.
  match key {
    SortKey::Relevance | SortKey::Distance => {}
    SortKey::Name => {
      indices.sort_by(|&a, &b| collate(&resources[a].name, &resources[b].name));
    }
    SortKey::Rating => {
      indices.sort_by(|&a, &b| {
        resources[b]
          .rating_or_zero()
          .total_cmp(&resources[a].rating_or_zero())
      });
    }
    SortKey::Recent => {
      indices.sort_by(|&a, &b| {
        let (a, b) = (&resources[a], &resources[b]);
        b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id))
      });
    }
  }
}

/// Locale-style string ordering: compare case-folded text first and fall back
/// to the raw text so the order is total.
pub fn collate(a: &str, b: &str) -> Ordering {
  let folded = a
    .chars()
    .flat_map(char::to_lowercase)
    .cmp(b.chars().flat_map(char::to_lowercase));
  folded.then_with(|| a.cmp(b))
}

// ─── Facets ──────────────────────────────────────────────────────────────────

/// Number of resources per category, for the category bar.
pub fn count_by_category(resources: &[Resource]) -> BTreeMap<Category, usize> {
  let mut counts = BTreeMap::new();
  for resource in resources {
    *counts.entry(resource.category).or_insert(0) += 1;
  }
  counts
}

/// Featured resources, best rated first, at most `limit` of them.
pub fn featured(resources: &[Resource], limit: usize) -> Vec<&Resource> {
  let mut picked: Vec<&Resource> = resources.iter().filter(|r| r.is_featured).collect();
  picked.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()));
  picked.truncate(limit);
  picked
}
