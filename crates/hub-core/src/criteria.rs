//! Filter criteria: the search, filter and sort selections applied to the
//! resource collection.
//!
//! Criteria are plain values. Front ends rebuild or edit them on every
//! interaction and hand them to [`crate::filter::derive_view`] (usually via
//! [`crate::directory::Directory::set_criteria`]).

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
  Error,
  vocabulary::{AccessibilityFeature, Availability, Category, Language, ServiceType},
};

// ─── Category selection ──────────────────────────────────────────────────────

/// The category bar selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
  /// "All Categories": the category dimension is inactive.
  #[default]
  All,
  Only(Category),
}

impl CategoryFilter {
  pub const ALL_LABEL: &'static str = "All Categories";

  pub fn admits(self, category: Category) -> bool {
    match self {
      Self::All => true,
      Self::Only(selected) => selected == category,
    }
  }
}

impl fmt::Display for CategoryFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::All => f.write_str(Self::ALL_LABEL),
      Self::Only(category) => fmt::Display::fmt(category, f),
    }
  }
}

impl FromStr for CategoryFilter {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case(Self::ALL_LABEL) {
      return Ok(Self::All);
    }
    s.parse().map(Self::Only).map_err(|_| Error::UnknownLabel {
      vocabulary: "category",
      label:      s.to_owned(),
    })
  }
}

impl From<Category> for CategoryFilter {
  fn from(value: Category) -> Self { Self::Only(value) }
}

// ─── Sort key ────────────────────────────────────────────────────────────────

/// Result ordering, applied after filtering.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
  /// Keep the collection's incoming order (newest first from the backend).
  #[default]
  Relevance,
  /// Name ascending.
  Name,
  /// Rating descending; unrated counts as zero.
  Rating,
  /// Creation time descending.
  #[strum(to_string = "recent", serialize = "recency")]
  Recent,
  /// Distance from the visitor. There is no coordinate computation behind it
  /// yet, so it leaves the order untouched.
  Distance,
}

impl SortKey {
  pub fn is_supported(self) -> bool { !matches!(self, Self::Distance) }

  /// Parse a sort key, naming the bad input on failure.
  pub fn parse(s: &str) -> Result<Self, Error> {
    s.trim()
      .parse()
      .map_err(|_| Error::UnknownSortKey(s.to_owned()))
  }
}

// ─── Criteria ────────────────────────────────────────────────────────────────

/// Every search, filter, and sort selection in one value.
///
/// The default value has no active filter and relevance ordering, so it
/// passes the collection through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
  /// Free-text search over name, description and tags.
  pub search:        String,
  pub category:      CategoryFilter,
  /// Matches if the cost text implies any of these.
  pub service_types: BTreeSet<ServiceType>,
  /// Matches if the hours text implies any of these.
  pub availability:  BTreeSet<Availability>,
  /// Matches if the resource offers any of these.
  pub accessibility: BTreeSet<AccessibilityFeature>,
  /// Matches if the resource supports any of these.
  pub languages:     BTreeSet<Language>,
  pub sort:          SortKey,
}

impl FilterCriteria {
  /// The trimmed, lower-cased search needle, or `None` when search is inactive.
  pub fn search_needle(&self) -> Option<String> {
    let needle = self.search.trim();
    (!needle.is_empty()).then(|| needle.to_lowercase())
  }

  /// Whether any filtering dimension is active (sorting is not filtering).
  pub fn has_filters(&self) -> bool {
    self.search_needle().is_some()
      || self.category != CategoryFilter::All
      || !self.service_types.is_empty()
      || !self.availability.is_empty()
      || !self.accessibility.is_empty()
      || !self.languages.is_empty()
  }

  /// Reset every filter, keeping the sort key.
  pub fn clear_filters(&mut self) {
    *self = Self {
      sort: self.sort,
      ..Self::default()
    };
  }
}
