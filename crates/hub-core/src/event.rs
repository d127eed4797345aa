//! Community events and programs shown in the news feed.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::vocabulary::null_as_default;

/// What sort of happening an event is.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventKind {
  Event,
  Program,
  Workshop,
  Volunteer,
  Meeting,
}

/// An approved event row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  pub id:          String,
  pub title:       String,
  pub description: String,
  pub start_date:  NaiveDate,
  pub end_date:    NaiveDate,
  #[serde(default)]
  pub start_time:  Option<NaiveTime>,
  #[serde(default)]
  pub end_time:    Option<NaiveTime>,
  pub location:    String,
  #[serde(default)]
  pub address:     Option<String>,
  pub category:    String,
  #[serde(rename = "type")]
  pub kind:        EventKind,

  #[serde(default)]
  pub is_recurring:          bool,
  #[serde(default)]
  pub recurrence_pattern:    Option<String>,
  #[serde(default)]
  pub max_participants:      Option<u32>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub current_participants:  u32,
  #[serde(default)]
  pub registration_required: bool,
  #[serde(default)]
  pub registration_deadline: Option<NaiveDate>,

  #[serde(default)]
  pub cost:          Option<String>,
  #[serde(default)]
  pub contact_email: Option<String>,
  #[serde(default)]
  pub contact_phone: Option<String>,
  #[serde(default)]
  pub website:       Option<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub tags:          Vec<String>,
  #[serde(default)]
  pub is_approved:   bool,
}

impl Event {
  /// Whether the event has not finished before `today`.
  pub fn is_current(&self, today: NaiveDate) -> bool { self.end_date >= today }

  /// Remaining places, if the event is capped.
  pub fn spots_left(&self) -> Option<u32> {
    self
      .max_participants
      .map(|max| max.saturating_sub(self.current_participants))
  }

  /// Whether registration is still possible on `today`.
  pub fn registration_open(&self, today: NaiveDate) -> bool {
    self.registration_required
      && self.registration_deadline.is_none_or(|deadline| today <= deadline)
      && self.spots_left() != Some(0)
  }
}

/// Events not yet over on `today`, soonest first, optionally of one kind.
pub fn upcoming<'a>(
  events: &'a [Event],
  today: NaiveDate,
  kind: Option<EventKind>,
) -> Vec<&'a Event> {
  let mut current: Vec<&Event> = events
    .iter()
    .filter(|e| e.is_current(today))
    .filter(|e| kind.is_none_or(|k| e.kind == k))
    .collect();
  current.sort_by(|a, b| {
    a.start_date
      .cmp(&b.start_date)
      .then_with(|| a.start_time.cmp(&b.start_time))
      .then_with(|| a.id.cmp(&b.id))
  });
  current
}
