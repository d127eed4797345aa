//! Resources: community service listings in the directory.
//!
//! Resources are created by user submissions in an unapproved state and only
//! become visible once a moderator approves them. From this crate's point of
//! view they are read-only.

use std::{collections::BTreeSet, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::vocabulary::{
  AccessibilityFeature, Category, Language, lenient_set, null_as_default,
};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque resource identifier assigned by the backend.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ResourceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for ResourceId {
  fn from(value: &str) -> Self { Self(value.to_owned()) }
}

// ─── Resource ────────────────────────────────────────────────────────────────

/// An approved directory entry as returned by the backend.
///
/// Optional text fields are `None` when the backend stores `NULL`; list fields
/// are empty in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
  pub id:          ResourceId,
  pub name:        String,
  pub category:    Category,
  pub description: String,

  // ── Contact ─────────────────────────────────────────────────────────────
  #[serde(default)]
  pub address:        Option<String>,
  #[serde(default)]
  pub phone:          Option<String>,
  #[serde(default)]
  pub email:          Option<String>,
  #[serde(default)]
  pub website:        Option<String>,
  /// Hours of operation, e.g. "Mon-Fri 9AM-5PM".
  #[serde(default)]
  pub hours:          Option<String>,
  #[serde(default)]
  pub contact_person: Option<String>,

  // ── Discovery ───────────────────────────────────────────────────────────
  #[serde(default, deserialize_with = "null_as_default")]
  pub tags:                     Vec<String>,
  /// Free-text cost, e.g. "Free", "$10", "Sliding scale".
  #[serde(default)]
  pub cost:                     Option<String>,
  #[serde(default, deserialize_with = "lenient_set")]
  pub accessibility_features:   BTreeSet<AccessibilityFeature>,
  #[serde(default, deserialize_with = "lenient_set")]
  pub languages:                BTreeSet<Language>,
  #[serde(default)]
  pub eligibility_requirements: Option<String>,
  #[serde(default)]
  pub emergency_contact:        Option<String>,
  #[serde(default)]
  pub additional_info:          Option<String>,
  #[serde(default)]
  pub image_url:                Option<String>,

  // ── Reputation ──────────────────────────────────────────────────────────
  /// Average review rating between 0 and 5; `None` until first reviewed.
  #[serde(default)]
  pub rating:       Option<f64>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub review_count: u32,

  // ── Moderation ──────────────────────────────────────────────────────────
  #[serde(default)]
  pub is_approved:  bool,
  #[serde(default)]
  pub is_featured:  bool,
  #[serde(default)]
  pub submitted_by: Option<Uuid>,

  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub updated_at: Option<DateTime<Utc>>,
}

impl Resource {
  /// The rating used for ordering; unrated resources count as zero.
  pub fn rating_or_zero(&self) -> f64 { self.rating.unwrap_or(0.0) }

  /// Contact channels that are present, labelled for display.
  pub fn contact_methods(&self) -> Vec<(&'static str, &str)> {
    [
      ("address", &self.address),
      ("phone", &self.phone),
      ("email", &self.email),
      ("website", &self.website),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
      value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(|v| (label, v))
    })
    .collect()
  }
}

// ─── NewResource ─────────────────────────────────────────────────────────────

/// Insert payload for [`crate::store::ResourceStore::create_resource`].
///
/// Built from a completed [`crate::form::SubmissionDraft`]; blank optional
/// fields are omitted. `is_approved` is always `false` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewResource {
  pub name:        String,
  pub category:    Category,
  pub description: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub address:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub website:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hours:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contact_person: Option<String>,

  pub tags:                     Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cost:                     Option<String>,
  pub accessibility_features:   BTreeSet<AccessibilityFeature>,
  pub languages:                BTreeSet<Language>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub eligibility_requirements: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub emergency_contact:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub additional_info:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image_url:                Option<String>,

  pub submitted_by: Uuid,
  is_approved:      bool,
}

impl NewResource {
  /// Start a payload with the required fields; everything else is empty.
  pub fn new(
    name: impl Into<String>,
    category: Category,
    description: impl Into<String>,
    submitted_by: Uuid,
  ) -> Self {
    Self {
      name: name.into(),
      category,
      description: description.into(),
      address: None,
      phone: None,
      email: None,
      website: None,
      hours: None,
      contact_person: None,
      tags: Vec::new(),
      cost: None,
      accessibility_features: BTreeSet::new(),
      languages: BTreeSet::new(),
      eligibility_requirements: None,
      emergency_contact: None,
      additional_info: None,
      image_url: None,
      submitted_by,
      is_approved: false,
    }
  }

  pub fn is_approved(&self) -> bool { self.is_approved }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn decodes_backend_row_with_nulls() {
    let row = json!({
      "id": "7d1c",
      "name": "Community Food Pantry",
      "category": "Food Assistance",
      "description": "Free groceries",
      "address": null,
      "phone": "(555) 123-4567",
      "tags": null,
      "accessibility_features": ["Wheelchair Accessible", "Jetpack Landing"],
      "languages": null,
      "rating": null,
      "review_count": 0,
      "is_approved": true,
      "is_featured": false,
      "created_at": "2024-03-01T12:00:00.000000+00:00",
      "updated_at": "2024-03-01T12:00:00+00:00",
      "coordinates": null
    });

    let resource: Resource = serde_json::from_value(row).unwrap();
    assert_eq!(resource.id.as_str(), "7d1c");
    assert_eq!(resource.category, Category::FoodAssistance);
    assert!(resource.address.is_none());
    assert!(resource.tags.is_empty());
    assert!(resource.languages.is_empty());
    assert_eq!(resource.accessibility_features.len(), 1);
    assert_eq!(resource.rating_or_zero(), 0.0);
    assert_eq!(resource.contact_methods(), vec![("phone", "(555) 123-4567")]);
  }

  #[test]
  fn new_resource_is_never_approved_on_the_wire() {
    let payload = NewResource::new("Pantry", Category::FoodAssistance, "Food", Uuid::nil());
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["is_approved"], json!(false));
    assert_eq!(value["category"], json!("Food Assistance"));
    assert!(value.get("address").is_none());
    assert!(!payload.is_approved());
  }
}
