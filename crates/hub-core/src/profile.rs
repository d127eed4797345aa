//! User profiles stored alongside auth accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Site role, assigned by administrators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  #[default]
  User,
  Moderator,
  Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
  pub id:          Uuid,
  pub email:       String,
  pub full_name:   Option<String>,
  pub avatar_url:  Option<String>,
  #[serde(default)]
  pub role:        Role,
  pub phone:       Option<String>,
  pub address:     Option<String>,
  pub bio:         Option<String>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
  pub last_login:  Option<DateTime<Utc>>,
  #[serde(default)]
  pub is_verified: bool,
}

impl Profile {
  /// Moderators and admins may both approve submissions.
  pub fn is_moderator(&self) -> bool { matches!(self.role, Role::Moderator | Role::Admin) }

  /// The name to greet the user with: full name when set, else email.
  pub fn display_name(&self) -> &str {
    self
      .full_name
      .as_deref()
      .filter(|n| !n.trim().is_empty())
      .unwrap_or(&self.email)
  }

  /// Up to two upper-case initials of [`Profile::display_name`].
  pub fn initials(&self) -> String {
    self
      .display_name()
      .split_whitespace()
      .filter_map(|word| word.chars().next())
      .flat_map(char::to_uppercase)
      .take(2)
      .collect()
  }
}

/// The row created for a new account right after sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfile {
  pub id:          Uuid,
  pub email:       String,
  pub full_name:   Option<String>,
  pub role:        Role,
  pub is_verified: bool,
}

impl NewProfile {
  /// An unverified [`Role::User`] profile.
  pub fn for_new_user(id: Uuid, email: impl Into<String>, full_name: Option<String>) -> Self {
    Self {
      id,
      email: email.into(),
      full_name: full_name.filter(|n| !n.trim().is_empty()),
      role: Role::User,
      is_verified: false,
    }
  }
}

/// Editable profile fields; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub full_name:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bio:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileUpdate {
  /// Whether no editable field is set. The timestamp does not count.
  pub fn is_empty(&self) -> bool {
    self.full_name.is_none() && self.phone.is_none() && self.address.is_none() && self.bio.is_none()
  }

  /// This update with `updated_at` set to `at`.
  pub fn stamped(&self, at: DateTime<Utc>) -> Self {
    Self {
      updated_at: Some(at),
      ..self.clone()
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn profile(full_name: Option<&str>, role: Role) -> Profile {
    let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    Profile {
      id: Uuid::nil(),
      email: "jane@example.org".into(),
      full_name: full_name.map(Into::into),
      avatar_url: None,
      role,
      phone: None,
      address: None,
      bio: None,
      created_at: at,
      updated_at: at,
      last_login: None,
      is_verified: false,
    }
  }

  #[test]
  fn initials_use_first_two_words() {
    assert_eq!(profile(Some("jane q. public"), Role::User).initials(), "JQ");
    assert_eq!(profile(Some("Prince"), Role::User).initials(), "P");
    assert_eq!(profile(None, Role::User).initials(), "J");
    assert_eq!(profile(Some("  "), Role::User).display_name(), "jane@example.org");
  }

  #[test]
  fn admins_are_moderators() {
    assert!(profile(None, Role::Admin).is_moderator());
    assert!(profile(None, Role::Moderator).is_moderator());
    assert!(!profile(None, Role::User).is_moderator());
  }

  #[test]
  fn empty_update_serialises_to_nothing() {
    let update = ProfileUpdate::default();
    assert!(update.is_empty());
    assert_eq!(serde_json::to_string(&update).unwrap(), "{}");
  }

  #[test]
  fn stamped_update_carries_the_timestamp() {
    let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let update = ProfileUpdate {
      bio: Some("Volunteer".into()),
      ..ProfileUpdate::default()
    }
    .stamped(at);
    assert!(!update.is_empty());
    assert!(ProfileUpdate::default().stamped(at).is_empty());
    assert_eq!(
      serde_json::to_value(&update).unwrap(),
      serde_json::json!({ "bio": "Volunteer", "updated_at": "2023-11-14T22:13:20Z" })
    );
  }

  #[test]
  fn new_user_profile_is_an_unverified_user() {
    let id = Uuid::from_u128(9);
    let row = NewProfile::for_new_user(id, "jane@example.org", Some("Jane Doe".into()));
    assert_eq!(
      serde_json::to_value(&row).unwrap(),
      serde_json::json!({
        "id": id,
        "email": "jane@example.org",
        "full_name": "Jane Doe",
        "role": "user",
        "is_verified": false,
      })
    );
    assert_eq!(NewProfile::for_new_user(id, "a@b.org", Some(" ".into())).full_name, None);
  }
}
