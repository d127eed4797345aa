//! The signed-in user, passed explicitly to whatever needs it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated account as reported by the backend's auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
  pub id:    Uuid,
  #[serde(default)]
  pub email: Option<String>,
}

/// Capability for asking who, if anyone, is signed in.
pub trait Session {
  fn current_user(&self) -> Option<&UserIdentity>;

  fn is_authenticated(&self) -> bool { self.current_user().is_some() }
}

/// A plain session value for callers that track the user themselves.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
  pub user: Option<UserIdentity>,
}

impl AuthContext {
  pub fn anonymous() -> Self { Self::default() }

  pub fn signed_in(user: UserIdentity) -> Self { Self { user: Some(user) } }
}

impl Session for AuthContext {
  fn current_user(&self) -> Option<&UserIdentity> { self.user.as_ref() }
}
