//! Async HTTP client for the hosted backend's REST and auth services.

use std::time::Duration;

use chrono::Utc;
use hub_core::{
  event::Event,
  profile::{NewProfile, Profile, ProfileUpdate},
  resource::{NewResource, Resource},
  session::{Session, UserIdentity},
  store::ResourceStore,
};
use reqwest::{Client, Method, RequestBuilder, Response, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{Error, Result, error_message};

/// Connection settings for the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
  pub base_url: String,
  /// Public key sent with every request; also the bearer token while
  /// signed out.
  pub anon_key: String,
}

/// A signed-in session as returned by the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
  pub access_token:  String,
  #[serde(default)]
  pub refresh_token: Option<String>,
  #[serde(default)]
  pub expires_in:    Option<u64>,
  pub user:          UserIdentity,
}

/// Sign-up answers with a session when no email confirmation is required,
/// otherwise with the bare user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
  Session(AuthSession),
  User(UserIdentity),
}

#[derive(Serialize)]
struct Credentials<'a> {
  email:    &'a str,
  password: &'a str,
}

/// Backend client. Holds the current auth session, if any, and implements
/// both [`ResourceStore`] and [`Session`].
#[derive(Clone)]
pub struct HubClient {
  client:  Client,
  config:  ClientConfig,
  session: Option<AuthSession>,
}

impl HubClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self {
      client,
      config,
      session: None,
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn bearer(&self) -> &str {
    self
      .session
      .as_ref()
      .map_or(&self.config.anon_key, |s| &s.access_token)
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    self
      .client
      .request(method, self.url(path))
      .header("apikey", &self.config.anon_key)
      .bearer_auth(self.bearer())
  }

  /// Send `req`, turning a non-success status into [`Error::Status`].
  async fn send(&self, operation: &'static str, req: RequestBuilder) -> Result<Response> {
    debug!(operation, "sending request");
    let resp = req.send().await.inspect_err(|err| {
      warn!(operation, error = %err, "request failed");
    })?;

    let status = resp.status();
    if status.is_success() {
      debug!(operation, %status, "request succeeded");
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = error_message(&body);
    warn!(operation, %status, %message, "request rejected");
    Err(Error::Status {
      operation,
      status,
      message,
    })
  }

  async fn fetch<T: DeserializeOwned>(
    &self,
    operation: &'static str,
    what: &'static str,
    req: RequestBuilder,
  ) -> Result<T> {
    let body = self.send(operation, req).await?.text().await?;
    decode(what, &body)
  }

  fn user_id(&self) -> Result<uuid::Uuid> {
    self
      .session
      .as_ref()
      .map(|s| s.user.id)
      .ok_or(Error::NotSignedIn)
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  pub fn auth_session(&self) -> Option<&AuthSession> { self.session.as_ref() }

  /// `POST /auth/v1/token?grant_type=password`
  pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<&UserIdentity> {
    let req = self
      .request(Method::POST, "auth/v1/token")
      .query(&[("grant_type", "password")])
      .json(&Credentials { email, password });
    let session: AuthSession = self
      .fetch("POST /auth/v1/token", "auth session", req)
      .await?;
    debug!(user = %session.user.id, "signed in");
    Ok(&self.session.insert(session).user)
  }

  /// `POST /auth/v1/signup`, then create the account's profile row. The
  /// account may need email confirmation before it can sign in; if the
  /// backend returns a session instead, it becomes the current one.
  ///
  /// A failed profile insert is logged and does not fail the sign-up.
  pub async fn sign_up(
    &mut self,
    email: &str,
    password: &str,
    full_name: Option<&str>,
  ) -> Result<UserIdentity> {
    let req = self.request(Method::POST, "auth/v1/signup").json(&json!({
      "email": email,
      "password": password,
      "data": { "full_name": full_name },
    }));
    let response: SignUpResponse = self
      .fetch("POST /auth/v1/signup", "sign-up response", req)
      .await?;
    let user = match response {
      SignUpResponse::Session(session) => {
        debug!(user = %session.user.id, "signed in on sign-up");
        self.session.insert(session).user.clone()
      }
      SignUpResponse::User(user) => user,
    };

    let row = NewProfile::for_new_user(
      user.id,
      user.email.as_deref().unwrap_or(email),
      full_name.map(str::to_owned),
    );
    if let Err(err) = self.create_profile(&row).await {
      warn!(user = %user.id, error = %err, "failed to create profile for new account");
    }
    Ok(user)
  }

  /// `POST /auth/v1/recover`: email a password reset link.
  pub async fn reset_password(&self, email: &str) -> Result<()> {
    let req = self
      .request(Method::POST, "auth/v1/recover")
      .json(&json!({ "email": email }));
    self.send("POST /auth/v1/recover", req).await?;
    Ok(())
  }

  /// `POST /auth/v1/logout`. The local session is dropped even if the
  /// backend call fails.
  pub async fn sign_out(&mut self) -> Result<()> {
    if self.session.is_none() {
      return Ok(());
    }
    let req = self.request(Method::POST, "auth/v1/logout");
    self.session = None;
    self.send("POST /auth/v1/logout", req).await?;
    Ok(())
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  fn insert_profile(&self, profile: &NewProfile) -> RequestBuilder {
    self
      .request(Method::POST, "rest/v1/profiles")
      .header("Prefer", "return=minimal")
      .json(profile)
  }

  /// `POST /rest/v1/profiles`
  pub async fn create_profile(&self, profile: &NewProfile) -> Result<()> {
    let req = self.insert_profile(profile);
    self.send("POST /rest/v1/profiles", req).await?;
    debug!(user = %profile.id, "profile created");
    Ok(())
  }

  /// `GET /rest/v1/profiles?id=eq.<id>` for the signed-in user.
  pub async fn fetch_profile(&self) -> Result<Profile> {
    let id = self.user_id()?;
    let req = self
      .request(Method::GET, "rest/v1/profiles")
      .query(&[("select", "*".to_string()), ("id", format!("eq.{id}"))])
      .header(header::ACCEPT, "application/vnd.pgrst.object+json");
    self.fetch("GET /rest/v1/profiles", "profile", req).await
  }

  /// `PATCH /rest/v1/profiles?id=eq.<id>` for the signed-in user, stamped
  /// with the current time.
  pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
    let id = self.user_id()?;
    if update.is_empty() {
      debug!("empty profile update; nothing to send");
      return Ok(());
    }
    let req = self
      .request(Method::PATCH, "rest/v1/profiles")
      .query(&[("id", format!("eq.{id}"))])
      .header("Prefer", "return=minimal")
      .json(&update.stamped(Utc::now()));
    self.send("PATCH /rest/v1/profiles", req).await?;
    Ok(())
  }
}

impl Session for HubClient {
  fn current_user(&self) -> Option<&UserIdentity> { self.session.as_ref().map(|s| &s.user) }
}

impl ResourceStore for HubClient {
  type Error = Error;

  /// `GET /rest/v1/resources?is_approved=eq.true&order=created_at.desc`
  async fn fetch_approved_resources(&self) -> Result<Vec<Resource>> {
    let req = self.request(Method::GET, "rest/v1/resources").query(&[
      ("select", "*"),
      ("is_approved", "eq.true"),
      ("order", "created_at.desc"),
    ]);
    self.fetch("GET /rest/v1/resources", "resources", req).await
  }

  /// `POST /rest/v1/resources`
  async fn create_resource(&self, resource: NewResource) -> Result<()> {
    let req = self
      .request(Method::POST, "rest/v1/resources")
      .header("Prefer", "return=minimal")
      .json(&resource);
    self.send("POST /rest/v1/resources", req).await?;
    Ok(())
  }

  /// `GET /rest/v1/events?is_approved=eq.true&order=start_date.asc`
  async fn fetch_approved_events(&self) -> Result<Vec<Event>> {
    let req = self.request(Method::GET, "rest/v1/events").query(&[
      ("select", "*"),
      ("is_approved", "eq.true"),
      ("order", "start_date.asc"),
    ]);
    self.fetch("GET /rest/v1/events", "events", req).await
  }
}

fn decode<T: DeserializeOwned>(what: &'static str, body: &str) -> Result<T> {
  serde_json::from_str(body).map_err(|source| Error::Decode { what, source })
}

#[cfg(test)]
mod tests {
  use hub_core::{store::StoreFailure, vocabulary::Category};

  use super::*;

  fn client(base_url: &str) -> HubClient {
    HubClient::new(ClientConfig {
      base_url: base_url.into(),
      anon_key: "anon".into(),
    })
    .unwrap()
  }

  #[test]
  fn url_joins_without_double_slash() {
    assert_eq!(
      client("https://hub.example.org/").url("rest/v1/resources"),
      "https://hub.example.org/rest/v1/resources"
    );
  }

  #[test]
  fn anon_key_is_the_bearer_until_signed_in() {
    let mut c = client("https://hub.example.org");
    assert_eq!(c.bearer(), "anon");
    assert!(!c.is_authenticated());

    c.session = Some(decode("auth session", SESSION).unwrap());
    assert_eq!(c.bearer(), "jwt-token");
    assert!(c.is_authenticated());
  }

  const SESSION: &str = r#"{
    "access_token": "jwt-token",
    "token_type": "bearer",
    "expires_in": 3600,
    "refresh_token": "refresh",
    "user": {
      "id": "8c2f3a4e-6b1d-4e8f-9a7c-2d5e6f708192",
      "email": "volunteer@example.org",
      "role": "authenticated"
    }
  }"#;

  #[test]
  fn decodes_resource_rows_with_nulls() {
    let body = r#"[{
      "id": "3f9a",
      "name": "Community Food Pantry",
      "category": "Food Assistance",
      "description": "Free groceries",
      "address": null,
      "phone": "(555) 123-4567",
      "tags": null,
      "accessibility_features": ["Wheelchair Accessible", "Teleporter"],
      "languages": null,
      "rating": 4.5,
      "review_count": null,
      "is_approved": true,
      "is_featured": false,
      "submitted_by": null,
      "created_at": "2024-01-15T10:00:00+00:00",
      "updated_at": null
    }]"#;
    let rows: Vec<Resource> = decode("resources", body).unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.category, Category::FoodAssistance);
    assert!(row.tags.is_empty());
    assert_eq!(row.accessibility_features.len(), 1);
    assert_eq!(row.review_count, 0);
  }

  #[test]
  fn malformed_body_is_a_decode_error() {
    let err = decode::<Vec<Resource>>("resources", "<html>").unwrap_err();
    assert!(matches!(err, Error::Decode { what: "resources", .. }));
    assert_eq!(
      err.failure_kind(),
      hub_core::store::FailureKind::Unavailable
    );
  }

  #[tokio::test]
  async fn profile_calls_need_a_session() {
    let c = client("https://hub.example.org");
    assert!(matches!(c.fetch_profile().await, Err(Error::NotSignedIn)));
    let update = ProfileUpdate {
      bio: Some("hi".into()),
      ..ProfileUpdate::default()
    };
    assert!(matches!(
      c.update_profile(&update).await,
      Err(Error::NotSignedIn)
    ));
  }

  #[test]
  fn profile_insert_sends_the_new_row() {
    let c = client("https://hub.example.org");
    let id = uuid::Uuid::from_u128(9);
    let row = NewProfile::for_new_user(id, "jane@example.org", None);
    let req = c.insert_profile(&row).build().unwrap();

    assert_eq!(req.url().as_str(), "https://hub.example.org/rest/v1/profiles");
    assert_eq!(req.headers()["Prefer"], "return=minimal");
    let body: serde_json::Value =
      serde_json::from_slice(req.body().and_then(|b| b.as_bytes()).unwrap()).unwrap();
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["role"], "user");
    assert_eq!(body["is_verified"], false);
    assert!(body["full_name"].is_null());
  }

  #[test]
  fn sign_up_answer_with_a_session() {
    match decode::<SignUpResponse>("sign-up response", SESSION).unwrap() {
      SignUpResponse::Session(session) => {
        assert_eq!(session.access_token, "jwt-token");
        assert_eq!(session.user.email.as_deref(), Some("volunteer@example.org"));
      }
      other => panic!("expected a session, got {other:?}"),
    }
  }

  #[test]
  fn sign_up_answer_awaiting_confirmation() {
    let body = r#"{
      "id": "8c2f3a4e-6b1d-4e8f-9a7c-2d5e6f708192",
      "email": "volunteer@example.org",
      "confirmation_sent_at": "2024-01-15T10:00:00Z"
    }"#;
    match decode::<SignUpResponse>("sign-up response", body).unwrap() {
      SignUpResponse::User(user) => {
        assert_eq!(user.id.to_string(), "8c2f3a4e-6b1d-4e8f-9a7c-2d5e6f708192");
      }
      other => panic!("expected a bare user, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn sign_out_without_session_is_a_no_op() {
    let mut c = client("https://hub.example.org");
    c.sign_out().await.unwrap();
    assert!(c.auth_session().is_none());
  }
}
