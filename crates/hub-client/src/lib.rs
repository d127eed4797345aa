//! HTTP client for the community resource hub's hosted backend.
//!
//! [`HubClient`] speaks the backend's REST (`/rest/v1`) and auth (`/auth/v1`)
//! APIs and implements [`hub_core::store::ResourceStore`] and
//! [`hub_core::session::Session`], so it can be handed straight to the
//! directory and the submission form.

pub mod client;
pub mod error;

pub use client::{AuthSession, ClientConfig, HubClient};
pub use error::{Error, Result};
