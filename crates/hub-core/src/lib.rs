//! Core types and client-side logic for the community resource hub.
//!
//! This crate is deliberately free of HTTP dependencies. The hosted backend is
//! reached through the [`store::ResourceStore`] trait; the signed-in user is
//! passed in explicitly through [`session::Session`].

pub mod compare;
pub mod criteria;
pub mod directory;
pub mod error;
pub mod event;
pub mod filter;
pub mod form;
pub mod profile;
pub mod resource;
pub mod session;
pub mod store;
pub mod vocabulary;

pub use error::{Error, Result};
