//! Layered configuration: TOML file, then `HUB_*` environment variables, then
//! command-line flags.

use std::path::Path;

use anyhow::{Context as _, Result};
use clap::Args;
use hub_client::ClientConfig;
use serde::Deserialize;

/// Connection flags shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
  /// Base URL of the hosted backend.
  #[arg(long, global = true, env = "HUB_URL")]
  pub url: Option<String>,

  /// Public API key of the backend.
  #[arg(long, global = true, env = "HUB_ANON_KEY", hide_env_values = true)]
  pub anon_key: Option<String>,

  /// Account email used for commands that need a signed-in user.
  #[arg(long, global = true, env = "HUB_EMAIL")]
  pub email: Option<String>,

  /// Account password.
  #[arg(long, global = true, env = "HUB_PASSWORD", hide_env_values = true)]
  pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HubConfig {
  pub url:      String,
  pub anon_key: String,
  #[serde(default)]
  pub email:    Option<String>,
  #[serde(default)]
  pub password: Option<String>,
}

impl HubConfig {
  pub fn load(path: &Path, flags: &ConnectionArgs) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("HUB"))
      .set_override_option("url", flags.url.clone())?
      .set_override_option("anon_key", flags.anon_key.clone())?
      .set_override_option("email", flags.email.clone())?
      .set_override_option("password", flags.password.clone())?
      .build()
      .with_context(|| format!("failed to read configuration from {}", path.display()))?;

    settings
      .try_deserialize()
      .context("backend `url` and `anon_key` must be configured")
  }

  pub fn client(&self) -> ClientConfig {
    ClientConfig {
      base_url: self.url.clone(),
      anon_key: self.anon_key.clone(),
    }
  }

  /// The configured email and password, or an error naming what is missing.
  pub fn credentials(&self) -> Result<(&str, &str)> {
    let email = self
      .email
      .as_deref()
      .context("no account email configured (set `email` or HUB_EMAIL)")?;
    let password = self
      .password
      .as_deref()
      .context("no account password configured (set `password` or HUB_PASSWORD)")?;
    Ok((email, password))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_override_missing_file() {
    let flags = ConnectionArgs {
      url:      Some("https://hub.example.org".into()),
      anon_key: Some("anon".into()),
      ..ConnectionArgs::default()
    };
    let cfg = HubConfig::load(Path::new("does-not-exist.toml"), &flags).unwrap();
    assert_eq!(cfg.url, "https://hub.example.org");
    assert_eq!(cfg.client().anon_key, "anon");
    assert!(cfg.credentials().is_err());
  }

  #[test]
  fn credentials_need_both_parts() {
    let cfg = HubConfig {
      url:      "https://hub.example.org".into(),
      anon_key: "anon".into(),
      email:    Some("volunteer@example.org".into()),
      password: Some("hunter2".into()),
    };
    assert_eq!(cfg.credentials().unwrap(), ("volunteer@example.org", "hunter2"));
  }
}
