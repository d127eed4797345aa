//! `hub` — command-line front end for the community resource hub.
//!
//! # Usage
//!
//! ```
//! hub resources --search food --language spanish --sort rating
//! hub resources --compare 12 --compare 31
//! hub submit draft.toml --email me@example.org --password secret
//! hub --config ~/.config/hub/hub.toml events --kind workshop
//! ```

mod filters;
mod render;
mod settings;
mod submit;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use filters::ResourceArgs;
use hub_client::HubClient;
use hub_core::{
  compare::ToggleOutcome,
  directory::{Directory, FetchOutcome, refresh},
  event::{self, EventKind},
  filter,
  profile::ProfileUpdate,
  store::ResourceStore,
};
use settings::{ConnectionArgs, HubConfig};
use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hub", version, about = "Browse and contribute to the community resource hub")]
struct Cli {
  /// Path to a TOML config file (url, anon_key, email, password).
  #[arg(long, global = true, value_name = "FILE", default_value = "hub.toml")]
  config: PathBuf,

  /// Log at debug level.
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(flatten)]
  connection: ConnectionArgs,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List approved resources matching the given filters.
  Resources(ResourceArgs),

  /// Count approved resources per category.
  Categories,

  /// Show the highest-rated featured resources.
  Featured {
    #[arg(long, default_value_t = 3)]
    limit: usize,
  },

  /// List events that have not finished yet, soonest first.
  Events {
    /// event, program, workshop, volunteer or meeting.
    #[arg(long)]
    kind: Option<EventKind>,
  },

  /// Submit a new resource for review from a TOML draft file.
  Submit { draft: PathBuf },

  /// Show the signed-in user's profile.
  Profile {
    #[command(subcommand)]
    action: Option<ProfileAction>,
  },

  /// Create an account with the configured email and password.
  Signup {
    #[arg(long)]
    full_name: Option<String>,
  },

  /// Email a password reset link.
  ResetPassword {
    /// Defaults to the configured account email.
    email: Option<String>,
  },
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
  /// Change profile fields; omitted fields are left as they are.
  Update {
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    phone:     Option<String>,
    #[arg(long)]
    address:   Option<String>,
    #[arg(long)]
    bio:       Option<String>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let config = HubConfig::load(&cli.config, &cli.connection)?;
  let mut client = HubClient::new(config.client()).context("failed to build HTTP client")?;

  match cli.command {
    Command::Resources(args) => list_resources(&client, &args).await,
    Command::Categories => {
      let resources = fetch_resources(&client).await?;
      for line in render::category_counts(&filter::count_by_category(&resources)) {
        println!("{line}");
      }
      Ok(())
    }
    Command::Featured { limit } => {
      let resources = fetch_resources(&client).await?;
      for resource in filter::featured(&resources, limit) {
        println!("{}", render::resource_line(resource));
      }
      Ok(())
    }
    Command::Events { kind } => {
      let events = client
        .fetch_approved_events()
        .await
        .context("failed to load events")?;
      let today = chrono::Local::now().date_naive();
      for event in event::upcoming(&events, today, kind) {
        println!("{}", render::event_line(event, today));
      }
      Ok(())
    }
    Command::Submit { draft } => {
      let mut form = submit::prepare(submit::load_draft(&draft)?)?;
      sign_in(&mut client, &config).await?;
      let result = submit::submit(&mut form, &client, &client).await;
      sign_out(&mut client).await;
      let name = result?;
      println!("Submitted \"{name}\". It will appear once a moderator approves it.");
      Ok(())
    }
    Command::Profile { action } => {
      sign_in(&mut client, &config).await?;
      let result = profile(&client, action).await;
      sign_out(&mut client).await;
      result
    }
    Command::Signup { full_name } => {
      let (email, password) = config.credentials()?;
      client
        .sign_up(email, password, full_name.as_deref())
        .await
        .context("sign-up failed")?;
      if client.auth_session().is_some() {
        println!("Account created for {email}.");
        sign_out(&mut client).await;
      } else {
        println!("Account created for {email}. Check your inbox to confirm it.");
      }
      Ok(())
    }
    Command::ResetPassword { email } => {
      let email = match email {
        Some(email) => email,
        None => config.credentials()?.0.to_owned(),
      };
      client
        .reset_password(&email)
        .await
        .context("password reset failed")?;
      println!("If {email} has an account, a reset link is on its way.");
      Ok(())
    }
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn fetch_resources(client: &HubClient) -> Result<Vec<hub_core::resource::Resource>> {
  client
    .fetch_approved_resources()
    .await
    .context("failed to load resources")
}

async fn list_resources(client: &HubClient, args: &ResourceArgs) -> Result<()> {
  let shared = Directory::new().shared();
  if refresh(Arc::downgrade(&shared), client).await == FetchOutcome::Failed {
    let directory = shared.lock().await;
    bail!(
      "failed to load resources: {}",
      directory.error().unwrap_or("unknown error")
    );
  }

  let mut directory = shared.lock().await;
  directory.set_criteria(args.criteria());

  for id in args.compared_ids() {
    match directory.toggle_compare(&id) {
      ToggleOutcome::Added | ToggleOutcome::Removed => {}
      ToggleOutcome::Full => warn!(%id, "at most three resources can be compared"),
      ToggleOutcome::Unknown => warn!(%id, "no approved resource with this id"),
    }
  }

  for resource in directory.view() {
    println!("{}", render::resource_line(resource));
    for line in render::resource_details(resource) {
      println!("{line}");
    }
  }
  println!("\n{}", directory.summary());

  if let Some(compared) = directory.comparison() {
    println!("\n{}", render::comparison_table(&compared));
  } else if !directory.selection().is_empty() {
    println!("Select at least two resources to compare.");
  }
  Ok(())
}

async fn profile(client: &HubClient, action: Option<ProfileAction>) -> Result<()> {
  if let Some(ProfileAction::Update {
    full_name,
    phone,
    address,
    bio,
  }) = action
  {
    let update = ProfileUpdate {
      full_name,
      phone,
      address,
      bio,
      updated_at: None,
    };
    if update.is_empty() {
      bail!("nothing to update; pass at least one field");
    }
    client
      .update_profile(&update)
      .await
      .context("failed to update profile")?;
  }

  let profile = client.fetch_profile().await.context("failed to load profile")?;
  for line in render::profile_lines(&profile) {
    println!("{line}");
  }
  Ok(())
}

async fn sign_in(client: &mut HubClient, config: &HubConfig) -> Result<()> {
  let (email, password) = config.credentials()?;
  client
    .sign_in(email, password)
    .await
    .with_context(|| format!("sign-in failed for {email}"))?;
  Ok(())
}

async fn sign_out(client: &mut HubClient) {
  if let Err(err) = client.sign_out().await {
    warn!(error = %err, "sign-out failed");
  }
}
