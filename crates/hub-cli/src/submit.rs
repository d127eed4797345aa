//! `hub submit`: drive a TOML draft through the submission form.

use std::path::Path;

use anyhow::{Context as _, Result, bail};
use hub_core::{
  form::{FormStep, SubmissionDraft, SubmissionForm},
  session::Session,
  store::ResourceStore,
};
use tracing::debug;

/// Read a draft file. Unknown labels, including the category, are an error
/// here, unlike backend rows, so typos are caught before submitting.
pub fn load_draft(path: &Path) -> Result<SubmissionDraft> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading draft {}", path.display()))?;
  parse_draft(&raw).with_context(|| format!("parsing draft {}", path.display()))
}

fn parse_draft(raw: &str) -> Result<SubmissionDraft> { Ok(toml::from_str(raw)?) }

/// Build a form from `draft` and walk it to the final step, adding tags the
/// way the form does (trimmed, no blanks or duplicates).
pub fn prepare(mut draft: SubmissionDraft) -> Result<SubmissionForm> {
  let tags = std::mem::take(&mut draft.tags);
  let mut form = SubmissionForm::with_draft(draft);
  for tag in &tags {
    form.add_tag(tag)?;
  }

  while form.step() != FormStep::Step3 {
    let step = form.step();
    if !form.next() {
      bail!("draft is incomplete at {step}: {}", missing_on(step));
    }
    debug!(step = %form.step(), "draft advanced");
  }
  Ok(form)
}

fn missing_on(step: FormStep) -> &'static str {
  match step {
    FormStep::Step1 => "name, category and description are required",
    FormStep::Step2 => "at least one of address, phone, email or website is required",
    _ => "nothing more is required",
  }
}

/// Submit a prepared form. Returns the submitted resource name.
pub async fn submit<S: ResourceStore>(
  form: &mut SubmissionForm,
  session: &impl Session,
  store: &S,
) -> Result<String> {
  let name = form.draft().name.trim().to_owned();
  if let Err(err) = form.submit(session, store).await {
    if err.needs_sign_in() {
      bail!("sign in to submit a resource (configure `email` and `password`)");
    }
    return Err(err).context("submission failed; the draft was not saved");
  }
  Ok(name)
}
