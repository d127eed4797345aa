//! The multi-step resource submission form.
//!
//! ```text
//!   Step1 ──next──▶ Step2 ──next──▶ Step3 ──begin_submit──▶ Submitting
//!     ▲               │ ▲              │                      │     │
//!     └───previous────┘ └───previous───┘◀──────failure────────┘     │
//!     ▲                                                             │
//!     └──────────────── reset ◀── Submitted ◀────success────────────┘
//! ```
//!
//! Forward moves are guarded by per-step gates over the draft. An unmet gate
//! is not an error: [`SubmissionForm::next`] returns `false` and the front end
//! keeps the action disabled ([`SubmissionForm::can_advance`]).
//!
//! A submission stays in flight only while its [`SubmissionTicket`] exists.
//! Dropping the ticket, or the [`SubmissionForm::submit`] future holding it,
//! puts the form back on step 3 with the draft intact.

use std::{
  collections::BTreeSet,
  sync::{Arc, Weak},
};

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use tracing::debug;
use uuid::Uuid;

use crate::{
  error::{FormError, SubmitError},
  resource::NewResource,
  session::Session,
  store::{ResourceStore, StoreFailure},
  vocabulary::{AccessibilityFeature, Category, Language, strict_category},
};

// ─── Steps ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum FormStep {
  #[strum(to_string = "step 1 (basic information)")]
  Step1,
  #[strum(to_string = "step 2 (contact and location)")]
  Step2,
  #[strum(to_string = "step 3 (additional details)")]
  Step3,
  #[strum(to_string = "submitting")]
  Submitting,
  #[strum(to_string = "submitted")]
  Submitted,
}

impl FormStep {
  /// The 1-based position for progress indicators; `None` outside the three
  /// editing steps.
  pub fn number(self) -> Option<u8> {
    match self {
      Self::Step1 => Some(1),
      Self::Step2 => Some(2),
      Self::Step3 => Some(3),
      Self::Submitting | Self::Submitted => None,
    }
  }
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Free-text draft fields addressable by [`SubmissionForm::set_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum DraftField {
  Name,
  Description,
  Address,
  Phone,
  Email,
  Website,
  Hours,
  ContactPerson,
  Cost,
  EmergencyContact,
  EligibilityRequirements,
  AdditionalInfo,
  ImageUrl,
}

impl DraftField {
  /// The step the field is presented on.
  pub fn step(self) -> FormStep {
    match self {
      Self::Name | Self::Description => FormStep::Step1,
      Self::Address
      | Self::Phone
      | Self::Email
      | Self::Website
      | Self::Hours
      | Self::ContactPerson => FormStep::Step2,
      Self::Cost
      | Self::EmergencyContact
      | Self::EligibilityRequirements
      | Self::AdditionalInfo
      | Self::ImageUrl => FormStep::Step3,
    }
  }
}

/// The unsaved resource being entered.
///
/// Text fields default to the empty string and label sets to empty. Gates
/// trim before checking, so whitespace alone never satisfies one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubmissionDraft {
  // ── Step 1: basic information ──────────────────────────────────────────
  pub name:        String,
  /// Unknown labels are rejected rather than filed under "Other".
  #[serde(deserialize_with = "strict_category")]
  pub category:    Option<Category>,
  pub description: String,
  /// Insertion-ordered, duplicate-free.
  pub tags:        Vec<String>,

  // ── Step 2: contact and location ───────────────────────────────────────
  pub address:        String,
  pub phone:          String,
  pub email:          String,
  pub website:        String,
  pub hours:          String,
  pub contact_person: String,

  // ── Step 3: additional details ─────────────────────────────────────────
  pub cost:                     String,
  pub emergency_contact:        String,
  pub eligibility_requirements: String,
  pub accessibility_features:   BTreeSet<AccessibilityFeature>,
  pub languages:                BTreeSet<Language>,
  pub additional_info:          String,
  pub image_url:                String,
}

impl SubmissionDraft {
  pub fn field(&self, field: DraftField) -> &str {
    match field {
      DraftField::Name => &self.name,
      DraftField::Description => &self.description,
      DraftField::Address => &self.address,
      DraftField::Phone => &self.phone,
      DraftField::Email => &self.email,
      DraftField::Website => &self.website,
      DraftField::Hours => &self.hours,
      DraftField::ContactPerson => &self.contact_person,
      DraftField::Cost => &self.cost,
      DraftField::EmergencyContact => &self.emergency_contact,
      DraftField::EligibilityRequirements => &self.eligibility_requirements,
      DraftField::AdditionalInfo => &self.additional_info,
      DraftField::ImageUrl => &self.image_url,
    }
  }

  fn field_mut(&mut self, field: DraftField) -> &mut String {
    match field {
      DraftField::Name => &mut self.name,
      DraftField::Description => &mut self.description,
      DraftField::Address => &mut self.address,
      DraftField::Phone => &mut self.phone,
      DraftField::Email => &mut self.email,
      DraftField::Website => &mut self.website,
      DraftField::Hours => &mut self.hours,
      DraftField::ContactPerson => &mut self.contact_person,
      DraftField::Cost => &mut self.cost,
      DraftField::EmergencyContact => &mut self.emergency_contact,
      DraftField::EligibilityRequirements => &mut self.eligibility_requirements,
      DraftField::AdditionalInfo => &mut self.additional_info,
      DraftField::ImageUrl => &mut self.image_url,
    }
  }

  /// Step 1 gate: name, category, and description are all present.
  pub fn basics_complete(&self) -> bool {
    filled(&self.name) && self.category.is_some() && filled(&self.description)
  }

  /// Step 2 gate: at least one way to reach the resource.
  pub fn contact_complete(&self) -> bool {
    [&self.address, &self.phone, &self.email, &self.website]
      .into_iter()
      .any(|v| filled(v))
  }

  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// Build the insert payload, or `None` while no category is chosen.
  pub fn to_new_resource(&self, submitted_by: Uuid) -> Option<NewResource> {
    let category = self.category?;
    let mut payload = NewResource::new(
      self.name.trim(),
      category,
      self.description.trim(),
      submitted_by,
    );
    payload.address = optional(&self.address);
    payload.phone = optional(&self.phone);
    payload.email = optional(&self.email);
    payload.website = optional(&self.website);
    payload.hours = optional(&self.hours);
    payload.contact_person = optional(&self.contact_person);
    payload.tags = self.tags.clone();
    payload.cost = optional(&self.cost);
    payload.accessibility_features = self.accessibility_features.clone();
    payload.languages = self.languages.clone();
    payload.eligibility_requirements = optional(&self.eligibility_requirements);
    payload.emergency_contact = optional(&self.emergency_contact);
    payload.additional_info = optional(&self.additional_info);
    payload.image_url = optional(&self.image_url);
    Some(payload)
  }
}

fn filled(value: &str) -> bool { !value.trim().is_empty() }

fn optional(value: &str) -> Option<String> {
  let value = value.trim();
  (!value.is_empty()).then(|| value.to_owned())
}

// ─── Form ────────────────────────────────────────────────────────────────────

/// Proof that a submission was started; handed back to
/// [`SubmissionForm::finish_submit`] with the backend's answer, or to
/// [`SubmissionForm::abort_submit`]. Dropping it abandons the submission.
#[derive(Debug)]
#[must_use = "a started submission must be finished or aborted"]
pub struct SubmissionTicket {
  generation: u64,
  _alive:     Arc<()>,
}

/// One form instance: the current step plus the draft it owns.
#[derive(Debug)]
pub struct SubmissionForm {
  step:       FormStep,
  draft:      SubmissionDraft,
  generation: u64,
  /// Held strongly only by the outstanding ticket.
  in_flight:  Weak<()>,
}

impl Default for SubmissionForm {
  fn default() -> Self { Self::new() }
}

impl SubmissionForm {
  /// An empty draft on step 1.
  pub fn new() -> Self { Self::with_draft(SubmissionDraft::default()) }

  /// Start on step 1 with a pre-filled draft.
  pub fn with_draft(draft: SubmissionDraft) -> Self {
    Self {
      step: FormStep::Step1,
      draft,
      generation: 0,
      in_flight: Weak::new(),
    }
  }

  /// The current step. A submission whose ticket is gone reads as step 3.
  pub fn step(&self) -> FormStep {
    if self.step == FormStep::Submitting && self.in_flight.strong_count() == 0 {
      FormStep::Step3
    } else {
      self.step
    }
  }

  pub fn draft(&self) -> &SubmissionDraft { &self.draft }

  pub fn is_submitting(&self) -> bool { self.step() == FormStep::Submitting }

  // ── Field edits ────────────────────────────────────────────────────────

  /// Overwrite a text field. Allowed on every step except while submitting.
  pub fn set_field(
    &mut self,
    field: DraftField,
    value: impl Into<String>,
  ) -> Result<(), FormError> {
    self.ensure_editable()?;
    *self.draft.field_mut(field) = value.into();
    Ok(())
  }

  pub fn set_category(&mut self, category: Option<Category>) -> Result<(), FormError> {
    self.ensure_editable()?;
    self.draft.category = category;
    Ok(())
  }

  /// Add a trimmed tag. Returns `false` if it was blank or already present.
  pub fn add_tag(&mut self, tag: &str) -> Result<bool, FormError> {
    self.ensure_on("tags", FormStep::Step1)?;
    let tag = tag.trim();
    if tag.is_empty() || self.draft.tags.iter().any(|t| t == tag) {
      return Ok(false);
    }
    self.draft.tags.push(tag.to_owned());
    Ok(true)
  }

  /// Remove a tag. Returns `false` if it was not present.
  pub fn remove_tag(&mut self, tag: &str) -> Result<bool, FormError> {
    self.ensure_on("tags", FormStep::Step1)?;
    let before = self.draft.tags.len();
    self.draft.tags.retain(|t| t != tag);
    Ok(self.draft.tags.len() != before)
  }

  /// Flip an accessibility feature. Returns whether it is now selected.
  pub fn toggle_accessibility(
    &mut self,
    feature: AccessibilityFeature,
  ) -> Result<bool, FormError> {
    self.ensure_on("accessibility features", FormStep::Step3)?;
    Ok(toggle(&mut self.draft.accessibility_features, feature))
  }

  /// Flip a supported language. Returns whether it is now selected.
  pub fn toggle_language(&mut self, language: Language) -> Result<bool, FormError> {
    self.ensure_on("languages", FormStep::Step3)?;
    Ok(toggle(&mut self.draft.languages, language))
  }

  fn ensure_editable(&self) -> Result<(), FormError> {
    if self.is_submitting() {
      return Err(FormError::Busy);
    }
    Ok(())
  }

  fn ensure_on(&self, field: &'static str, owner: FormStep) -> Result<(), FormError> {
    self.ensure_editable()?;
    let current = self.step();
    if current != owner {
      return Err(FormError::FieldNotOnStep {
        field,
        owner,
        current,
      });
    }
    Ok(())
  }

  // ── Navigation ─────────────────────────────────────────────────────────

  /// Whether [`SubmissionForm::next`] would move forward.
  pub fn can_advance(&self) -> bool {
    match self.step() {
      FormStep::Step1 => self.draft.basics_complete(),
      FormStep::Step2 => self.draft.contact_complete(),
      _ => false,
    }
  }

  /// Move to the next step if the current step's gate passes.
  pub fn next(&mut self) -> bool {
    if !self.can_advance() {
      return false;
    }
    let from = self.step();
    self.step = match from {
      FormStep::Step1 => FormStep::Step2,
      _ => FormStep::Step3,
    };
    debug!(from = %from, to = %self.step, "form advanced");
    true
  }

  /// Move back one step, keeping everything entered.
  pub fn previous(&mut self) -> bool {
    let from = self.step();
    let to = match from {
      FormStep::Step2 => FormStep::Step1,
      FormStep::Step3 => FormStep::Step2,
      _ => return false,
    };
    debug!(from = %from, to = %to, "form went back");
    self.step = to;
    true
  }

  /// Discard the draft and return to step 1.
  pub fn reset(&mut self) -> Result<(), FormError> {
    self.ensure_editable()?;
    self.clear();
    Ok(())
  }

  fn clear(&mut self) {
    self.draft = SubmissionDraft::default();
    self.step = FormStep::Step1;
  }

  // ── Submission ─────────────────────────────────────────────────────────

  /// Whether [`SubmissionForm::begin_submit`] would be accepted.
  pub fn can_submit(&self, session: &impl Session) -> bool {
    self.step() == FormStep::Step3
      && session.is_authenticated()
      && self.draft.basics_complete()
      && self.draft.contact_complete()
  }

  /// Enter `Submitting` and hand out the payload to send.
  ///
  /// Refused without a signed-in user, off the final step, while another
  /// submission is in flight, or if an earlier step's fields were cleared
  /// since it was passed. Nothing changes when refused.
  pub fn begin_submit(
    &mut self,
    session: &impl Session,
  ) -> Result<(SubmissionTicket, NewResource), FormError> {
    match self.step() {
      FormStep::Submitting => return Err(FormError::Busy),
      FormStep::Step3 => {}
      other => return Err(FormError::NotOnFinalStep(other)),
    }
    let user = session.current_user().ok_or(FormError::Unauthenticated)?;
    if !self.draft.contact_complete() {
      return Err(FormError::Incomplete(FormStep::Step2));
    }
    let payload = self
      .draft
      .to_new_resource(user.id)
      .filter(|_| self.draft.basics_complete())
      .ok_or(FormError::Incomplete(FormStep::Step1))?;

    let alive = Arc::new(());
    self.generation += 1;
    self.step = FormStep::Submitting;
    self.in_flight = Arc::downgrade(&alive);
    debug!(generation = self.generation, submitter = %user.id, "submission started");
    Ok((
      SubmissionTicket {
        generation: self.generation,
        _alive:     alive,
      },
      payload,
    ))
  }

  fn owns(&self, ticket: &SubmissionTicket) -> bool {
    self.step == FormStep::Submitting && ticket.generation == self.generation
  }

  /// Apply the backend's answer to a submission.
  ///
  /// Success passes through `Submitted` and resets to an empty step 1;
  /// the returned step is `Submitted`. Failure returns to step 3 with the
  /// draft untouched and hands the error back. A ticket from an earlier
  /// submission is ignored.
  pub fn finish_submit<E>(
    &mut self,
    ticket: SubmissionTicket,
    outcome: Result<(), E>,
  ) -> Result<FormStep, E> {
    if !self.owns(&ticket) {
      debug!(generation = ticket.generation, "ignoring stale submission result");
      return Ok(self.step());
    }
    match outcome {
      Ok(()) => {
        self.step = FormStep::Submitted;
        debug!(generation = ticket.generation, "submission accepted");
        self.clear();
        Ok(FormStep::Submitted)
      }
      Err(err) => {
        self.step = FormStep::Step3;
        debug!(generation = ticket.generation, "submission failed; draft kept");
        Err(err)
      }
    }
  }

  /// Give up on an in-flight submission without an answer, returning to
  /// step 3 with the draft intact. A stale ticket is ignored.
  pub fn abort_submit(&mut self, ticket: SubmissionTicket) {
    if self.owns(&ticket) {
      self.step = FormStep::Step3;
      debug!(generation = ticket.generation, "submission aborted; draft kept");
    }
  }

  /// Run a whole submission against `store`.
  ///
  /// The form is borrowed mutably for the duration, so only one submission
  /// can be in flight per form. If the returned future is dropped before the
  /// store answers, its ticket goes with it and the form is back on step 3.
  pub async fn submit<S: ResourceStore>(
    &mut self,
    session: &impl Session,
    store: &S,
  ) -> Result<(), SubmitError<S::Error>> {
    let (ticket, payload) = self.begin_submit(session)?;
    let outcome = store.create_resource(payload).await;
    match self.finish_submit(ticket, outcome) {
      Ok(_) => Ok(()),
      Err(source) => Err(SubmitError::Store {
        kind: source.failure_kind(),
        source,
      }),
    }
  }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
  if set.remove(&value) {
    false
  } else {
    set.insert(value);
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::session::{AuthContext, UserIdentity};

  fn signed_in() -> AuthContext {
    AuthContext::signed_in(UserIdentity {
      id:    Uuid::from_u128(7),
      email: Some("jane@example.org".into()),
    })
  }

  fn form_on_step3() -> SubmissionForm {
    let mut form = SubmissionForm::new();
    form.set_field(DraftField::Name, "Food Bank").unwrap();
    form.set_category(Some(Category::FoodAssistance)).unwrap();
    form.set_field(DraftField::Description, "Groceries").unwrap();
    assert!(form.next());
    form.set_field(DraftField::Phone, "(555) 123-4567").unwrap();
    assert!(form.next());
    assert_eq!(form.step(), FormStep::Step3);
    form
  }

  #[test]
  fn step1_gate_requires_all_three() {
    let mut form = SubmissionForm::new();
    form.set_field(DraftField::Name, "Food Bank").unwrap();
    form.set_field(DraftField::Description, "desc").unwrap();
    assert!(!form.can_advance());
    assert!(!form.next());
    assert_eq!(form.step(), FormStep::Step1);

    form.set_category(Some(Category::FoodAssistance)).unwrap();
    form.set_field(DraftField::Description, "   ").unwrap();
    assert!(!form.next());

    form.set_field(DraftField::Description, "desc").unwrap();
    assert!(form.next());
    assert_eq!(form.step(), FormStep::Step2);
  }

  #[test]
  fn step2_gate_needs_one_contact_channel() {
    let mut form = SubmissionForm::new();
    form.set_field(DraftField::Name, "Food Bank").unwrap();
    form.set_category(Some(Category::FoodAssistance)).unwrap();
    form.set_field(DraftField::Description, "desc").unwrap();
    assert!(form.next());

    form.set_field(DraftField::Hours, "Mon-Fri").unwrap();
    assert!(!form.next());
    form.set_field(DraftField::Website, "www.foodbank.org").unwrap();
    assert!(form.next());
    assert_eq!(form.step(), FormStep::Step3);
    assert!(!form.next());
  }

  #[test]
  fn going_back_keeps_values() {
    let mut form = form_on_step3();
    form.set_field(DraftField::Cost, "Free").unwrap();
    assert!(form.previous());
    assert!(form.previous());
    assert!(!form.previous());
    assert_eq!(form.step(), FormStep::Step1);
    assert_eq!(form.draft().name, "Food Bank");
    assert_eq!(form.draft().phone, "(555) 123-4567");
    assert_eq!(form.draft().cost, "Free");
  }

  #[test]
  fn tags_have_set_semantics_and_live_on_step1() {
    let mut form = SubmissionForm::new();
    assert_eq!(form.add_tag(" food "), Ok(true));
    assert_eq!(form.add_tag("food"), Ok(false));
    assert_eq!(form.add_tag("  "), Ok(false));
    assert_eq!(form.remove_tag("jobs"), Ok(false));
    assert_eq!(form.draft().tags, ["food"]);

    let mut form = form_on_step3();
    assert_eq!(
      form.add_tag("free"),
      Err(FormError::FieldNotOnStep {
        field:   "tags",
        owner:   FormStep::Step1,
        current: FormStep::Step3,
      })
    );
  }

  #[test]
  fn label_toggles_live_on_step3() {
    let mut form = SubmissionForm::new();
    assert!(form.toggle_language(Language::Spanish).is_err());

    let mut form = form_on_step3();
    assert_eq!(form.toggle_language(Language::Spanish), Ok(true));
    assert_eq!(form.toggle_language(Language::Spanish), Ok(false));
    assert_eq!(
      form.toggle_accessibility(AccessibilityFeature::RampAccess),
      Ok(true)
    );
    assert!(form.draft().languages.is_empty());
    assert_eq!(form.draft().accessibility_features.len(), 1);
  }

  #[test]
  fn submit_requires_a_user() {
    let mut form = form_on_step3();
    assert!(!form.can_submit(&AuthContext::anonymous()));
    let err = form.begin_submit(&AuthContext::anonymous()).unwrap_err();
    assert_eq!(err, FormError::Unauthenticated);
    assert_eq!(form.step(), FormStep::Step3);
  }

  #[test]
  fn submit_only_from_step3() {
    let mut form = SubmissionForm::new();
    let err = form.begin_submit(&signed_in()).unwrap_err();
    assert_eq!(err, FormError::NotOnFinalStep(FormStep::Step1));
  }

  #[test]
  fn cleared_earlier_step_blocks_submit() {
    let mut form = form_on_step3();
    form.set_field(DraftField::Name, "").unwrap();
    let err = form.begin_submit(&signed_in()).unwrap_err();
    assert_eq!(err, FormError::Incomplete(FormStep::Step1));
    assert_eq!(form.step(), FormStep::Step3);
  }

  #[test]
  fn in_flight_submission_locks_the_form() {
    let mut form = form_on_step3();
    let session = signed_in();
    let (ticket, payload) = form.begin_submit(&session).unwrap();
    assert_eq!(payload.submitted_by, Uuid::from_u128(7));
    assert_eq!(payload.phone.as_deref(), Some("(555) 123-4567"));
    assert!(payload.address.is_none());

    assert!(form.is_submitting());
    assert!(!form.can_submit(&session));
    assert_eq!(form.begin_submit(&session).unwrap_err(), FormError::Busy);
    assert_eq!(form.set_field(DraftField::Name, "x"), Err(FormError::Busy));
    assert_eq!(form.reset(), Err(FormError::Busy));
    assert!(!form.previous());

    let result: Result<FormStep, &str> = form.finish_submit(ticket, Err("offline"));
    assert_eq!(result, Err("offline"));
    assert_eq!(form.step(), FormStep::Step3);
    assert_eq!(form.draft().name, "Food Bank");
  }

  #[test]
  fn success_clears_the_draft() {
    let mut form = form_on_step3();
    let (ticket, _) = form.begin_submit(&signed_in()).unwrap();
    let result: Result<FormStep, ()> = form.finish_submit(ticket, Ok(()));
    assert_eq!(result, Ok(FormStep::Submitted));
    assert_eq!(form.step(), FormStep::Step1);
    assert!(form.draft().is_empty());
  }

  #[test]
  fn stale_ticket_is_ignored() {
    let mut form = form_on_step3();
    let session = signed_in();
    let (stale, _) = form.begin_submit(&session).unwrap();
    let _: Result<FormStep, ()> = form.finish_submit(stale, Err(()));
    let (_fresh, _) = form.begin_submit(&session).unwrap();

    let stale_again = SubmissionTicket {
      generation: 1,
      _alive:     Arc::new(()),
    };
    let result: Result<FormStep, ()> = form.finish_submit(stale_again, Ok(()));
    assert_eq!(result, Ok(FormStep::Submitting));
    assert!(form.is_submitting());
  }

  #[test]
  fn dropped_ticket_unlocks_the_form() {
    let mut form = form_on_step3();
    let session = signed_in();
    let (ticket, _) = form.begin_submit(&session).unwrap();
    assert!(form.is_submitting());
    drop(ticket);

    assert_eq!(form.step(), FormStep::Step3);
    assert!(form.can_submit(&session));
    assert_eq!(form.draft().name, "Food Bank");
    assert_eq!(form.set_field(DraftField::Cost, "Free"), Ok(()));
    let (ticket, _) = form.begin_submit(&session).unwrap();
    let result: Result<FormStep, ()> = form.finish_submit(ticket, Ok(()));
    assert_eq!(result, Ok(FormStep::Submitted));
  }

  #[test]
  fn abort_returns_to_step3_with_the_draft() {
    let mut form = form_on_step3();
    let session = signed_in();
    let (stale, _) = form.begin_submit(&session).unwrap();
    form.abort_submit(stale);
    assert_eq!(form.step(), FormStep::Step3);
    assert_eq!(form.draft().phone, "(555) 123-4567");

    let (ticket, _) = form.begin_submit(&session).unwrap();
    let stale = SubmissionTicket {
      generation: 1,
      _alive:     Arc::new(()),
    };
    form.abort_submit(stale);
    assert!(form.is_submitting());
    form.abort_submit(ticket);
    assert_eq!(form.reset(), Ok(()));
    assert!(form.draft().is_empty());
  }

  #[test]
  fn draft_deserialises_from_partial_input() {
    let draft: SubmissionDraft = serde_json::from_value(serde_json::json!({
      "name": "Food Bank",
      "category": "Food Assistance",
      "languages": ["Spanish"]
    }))
    .unwrap();
    assert!(!draft.basics_complete());
    assert!(!draft.contact_complete());
    assert_eq!(draft.category, Some(Category::FoodAssistance));
    assert!(draft.languages.contains(&Language::Spanish));
  }

  #[test]
  fn draft_category_must_be_known() {
    let err = serde_json::from_value::<SubmissionDraft>(serde_json::json!({
      "category": "Food Asistance"
    }))
    .unwrap_err();
    assert!(err.to_string().contains("Food Asistance"));

    let draft: SubmissionDraft =
      serde_json::from_value(serde_json::json!({ "category": "  " })).unwrap();
    assert_eq!(draft.category, None);
    let draft: SubmissionDraft =
      serde_json::from_value(serde_json::json!({ "category": null })).unwrap();
    assert_eq!(draft.category, None);
  }
}
