//! Error types for `hub-core`.

use thiserror::Error;

use crate::{form::FormStep, store::FailureKind};

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown sort key: {0:?}")]
  UnknownSortKey(String),

  #[error("unknown {vocabulary} label: {label:?}")]
  UnknownLabel {
    vocabulary: &'static str,
    label:      String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A submission-form action that was refused.
///
/// Unmet step gates are not errors: [`crate::form::SubmissionForm::next`]
/// simply reports that it did not move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
  #[error("sign in to submit a resource")]
  Unauthenticated,

  #[error("a submission is already in flight")]
  Busy,

  #[error("the draft can only be submitted from the final step (currently {0})")]
  NotOnFinalStep(FormStep),

  #[error("required fields on {0} are missing")]
  Incomplete(FormStep),

  #[error("{field} can only be edited on {owner} (currently {current})")]
  FieldNotOnStep {
    field:   &'static str,
    owner:   FormStep,
    current: FormStep,
  },
}

/// Failure of [`crate::form::SubmissionForm::submit`].
#[derive(Debug, Error)]
pub enum SubmitError<E> {
  #[error(transparent)]
  Form(#[from] FormError),

  #[error("submission failed ({kind}): {source}")]
  Store {
    kind:   FailureKind,
    #[source]
    source: E,
  },
}

impl<E> SubmitError<E> {
  /// Whether the caller should send the user to the sign-in flow.
  pub fn needs_sign_in(&self) -> bool {
    matches!(self, Self::Form(FormError::Unauthenticated))
  }
}
