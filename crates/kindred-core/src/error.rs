//! Error types for `kindred-core`.

use thiserror::Error;

use crate::person::PersonId;

#[derive(Debug, Error)]
pub enum Error {
  /// A required attribute is missing or has the wrong type.
  #[error("invalid {field}: {message}")]
  Validation {
    field:   &'static str,
    message: String,
  },

  #[error("cannot pick a random person from an empty store")]
  EmptyStore,

  #[error("person not found: {0}")]
  PersonNotFound(PersonId),

  #[error("person {0} has no spouse to have a child with")]
  MissingSpouse(PersonId),

  #[error("person {0} is already married")]
  AlreadyMarried(PersonId),

  #[error("person {0} already has both parents")]
  AlreadyHasParents(PersonId),

  #[error("no person eligible for a new relationship after {attempts} attempts")]
  NoEligiblePerson { attempts: u32 },

  #[error("unknown gender: {0:?}")]
  UnknownGender(String),
}

impl Error {
  pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
    Self::Validation { field, message: message.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
