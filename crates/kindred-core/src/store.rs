//! The `PersonStore` trait.
//!
//! Implemented by storage backends (e.g. `kindred-store-sqlite`). The
//! generator and the read API depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  person::{NewPerson, Person, PersonId},
  relation::PersonView,
};

/// Abstraction over a person table with self-referential relationships.
///
/// Persons are never deleted. After creation a record only changes when
/// parents or a spouse are attached through [`PersonStore::link_parents`] and
/// [`PersonStore::link_spouse`], each of which is atomic.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + From<crate::Error> + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Validate and insert a new person.
  fn create(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Insert `father` and `mother` as a married couple and attach them as the
  /// parents of `child`. Returns `(child, father, mother)` as persisted.
  fn link_parents(
    &self,
    child: PersonId,
    father: NewPerson,
    mother: NewPerson,
  ) -> impl Future<Output = Result<(Person, Person, Person), Self::Error>> + Send + '_;

  /// Insert `spouse` married to `person`, persisting `person`'s name columns
  /// alongside the new `spouse_id`. Returns `(person, spouse)` as persisted.
  fn link_spouse(
    &self,
    person: Person,
    spouse: NewPerson,
  ) -> impl Future<Output = Result<(Person, Person), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a person by id. Returns `None` if not found.
  fn get(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// All persons, ordered by id.
  fn list(&self) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Total number of persons.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// A uniformly random person. Fails with [`crate::Error::EmptyStore`] when
  /// there is nobody to pick.
  fn random(&self) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// The person at `index` in id order, or `None` past the end.
  fn nth(
    &self,
    index: u64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Persons whose father (for a man) or mother (for a woman) is `person`.
  fn children<'a>(
    &'a self,
    person: &'a Person,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Other persons with the same father and mother references as `person`,
  /// an unknown parent matching only an unknown parent. Empty when both
  /// parents are unknown.
  fn siblings<'a>(
    &'a self,
    person: &'a Person,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Project a person into its public JSON shape.
  fn view(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<PersonView, Self::Error>> + Send + '_;

  /// The whole population in its public JSON shape.
  fn list_views(&self) -> impl Future<Output = Result<Vec<PersonView>, Self::Error>> + Send + '_;
}
