//! Derived relationships and the public JSON shape of a person.
//!
//! Children and siblings are computed, never stored. [`PersonView`] bundles a
//! person's columns with those derived id lists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::person::{Gender, Person, PersonId};

/// The serialised form of a person, as returned by `GET /people`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonView {
  pub id:           PersonId,
  pub first_name:   String,
  pub last_name:    String,
  pub maiden_name:  Option<String>,
  pub gender:       Gender,
  pub depth:        i64,
  pub spouse_id:    Option<PersonId>,
  pub mother_id:    Option<PersonId>,
  pub father_id:    Option<PersonId>,
  pub children_ids: Vec<PersonId>,
  pub sibling_ids:  Vec<PersonId>,
}

impl PersonView {
  pub fn new(
    person: Person,
    children_ids: Vec<PersonId>,
    sibling_ids: Vec<PersonId>,
  ) -> Self {
    Self {
      id: person.id,
      first_name: person.first_name,
      last_name: person.last_name,
      maiden_name: person.maiden_name,
      gender: person.gender,
      depth: person.depth,
      spouse_id: person.spouse_id,
      mother_id: person.mother_id,
      father_id: person.father_id,
      children_ids,
      sibling_ids,
    }
  }
}

/// Derive views for a whole population in one pass.
///
/// Output order follows input order; id lists are in input order too.
pub fn derive_views(people: Vec<Person>) -> Vec<PersonView> {
  let mut by_father: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
  let mut by_mother: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
  let mut by_parents: HashMap<(Option<PersonId>, Option<PersonId>), Vec<PersonId>> =
    HashMap::new();

  for p in &people {
    if let Some(f) = p.father_id {
      by_father.entry(f).or_default().push(p.id);
    }
    if let Some(m) = p.mother_id {
      by_mother.entry(m).or_default().push(p.id);
    }
    if p.father_id.is_some() || p.mother_id.is_some() {
      by_parents.entry((p.father_id, p.mother_id)).or_default().push(p.id);
    }
  }

  people
    .into_iter()
    .map(|p| {
      let index = match p.gender {
        Gender::Male => &by_father,
        Gender::Female => &by_mother,
      };
      let children = index
        .get(&p.id)
        .map(|ids| ids.iter().copied().filter(|&id| id != p.id).collect())
        .unwrap_or_default();

      let siblings = by_parents
        .get(&(p.father_id, p.mother_id))
        .map(|ids| ids.iter().copied().filter(|&id| id != p.id).collect())
        .unwrap_or_default();

      PersonView::new(p, children, siblings)
    })
    .collect()
}
