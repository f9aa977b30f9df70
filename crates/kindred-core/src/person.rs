//! Person — the single entity of the family tree.
//!
//! Every relationship is a self-reference: a person points at a father, a
//! mother and a spouse. Children and siblings are never stored; they are
//! derived on read (see [`crate::relation`]).

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Row identifier assigned by the store on creation.
pub type PersonId = i64;

// ─── Gender ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
}

impl Gender {
  pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

  pub fn as_str(self) -> &'static str {
    match self {
      Gender::Male => "male",
      Gender::Female => "female",
    }
  }

  pub fn opposite(self) -> Self {
    match self {
      Gender::Male => Gender::Female,
      Gender::Female => Gender::Male,
    }
  }
}

impl fmt::Display for Gender {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Gender {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "male" => Ok(Gender::Male),
      "female" => Ok(Gender::Female),
      other => Err(Error::UnknownGender(other.to_owned())),
    }
  }
}

// ─── Relationship ────────────────────────────────────────────────────────────

/// A relationship a person may still acquire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
  /// A fresh father and mother, added together.
  Parents,
  Spouse,
  /// Requires a spouse.
  Child,
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A persisted person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:          PersonId,
  pub first_name:  String,
  pub last_name:   String,
  /// Set only for a married woman whose surname changed.
  pub maiden_name: Option<String>,
  pub gender:      Gender,
  /// Generation offset from the root person. Ancestors are negative.
  pub depth:       i64,
  pub father_id:   Option<PersonId>,
  pub mother_id:   Option<PersonId>,
  pub spouse_id:   Option<PersonId>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl Person {
  pub fn is_male(&self) -> bool { self.gender == Gender::Male }

  pub fn can_have_new_parents(&self) -> bool {
    self.father_id.is_none() || self.mother_id.is_none()
  }

  pub fn can_have_new_spouse(&self) -> bool { self.spouse_id.is_none() }

  pub fn can_have_new_child(&self) -> bool { self.spouse_id.is_some() }

  /// Relationships this person may still acquire, in a stable order.
  ///
  /// Never empty for a married person: `Child` stays available forever.
  pub fn eligible_relationships(&self) -> Vec<Relationship> {
    let mut options = Vec::with_capacity(3);
    if self.can_have_new_child() {
      options.push(Relationship::Child);
    }
    if self.can_have_new_parents() {
      options.push(Relationship::Parents);
    }
    if self.can_have_new_spouse() {
      options.push(Relationship::Spouse);
    }
    options
  }

  /// Whether `other` is recorded as a child of this person.
  pub fn is_parent_of(&self, other: &Person) -> bool {
    let parent_ref = if self.is_male() { other.father_id } else { other.mother_id };
    other.id != self.id && parent_ref == Some(self.id)
  }

  /// Whether `other` has the same father and mother references as this
  /// person. Persons with no recorded parents at all have no siblings.
  pub fn is_sibling_of(&self, other: &Person) -> bool {
    other.id != self.id
      && (self.father_id.is_some() || self.mother_id.is_some())
      && other.father_id == self.father_id
      && other.mother_id == self.mother_id
  }
}

// ─── NewPerson ───────────────────────────────────────────────────────────────

/// Input for creating a person. The store assigns `id` and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
  pub first_name:  String,
  pub last_name:   String,
  #[serde(default)]
  pub maiden_name: Option<String>,
  pub gender:      Gender,
  pub depth:       i64,
  #[serde(default)]
  pub father_id:   Option<PersonId>,
  #[serde(default)]
  pub mother_id:   Option<PersonId>,
  #[serde(default)]
  pub spouse_id:   Option<PersonId>,
}

impl NewPerson {
  /// A person with no relationships yet.
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    gender: Gender,
    depth: i64,
  ) -> Self {
    Self {
      first_name: first_name.into(),
      last_name: last_name.into(),
      maiden_name: None,
      gender,
      depth,
      father_id: None,
      mother_id: None,
      spouse_id: None,
    }
  }

  pub fn with_maiden_name(mut self, maiden_name: impl Into<String>) -> Self {
    self.maiden_name = Some(maiden_name.into());
    self
  }

  pub fn with_parents(mut self, father_id: PersonId, mother_id: PersonId) -> Self {
    self.father_id = Some(father_id);
    self.mother_id = Some(mother_id);
    self
  }

  pub fn with_spouse(mut self, spouse_id: PersonId) -> Self {
    self.spouse_id = Some(spouse_id);
    self
  }

  /// Reject blank names. Everything else is guaranteed by the types.
  pub fn validate(&self) -> Result<()> {
    if self.first_name.trim().is_empty() {
      return Err(Error::validation("first_name", "must not be blank"));
    }
    if self.last_name.trim().is_empty() {
      return Err(Error::validation("last_name", "must not be blank"));
    }
    if self.maiden_name.as_deref().is_some_and(|m| m.trim().is_empty()) {
      return Err(Error::validation("maiden_name", "must not be blank when present"));
    }
    Ok(())
  }

  /// Build and validate a person from a loosely-typed JSON attribute object.
  pub fn from_json(attrs: &Value) -> Result<Self> {
    let obj = attrs
      .as_object()
      .ok_or_else(|| Error::validation("attributes", "expected a JSON object"))?;

    let first_name  = required_str(obj.get("first_name"), "first_name")?;
    let last_name   = required_str(obj.get("last_name"), "last_name")?;
    let maiden_name = optional_str(obj.get("maiden_name"), "maiden_name")?;
    let gender      = required_str(obj.get("gender"), "gender")?
      .parse::<Gender>()
      .map_err(|e| Error::validation("gender", e.to_string()))?;
    let depth = match obj.get("depth") {
      None | Some(Value::Null) => return Err(Error::validation("depth", "is required")),
      Some(v) => integer(v, "depth")?,
    };

    let person = Self {
      first_name,
      last_name,
      maiden_name,
      gender,
      depth,
      father_id: optional_integer(obj.get("father_id"), "father_id")?,
      mother_id: optional_integer(obj.get("mother_id"), "mother_id")?,
      spouse_id: optional_integer(obj.get("spouse_id"), "spouse_id")?,
    };
    person.validate()?;
    Ok(person)
  }
}

// ─── JSON attribute helpers ──────────────────────────────────────────────────

fn required_str(v: Option<&Value>, field: &'static str) -> Result<String> {
  optional_str(v, field)?.ok_or_else(|| Error::validation(field, "is required"))
}

fn optional_str(v: Option<&Value>, field: &'static str) -> Result<Option<String>> {
  match v {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) => Ok(Some(s.clone())),
    Some(other) => Err(Error::validation(field, format!("expected a string, got {other}"))),
  }
}

fn integer(v: &Value, field: &'static str) -> Result<i64> {
  v.as_i64()
    .ok_or_else(|| Error::validation(field, format!("expected an integer, got {v}")))
}

fn optional_integer(v: Option<&Value>, field: &'static str) -> Result<Option<i64>> {
  match v {
    None | Some(Value::Null) => Ok(None),
    Some(v) => integer(v, field).map(Some),
  }
}
