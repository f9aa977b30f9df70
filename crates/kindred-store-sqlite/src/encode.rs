//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and genders as their lowercase
//! names.

use chrono::{DateTime, Utc};
use kindred_core::person::{Gender, Person, PersonId};

use crate::{Error, Result};

/// Column list shared by every `SELECT` that yields a [`RawPerson`].
pub const PERSON_COLUMNS: &str = "id, first_name, last_name, maiden_name, gender, depth, \
   father_id, mother_id, spouse_id, created_at, updated_at";

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Gender ──────────────────────────────────────────────────────────────────

pub fn encode_gender(g: Gender) -> &'static str { g.as_str() }

pub fn decode_gender(s: &str) -> Result<Gender> { Ok(s.parse()?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `people` row.
pub struct RawPerson {
  pub id:          PersonId,
  pub first_name:  String,
  pub last_name:   String,
  pub maiden_name: Option<String>,
  pub gender:      String,
  pub depth:       i64,
  pub father_id:   Option<PersonId>,
  pub mother_id:   Option<PersonId>,
  pub spouse_id:   Option<PersonId>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawPerson {
  /// Map a row selected with [`PERSON_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      first_name:  row.get(1)?,
      last_name:   row.get(2)?,
      maiden_name: row.get(3)?,
      gender:      row.get(4)?,
      depth:       row.get(5)?,
      father_id:   row.get(6)?,
      mother_id:   row.get(7)?,
      spouse_id:   row.get(8)?,
      created_at:  row.get(9)?,
      updated_at:  row.get(10)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:          self.id,
      first_name:  self.first_name,
      last_name:   self.last_name,
      maiden_name: self.maiden_name,
      gender:      decode_gender(&self.gender)?,
      depth:       self.depth,
      father_id:   self.father_id,
      mother_id:   self.mother_id,
      spouse_id:   self.spouse_id,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub fn into_people(raws: Vec<RawPerson>) -> Result<Vec<Person>> {
  raws.into_iter().map(RawPerson::into_person).collect()
}
