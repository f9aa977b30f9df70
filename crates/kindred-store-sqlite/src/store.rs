//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value as SqlValue};

use kindred_core::{
  person::{NewPerson, Person, PersonId},
  relation::{PersonView, derive_views},
  store::PersonStore,
};

use crate::{
  encode::{PERSON_COLUMNS, RawPerson, encode_dt, encode_gender, into_people},
  schema::SCHEMA,
  Result,
};

// ─── Row helpers ─────────────────────────────────────────────────────────────

/// Insert `p` and return the id SQLite assigned to it.
fn insert_person(
  conn: &rusqlite::Connection,
  p:    &NewPerson,
  now:  &str,
) -> rusqlite::Result<PersonId> {
  conn.execute(
    "INSERT INTO people (
       first_name, last_name, maiden_name, gender, depth,
       father_id, mother_id, spouse_id, created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    rusqlite::params![
      p.first_name,
      p.last_name,
      p.maiden_name,
      encode_gender(p.gender),
      p.depth,
      p.father_id,
      p.mother_id,
      p.spouse_id,
      now,
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

fn select_person(
  conn: &rusqlite::Connection,
  id:   PersonId,
) -> rusqlite::Result<Option<RawPerson>> {
  conn
    .query_row(
      &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
      rusqlite::params![id],
      RawPerson::from_row,
    )
    .optional()
}

fn fetch_person(conn: &rusqlite::Connection, id: PersonId) -> rusqlite::Result<RawPerson> {
  conn.query_row(
    &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
    rusqlite::params![id],
    RawPerson::from_row,
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Kindred person store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened person store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `SELECT <person columns> FROM people <filter>` with bound params.
  async fn query_people(&self, filter: &'static str, args: Vec<SqlValue>) -> Result<Vec<Person>> {
    let sql = format!("SELECT {PERSON_COLUMNS} FROM people {filter}");

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(args), RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    into_people(raws)
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn create(&self, input: NewPerson) -> Result<Person> {
    input.validate()?;
    let now = encode_dt(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        let id = insert_person(conn, &input, &now)?;
        Ok(fetch_person(conn, id)?)
      })
      .await?;

    raw.into_person()
  }

  async fn link_parents(
    &self,
    child:  PersonId,
    father: NewPerson,
    mother: NewPerson,
  ) -> Result<(Person, Person, Person)> {
    father.validate()?;
    mother.validate()?;
    let now = encode_dt(Utc::now());

    let linked = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if select_person(&tx, child)?.is_none() {
          return Ok(None);
        }

        let father_id = insert_person(&tx, &father, &now)?;
        let mother_id = insert_person(&tx, &mother.with_spouse(father_id), &now)?;
        tx.execute(
          "UPDATE people SET spouse_id = ?1, updated_at = ?2 WHERE id = ?3",
          rusqlite::params![mother_id, now, father_id],
        )?;
        tx.execute(
          "UPDATE people SET father_id = ?1, mother_id = ?2, updated_at = ?3 WHERE id = ?4",
          rusqlite::params![father_id, mother_id, now, child],
        )?;

        let rows = (
          fetch_person(&tx, child)?,
          fetch_person(&tx, father_id)?,
          fetch_person(&tx, mother_id)?,
        );
        tx.commit()?;
        Ok(Some(rows))
      })
      .await?;

    let (c, f, m) = linked.ok_or(kindred_core::Error::PersonNotFound(child))?;
    Ok((c.into_person()?, f.into_person()?, m.into_person()?))
  }

  async fn link_spouse(&self, person: Person, spouse: NewPerson) -> Result<(Person, Person)> {
    spouse.validate()?;
    if person.last_name.trim().is_empty() {
      return Err(kindred_core::Error::validation("last_name", "must not be blank").into());
    }
    let id  = person.id;
    let now = encode_dt(Utc::now());

    let linked = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if select_person(&tx, id)?.is_none() {
          return Ok(None);
        }

        let spouse_id = insert_person(&tx, &spouse.with_spouse(id), &now)?;
        tx.execute(
          "UPDATE people
             SET last_name = ?1, maiden_name = ?2, spouse_id = ?3, updated_at = ?4
           WHERE id = ?5",
          rusqlite::params![person.last_name, person.maiden_name, spouse_id, now, id],
        )?;

        let rows = (fetch_person(&tx, id)?, fetch_person(&tx, spouse_id)?);
        tx.commit()?;
        Ok(Some(rows))
      })
      .await?;

    let (p, s) = linked.ok_or(kindred_core::Error::PersonNotFound(id))?;
    Ok((p.into_person()?, s.into_person()?))
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get(&self, id: PersonId) -> Result<Option<Person>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_person(conn, id)?))
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list(&self) -> Result<Vec<Person>> {
    self.query_people("ORDER BY id", vec![]).await
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM people", [], |r| r.get(0))?))
      .await?;
    Ok(n.max(0) as u64)
  }

  async fn random(&self) -> Result<Person> {
    self
      .query_people("ORDER BY RANDOM() LIMIT 1", vec![])
      .await?
      .pop()
      .ok_or_else(|| kindred_core::Error::EmptyStore.into())
  }

  async fn nth(&self, index: u64) -> Result<Option<Person>> {
    let offset = i64::try_from(index).unwrap_or(i64::MAX);
    Ok(
      self
        .query_people("ORDER BY id LIMIT 1 OFFSET ?1", vec![offset.into()])
        .await?
        .pop(),
    )
  }

  async fn children(&self, person: &Person) -> Result<Vec<Person>> {
    let filter = if person.is_male() {
      "WHERE father_id = ?1 AND id != ?1 ORDER BY id"
    } else {
      "WHERE mother_id = ?1 AND id != ?1 ORDER BY id"
    };
    self.query_people(filter, vec![person.id.into()]).await
  }

  async fn siblings(&self, person: &Person) -> Result<Vec<Person>> {
    if person.father_id.is_none() && person.mother_id.is_none() {
      return Ok(Vec::new());
    }
    self
      .query_people(
        "WHERE father_id IS ?1 AND mother_id IS ?2 AND id != ?3 ORDER BY id",
        vec![person.father_id.into(), person.mother_id.into(), person.id.into()],
      )
      .await
  }

  async fn view(&self, person: Person) -> Result<PersonView> {
    let children = self.children(&person).await?;
    let siblings = self.siblings(&person).await?;
    Ok(PersonView::new(
      person,
      children.into_iter().map(|p| p.id).collect(),
      siblings.into_iter().map(|p| p.id).collect(),
    ))
  }

  async fn list_views(&self) -> Result<Vec<PersonView>> {
    Ok(derive_views(self.list().await?))
  }
}
