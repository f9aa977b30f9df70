//! SQL schema for the Kindred SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Rows are never deleted. Parents and spouse are attached after creation.
CREATE TABLE IF NOT EXISTS people (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT    NOT NULL,
    last_name   TEXT    NOT NULL,
    maiden_name TEXT,
    gender      TEXT    NOT NULL CHECK (gender IN ('male', 'female')),
    depth       INTEGER NOT NULL,
    spouse_id   INTEGER REFERENCES people(id),
    mother_id   INTEGER REFERENCES people(id),
    father_id   INTEGER REFERENCES people(id),
    created_at  TEXT    NOT NULL,   -- ISO 8601 UTC
    updated_at  TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS people_spouse_idx ON people(spouse_id);
CREATE INDEX IF NOT EXISTS people_mother_idx ON people(mother_id);
CREATE INDEX IF NOT EXISTS people_father_idx ON people(father_id);

PRAGMA user_version = 1;
";
