//! Table definitions. Applied idempotently on every open.

use rusqlite::Connection;

use crate::repository::Result;

const SCHEMA_V1: &str = r"
CREATE TABLE IF NOT EXISTS users (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  username TEXT UNIQUE NOT NULL,
  password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pets (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  user_id INTEGER UNIQUE NOT NULL,
  name TEXT NOT NULL DEFAULT 'My Pet',
  hunger INTEGER NOT NULL DEFAULT 50 CHECK (hunger >= 0 AND hunger <= 100),
  happiness INTEGER NOT NULL DEFAULT 50 CHECK (happiness >= 0 AND happiness <= 100),
  energy INTEGER NOT NULL DEFAULT 50 CHECK (energy >= 0 AND energy <= 100),
  FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);
";

pub(super) fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_V1)?;
    tracing::debug!("SQLite schema checked/created");
    Ok(())
}
