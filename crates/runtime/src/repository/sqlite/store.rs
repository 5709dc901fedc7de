//! SQLite [`Store`](crate::repository::Store) implementation.
//!
//! One connection per store, guarded by a mutex. Every mutation runs inside
//! a `BEGIN IMMEDIATE` transaction so that the write lock is taken before the
//! current stats are read; other processes sharing the file wait on
//! `busy_timeout` instead of interleaving.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use pet_core::PetStats;
use rusqlite::{
    Connection, ErrorCode, OptionalExtension, Row, TransactionBehavior, params, types::Type,
};

use super::schema;
use crate::repository::{
    CommitFence, NewUser, Pet, PetId, PetRepository, RepositoryError, Result, StatUpdate, User,
    UserId, UserRepository,
};

const PET_COLUMNS: &str = "id, user_id, name, hunger, happiness, energy";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite implementation of the account and pet repositories.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) a database file with the default busy timeout.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Open (or create) a database file. Lock waits give up after `busy_timeout`.
    pub fn open_with_timeout(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        let store = Self::from_connection(conn, busy_timeout, Some(path))?;

        tracing::info!("Connected to SQLite database at {}", store.describe());
        Ok(store)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, DEFAULT_BUSY_TIMEOUT, None)
    }

    fn from_connection(
        conn: Connection,
        busy_timeout: Duration,
        path: Option<PathBuf>,
    ) -> Result<Self> {
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        schema::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database location, for log lines.
    pub fn describe(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ":memory:".to_string())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepositoryError::LockPoisoned)
    }
}

fn pet_from_row(row: &Row<'_>) -> rusqlite::Result<Pet> {
    let stats = PetStats::new(row.get(3)?, row.get(4)?, row.get(5)?)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(err)))?;
    Ok(Pet {
        id: PetId(row.get(0)?),
        user_id: UserId(row.get(1)?),
        name: row.get(2)?,
        stats,
    })
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId(row.get(0)?),
        username: row.get(1)?,
        password_hash: row.get(2)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl UserRepository for SqliteStore {
    fn create_fenced(&self, new_user: &NewUser, fence: &CommitFence) -> Result<User> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if let Err(err) = tx.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![new_user.username, new_user.password_hash],
        ) {
            if is_unique_violation(&err) {
                return Err(RepositoryError::DuplicateUsername {
                    username: new_user.username.clone(),
                });
            }
            return Err(err.into());
        }
        let user_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO pets (user_id, name, hunger, happiness, energy)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_id,
                new_user.pet_name,
                new_user.stats.hunger(),
                new_user.stats.happiness(),
                new_user.stats.energy(),
            ],
        )?;
        // Dropping `tx` on an abandoned fence rolls both inserts back.
        fence.enter_commit()?;
        tx.commit()?;

        Ok(User {
            id: UserId(user_id),
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
        })
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.lock()?;
        Ok(conn
            .query_row(
                "SELECT id, username, password FROM users WHERE username = ?1",
                params![username],
                user_from_row,
            )
            .optional()?)
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let conn = self.lock()?;
        Ok(conn
            .query_row(
                "SELECT id, username, password FROM users WHERE id = ?1",
                params![id.0],
                user_from_row,
            )
            .optional()?)
    }
}

impl PetRepository for SqliteStore {
    fn load(&self, user_id: UserId) -> Result<Option<Pet>> {
        let conn = self.lock()?;
        Ok(conn
            .query_row(
                &format!("SELECT {PET_COLUMNS} FROM pets WHERE user_id = ?1"),
                params![user_id.0],
                pet_from_row,
            )
            .optional()?)
    }

    fn update_fenced(
        &self,
        user_id: UserId,
        update: StatUpdate<'_>,
        fence: &CommitFence,
    ) -> Result<Option<Pet>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(mut pet) = tx
            .query_row(
                &format!("SELECT {PET_COLUMNS} FROM pets WHERE user_id = ?1"),
                params![user_id.0],
                pet_from_row,
            )
            .optional()?
        else {
            return Ok(None);
        };

        pet.stats = update(pet.stats);
        tx.execute(
            "UPDATE pets SET hunger = ?1, happiness = ?2, energy = ?3 WHERE id = ?4",
            params![
                pet.stats.hunger(),
                pet.stats.happiness(),
                pet.stats.energy(),
                pet.id.0
            ],
        )?;
        fence.enter_commit()?;
        tx.commit()?;

        Ok(Some(pet))
    }

    fn update_all(&self, update: StatUpdate<'_>) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let pets = {
            let mut stmt = tx.prepare(&format!("SELECT {PET_COLUMNS} FROM pets"))?;
            let rows = stmt.query_map([], pet_from_row)?;
            rows.collect::<rusqlite::Result<Vec<Pet>>>()?
        };

        {
            let mut stmt = tx.prepare(
                "UPDATE pets SET hunger = ?1, happiness = ?2, energy = ?3 WHERE id = ?4",
            )?;
            for pet in &pets {
                let next = update(pet.stats);
                stmt.execute(params![next.hunger(), next.happiness(), next.energy(), pet.id.0])?;
            }
        }
        tx.commit()?;

        Ok(pets.len())
    }

    fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM pets", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| RepositoryError::CorruptedData(format!("negative pet count {count}")))
    }
}
