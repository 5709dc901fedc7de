//! In-memory [`Store`](crate::repository::Store) for tests and local runs.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::repository::{
    CommitFence, NewUser, Pet, PetId, PetRepository, RepositoryError, Result, StatUpdate, User,
    UserId, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    usernames: HashMap<String, UserId>,
    pets: HashMap<UserId, Pet>,
    next_user_id: i64,
    next_pet_id: i64,
}

/// In-memory implementation of the account and pet repositories.
///
/// A single `RwLock` guards every table, so each mutation is atomic with
/// respect to every other one.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| RepositoryError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for InMemoryStore {
    fn create_fenced(&self, new_user: &NewUser, fence: &CommitFence) -> Result<User> {
        let mut tables = self.write()?;
        if tables.usernames.contains_key(&new_user.username) {
            return Err(RepositoryError::DuplicateUsername {
                username: new_user.username.clone(),
            });
        }
        fence.enter_commit()?;

        tables.next_user_id += 1;
        tables.next_pet_id += 1;
        let user = User {
            id: UserId(tables.next_user_id),
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
        };
        let pet = Pet {
            id: PetId(tables.next_pet_id),
            user_id: user.id,
            name: new_user.pet_name.clone(),
            stats: new_user.stats,
        };

        tables.usernames.insert(user.username.clone(), user.id);
        tables.pets.insert(user.id, pet);
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.read()?;
        Ok(tables
            .usernames
            .get(username)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }
}

impl PetRepository for InMemoryStore {
    fn load(&self, user_id: UserId) -> Result<Option<Pet>> {
        Ok(self.read()?.pets.get(&user_id).cloned())
    }

    fn update_fenced(
        &self,
        user_id: UserId,
        update: StatUpdate<'_>,
        fence: &CommitFence,
    ) -> Result<Option<Pet>> {
        let mut tables = self.write()?;
        let Some(pet) = tables.pets.get_mut(&user_id) else {
            return Ok(None);
        };
        let next = update(pet.stats);
        fence.enter_commit()?;
        pet.stats = next;
        Ok(Some(pet.clone()))
    }

    fn update_all(&self, update: StatUpdate<'_>) -> Result<usize> {
        let mut tables = self.write()?;
        for pet in tables.pets.values_mut() {
            pet.stats = update(pet.stats);
        }
        Ok(tables.pets.len())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.pets.len())
    }
}
