//! Repository contracts for accounts and pet stats.
//!
//! Implementations are synchronous and must be `Send + Sync`; the service
//! layer moves calls onto the blocking pool and bounds them with a timeout.

use pet_core::PetStats;

use super::error::Result;
use super::fence::CommitFence;
use super::records::{NewUser, Pet, User, UserId};

/// Pure stat transition handed to a repository for atomic application.
pub type StatUpdate<'a> = &'a (dyn Fn(PetStats) -> PetStats + Send + Sync);

/// Account storage.
pub trait UserRepository: Send + Sync {
    /// Create a user and its pet in one atomic step.
    ///
    /// Fails with [`RepositoryError::DuplicateUsername`] if the username is
    /// taken; in that case nothing is written.
    ///
    /// [`RepositoryError::DuplicateUsername`]: super::RepositoryError::DuplicateUsername
    fn create(&self, new_user: &NewUser) -> Result<User> {
        self.create_fenced(new_user, &CommitFence::none())
    }

    /// [`UserRepository::create`] that writes nothing once `fence` is abandoned.
    fn create_fenced(&self, new_user: &NewUser, fence: &CommitFence) -> Result<User>;

    /// Look a user up by exact username.
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look a user up by id.
    fn find_by_id(&self, id: UserId) -> Result<Option<User>>;
}

/// Pet stat storage.
///
/// Both mutators are a single read-modify-write: the backend must hold its
/// write lock (or transaction) from reading the current stats until the
/// result of `update` has been stored, so a decay sweep and a user action
/// never lose each other's writes.
pub trait PetRepository: Send + Sync {
    /// Load the pet owned by `user_id`.
    fn load(&self, user_id: UserId) -> Result<Option<Pet>>;

    /// Atomically replace the owner's stats with `update(current)`.
    ///
    /// Returns the stored pet, or `None` if the user has no pet.
    fn update(&self, user_id: UserId, update: StatUpdate<'_>) -> Result<Option<Pet>> {
        self.update_fenced(user_id, update, &CommitFence::none())
    }

    /// [`PetRepository::update`] that writes nothing once `fence` is abandoned.
    fn update_fenced(
        &self,
        user_id: UserId,
        update: StatUpdate<'_>,
        fence: &CommitFence,
    ) -> Result<Option<Pet>>;

    /// Atomically apply `update` to every pet. Returns the number of pets swept.
    fn update_all(&self, update: StatUpdate<'_>) -> Result<usize>;

    /// Number of stored pets.
    fn count(&self) -> Result<usize>;
}

/// A complete backend: accounts and pets behind one handle.
pub trait Store: UserRepository + PetRepository {}

impl<T: UserRepository + PetRepository> Store for T {}
