//! Cloneable façade over accounts and pets.
//!
//! [`PetService`] is the only way front-ends touch the store. Every store
//! call runs on the blocking pool and gives up after the configured storage
//! timeout; writes are fenced so a timed-out request never commits.
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use pet_core::{PetAction, PetStats, apply_action};
use tracing::{debug, info, warn};

use super::errors::{Resource, Result, ServiceError};
use super::types::Credentials;
use crate::auth::{AuthError, PasswordHasher, TokenIssuer, parse_bearer};
use crate::events::{AccountEvent, EventBus, PetEvent};
use crate::repository::{NewUser, Pet, PetRepository, Store, User, UserId, UserRepository};
use crate::utils::{run_blocking, run_blocking_write};

const INVALID_ACTION_MESSAGE: &str = "Invalid pet action specified.";

/// Verified against on unknown usernames so both login failures cost one bcrypt check.
const DUMMY_PASSWORD: &str = "everwyn-no-such-user";

/// Client-facing service for registration, login and pet actions.
#[derive(Clone)]
pub struct PetService {
    store: Arc<dyn Store>,
    hasher: PasswordHasher,
    tokens: Arc<TokenIssuer>,
    events: EventBus,
    storage_timeout: Duration,
    dummy_hash: Arc<OnceLock<String>>,
}

impl PetService {
    pub fn new(
        store: Arc<dyn Store>,
        hasher: PasswordHasher,
        tokens: TokenIssuer,
        events: EventBus,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens: Arc::new(tokens),
            events,
            storage_timeout,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Create an account with the default pet.
    pub async fn register(&self, credentials: &Credentials) -> Result<User> {
        let (username, password) = credentials.validate_registration()?;
        let user = self
            .create_user(username, password, PetStats::initial())
            .await?;

        info!("Registered user {} (id {})", user.username, user.id);
        self.events.publish(AccountEvent::Registered {
            user_id: user.id,
            username: user.username.clone(),
        });
        Ok(user)
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown username and wrong password fail identically.
    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let (username, password) = credentials.validate_login()?;

        let store = Arc::clone(&self.store);
        let lookup = username.to_string();
        let user = run_blocking(self.storage_timeout, move || {
            Ok(store.find_by_username(&lookup)?)
        })
        .await?;

        let hasher = self.hasher;
        let attempt = password.to_string();
        let stored_hash = user.as_ref().map(|user| user.password_hash.clone());
        let dummy_hash = Arc::clone(&self.dummy_hash);
        let matches = run_blocking(self.storage_timeout, move || {
            let hash = match stored_hash {
                Some(hash) => hash,
                None => dummy(&dummy_hash, hasher)?,
            };
            Ok(hasher.verify(&attempt, &hash)?)
        })
        .await?;

        let user = match user {
            Some(user) if matches => user,
            Some(user) => {
                warn!("Login failed: wrong password for user id {}", user.id);
                return Err(AuthError::InvalidCredentials.into());
            }
            None => {
                warn!("Login failed: unknown username");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let token = self.tokens.issue(user.id)?;
        info!("User {} logged in", user.id);
        self.events
            .publish(AccountEvent::LoggedIn { user_id: user.id });
        Ok(token)
    }

    /// Resolve an `Authorization` header value to the caller's user id.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<UserId> {
        let token = parse_bearer(authorization)?;
        let claims = self.tokens.verify(token).inspect_err(|err| {
            warn!("Token verification failed: {}", err);
        })?;
        Ok(claims.user_id())
    }

    /// The caller's pet.
    pub async fn pet(&self, user_id: UserId) -> Result<Pet> {
        let store = Arc::clone(&self.store);
        run_blocking(self.storage_timeout, move || Ok(store.load(user_id)?))
            .await?
            .ok_or(ServiceError::NotFound(Resource::Pet))
    }

    /// Parse `action` and apply it to the caller's pet.
    pub async fn act(&self, user_id: UserId, action: Option<&str>) -> Result<Pet> {
        let action = action
            .and_then(|name| name.parse::<PetAction>().ok())
            .ok_or_else(|| ServiceError::Validation(INVALID_ACTION_MESSAGE.to_string()))?;
        self.apply_action(user_id, action).await
    }

    /// Apply `action` to the caller's pet in one atomic store update.
    pub async fn apply_action(&self, user_id: UserId, action: PetAction) -> Result<Pet> {
        let store = Arc::clone(&self.store);
        let pet = run_blocking_write(self.storage_timeout, move |fence| {
            let step = move |stats: PetStats| apply_action(stats, action);
            Ok(store.update_fenced(user_id, &step, fence)?)
        })
        .await?
        .ok_or(ServiceError::NotFound(Resource::Pet))?;

        debug!(
            "User {} performed {}: hunger={} happiness={} energy={}",
            user_id,
            action,
            pet.stats.hunger(),
            pet.stats.happiness(),
            pet.stats.energy()
        );
        self.events.publish(PetEvent::ActionApplied {
            user_id,
            action,
            stats: pet.stats,
        });
        Ok(pet)
    }

    /// Create `username` with the given stats unless it already exists.
    ///
    /// Returns `None` when the user was already present. Used for seeding.
    pub async fn ensure_user(
        &self,
        username: &str,
        password: &str,
        stats: PetStats,
    ) -> Result<Option<User>> {
        match self.create_user(username, password, stats).await {
            Ok(user) => Ok(Some(user)),
            Err(ServiceError::Conflict(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Resolve a user id back to its account.
    pub async fn user(&self, user_id: UserId) -> Result<User> {
        let store = Arc::clone(&self.store);
        run_blocking(self.storage_timeout, move || Ok(store.find_by_id(user_id)?))
            .await?
            .ok_or(ServiceError::NotFound(Resource::User))
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    async fn create_user(&self, username: &str, password: &str, stats: PetStats) -> Result<User> {
        let hasher = self.hasher;
        let password = password.to_string();
        let password_hash =
            run_blocking(self.storage_timeout, move || Ok(hasher.hash(&password)?)).await?;

        let store = Arc::clone(&self.store);
        let new_user = NewUser::new(username, password_hash).with_stats(stats);
        run_blocking_write(self.storage_timeout, move |fence| {
            Ok(store.create_fenced(&new_user, fence)?)
        })
        .await
        .inspect_err(|err| {
            if let ServiceError::Conflict(name) = err {
                debug!("Registration rejected, username {:?} taken", name);
            }
        })
    }
}

/// Hash of [`DUMMY_PASSWORD`] at the service's cost, computed on first use.
fn dummy(cell: &OnceLock<String>, hasher: PasswordHasher) -> Result<String> {
    if let Some(hash) = cell.get() {
        return Ok(hash.clone());
    }
    let hash = hasher.hash(DUMMY_PASSWORD)?;
    Ok(cell.get_or_init(|| hash).clone())
}
