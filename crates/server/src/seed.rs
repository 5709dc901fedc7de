//! Development fixture: one known account with a healthy pet.
use anyhow::{Context, Result};
use pet_core::PetStats;
use runtime::PetService;

pub const SEED_USERNAME: &str = "testuser";
pub const SEED_PASSWORD: &str = "password123";

/// Seeded pet stats: hunger 70, happiness 85, energy 90.
pub fn seed_stats() -> PetStats {
    PetStats::clamped(70, 85, 90)
}

/// Create the development account if it is missing. Returns `true` when
/// something was created.
pub async fn seed(service: &PetService) -> Result<bool> {
    let created = service
        .ensure_user(SEED_USERNAME, SEED_PASSWORD, seed_stats())
        .await
        .context("failed to seed development user")?;

    match created {
        Some(user) => {
            tracing::info!("Seeded user {} (id {})", user.username, user.id);
            Ok(true)
        }
        None => {
            tracing::info!("Seed user {} already exists", SEED_USERNAME);
            Ok(false)
        }
    }
}
