//! bcrypt password hashing.

use super::error::AuthError;

/// Hashes and verifies passwords with bcrypt at a fixed cost.
#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Production cost.
    pub const DEFAULT_COST: u32 = 10;
    pub const MIN_COST: u32 = 4;
    pub const MAX_COST: u32 = 31;

    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(Self::MIN_COST, Self::MAX_COST),
        }
    }

    pub const fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Returns `Ok(false)` on mismatch; errors only on a malformed hash.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(bcrypt::verify(password, hash)?)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = PasswordHasher::new(PasswordHasher::MIN_COST);
        let hash = hasher.hash("longenough").unwrap();
        assert_ne!(hash, "longenough");
        assert!(hasher.verify("longenough", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn cost_is_clamped() {
        assert_eq!(PasswordHasher::new(0).cost(), 4);
        assert_eq!(PasswordHasher::default().cost(), 10);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let hasher = PasswordHasher::new(PasswordHasher::MIN_COST);
        assert!(matches!(
            hasher.verify("pw", "not-a-hash"),
            Err(AuthError::Hash(_))
        ));
    }
}
