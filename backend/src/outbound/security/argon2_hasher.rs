//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are stored in PHC string form, so parameters travel with each
//! hash and verification keeps working after the defaults change.

use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use tracing::warn;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

const DECOY_PASSWORD: &str = "decoy-password-never-matches";

/// Argon2id hasher.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
    decoy: OnceLock<Option<PasswordHash>>,
}

impl Argon2PasswordHasher {
    /// Hasher using the crate's recommended parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            decoy: OnceLock::new(),
        }
    }

    /// Hasher with the cheapest accepted parameters, for tests.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hashing`] if argon2 rejects the
    /// parameters.
    pub fn low_cost() -> Result<Self, PasswordHashError> {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            decoy: OnceLock::new(),
        })
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(PasswordHash::new(hash.to_string()))
    }

    fn verify(&self, plain: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|err| PasswordHashError::malformed(err.to_string()))?;
        match self.argon2.verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed(err.to_string())),
        }
    }

    fn verify_decoy(&self, plain: &str) {
        // Hashed with this hasher's parameters on first use, so the decoy
        // costs as much as a real stored hash.
        let decoy = self.decoy.get_or_init(|| match self.hash(DECOY_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(err) => {
                warn!(error = %err, "decoy hash unavailable");
                None
            }
        });
        let Some(hash) = decoy else {
            return;
        };
        if let Err(err) = self.verify(plain, hash) {
            warn!(error = %err, "decoy verification failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::low_cost().expect("minimum parameters are valid")
    }

    #[rstest]
    fn hashes_verify_against_their_password(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("salainen").expect("hash");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("salainen", &hash).expect("verify"));
        assert!(!hasher.verify("wrong", &hash).expect("verify"));
    }

    #[rstest]
    fn hashing_is_salted(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("salainen").expect("hash");
        let second = hasher.hash("salainen").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_hashes_are_errors(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("salainen", &PasswordHash::new("not-a-phc-string"))
            .expect_err("malformed hash");
        assert!(matches!(err, PasswordHashError::Malformed { .. }));
    }

    #[rstest]
    fn decoy_hash_is_built_once_and_never_matches(hasher: Argon2PasswordHasher) {
        hasher.verify_decoy("salainen");
        let first = hasher.decoy.get().cloned().flatten().expect("decoy built");

        hasher.verify_decoy("another");
        let second = hasher.decoy.get().cloned().flatten().expect("decoy kept");

        assert_eq!(first, second);
        assert!(first.as_str().starts_with("$argon2id$"));
        assert!(!hasher.verify("salainen", &first).expect("verify"));
    }

    #[rstest]
    fn default_parameters_verify_low_cost_hashes(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("salainen").expect("hash");
        assert!(
            Argon2PasswordHasher::new()
                .verify("salainen", &hash)
                .expect("verify")
        );
    }
}
