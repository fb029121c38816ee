//! Port for one-way password hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by hashing adapters.
    pub enum PasswordHashError {
        /// Hash could not be computed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// Stored hash could not be parsed.
        Malformed { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Salted one-way hash for account passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plain` with a fresh salt.
    fn hash(&self, plain: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Whether `plain` matches `hash`.
    fn verify(&self, plain: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;

    /// Run a verification of `plain` against a throwaway hash.
    ///
    /// Called for unknown accounts so a failed login costs the same whether
    /// or not the username exists.
    fn verify_decoy(&self, plain: &str);
}
