//! Port for signing and verifying bearer tokens.

use crate::domain::TokenClaims;

use super::define_port_error;

define_port_error! {
    /// Token signing and verification failures.
    pub enum TokenError {
        /// The token's expiry has passed.
        Expired => "token expired",
        /// Signature, encoding or claims are invalid.
        Invalid => "token invalid",
        /// Claims could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs claims into compact tokens and verifies them back.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Produce a signed token for `claims`.
    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError>;

    /// Verify signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
