//! HS256 JSON Web Token implementation of the `TokenIssuer` port.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use crate::domain::TokenClaims;
use crate::domain::ports::{TokenError, TokenIssuer};

/// Shortest secret accepted outside debug builds.
pub const MIN_SECRET_LEN: usize = 32;

/// Signs and verifies tokens with a shared secret.
///
/// Expiry is checked with zero leeway against the system clock.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenIssuer {
    /// Issuer keyed by `secret`.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                kind => {
                    debug!(?kind, "token rejected");
                    TokenError::invalid()
                }
            })
    }
}
