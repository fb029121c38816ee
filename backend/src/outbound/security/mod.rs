//! Credential adapters: argon2 password hashing and HS256 bearer tokens.

mod argon2_hasher;
mod jwt_token_issuer;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_token_issuer::{JwtTokenIssuer, MIN_SECRET_LEN};
