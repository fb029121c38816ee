//! Token signing secret configuration.
//!
//! The secret comes from `SECRET`, or from the file named by `SECRET_FILE`.
//! Debug builds, or `SECRET_ALLOW_EPHEMERAL=1`, fall back to a random
//! per-process secret; such tokens stop verifying after a restart.

use std::fmt;
use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::Zeroizing;

use crate::outbound::security::MIN_SECRET_LEN;

const SECRET_ENV: &str = "SECRET";
const SECRET_FILE_ENV: &str = "SECRET_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "SECRET_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const EPHEMERAL_SECRET_LEN: usize = 64;

/// Build mode used to decide how strict validation is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerates missing secrets with a warning.
    Debug,
    /// Requires a configured secret of at least [`MIN_SECRET_LEN`] bytes.
    Release,
}

impl BuildMode {
    /// Mode matching `cfg!(debug_assertions)`.
    ///
    /// ```rust
    /// use bloglist_backend::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Signing secret bytes, wiped on drop.
pub struct TokenSecret {
    bytes: Zeroizing<Vec<u8>>,
    ephemeral: bool,
}

impl TokenSecret {
    /// Raw secret used to sign and verify tokens.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the secret was generated for this process only.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    fn configured(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
            ephemeral: false,
        }
    }

    fn generate() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self {
            bytes: Zeroizing::new(bytes),
            ephemeral: true,
        }
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSecret")
            .field("len", &self.bytes.len())
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

/// Errors raised while resolving the signing secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// No secret is configured and ephemeral secrets are not allowed.
    #[error("missing token secret: set SECRET or SECRET_FILE")]
    MissingSecret,
    /// A toggle holds an unparseable value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The secret file could not be read.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configured secret is too short for release builds.
    #[error("token secret from {origin} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        origin: &'static str,
        length: usize,
        min_len: usize,
    },
}

/// Resolve the token signing secret from the environment.
///
/// # Examples
///
/// ```rust
/// use bloglist_backend::inbound::http::token_config::{BuildMode, token_secret_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     _ => None,
/// });
///
/// let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret configured");
/// assert!(!secret.is_ephemeral());
/// ```
///
/// # Errors
///
/// Returns a [`TokenConfigError`] when release builds lack a usable secret
/// or a toggle is malformed.
pub fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    let allow_ephemeral = mode.is_debug() || allow_ephemeral_from_env(env, mode)?;

    if let Some(secret) = env.string(SECRET_ENV).filter(|value| !value.is_empty()) {
        return checked(secret.into_bytes(), SECRET_ENV, mode);
    }

    if let Some(path) = env.string(SECRET_FILE_ENV).filter(|value| !value.is_empty()) {
        let path = PathBuf::from(path);
        return match std::fs::read(&path) {
            Ok(bytes) => checked(trim_trailing_newlines(bytes), SECRET_FILE_ENV, mode),
            Err(error) if allow_ephemeral => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using ephemeral token secret (dev only)"
                );
                Ok(TokenSecret::generate())
            }
            Err(source) => Err(TokenConfigError::SecretRead { path, source }),
        };
    }

    if allow_ephemeral {
        warn!("no token secret configured; using ephemeral secret (dev only)");
        Ok(TokenSecret::generate())
    } else {
        Err(TokenConfigError::MissingSecret)
    }
}

fn checked(
    bytes: Vec<u8>,
    origin: &'static str,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    let secret = TokenSecret::configured(bytes);
    let length = secret.as_bytes().len();
    if length >= MIN_SECRET_LEN {
        return Ok(secret);
    }
    if mode.is_debug() {
        warn!(origin, length, "token secret shorter than recommended");
        return Ok(secret);
    }
    Err(TokenConfigError::SecretTooShort {
        origin,
        length,
        min_len: MIN_SECRET_LEN,
    })
}

fn trim_trailing_newlines(mut bytes: Vec<u8>) -> Vec<u8> {
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }
    bytes
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid SECRET_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    //! Secret resolution across build modes.
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::io::Write;

    const LONG_SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    fn secret_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write secret");
        file
    }

    #[rstest]
    #[case(BuildMode::Debug)]
    #[case(BuildMode::Release)]
    fn env_secret_is_used_verbatim(#[case] mode: BuildMode) {
        let env = mock_env(&[(SECRET_ENV, LONG_SECRET)]);
        let secret = token_secret_from_env(&env, mode).expect("secret");
        assert_eq!(secret.as_bytes(), LONG_SECRET.as_bytes());
        assert!(!secret.is_ephemeral());
    }

    #[rstest]
    fn secret_file_is_read_without_trailing_newline() {
        let file = secret_file(&format!("{LONG_SECRET}\n"));
        let path = file.path().to_str().expect("utf-8 path").to_owned();
        let env = mock_env(&[(SECRET_FILE_ENV, path.as_str())]);

        let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret");
        assert_eq!(secret.as_bytes(), LONG_SECRET.as_bytes());
    }

    #[rstest]
    fn env_secret_wins_over_file() {
        let file = secret_file("file-secret-file-secret-file-secret");
        let path = file.path().to_str().expect("utf-8 path").to_owned();
        let env = mock_env(&[(SECRET_ENV, LONG_SECRET), (SECRET_FILE_ENV, path.as_str())]);

        let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret");
        assert_eq!(secret.as_bytes(), LONG_SECRET.as_bytes());
    }

    #[rstest]
    fn release_rejects_short_secrets() {
        let env = mock_env(&[(SECRET_ENV, "short")]);
        let err = token_secret_from_env(&env, BuildMode::Release).expect_err("too short");
        assert!(matches!(
            err,
            TokenConfigError::SecretTooShort {
                origin: SECRET_ENV,
                length: 5,
                ..
            }
        ));
    }

    #[rstest]
    fn debug_accepts_short_secrets() {
        let env = mock_env(&[(SECRET_ENV, "short")]);
        let secret = token_secret_from_env(&env, BuildMode::Debug).expect("debug tolerates");
        assert_eq!(secret.as_bytes(), b"short");
    }

    #[rstest]
    fn release_without_secret_is_rejected() {
        let env = mock_env(&[]);
        let err = token_secret_from_env(&env, BuildMode::Release).expect_err("missing");
        assert!(matches!(err, TokenConfigError::MissingSecret));
    }

    #[rstest]
    #[case(BuildMode::Debug, &[])]
    #[case(BuildMode::Release, &[(ALLOW_EPHEMERAL_ENV, "1")])]
    fn ephemeral_secrets_are_random(
        #[case] mode: BuildMode,
        #[case] vars: &[(&str, &str)],
    ) {
        let first = token_secret_from_env(&mock_env(vars), mode).expect("ephemeral");
        let second = token_secret_from_env(&mock_env(vars), mode).expect("ephemeral");

        assert!(first.is_ephemeral());
        assert_eq!(first.as_bytes().len(), EPHEMERAL_SECRET_LEN);
        assert_ne!(first.as_bytes(), second.as_bytes());
    }

    #[rstest]
    fn release_unreadable_file_is_rejected() {
        let env = mock_env(&[(SECRET_FILE_ENV, "/nonexistent/bloglist/secret")]);
        let err = token_secret_from_env(&env, BuildMode::Release).expect_err("unreadable");
        assert!(matches!(err, TokenConfigError::SecretRead { .. }));
    }

    #[rstest]
    fn release_rejects_malformed_toggle() {
        let env = mock_env(&[(ALLOW_EPHEMERAL_ENV, "maybe")]);
        let err = token_secret_from_env(&env, BuildMode::Release).expect_err("invalid toggle");
        assert!(matches!(
            err,
            TokenConfigError::InvalidEnv {
                name: ALLOW_EPHEMERAL_ENV,
                ..
            }
        ));
    }

    #[rstest]
    fn debug_output_hides_secret_bytes() {
        let env = mock_env(&[(SECRET_ENV, LONG_SECRET)]);
        let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret");
        assert!(!format!("{secret:?}").contains(LONG_SECRET));
    }
}
