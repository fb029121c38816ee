//! Reqwest-backed access to the blog list REST API.
//!
//! The adapter owns transport details only: URL building, bearer headers,
//! status mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;
use crate::model::{Blog, Credentials, LoggedUser, NewBlog};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Operations the client application needs from the server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogApi: Send + Sync {
    /// Fetch every blog.
    async fn list_blogs(&self) -> Result<Vec<Blog>, ClientError>;

    /// Create a blog owned by the holder of `token`.
    async fn create_blog(&self, token: &str, blog: &NewBlog) -> Result<Blog, ClientError>;

    /// Exchange credentials for a session.
    async fn login(&self, credentials: &Credentials) -> Result<LoggedUser, ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP implementation of [`BlogApi`].
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the reqwest client cannot be
    /// constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Server root all endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Transport {
                message: format!("invalid endpoint {path}: {err}"),
            })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await.map_err(transport_error)?;
        let checked = check_status(response).await?;
        checked.json::<T>().await.map_err(|err| ClientError::Decode {
            message: err.to_string(),
        })
    }
}

// `Url::join` replaces the last segment unless the base ends with `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn transport_error(err: reqwest::Error) -> ClientError {
    ClientError::Transport {
        message: err.to_string(),
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.trim().to_owned(),
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.map_err(transport_error)?;
    debug!(status = status.as_u16(), "request rejected");
    Err(ClientError::Status {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

#[async_trait]
impl BlogApi for ApiClient {
    async fn list_blogs(&self) -> Result<Vec<Blog>, ClientError> {
        let url = self.endpoint("api/blogs")?;
        Self::send_json(self.client.get(url)).await
    }

    async fn create_blog(&self, token: &str, blog: &NewBlog) -> Result<Blog, ClientError> {
        let url = self.endpoint("api/blogs")?;
        Self::send_json(self.client.post(url).bearer_auth(token).json(blog)).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoggedUser, ClientError> {
        let url = self.endpoint("api/login")?;
        Self::send_json(self.client.post(url).json(credentials)).await
    }
}
