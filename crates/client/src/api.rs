//! Request dispatcher.
//!
//! One place builds every outbound call: the bearer token is attached here
//! when the session has one, and authorization failures are handled here
//! and nowhere else. Callers propagate the typed error upward; they never
//! special-case 401/403 themselves.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionHandle;
use crate::store::CredentialStore;

/// Error body shape the backend uses for every failure.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP dispatcher for the Flyercraft backend.
///
/// Cheap to clone; all clones share one connection pool and one session
/// handle.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: SessionHandle,
}

impl ApiClient {
    /// Build a dispatcher over the given credential store.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_base_url.clone(),
                session: SessionHandle::new(store),
            }),
        })
    }

    /// The session handle this dispatcher reads the token from and tears
    /// down on authorization failure.
    #[must_use]
    pub fn session(&self) -> &SessionHandle {
        &self.inner.session
    }

    /// Execute a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.inner.http.get(self.url(path)?);
        self.dispatch(builder, path).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.inner.http.post(self.url(path)?).json(body);
        self.dispatch(builder, path).await
    }

    /// Execute a POST request with an empty JSON object body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.post(path, &serde_json::json!({})).await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.inner.http.put(self.url(path)?).json(body);
        self.dispatch(builder, path).await
    }

    /// Execute a DELETE request, discarding any response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.inner.http.request(Method::DELETE, self.url(path)?);
        let (response, authenticated) = self.send(builder, path).await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(self.error_from(response, authenticated).await)
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidPath(format!("{path}: {e}")))
    }

    /// Attach the bearer token (when present) and send. Returns whether the
    /// call actually carried a credential, which decides how 401/403 is
    /// classified.
    async fn send(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> Result<(Response, bool), ApiError> {
        let token = self.inner.session.token();
        let authenticated = token.is_some();

        let builder = match token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        };

        tracing::debug!(path, authenticated, "dispatching request");
        let response = builder.send().await?;
        Ok((response, authenticated))
    }

    #[instrument(skip(self, builder))]
    async fn dispatch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let (response, authenticated) = self.send(builder, path).await?;

        if response.status().is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::Parse(e.to_string()));
        }

        Err(self.error_from(response, authenticated).await)
    }

    /// Classify a non-2xx response.
    ///
    /// 401/403 on a call that carried a bearer token means the credential is
    /// no longer valid: the session is torn down here, exactly once, before
    /// the error is returned - so no caller ever needs to do it. The same
    /// statuses on an unauthenticated call (a bad login) are ordinary
    /// validation failures carrying the server's message.
    async fn error_from(&self, response: Response, authenticated: bool) -> ApiError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);

        if authenticated
            && matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        {
            tracing::warn!(status = status.as_u16(), "authorization failure; tearing down session");
            self.inner.session.teardown();
            return ApiError::AuthorizationExpired;
        }

        if status.is_client_error() {
            ApiError::Validation {
                status: status.as_u16(),
                message,
            }
        } else {
            ApiError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}
