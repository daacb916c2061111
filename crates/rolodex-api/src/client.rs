// Hand-crafted async HTTP client for the rolodex REST API.
//
// Base path: {api_url}/users
// Auth: none

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    ErrorResponse, ResourceId, SocialMediaRequest, SocialMediaResponse, UserRequest, UserResponse,
};

/// Longest slice of an error body kept in [`Error::Http`].
const ERROR_PREVIEW_LEN: usize = 200;

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the users / social-media API.
///
/// Communicates via JSON REST endpoints under the configured base URL
/// (e.g. `http://localhost:3000/api`). Every non-2xx response becomes an
/// [`Error::Http`], whatever its body says.
pub struct RolodexClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
}

impl RolodexClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout_secs: transport.timeout.as_secs(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers and timeouts).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout_secs: 0,
        })
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append percent-encoded path segments onto the base URL.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `normalize_base_url` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(|e| self.transport(e))?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        self.handle_response(resp).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PATCH {url}");

        let resp = self
            .http
            .patch(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        self.handle_response(resp).await
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    fn transport(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await.map_err(|e| self.transport(e))?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(ERROR_PREVIEW_LEN).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %raw, "request rejected");

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse {
                message: Some(message),
                ..
            }) => message.into_text(),
            Ok(ErrorResponse {
                error: Some(error), ..
            }) => error,
            _ if raw.trim().is_empty() => status.to_string(),
            _ => raw.chars().take(ERROR_PREVIEW_LEN).collect(),
        };

        Error::Http {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Users ────────────────────────────────────────────────────────

    /// `GET /users`
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, Error> {
        self.get(self.url(&["users"])).await
    }

    /// `GET /users/{id}`
    pub async fn get_user(&self, user_id: &ResourceId) -> Result<UserResponse, Error> {
        let id = user_id.to_string();
        self.get(self.url(&["users", &id])).await
    }

    /// `POST /users`
    pub async fn create_user(&self, body: &UserRequest) -> Result<UserResponse, Error> {
        self.post(self.url(&["users"]), body).await
    }

    /// `PATCH /users/{id}`
    pub async fn update_user(
        &self,
        user_id: &ResourceId,
        body: &UserRequest,
    ) -> Result<UserResponse, Error> {
        let id = user_id.to_string();
        self.patch(self.url(&["users", &id]), body).await
    }

    /// `DELETE /users/{id}`
    pub async fn delete_user(&self, user_id: &ResourceId) -> Result<(), Error> {
        let id = user_id.to_string();
        self.delete(self.url(&["users", &id])).await
    }

    // ── Social media ─────────────────────────────────────────────────

    /// `GET /users/{id}/social-media`
    pub async fn list_social_media(
        &self,
        user_id: &ResourceId,
    ) -> Result<Vec<SocialMediaResponse>, Error> {
        let id = user_id.to_string();
        self.get(self.url(&["users", &id, "social-media"])).await
    }

    /// `POST /users/{id}/social-media`
    pub async fn create_social_media(
        &self,
        user_id: &ResourceId,
        body: &SocialMediaRequest,
    ) -> Result<SocialMediaResponse, Error> {
        let id = user_id.to_string();
        self.post(self.url(&["users", &id, "social-media"]), body)
            .await
    }

    /// `DELETE /users/{id}/social-media/{linkId}`
    pub async fn delete_social_media(
        &self,
        user_id: &ResourceId,
        link_id: &ResourceId,
    ) -> Result<(), Error> {
        let id = user_id.to_string();
        let link = link_id.to_string();
        self.delete(self.url(&["users", &id, "social-media", &link]))
            .await
    }
}
