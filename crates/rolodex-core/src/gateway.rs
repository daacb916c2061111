// ── Remote Data Gateway seam ──
//
// Controllers talk to the remote API only through `Gateway`. `ApiGateway`
// is the HTTP implementation over `rolodex_api::RolodexClient`; tests
// substitute in-memory fakes.

use std::future::Future;

use rolodex_api::types::{ResourceId, SocialMediaRequest, UserRequest};
use rolodex_api::{RolodexClient, TransportConfig};
use tracing::debug;

use crate::config::GatewayConfig;
use crate::error::CoreError;
use crate::model::{EntityId, SocialMediaLink, SocialMediaPayload, User, UserPayload};

/// The asynchronous CRUD surface the controllers depend on.
///
/// Every method either returns the confirmed server payload or a
/// gateway failure; implementations never touch controller state.
pub trait Gateway: Send + Sync + 'static {
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, CoreError>> + Send;

    fn get_user(&self, id: &EntityId) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn create_user(
        &self,
        payload: &UserPayload,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn update_user(
        &self,
        id: &EntityId,
        payload: &UserPayload,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn delete_user(&self, id: &EntityId) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn list_social_media(
        &self,
        user_id: &EntityId,
    ) -> impl Future<Output = Result<Vec<SocialMediaLink>, CoreError>> + Send;

    fn create_social_media(
        &self,
        user_id: &EntityId,
        payload: &SocialMediaPayload,
    ) -> impl Future<Output = Result<SocialMediaLink, CoreError>> + Send;

    fn delete_social_media(
        &self,
        user_id: &EntityId,
        link_id: &EntityId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

// ── HTTP implementation ──────────────────────────────────────────────

/// [`Gateway`] backed by the REST API.
pub struct ApiGateway {
    client: RolodexClient,
}

impl ApiGateway {
    pub fn new(client: RolodexClient) -> Self {
        Self { client }
    }

    /// Build the HTTP client described by `config`.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = RolodexClient::new(config.api_url.as_str(), &transport)?;
        debug!(api_url = %config.api_url, "gateway configured");
        Ok(Self::new(client))
    }
}

impl Gateway for ApiGateway {
    async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        let users = self.client.list_users().await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, id: &EntityId) -> Result<User, CoreError> {
        let user = self.client.get_user(&ResourceId::from(id)).await?;
        Ok(user.into())
    }

    async fn create_user(&self, payload: &UserPayload) -> Result<User, CoreError> {
        let user = self.client.create_user(&UserRequest::from(payload)).await?;
        Ok(user.into())
    }

    async fn update_user(&self, id: &EntityId, payload: &UserPayload) -> Result<User, CoreError> {
        let user = self
            .client
            .update_user(&ResourceId::from(id), &UserRequest::from(payload))
            .await?;
        Ok(user.into())
    }

    async fn delete_user(&self, id: &EntityId) -> Result<(), CoreError> {
        self.client.delete_user(&ResourceId::from(id)).await?;
        Ok(())
    }

    async fn list_social_media(&self, user_id: &EntityId) -> Result<Vec<SocialMediaLink>, CoreError> {
        let links = self
            .client
            .list_social_media(&ResourceId::from(user_id))
            .await?;
        Ok(links.into_iter().map(SocialMediaLink::from).collect())
    }

    async fn create_social_media(
        &self,
        user_id: &EntityId,
        payload: &SocialMediaPayload,
    ) -> Result<SocialMediaLink, CoreError> {
        let link = self
            .client
            .create_social_media(&ResourceId::from(user_id), &SocialMediaRequest::from(payload))
            .await?;
        Ok(link.into())
    }

    async fn delete_social_media(
        &self,
        user_id: &EntityId,
        link_id: &EntityId,
    ) -> Result<(), CoreError> {
        self.client
            .delete_social_media(&ResourceId::from(user_id), &ResourceId::from(link_id))
            .await?;
        Ok(())
    }
}
