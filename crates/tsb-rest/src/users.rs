use async_trait::async_trait;
use serde::Serialize;

use tsb_core::{
    config::UsersServiceConfig,
    domain::User,
    errors::Origin,
    ports::UserRepository,
    request::{UserSlackNameRequest, UserUuidRequest},
    Result,
};

use crate::transport::{compose_url, JsonTransport};

/// [`UserRepository`] backed by the Users service.
#[derive(Clone, Debug)]
pub struct RestUserRepository {
    transport: JsonTransport,
    cfg: UsersServiceConfig,
}

impl RestUserRepository {
    pub fn new(transport: JsonTransport, cfg: UsersServiceConfig) -> Self {
        Self { transport, cfg }
    }

    fn url(&self, endpoint: &str) -> String {
        compose_url(&self.cfg.base_url, &self.cfg.api_version, endpoint)
    }

    async fn get_users<B>(&self, url: &str, request: &B) -> Result<Vec<User>>
    where
        B: Serialize + Sync + std::fmt::Debug,
    {
        tracing::debug!("Started request to Users service url '{url}'. Request is: {request:?}");
        let users: Vec<User> = self
            .transport
            .post(url, request)
            .await
            .map_err(|e| e.into_error(Origin::Users))?;
        tracing::debug!("Finished request to Users service. Response is: {users:?}");
        Ok(users)
    }
}

#[async_trait]
impl UserRepository for RestUserRepository {
    async fn find_users_by_slack_names(&self, slack_names: Vec<String>) -> Result<Vec<User>> {
        tracing::debug!("Received slack names to convert: {slack_names:?}");
        let request = UserSlackNameRequest::new(slack_names);
        let url = self.url(&self.cfg.users_by_slack_names);
        let users = self.get_users(&url, &request).await?;
        tracing::info!(
            "Found users {users:?} for slack names {:?}",
            request.slack_names
        );
        Ok(users)
    }

    async fn find_users_by_uuids(&self, uuids: Vec<String>) -> Result<Vec<User>> {
        tracing::debug!("Received uuids to convert: {uuids:?}");
        let request = UserUuidRequest::new(uuids);
        let url = self.url(&self.cfg.users_by_uuids);
        let users = self.get_users(&url, &request).await?;
        tracing::info!("Found users {users:?} for uuids {:?}", request.uuids);
        Ok(users)
    }
}
