use async_trait::async_trait;

use crate::{
    domain::{Team, User},
    request::TeamRequest,
    Result,
};

/// Port to the Users service.
///
/// Lookups return whatever the service found; unknown handles or ids are
/// simply absent from the result.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Handles may be passed with or without the leading `@`.
    async fn find_users_by_slack_names(&self, slack_names: Vec<String>) -> Result<Vec<User>>;

    async fn find_users_by_uuids(&self, uuids: Vec<String>) -> Result<Vec<User>>;
}

/// Port to the Teams service.
///
/// Team operations answer with a single aggregate, unlike user lookups.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn activate_team(&self, request: TeamRequest) -> Result<Team>;

    /// Deactivate the active team `uuid` belongs to.
    async fn deactivate_team(&self, uuid: &str) -> Result<Team>;

    /// Active team of the member `uuid`.
    async fn get_team(&self, uuid: &str) -> Result<Team>;
}
