//! Non-networked repositories serving deterministic data.
//!
//! Selected by the `canned` profile for local runs. They honour the same
//! contract as the networked repositories, including origin-tagged
//! `Exchange` errors for business-rule violations.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::{
    domain::{Team, User},
    errors::{ApiError, Error, Origin, StatusFailure},
    exchange,
    ports::{TeamRepository, UserRepository},
    request::{normalize_slack_names, TeamRequest},
    Result,
};

const CANNED_USERS: &[(&str, &str)] = &[
    ("0f6a4fd2-6b8e-4c1a-9b52-5bd8e1c0a001", "@alice"),
    ("0f6a4fd2-6b8e-4c1a-9b52-5bd8e1c0a002", "@bob"),
    ("0f6a4fd2-6b8e-4c1a-9b52-5bd8e1c0a003", "@carol"),
    ("0f6a4fd2-6b8e-4c1a-9b52-5bd8e1c0a004", "@dave"),
    ("0f6a4fd2-6b8e-4c1a-9b52-5bd8e1c0a005", "@erin"),
    ("0f6a4fd2-6b8e-4c1a-9b52-5bd8e1c0a006", "@frank"),
];

const CANNED_TEAM_UUID: &str = "7c1e2d3f-0000-4000-8000-00000000beef";
const CANNED_TEAM_MEMBERS: &[&str] = &[
    "0f6a4fd2-6b8e-4c1a-9b52-5bd8e1c0a005",
    "0f6a4fd2-6b8e-4c1a-9b52-5bd8e1c0a006",
];

pub const ALREADY_IN_TEAM_MESSAGE: &str = "Sorry, but the user already exists in team!";
pub const NOT_IN_TEAM_MESSAGE: &str = "Sorry, but the user is not a member of any active team!";

/// Fixed user directory.
#[derive(Clone, Debug)]
pub struct CannedUserRepository {
    users: Vec<User>,
}

impl CannedUserRepository {
    pub fn new() -> Self {
        Self::with_users(
            CANNED_USERS
                .iter()
                .map(|(uuid, slack)| User::new(*uuid, *slack))
                .collect(),
        )
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl Default for CannedUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for CannedUserRepository {
    async fn find_users_by_slack_names(&self, slack_names: Vec<String>) -> Result<Vec<User>> {
        let slack_names = normalize_slack_names(slack_names);
        let users: Vec<User> = slack_names
            .iter()
            .filter_map(|name| self.users.iter().find(|u| &u.slack == name).cloned())
            .collect();
        tracing::info!("Found canned users {users:?} for slack names {slack_names:?}");
        Ok(users)
    }

    async fn find_users_by_uuids(&self, uuids: Vec<String>) -> Result<Vec<User>> {
        let users: Vec<User> = uuids
            .iter()
            .filter_map(|uuid| self.users.iter().find(|u| &u.uuid == uuid).cloned())
            .collect();
        tracing::info!("Found canned users {users:?} for uuids {uuids:?}");
        Ok(users)
    }
}

/// One pre-existing active team; every other user is free.
#[derive(Clone, Debug)]
pub struct CannedTeamRepository {
    active: Team,
}

impl CannedTeamRepository {
    pub fn new() -> Self {
        let mut active = Team::new(CANNED_TEAM_MEMBERS.iter().copied());
        active.uuid = Some(CANNED_TEAM_UUID.to_string());
        Self::with_active_team(active)
    }

    pub fn with_active_team(active: Team) -> Self {
        Self { active }
    }

    fn team_of(&self, uuid: &str) -> Result<Team> {
        if self.active.members.contains(uuid) {
            Ok(self.active.clone())
        } else {
            Err(rejected(NOT_IN_TEAM_MESSAGE))
        }
    }
}

impl Default for CannedTeamRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamRepository for CannedTeamRepository {
    async fn activate_team(&self, request: TeamRequest) -> Result<Team> {
        let busy: BTreeSet<&String> = request.members.intersection(&self.active.members).collect();
        if !busy.is_empty() {
            return Err(rejected(ALREADY_IN_TEAM_MESSAGE));
        }
        let team = Team::new(request.members);
        tracing::info!("Activated canned team {team:?}");
        Ok(team)
    }

    async fn deactivate_team(&self, uuid: &str) -> Result<Team> {
        let team = self.team_of(uuid)?;
        tracing::info!("Deactivated canned team {team:?}");
        Ok(team)
    }

    async fn get_team(&self, uuid: &str) -> Result<Team> {
        self.team_of(uuid)
    }
}

fn rejected(message: &str) -> Error {
    let error = ApiError {
        http_status: Some(400.into()),
        ..ApiError::new(message)
    };
    let body = serde_json::to_string(&error).unwrap_or_default();
    exchange::wrap(Origin::Teams, error, StatusFailure { status: 400, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_users_by_slack_names_in_request_order() {
        let repo = CannedUserRepository::new();
        let users = repo
            .find_users_by_slack_names(vec!["bob".into(), "@alice".into(), "nobody".into()])
            .await
            .unwrap();
        let slacks: Vec<&str> = users.iter().map(|u| u.slack.as_str()).collect();
        assert_eq!(slacks, ["@bob", "@alice"]);
    }

    #[tokio::test]
    async fn unknown_uuids_yield_empty_result() {
        let repo = CannedUserRepository::new();
        let users = repo
            .find_users_by_uuids(vec!["missing".into()])
            .await
            .unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn activates_free_members() {
        let repo = CannedTeamRepository::new();
        let team = repo
            .activate_team(TeamRequest::new(["uuid1", "uuid2", "uuid3", "uuid4"]))
            .await
            .unwrap();
        assert_eq!(team, Team::new(["uuid4", "uuid3", "uuid2", "uuid1"]));
    }

    #[tokio::test]
    async fn rejects_member_of_active_team() {
        let repo = CannedTeamRepository::new();
        let err = repo
            .activate_team(TeamRequest::new(["uuid1", CANNED_TEAM_MEMBERS[0]]))
            .await
            .unwrap_err();
        assert_eq!(err.origin(), Some(Origin::Teams));
        assert!(matches!(err, Error::Exchange(_)));
        assert!(err.to_string().contains("already exists in team"));
    }

    #[tokio::test]
    async fn get_and_deactivate_team() {
        let repo = CannedTeamRepository::new();
        let team = repo.get_team(CANNED_TEAM_MEMBERS[1]).await.unwrap();
        assert_eq!(team.uuid.as_deref(), Some(CANNED_TEAM_UUID));

        let team = repo.deactivate_team(CANNED_TEAM_MEMBERS[0]).await.unwrap();
        assert_eq!(team.members.len(), 2);

        let err = repo.get_team("stranger").await.unwrap_err();
        assert!(err.to_string().contains("not a member"));
    }
}
