use async_trait::async_trait;

use reqwest::Url;
use tsb_core::{
    config::TeamsServiceConfig,
    domain::Team,
    errors::{Error, Origin},
    ports::TeamRepository,
    request::TeamRequest,
    Result,
};

use crate::transport::{compose_url, JsonTransport, TransportError};

/// [`TeamRepository`] backed by the Teams service.
#[derive(Clone, Debug)]
pub struct RestTeamRepository {
    transport: JsonTransport,
    cfg: TeamsServiceConfig,
}

impl RestTeamRepository {
    pub fn new(transport: JsonTransport, cfg: TeamsServiceConfig) -> Self {
        Self { transport, cfg }
    }

    fn url(&self, endpoint: &str) -> String {
        compose_url(&self.cfg.base_url, &self.cfg.api_version, endpoint)
    }

    /// Endpoint URL with the member uuid appended as a single, encoded path segment.
    fn member_url(&self, endpoint: &str, uuid: &str) -> Result<Url> {
        let raw = self.url(endpoint);
        let mut url = Url::parse(&raw)
            .map_err(|e| Error::Config(format!("invalid teams service url {raw:?}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("teams service url {raw:?} cannot take a path")))?
            .pop_if_empty()
            .push(uuid);
        Ok(url)
    }
}

fn into_error(e: TransportError) -> Error {
    e.into_error(Origin::Teams)
}

#[async_trait]
impl TeamRepository for RestTeamRepository {
    async fn activate_team(&self, request: TeamRequest) -> Result<Team> {
        let url = self.url(&self.cfg.activate_team);
        tracing::debug!("Started request to Teams service url '{url}'. Request is: {request:?}");
        let team: Team = self
            .transport
            .post(&url, &request)
            .await
            .map_err(into_error)?;
        tracing::info!("Activated team {team:?}");
        Ok(team)
    }

    async fn deactivate_team(&self, uuid: &str) -> Result<Team> {
        let url = self.member_url(&self.cfg.deactivate_team, uuid)?;
        tracing::debug!("Started deactivate request to Teams service url '{url}'");
        let team: Team = self.transport.put(url.as_str()).await.map_err(into_error)?;
        tracing::info!("Deactivated team {team:?} of user '{uuid}'");
        Ok(team)
    }

    async fn get_team(&self, uuid: &str) -> Result<Team> {
        let url = self.member_url(&self.cfg.get_team, uuid)?;
        tracing::debug!("Started get request to Teams service url '{url}'");
        let team: Team = self.transport.get(url.as_str()).await.map_err(into_error)?;
        tracing::info!("Found team {team:?} of user '{uuid}'");
        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn repo(server: &MockServer) -> RestTeamRepository {
        RestTeamRepository::new(
            JsonTransport::new(None).unwrap(),
            TeamsServiceConfig {
                base_url: server.uri(),
                api_version: "/v1".to_string(),
                activate_team: "/teams".to_string(),
                deactivate_team: "/teams/users/".to_string(),
                get_team: "/teams/users/".to_string(),
            },
        )
    }

    fn members() -> TeamRequest {
        TeamRequest::new(["uuid1", "uuid2", "uuid3", "uuid4"])
    }

    #[tokio::test]
    async fn activate_team_returns_activated_team() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/teams"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "members": ["uuid1", "uuid2", "uuid3", "uuid4"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "members": ["uuid4", "uuid2", "uuid1", "uuid3"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = members();
        let team = repo(&server).activate_team(request.clone()).await.unwrap();
        assert_eq!(team.members, request.members);
    }

    #[tokio::test]
    async fn activate_team_when_user_in_active_team_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/teams"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "httpStatus": 400,
                "internalErrorCode": "TMF-F1-D4",
                "clientMessage": "Sorry, but the user already exists in team!",
                "developerMessage": "The reason of the exception is that user already in another active team",
                "exceptionMessage": "User(s) '#uuid1,uuid2#' exist(s) in another teams",
                "detailErrors": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = repo(&server).activate_team(members()).await.unwrap_err();

        assert!(err
            .to_string()
            .contains("Sorry, but the user already exists in team"));
        match err {
            Error::Exchange(ex) => {
                assert_eq!(ex.origin, Origin::Teams);
                assert_eq!(ex.error.code().as_deref(), Some("TMF-F1-D4"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn activate_team_expects_object_not_array() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "members": ["uuid1"] }
            ])))
            .mount(&server)
            .await;

        let err = repo(&server).activate_team(members()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedResponse { origin: Origin::Teams, .. }
        ));
    }

    #[tokio::test]
    async fn deactivate_team_puts_member_uuid() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/teams/users/uuid1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uuid": "team-1",
                "members": ["uuid1", "uuid2"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let team = repo(&server).deactivate_team("uuid1").await.unwrap();
        assert_eq!(team.uuid.as_deref(), Some("team-1"));
        assert_eq!(team, {
            let mut t = Team::new(["uuid2", "uuid1"]);
            t.uuid = Some("team-1".to_string());
            t
        });
    }

    #[tokio::test]
    async fn get_team_of_free_user_fails_with_teams_origin() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/teams/users/uuid9"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": "You cannot get team if the user not a member of any team!"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = repo(&server).get_team("uuid9").await.unwrap_err();
        assert_eq!(err.origin(), Some(Origin::Teams));
        assert!(err.to_string().contains("not a member of any team"));
    }

    #[tokio::test]
    async fn member_uuid_is_encoded_as_one_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/teams/users/a%2Fb%3Fc%23d"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "members": ["a/b?c#d"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let team = repo(&server).get_team("a/b?c#d").await.unwrap();
        assert_eq!(team, Team::new(["a/b?c#d"]));
    }

    #[test]
    fn member_url_without_trailing_slash_still_appends_segment() {
        let repo = RestTeamRepository::new(
            JsonTransport::new(None).unwrap(),
            TeamsServiceConfig {
                base_url: "http://teams.local".to_string(),
                api_version: "/v1".to_string(),
                activate_team: "/teams".to_string(),
                deactivate_team: "/teams/users".to_string(),
                get_team: "/teams/users/".to_string(),
            },
        );
        assert_eq!(
            repo.member_url("/teams/users", "uuid 1").unwrap().as_str(),
            "http://teams.local/v1/teams/users/uuid%201"
        );
        assert_eq!(
            repo.member_url("/teams/users/", "uuid1").unwrap().as_str(),
            "http://teams.local/v1/teams/users/uuid1"
        );
    }
}
