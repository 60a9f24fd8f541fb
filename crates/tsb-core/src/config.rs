use std::{env, str::FromStr, time::Duration};

use crate::{errors::Error, Result};

/// Which repository implementations are wired at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    /// Networked repositories talking to the Users/Teams services.
    Production,
    /// Deterministic in-process data, no network.
    Canned,
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "production" | "default" => Ok(Profile::Production),
            "canned" | "mock" | "test" => Ok(Profile::Canned),
            other => Err(Error::Config(format!("unknown profile: {other}"))),
        }
    }
}

/// Location of the Users service endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsersServiceConfig {
    pub base_url: String,
    pub api_version: String,
    pub users_by_slack_names: String,
    pub users_by_uuids: String,
}

/// Location of the Teams service endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamsServiceConfig {
    pub base_url: String,
    pub api_version: String,
    pub activate_team: String,
    pub deactivate_team: String,
    pub get_team: String,
}

/// Typed configuration, populated once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub profile: Profile,
    pub users: UsersServiceConfig,
    pub teams: TeamsServiceConfig,
    /// `None` keeps the HTTP client's default.
    pub http_timeout: Option<Duration>,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    ///
    /// Variables already set in the environment take precedence over `.env`.
    pub fn load() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(Error::Config(format!(".env could not be loaded: {e}")));
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .and_then(non_empty)
                .unwrap_or_else(|| default.to_string())
        };

        let profile: Profile = lookup("TSB_PROFILE").unwrap_or_default().parse()?;

        let users = UsersServiceConfig {
            base_url: get("USERS_BASE_URL", "http://127.0.0.1:8080"),
            api_version: get("USERS_REST_API_VERSION", "/v1"),
            users_by_slack_names: get(
                "USERS_ENDPOINT_USERS_BY_SLACK_NAMES",
                "/users/usersBySlackNames",
            ),
            users_by_uuids: get("USERS_ENDPOINT_USERS_BY_UUIDS", "/users/usersByUuids"),
        };

        let teams = TeamsServiceConfig {
            base_url: get("TEAMS_BASE_URL", "http://127.0.0.1:8081"),
            api_version: get("TEAMS_REST_API_VERSION", "/v1"),
            activate_team: get("TEAMS_ENDPOINT_ACTIVATE_TEAM", "/teams"),
            deactivate_team: get("TEAMS_ENDPOINT_DEACTIVATE_TEAM", "/teams/users/"),
            get_team: get("TEAMS_ENDPOINT_GET_TEAM", "/teams/users/"),
        };

        let http_timeout = match lookup("HTTP_TIMEOUT_MS").and_then(non_empty) {
            Some(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|_| {
                    Error::Config(format!("HTTP_TIMEOUT_MS must be a number, got {raw:?}"))
                })?;
                Some(Duration::from_millis(ms))
            }
            None => None,
        };

        Ok(Self {
            profile,
            users,
            teams,
            http_timeout,
        })
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
