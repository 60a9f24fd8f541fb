//! Outbound payloads for the Users and Teams services.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Leading marker every Slack handle carries on the wire.
pub const SLACK_NAME_PREFIX: char = '@';

/// Prepend `@` to every handle that lacks it, in place.
pub fn add_at_to_slack_names(slack_names: &mut [String]) {
    for name in slack_names.iter_mut() {
        if !name.starts_with(SLACK_NAME_PREFIX) {
            name.insert(0, SLACK_NAME_PREFIX);
        }
    }
}

/// Owned variant of [`add_at_to_slack_names`]. Order is preserved, nothing is deduplicated.
pub fn normalize_slack_names(mut slack_names: Vec<String>) -> Vec<String> {
    add_at_to_slack_names(&mut slack_names);
    slack_names
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSlackNameRequest {
    pub slack_names: Vec<String>,
}

impl UserSlackNameRequest {
    /// Handles are normalized here, callers may pass them with or without `@`.
    pub fn new(slack_names: Vec<String>) -> Self {
        Self {
            slack_names: normalize_slack_names(slack_names),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUuidRequest {
    pub uuids: Vec<String>,
}

impl UserUuidRequest {
    pub fn new(uuids: Vec<String>) -> Self {
        Self { uuids }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRequest {
    pub members: BTreeSet<String>,
}

impl TeamRequest {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}
