use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// A user as reported by the Users service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "id")]
    pub uuid: String,
    #[serde(alias = "slackName")]
    pub slack: String,
}

impl User {
    pub fn new(uuid: impl Into<String>, slack: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            slack: slack.into(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.slack, self.uuid)
    }
}

/// A team as reported by the Teams service.
///
/// Membership is a set: duplicates collapse on decode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub members: BTreeSet<String>,
}

impl Team {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            uuid: None,
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}
