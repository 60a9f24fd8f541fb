use std::fmt;

use serde::{Deserialize, Serialize};

/// Which remote service a failure came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    Users,
    Teams,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Users => "users",
            Origin::Teams => "teams",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure description returned by the Users/Teams services.
///
/// Both the short `{message, fields}` shape and the verbose
/// `{clientMessage, detailErrors, ...}` shape decode into this type. Only a
/// missing message makes a body unreadable; the diagnostic extras are kept
/// as raw JSON whatever their shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawApiError")]
pub struct ApiError {
    pub message: String,
    pub fields: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_error_code: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_message: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_message: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Service-specific error code, if one was reported.
    pub fn code(&self) -> Option<String> {
        self.internal_error_code.as_ref().and_then(|v| match v {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(code) = self.code() {
            write!(f, " [{code}]")?;
        }
        Ok(())
    }
}

/// Wire shape of an error body before it is checked for a message.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawApiError {
    message: Option<String>,
    client_message: Option<String>,
    fields: Option<serde_json::Value>,
    detail_errors: Option<serde_json::Value>,
    http_status: Option<serde_json::Value>,
    internal_error_code: Option<serde_json::Value>,
    developer_message: Option<serde_json::Value>,
    exception_message: Option<serde_json::Value>,
}

impl TryFrom<RawApiError> for ApiError {
    type Error = String;

    fn try_from(raw: RawApiError) -> std::result::Result<Self, Self::Error> {
        let message = raw
            .message
            .or(raw.client_message)
            .ok_or_else(|| "missing field `message`".to_string())?;

        let fields = match raw.fields.or(raw.detail_errors) {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(serde_json::Value::Array(items)) => items,
            Some(other) => vec![other],
        };

        Ok(Self {
            message,
            fields,
            http_status: raw.http_status,
            internal_error_code: raw.internal_error_code,
            developer_message: raw.developer_message,
            exception_message: raw.exception_message,
        })
    }
}

/// A non-2xx response as captured by the transport: status plus raw body.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("remote responded with status {status}")]
pub struct StatusFailure {
    pub status: u16,
    pub body: String,
}

/// A remote business-rule failure, translated into domain terms.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{origin} service exchange failed: {error}")]
pub struct ExchangeError {
    pub origin: Origin,
    pub error: ApiError,
    #[source]
    pub cause: StatusFailure,
}

/// Core error type for the gateway.
///
/// Adapter crates map their specific failures into this type so callers can
/// tell business-rule failures apart from transport and decoding problems.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("{origin} service unreachable: {reason}")]
    Transport { origin: Origin, reason: String },

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error("{origin} service returned status {status} with an unreadable error body: {source}")]
    UnreadableErrorBody {
        origin: Origin,
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin} service returned a malformed response: {reason}")]
    MalformedResponse { origin: Origin, reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Origin of a remote failure; `None` for local errors.
    pub fn origin(&self) -> Option<Origin> {
        match self {
            Error::Transport { origin, .. }
            | Error::UnreadableErrorBody { origin, .. }
            | Error::MalformedResponse { origin, .. } => Some(*origin),
            Error::Exchange(e) => Some(e.origin),
            Error::Config(_) | Error::Json(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
