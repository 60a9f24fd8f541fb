//! Translation of remote error responses into domain errors.

use crate::errors::{ApiError, Error, ExchangeError, Origin, StatusFailure};

/// Parse a raw error body into an [`ApiError`].
pub fn translate(raw_body: &str) -> Result<ApiError, serde_json::Error> {
    serde_json::from_str(raw_body)
}

/// Wrap a parsed [`ApiError`] together with the failure that carried it.
pub fn wrap(origin: Origin, error: ApiError, cause: StatusFailure) -> Error {
    Error::Exchange(ExchangeError {
        origin,
        error,
        cause,
    })
}

/// Turn a captured non-2xx response into the matching [`Error`].
///
/// A body that is not a JSON `ApiError` yields [`Error::UnreadableErrorBody`],
/// never an `Exchange` error.
pub fn translate_failure(origin: Origin, failure: StatusFailure) -> Error {
    match translate(&failure.body) {
        Ok(error) => {
            tracing::warn!(
                origin = origin.as_str(),
                status = failure.status,
                "remote service returned an error: {error}"
            );
            wrap(origin, error, failure)
        }
        Err(source) => {
            tracing::warn!(
                origin = origin.as_str(),
                status = failure.status,
                "remote service returned an unreadable error body"
            );
            Error::UnreadableErrorBody {
                origin,
                status: failure.status,
                body: failure.body,
                source,
            }
        }
    }
}
