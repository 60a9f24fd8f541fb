//! Users/Teams service adapter over HTTP (reqwest).
//!
//! Implements the repository ports from `tsb-core` with one JSON request per
//! call. Non-2xx responses go through `tsb_core::exchange` before reaching
//! the caller.

pub mod teams;
pub mod transport;
pub mod users;

pub use teams::RestTeamRepository;
pub use transport::{compose_url, JsonTransport, TransportError};
pub use users::RestUserRepository;
