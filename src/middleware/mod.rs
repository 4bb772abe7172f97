/// Middleware module
///
/// Request authentication and file-server hit counting.

mod bearer_auth;
mod metrics;

pub use bearer_auth::AuthenticatedUser;
pub use metrics::{CountHits, FileserverHits};
