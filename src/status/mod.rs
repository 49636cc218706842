//! Status API module
//!
//! Local HTTP surface for cached verdicts: a JSON API plus an embedded
//! HTML status page. The surface is read-only; the one POST route runs the
//! stateless evaluator on a caller-supplied snapshot.

mod error;
mod handlers;
mod html;
mod server;

pub use self::error::{ErrorResponse, StatusError, StatusResult};
pub use self::handlers::{EvaluateRequest, StatusState};
pub use self::server::{build_router, start_status_server, StatusServerConfig};
