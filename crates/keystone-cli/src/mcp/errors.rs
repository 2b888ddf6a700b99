//! Translation of lifecycle errors into MCP errors.
//!
//! Each [`ErrorKind`] maps to an HTTP-style status code, carried in the
//! error data so clients can tell a missing project from a refused
//! transition without parsing the message.

use keystone_core::{ErrorKind, LifecycleError};
use rmcp::ErrorData;
use serde_json::json;

/// HTTP-style status code for an error kind.
pub fn status_code(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::NotFound => 404,
        ErrorKind::InvalidStatus
        | ErrorKind::InvalidTransition
        | ErrorKind::PreconditionFailed
        | ErrorKind::InvalidInput => 400,
        ErrorKind::Unauthorized => 403,
        ErrorKind::StoreUnavailable | ErrorKind::Internal => 500,
    }
}

/// Convert a lifecycle error into an MCP error prefixed with `message`.
pub fn to_mcp_error(message: &str, error: &LifecycleError) -> ErrorData {
    let kind = error.kind();
    let text = format!("{message}: {error}");
    let data = Some(json!({
        "status": status_code(kind),
        "kind": format!("{kind:?}"),
    }));

    match kind {
        ErrorKind::NotFound => ErrorData::resource_not_found(text, data),
        ErrorKind::Unauthorized => ErrorData::invalid_request(text, data),
        ErrorKind::StoreUnavailable | ErrorKind::Internal => ErrorData::internal_error(text, data),
        ErrorKind::InvalidStatus
        | ErrorKind::InvalidTransition
        | ErrorKind::PreconditionFailed
        | ErrorKind::InvalidInput => ErrorData::invalid_params(text, data),
    }
}
