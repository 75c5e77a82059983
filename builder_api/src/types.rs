//! Response types for the Builder API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Data component of a Builder evaluation.
///
/// `description` and `error_code` are upstream content passed through
/// verbatim; nothing in this library interprets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseData {
    pub description: String,
    pub error_code: String,
    /// Output variables produced by the tree, keyed by variable name.
    pub vars: HashMap<String, Value>,
}

/// Result of an execution, interaction, or session lookup.
///
/// `session_id` and `request_id` come from the `X-Session-Id` and
/// `X-Request-Id` response headers; the remaining fields from the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub session_id: String,
    pub request_id: String,
    pub tree_version: String,
    pub response_type: String,
    pub data: ResponseData,
}

/// Body envelope of a successful synchronous call.
#[derive(Debug, Deserialize)]
pub(crate) struct ExecutionBody {
    pub tree_version: String,
    pub response_type: String,
    pub data: ResponseData,
}

/// Body envelope of a JSON error payload. The service omits the field on
/// some statuses, so it defaults to empty rather than failing the decode.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: String,
}
