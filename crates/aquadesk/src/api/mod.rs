//! REST access to the water-utility backend.
//!
//! [`Backend`] is the seam between the console and the network. The API
//! worker owns one and turns [`ApiRequest`]s into [`ApiResponse`]s; screens
//! only ever see the messages.

mod error;
#[cfg(test)]
pub(crate) mod fake;
#[cfg(feature = "native")]
mod http;

use aquadesk_core::ResourceKind;
use serde_json::Value;

use crate::state::ScreenToken;

pub use error::ApiError;
#[cfg(feature = "native")]
pub use http::HttpBackend;

/// CRUD over `/api/<resource>`.
///
/// Bodies and records are raw JSON; typing them is the screen's job.
pub trait Backend: Send + Sync {
    /// `GET /api/<resource>`: the whole collection
    fn list(&self, kind: ResourceKind) -> Result<Vec<Value>, ApiError>;

    /// `POST /api/<resource>`: the created record
    fn create(&self, kind: ResourceKind, body: &Value) -> Result<Value, ApiError>;

    /// `PUT /api/<resource>/<id>`: the updated record
    fn update(&self, kind: ResourceKind, id: &str, body: &Value) -> Result<Value, ApiError>;

    /// `DELETE /api/<resource>/<id>`
    fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Create(Value),
    Update { id: String, body: Value },
    Delete { id: String },
    /// One DELETE per id, issued concurrently
    BulkDelete { ids: Vec<String> },
}

impl ApiCall {
    pub fn name(&self) -> &'static str {
        match self {
            ApiCall::List => "list",
            ApiCall::Create(_) => "create",
            ApiCall::Update { .. } => "update",
            ApiCall::Delete { .. } => "delete",
            ApiCall::BulkDelete { .. } => "bulk_delete",
        }
    }
}

/// A call tagged with the screen mount that issued it
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub token: ScreenToken,
    pub kind: ResourceKind,
    pub call: ApiCall,
}

/// Outcome of one id within a bulk delete
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteReport {
    pub id: String,
    pub result: Result<(), ApiError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    Listed(Result<Vec<Value>, ApiError>),
    Created(Result<Value, ApiError>),
    Updated {
        id: String,
        result: Result<Value, ApiError>,
    },
    Deleted {
        id: String,
        result: Result<(), ApiError>,
    },
    /// In the order the ids were requested
    BulkDeleted(Vec<DeleteReport>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub token: ScreenToken,
    pub kind: ResourceKind,
    pub outcome: ApiOutcome,
}
