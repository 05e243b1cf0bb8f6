use std::collections::BTreeMap;

use aquadesk_core::SubmitFailure;
use serde::Deserialize;

/// Failure of one REST call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Connection refused, timeout, TLS failure...
    #[error("could not reach the server: {0}")]
    Transport(String),

    /// Non-2xx status. `message` is the backend's `error` text when it sent
    /// one, otherwise `response not ok (<status>)`.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        details: BTreeMap<String, String>,
    },

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Error payload some backend routes attach to a failure
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

impl ApiError {
    /// Interpret a non-2xx response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let generic = || ApiError::Status {
            status,
            message: format!("response not ok ({status})"),
            details: BTreeMap::new(),
        };

        let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
            return generic();
        };
        if parsed.error.trim().is_empty() {
            return generic();
        }

        // Only an object of field -> message is usable as field errors
        let details = match parsed.details {
            Some(serde_json::Value::Object(map)) => map
                .into_iter()
                .map(|(field, msg)| {
                    let text = match msg {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (field, text)
                })
                .collect(),
            _ => BTreeMap::new(),
        };

        ApiError::Status {
            status,
            message: parsed.error,
            details,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Form-facing view: the message for the `api` banner plus field details
    pub fn to_submit_failure(&self) -> SubmitFailure {
        let mut failure = SubmitFailure::new(self.to_string());
        if let ApiError::Status { details, .. } = self {
            for (field, message) in details {
                failure = failure.with_detail(field.clone(), message.clone());
            }
        }
        failure
    }
}
