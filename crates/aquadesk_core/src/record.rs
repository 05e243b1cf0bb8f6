//! The record abstraction every list screen is generic over.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// One row of a backend collection.
///
/// Records are replaced wholesale after a successful round-trip and are never
/// patched field by field on the client.
pub trait Record: Clone + Debug + Serialize + DeserializeOwned + Send + 'static {
    /// Resource-specific identifier (`UserID`, `_id`, `AlertID`, ...)
    type Id: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}
