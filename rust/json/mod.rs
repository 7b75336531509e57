//! Convert the crate's data types to and from JSON strings, with the ``serde`` crate.
//!
//! Records and repeat states cross into storage and UI layers that are not written in Rust;
//! JSON is the neutral form they are exchanged in.

#[cfg(feature = "python")]
pub mod json_py;

use serde::{Deserialize, Serialize};

/// Handles the `to` and `from` JSON conversion.
pub trait JSON: Serialize + for<'de> Deserialize<'de> {
    /// Return a JSON string representing the object.
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Create an object from a JSON string representation.
    fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
