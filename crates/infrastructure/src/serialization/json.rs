//! JSON helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),
}

/// Serializes a value to pretty JSON bytes with a trailing newline.
///
/// Key order follows the source type, so maps should be `BTreeMap`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize + ?Sized>(
    value: &T,
) -> Result<Vec<u8>, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn test_stable_layout() {
        let mut map = BTreeMap::new();
        map.insert("dailybook_username", "alice");
        map.insert("dailybook_token", "tok");

        let json = String::from_utf8(to_json_stable_bytes(&map).unwrap()).unwrap();
        assert_eq!(
            json,
            "{\n  \"dailybook_token\": \"tok\",\n  \"dailybook_username\": \"alice\"\n}\n"
        );
    }

    #[test]
    fn test_from_json_bytes_rejects_wrong_shape() {
        let result: Result<BTreeMap<String, String>, _> = from_json_bytes(b"[1, 2]");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
