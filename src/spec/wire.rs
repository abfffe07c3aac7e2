//! Serde helpers for the wire representation of a command spec.
//!
//! The transport's structured-attribute encoding only carries strings, so
//! timeouts travel as a human-readable duration (`"500ms"`, `"1h30m"`)
//! and stdin payloads travel as base64.

/// Serde helpers for `Option<Duration>` encoded as a humantime string.
///
/// An unset timeout serializes as `"0s"`; parsing a zero duration yields
/// `None` so the executor's default applies.
pub mod duration_human {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serialize the timeout to a humantime string.
    pub fn serialize<S: Serializer>(
        timeout: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let value = timeout.unwrap_or(Duration::ZERO);
        serializer.serialize_str(&humantime::format_duration(value).to_string())
    }

    /// Deserialize the timeout from a humantime string.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let parsed = humantime::parse_duration(&raw).map_err(serde::de::Error::custom)?;

        if parsed.is_zero() {
            Ok(None)
        } else {
            Ok(Some(parsed))
        }
    }
}

/// Serde helpers for byte payloads encoded as base64 strings.
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes to a standard base64 string.
    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    /// Deserialize bytes from a standard base64 string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        STANDARD.decode(raw).map_err(serde::de::Error::custom)
    }
}
