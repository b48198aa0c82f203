use crate::errors::CoreError;
use crate::models::snapshot::{Snapshot, CURRENT_VERSION};

/// Serialize a snapshot to its stored form (UTF-8 JSON).
///
/// Layout:
/// ```text
/// {"version":1,"items":[{"itemId":314,"name":"Feather","targetQuantity":10,"unitPrice":3}],
///  "wealthValue":5000000,"savedAt":"2026-01-01T00:00:00Z"}
/// ```
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec(snapshot)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
}

/// Parse stored bytes back into a snapshot.
///
/// Unknown fields are ignored and missing fields take their defaults. A
/// version newer than [`CURRENT_VERSION`] is read best-effort.
pub fn decode(bytes: &[u8]) -> Result<Snapshot, CoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(CoreError::Deserialization("Snapshot is empty".into()));
    }

    let snapshot: Snapshot = serde_json::from_slice(bytes)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize snapshot: {e}")))?;

    if snapshot.version > CURRENT_VERSION {
        tracing::warn!(
            version = snapshot.version,
            supported = CURRENT_VERSION,
            "Snapshot written by a newer version; reading known fields only"
        );
    }

    Ok(snapshot)
}
