use super::StorageError;
use crate::constants::CURRENT_LINE_FORMAT_VERSION;
use crate::models::Line;

/// Serialize a line to bytes with version header
///
/// # Errors
/// Returns an error if `MessagePack` serialization fails
pub fn serialize_line_to_bytes(line: &Line) -> Result<Vec<u8>, StorageError> {
    let line_bytes = rmp_serde::to_vec(line).map_err(|e| StorageError::Encode(e.to_string()))?;

    // Versioned format: [4 bytes u32 version][`MessagePack` data]
    let mut bytes = Vec::with_capacity(4 + line_bytes.len());
    bytes.extend_from_slice(&CURRENT_LINE_FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&line_bytes);

    Ok(bytes)
}

/// Deserialize a line from bytes with version header validation
///
/// The section chain is rebuilt through its loader, so a payload whose
/// sections do not form a single path is rejected.
///
/// # Errors
/// Returns an error if the payload is too small, the version is unsupported, or decoding fails
pub fn deserialize_line_from_bytes(bytes: &[u8]) -> Result<Line, StorageError> {
    let Some((version_bytes, line_bytes)) = bytes.split_first_chunk::<4>() else {
        return Err(StorageError::TooSmall);
    };

    let version = u32::from_le_bytes(*version_bytes);
    if version != CURRENT_LINE_FORMAT_VERSION {
        log::warn!("Rejecting line payload with format version {version}");
        return Err(StorageError::UnsupportedVersion(version));
    }

    rmp_serde::from_slice(line_bytes).map_err(|e| {
        log::warn!("Failed to decode line payload: {e}");
        StorageError::Decode(e.to_string())
    })
}

/// Export a line as pretty-printed JSON
///
/// # Errors
/// Returns an error if JSON serialization fails
pub fn export_line_json(line: &Line) -> Result<String, StorageError> {
    serde_json::to_string_pretty(line).map_err(|e| StorageError::Encode(e.to_string()))
}

/// Import a line from JSON
///
/// # Errors
/// Returns an error if the JSON is malformed or the sections do not form a single path
pub fn import_line_json(json: &str) -> Result<Line, StorageError> {
    serde_json::from_str(json).map_err(|e| StorageError::Decode(e.to_string()))
}
