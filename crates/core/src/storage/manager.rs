use crate::errors::CoreError;
use crate::models::ledger::Ledger;

/// High-level storage operations: save/load the ledger to/from JSON bytes
/// or a file on disk.
///
/// The whole ledger — balance, positions, action history, price snapshots,
/// settings — is one JSON document, so a single save captures a consistent
/// picture of all four relations.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a ledger to pretty-printed JSON bytes.
    pub fn save_to_bytes(ledger: &Ledger) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec_pretty(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    /// Deserialize a ledger from JSON bytes.
    pub fn load_from_bytes(data: &[u8]) -> Result<Ledger, CoreError> {
        serde_json::from_slice(data)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger: {e}")))
    }

    /// Save the ledger to a file on disk.
    pub fn save_to_file(ledger: &Ledger, path: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(ledger)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a ledger from a file on disk.
    pub fn load_from_file(path: &str) -> Result<Ledger, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }
}
