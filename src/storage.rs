//! Storage
//!
//! The cart persists itself to a string key/value store, the same shape as a
//! browser's local storage. A single record under one key holds the line items
//! wrapped in a versioned envelope:
//!
//! ```json
//! {"state":{"items":[{"id":"a","name":"Roti","price":1000,"quantity":2}]},"version":0}
//! ```
//!
//! Derived totals are never stored.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::LineItem;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage key the cart is saved under unless told otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cart-storage";

/// Version written into the persisted envelope.
pub const STORAGE_VERSION: u32 = 0;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or otherwise inaccessible.
    #[error("storage is unavailable")]
    Unavailable,

    /// Writing the value would exceed the storage quota.
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Bytes the store would hold after the write
        needed: usize,
        /// Maximum bytes the store may hold
        quota: usize,
    },

    /// The key cannot be used with this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying I/O error.
    #[error("storage I/O error")]
    Io(#[from] io::Error),
}

/// Errors that can occur while persisting a cart.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The cart could not be encoded.
    #[error("failed to encode cart")]
    Serialize(#[from] serde_json::Error),

    /// The storage backend rejected the write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors that can occur while decoding a persisted cart.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The record is not valid JSON or does not have the expected shape.
    #[error("malformed cart record")]
    Malformed(#[from] serde_json::Error),

    /// The record was written by an incompatible version.
    #[error("unsupported cart record version {0}")]
    UnsupportedVersion(u32),
}

/// A string key/value store the cart persists into.
pub trait CartStorage {
    /// Reads the value under `key`, `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes the value under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be modified.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: StateRef<'a>,
    version: u32,
}

#[derive(Serialize)]
struct StateRef<'a> {
    items: &'a [LineItem],
}

#[derive(Deserialize)]
struct Envelope {
    state: State,
    version: u32,
}

#[derive(Deserialize)]
struct State {
    items: Vec<LineItem>,
}

/// Encodes line items into the persisted record format.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if encoding fails.
pub fn encode(items: &[LineItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        state: StateRef { items },
        version: STORAGE_VERSION,
    })
}

/// Decodes line items from a persisted record.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the record is malformed or has an unknown version.
pub fn decode(raw: &str) -> Result<Vec<LineItem>, DecodeError> {
    let envelope: Envelope = serde_json::from_str(raw)?;

    if envelope.version != STORAGE_VERSION {
        return Err(DecodeError::UnsupportedVersion(envelope.version));
    }

    Ok(envelope.state.items)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    #[test]
    fn encode_wraps_items_in_versioned_envelope() -> TestResult {
        let items = [LineItem::new(Product::new("a", "Roti", 1_000))];

        let value: serde_json::Value = serde_json::from_str(&encode(&items)?)?;

        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["items"][0]["id"], "a");
        assert_eq!(value["state"]["items"][0]["quantity"], 1);
        assert!(value["state"].get("total").is_none(), "totals are derived");

        Ok(())
    }

    #[test]
    fn decode_restores_encoded_items() -> TestResult {
        let items = vec![
            LineItem::with_quantity(
                Product::new("a", "Roti", 1_000).with_stock(8),
                NonZeroU32::try_from(3_u32)?,
            ),
            LineItem::new(Product::new("b", "Susu", 500).with_category("Dairy")),
        ];

        assert_eq!(decode(&encode(&items)?)?, items);

        Ok(())
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let result = decode(r#"{"state":{"items":[]},"version":7}"#);

        assert!(matches!(result, Err(DecodeError::UnsupportedVersion(7))));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode("not json"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode(r#"{"items":[]}"#), Err(DecodeError::Malformed(_))));
    }
}
