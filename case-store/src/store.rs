//! Case record persistence.
//!
//! The record is stored as one JSON document under a single key. Loading
//! never fails: a missing or unparseable document falls back to a fresh
//! record, and a document with invalid fields keeps every field that still
//! decodes. Saving does fail, and the caller decides what to tell the user.

use case_record::{CaseRecord, Language};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::backend::KeyValueBackend;
use crate::config::StorageConfig;

/// Error types for store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Filesystem error
    #[error("IO error: {0}")]
    Io(String),

    /// The record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The value is larger than the backend allows
    #[error("Storage quota exceeded for '{key}': {size} bytes exceeds limit of {limit}")]
    QuotaExceeded { key: String, size: usize, limit: usize },

    /// Keys are limited to ASCII letters, digits, `-` and `_`
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Loads and saves the case record and the language preference.
#[derive(Debug)]
pub struct CaseStore<B: KeyValueBackend> {
    backend: B,
    case_key: String,
    language_key: String,
}

impl<B: KeyValueBackend> CaseStore<B> {
    /// Store using the default keys.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, &StorageConfig::default())
    }

    /// Store using the keys named in `config`.
    pub fn with_config(backend: B, config: &StorageConfig) -> Self {
        Self {
            backend,
            case_key: config.case_key.clone(),
            language_key: config.language_key.clone(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The saved record, or a fresh one if nothing usable is stored.
    pub fn load(&self) -> CaseRecord {
        let raw = match self.backend.get(&self.case_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.case_key, "No saved case, starting fresh");
                return CaseRecord::default();
            }
            Err(e) => {
                warn!(
                    key = %self.case_key,
                    error = %e,
                    "Failed to read saved case, starting fresh"
                );
                return CaseRecord::default();
            }
        };

        let stored: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %self.case_key, error = %e, "Saved case is corrupt, starting fresh");
                return CaseRecord::default();
            }
        };

        match serde_json::from_value(stored.clone()) {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    key = %self.case_key,
                    error = %e,
                    "Saved case has invalid fields, salvaging the rest"
                );
                salvage_record(stored)
            }
        }
    }

    /// Persist the whole record, replacing what was stored.
    pub fn save(&self, record: &CaseRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.set(&self.case_key, &json).inspect_err(|e| {
            warn!(key = %self.case_key, error = %e, "Failed to save case");
        })?;
        debug!(key = %self.case_key, bytes = json.len(), "Saved case");
        Ok(())
    }

    /// Remove the saved record. The language preference is kept.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove(&self.case_key)
    }

    /// The saved language preference, if one is stored and recognized.
    pub fn load_language(&self) -> Option<Language> {
        match self.backend.get(&self.language_key) {
            Ok(Some(code)) => {
                let language = Language::from_code(code.trim());
                if language.is_none() {
                    warn!(code = %code.trim(), "Ignoring unknown saved language");
                }
                language
            }
            Ok(None) => None,
            Err(e) => {
                warn!(key = %self.language_key, error = %e, "Failed to read saved language");
                None
            }
        }
    }

    /// Persist the language preference as its bare code, e.g. `cy`.
    pub fn save_language(&self, language: Language) -> Result<(), StoreError> {
        self.backend.set(&self.language_key, language.code())
    }
}

/// Merge stored fields over a default record one at a time, dropping any
/// field that does not decode. Map-shaped fields such as `journeyProgress`
/// are merged entry by entry so one bad step keeps the others.
fn salvage_record(stored: Value) -> CaseRecord {
    let Value::Object(stored) = stored else {
        warn!("Saved case is not an object, starting fresh");
        return CaseRecord::default();
    };
    let mut merged = match serde_json::to_value(CaseRecord::default()) {
        Ok(Value::Object(fields)) => fields,
        _ => return CaseRecord::default(),
    };

    for (field, value) in stored {
        let previous = merged.insert(field.clone(), value.clone());
        if decodes(&merged) {
            continue;
        }

        if let Value::Object(entries) = value {
            let mut kept = match &previous {
                Some(Value::Object(base)) => base.clone(),
                _ => Map::new(),
            };
            for (entry, entry_value) in entries {
                let before = kept.insert(entry.clone(), entry_value);
                merged.insert(field.clone(), Value::Object(kept.clone()));
                if !decodes(&merged) {
                    warn!(field = %field, entry = %entry, "Dropping invalid saved entry");
                    match before {
                        Some(v) => kept.insert(entry, v),
                        None => kept.remove(&entry),
                    };
                }
            }
            merged.insert(field.clone(), Value::Object(kept));
            if decodes(&merged) {
                continue;
            }
        }

        warn!(field = %field, "Dropping invalid saved field");
        match previous {
            Some(previous) => merged.insert(field, previous),
            None => merged.remove(&field),
        };
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

fn decodes(fields: &Map<String, Value>) -> bool {
    serde_json::from_value::<CaseRecord>(Value::Object(fields.clone())).is_ok()
}
