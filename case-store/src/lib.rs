//! Case Store
//!
//! Local persistence for the Work Rights Navigator case record, and the
//! session type that ties the journey engine to it.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────┐
//! │        CaseSession         │  engine operation, then save
//! ├────────────────────────────┤
//! │         CaseStore          │  JSON record + language key
//! ├────────────────────────────┤
//! │      KeyValueBackend       │  FileBackend | MemoryBackend
//! └────────────────────────────┘
//! ```
//!
//! Saves are whole-record and last-write-wins. Loads never fail; anything
//! unreadable comes back as a fresh record.
//!
//! ## Usage
//!
//! ```
//! use case_record::JourneyStepKey;
//! use case_store::{CaseSession, CaseStore, MemoryBackend};
//!
//! let mut session = CaseSession::open(CaseStore::new(MemoryBackend::new()));
//! session.mark_step_complete(JourneyStepKey::Incident, None).unwrap();
//! assert_eq!(session.current_step_index(), 1);
//! ```

pub mod backend;
pub mod config;
pub mod session;
pub mod store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use config::{ConfigError, GeneralConfig, NavigatorConfig, StorageConfig};
pub use session::{CaseSession, SessionError};
pub use store::{CaseStore, StoreError};

/// Open a file-backed session as described by `config`.
pub fn open_file_session(config: &NavigatorConfig) -> Result<CaseSession<FileBackend>, StoreError> {
    let mut backend = FileBackend::new(&config.storage.data_dir)?;
    if let Some(quota) = config.storage.quota_bytes {
        backend = backend.with_quota(quota);
    }
    Ok(CaseSession::open_with_config(backend, config))
}
