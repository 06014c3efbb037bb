//! Case Record for the Work Rights Navigator
//!
//! The case record is the single persisted aggregate a claimant builds up
//! while moving through an employment-tribunal claim:
//!
//! - **Intake facts**: scenario, incident date, ACAS Early Conciliation status
//! - **Journey progress**: sparse per-step overlay on the fixed seven-step journey
//! - **Document drafts**: witness statement, schedule of loss, chronology, list of issues
//! - **Preferences**: language and accessibility settings that survive a reset
//!
//! # Key Components
//!
//! - [`CaseRecord`]: The root aggregate, persisted as a whole
//! - [`JourneyProgress`]: Map from [`JourneyStepKey`] to [`StepProgress`]
//! - [`DocumentDraft`]: A document being prepared against a [`DocumentTemplate`]
//! - [`validation`]: Date and email input checks used by the intake screens
//!
//! # Example
//!
//! ```
//! use case_record::{AcasStatus, CaseRecord, JourneyStepKey};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
//! let mut record = CaseRecord::default();
//! record.set_incident_date("2025-01-01", today).unwrap();
//! record.set_acas_status(AcasStatus::NotStarted, None, today).unwrap();
//!
//! assert!(record.journey_progress.get(JourneyStepKey::Incident).is_none());
//! ```

pub mod documents;
pub mod types;
pub mod validation;

// Re-export main types
pub use documents::{
    DocumentDraft, DocumentError, DocumentSection, DocumentTemplate, DocumentType,
    DOCUMENT_TEMPLATES,
};
pub use types::*;
pub use validation::{ContactError, DateInputError};
