//! Journey & Deadline Engine
//!
//! Pure functions over a [`case_record::CaseRecord`] that drive the claimant's
//! path through an employment tribunal claim:
//!
//! - **Deadline**: three-month limitation period less one day, extended by
//!   up to 30 days of ACAS Early Conciliation, with urgency tiers
//! - **Journey**: seven ordered steps with a one-step lookahead and
//!   certificate gates on the ACAS and ET1 steps
//! - **Checklists**: per-step sub-tasks with progress counts
//! - **Export**: plain-text case summary for advisors
//!
//! Nothing here touches storage; see the `case-store` crate for persistence.
//!
//! # Example
//!
//! ```
//! use case_record::{AcasStatus, JourneyProgress, JourneyStepKey};
//! use chrono::{NaiveDate, Utc};
//! use journey_engine::{mark_step_complete, DeadlineCalculator, Urgency};
//!
//! let calc = DeadlineCalculator::new(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
//! let result = calc.compute(Some("2025-01-01"), AcasStatus::NotStarted, None);
//! assert_eq!(result.formatted_deadline.as_deref(), Some("31 March 2025"));
//! assert_eq!(result.urgency, Urgency::Warning);
//!
//! let mut progress = JourneyProgress::new();
//! mark_step_complete(&mut progress, JourneyStepKey::Incident, None, Utc::now()).unwrap();
//! assert!(mark_step_complete(&mut progress, JourneyStepKey::Acas, None, Utc::now()).is_err());
//! ```

pub mod checklist;
pub mod deadline;
pub mod export;
pub mod journey;
pub mod locale;
pub mod steps;

pub use checklist::{
    checklist_for, checklist_progress, ChecklistItem, ChecklistProgress, STEP_CHECKLISTS,
};
pub use deadline::{
    acas_extension_days, compute_deadline, primary_limit, DeadlineCalculator, DeadlineResult,
    NextAction, Urgency,
};
pub use export::{case_details_file_name, generate_case_details, mailto_link, MAILTO_SUBJECT};
pub use journey::{
    can_mark_complete, current_step_index, journey_summary, mark_step_complete, step_views,
    toggle_checklist_item, unmark_step, JourneyError, JourneySummary, StepState, StepView,
};
pub use locale::DateLocale;
pub use steps::{
    CertificateError, CertificateRule, StepDefinition, ACAS_CERTIFICATE_PATTERN, JOURNEY_STEPS,
};
