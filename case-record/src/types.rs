//! Core types for the case record.
//!
//! These types model the claimant's case as the frontend persists it: one
//! aggregate holding intake facts, journey progress and document drafts.
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs for consistency with the web frontend.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::documents::{DocumentDraft, DocumentType};
use crate::validation::{self, ContactError, DateInputError};

/// The situation that brought the claimant to the navigator.
///
/// Informational only; it never changes the deadline math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Dismissed from the job
    Fired,
    /// Working hours reduced
    HoursCut,
    /// Role or terms changed without agreement
    JobChanged,
    /// Bullying or harassment at work
    Bullying,
    /// Reasonable adjustments refused
    Adjustments,
    /// The claimant is not sure which applies
    NotSure,
}

impl Scenario {
    /// English label used in exported summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fired => "I was fired or dismissed",
            Self::HoursCut => "My hours were cut",
            Self::JobChanged => "My job was changed",
            Self::Bullying => "I was bullied or harassed",
            Self::Adjustments => "I was refused reasonable adjustments",
            Self::NotSure => "I am not sure",
        }
    }
}

/// Progress of ACAS Early Conciliation.
///
/// Only `Started` (with a start date) can extend the filing deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum AcasStatus {
    #[default]
    NotStarted,
    Started,
    Unknown,
}

impl AcasStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::Started => "Started",
            Self::Unknown => "Unknown",
        }
    }
}

/// One of the seven fixed stages of a tribunal claim.
///
/// The declaration order is the journey order; [`JourneyStepKey::ALL`] is the
/// canonical sequence every progress scan walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub enum JourneyStepKey {
    Incident,
    Acas,
    Et1,
    Et3,
    CaseManagement,
    Witness,
    Hearing,
}

impl JourneyStepKey {
    /// The journey in order.
    pub const ALL: [JourneyStepKey; 7] = [
        JourneyStepKey::Incident,
        JourneyStepKey::Acas,
        JourneyStepKey::Et1,
        JourneyStepKey::Et3,
        JourneyStepKey::CaseManagement,
        JourneyStepKey::Witness,
        JourneyStepKey::Hearing,
    ];

    /// Position of this step in [`JourneyStepKey::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::Incident => 0,
            Self::Acas => 1,
            Self::Et1 => 2,
            Self::Et3 => 3,
            Self::CaseManagement => 4,
            Self::Witness => 5,
            Self::Hearing => 6,
        }
    }

    /// Step at a journey position, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Wire name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incident => "incident",
            Self::Acas => "acas",
            Self::Et1 => "et1",
            Self::Et3 => "et3",
            Self::CaseManagement => "caseManagement",
            Self::Witness => "witness",
            Self::Hearing => "hearing",
        }
    }

    /// English label used in exported summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Incident => "Incident",
            Self::Acas => "ACAS Early Conciliation",
            Self::Et1 => "ET1 Form Submission",
            Self::Et3 => "ET3 Response",
            Self::CaseManagement => "Case Management",
            Self::Witness => "Witness Statements",
            Self::Hearing => "Hearing",
        }
    }
}

impl std::fmt::Display for JourneyStepKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress recorded against a single journey step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct StepProgress {
    /// Whether the step has been marked complete
    #[serde(default)]
    pub completed: bool,
    /// When the step was last marked complete; cleared with `completed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// ACAS certificate or ET1 case number, for gated steps only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_number: Option<String>,
    /// Completed checklist item IDs, independent of `completed`
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub checklist_items: BTreeSet<String>,
}

/// Sparse per-step progress overlay on the fixed journey.
///
/// An absent key means the step has not been started. Step order is never
/// taken from this map; it always comes from [`JourneyStepKey::ALL`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(transparent)]
pub struct JourneyProgress(BTreeMap<JourneyStepKey, StepProgress>);

impl JourneyProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: JourneyStepKey) -> Option<&StepProgress> {
        self.0.get(&key)
    }

    /// Progress for `key`, inserting an empty entry if the step has none yet.
    pub fn entry(&mut self, key: JourneyStepKey) -> &mut StepProgress {
        self.0.entry(key).or_default()
    }

    pub fn get_mut(&mut self, key: JourneyStepKey) -> Option<&mut StepProgress> {
        self.0.get_mut(&key)
    }

    /// Drop the whole entry for `key`, returning what was recorded.
    pub fn remove(&mut self, key: JourneyStepKey) -> Option<StepProgress> {
        self.0.remove(&key)
    }

    pub fn contains(&self, key: JourneyStepKey) -> bool {
        self.0.contains_key(&key)
    }

    /// True if `key` has an entry with `completed` set.
    pub fn is_completed(&self, key: JourneyStepKey) -> bool {
        self.0.get(&key).map(|p| p.completed).unwrap_or(false)
    }

    /// Recorded entries in journey order.
    pub fn iter(&self) -> impl Iterator<Item = (JourneyStepKey, &StepProgress)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Interface language.
///
/// Carried on the record so that formatting can be handed an explicit
/// language rather than reading ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum Language {
    /// Plain English at CEFR A2 level
    #[default]
    #[serde(rename = "en-A2")]
    EnglishA2,
    #[serde(rename = "cy")]
    Welsh,
    #[serde(rename = "pl")]
    Polish,
    #[serde(rename = "ur")]
    Urdu,
    #[serde(rename = "pa")]
    Punjabi,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "ro")]
    Romanian,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::EnglishA2,
        Language::Welsh,
        Language::Polish,
        Language::Urdu,
        Language::Punjabi,
        Language::Bengali,
        Language::Romanian,
        Language::Arabic,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::EnglishA2 => "en-A2",
            Self::Welsh => "cy",
            Self::Polish => "pl",
            Self::Urdu => "ur",
            Self::Punjabi => "pa",
            Self::Bengali => "bn",
            Self::Romanian => "ro",
            Self::Arabic => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.code() == code)
    }

    /// Right-to-left scripts
    pub fn is_rtl(&self) -> bool {
        matches!(self, Self::Urdu | Self::Arabic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum ColorblindType {
    #[default]
    None,
    Protanopia,
    Deuteranopia,
    Tritanopia,
}

/// Accessibility preferences. Opaque to the engine; preserved across resets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilitySettings {
    pub text_size: TextSize,
    pub high_contrast: bool,
    pub reduce_motion: bool,
    pub dyslexia_font: bool,
    pub colorblind_mode: bool,
    pub colorblind_type: ColorblindType,
    /// Speech playback rate, one of 0.5, 0.75, 1.0, 1.25, 1.5
    pub speech_rate: f32,
    pub auto_read_messages: bool,
    pub use_eleven_labs: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            text_size: TextSize::Medium,
            high_contrast: false,
            reduce_motion: false,
            dyslexia_font: false,
            colorblind_mode: false,
            colorblind_type: ColorblindType::None,
            speech_rate: 1.0,
            auto_read_messages: false,
            use_eleven_labs: true,
        }
    }
}

/// Contact details for a legal advisor the claimant works with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct LegalAdvisorContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl LegalAdvisorContact {
    /// Check that at least one field is filled in and any email is well formed.
    pub fn validate(&self) -> Result<(), ContactError> {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !filled(&self.name) && !filled(&self.phone) && !filled(&self.email) {
            return Err(ContactError::Empty);
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !validation::is_valid_email(email) {
                return Err(ContactError::InvalidEmail(email.to_string()));
            }
        }
        Ok(())
    }
}

/// The claimant's whole case, persisted as one document.
///
/// Missing fields in stored data fall back to their defaults, so older
/// saved records keep loading as fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct CaseRecord {
    /// Set once during intake
    pub scenario: Option<Scenario>,
    /// ISO date of the triggering event, as entered
    pub incident_date: Option<String>,
    /// The claimant explicitly does not know the incident date
    pub incident_date_unknown: bool,
    /// ACAS Early Conciliation status
    pub acas_status: AcasStatus,
    /// ISO date ACAS conciliation started; only meaningful when started
    pub acas_start_date: Option<String>,
    /// Interface language, preserved across resets
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_advisor: Option<LegalAdvisorContact>,
    /// Accessibility preferences, preserved across resets
    pub accessibility: AccessibilitySettings,
    pub intake_completed: bool,
    pub current_intake_step: u8,
    pub journey_progress: JourneyProgress,
    pub document_drafts: BTreeMap<DocumentType, DocumentDraft>,
}

impl Default for CaseRecord {
    fn default() -> Self {
        Self {
            scenario: None,
            incident_date: None,
            incident_date_unknown: false,
            acas_status: AcasStatus::NotStarted,
            acas_start_date: None,
            language: Language::EnglishA2,
            legal_advisor: None,
            accessibility: AccessibilitySettings::default(),
            intake_completed: false,
            current_intake_step: 0,
            journey_progress: JourneyProgress::new(),
            document_drafts: BTreeMap::new(),
        }
    }
}

impl CaseRecord {
    /// A fresh record that keeps only the language and accessibility preferences.
    pub fn reset(&self) -> Self {
        Self {
            language: self.language,
            accessibility: self.accessibility.clone(),
            ..Default::default()
        }
    }

    /// Record the incident date after checking it is a real, non-future date.
    ///
    /// The date is stored normalized to `YYYY-MM-DD`. On error the record is
    /// left untouched.
    pub fn set_incident_date(
        &mut self,
        input: &str,
        today: NaiveDate,
    ) -> Result<NaiveDate, DateInputError> {
        let date = validation::validate_date_input(input, today)?;
        self.incident_date = Some(date.format("%Y-%m-%d").to_string());
        self.incident_date_unknown = false;
        Ok(date)
    }

    /// The claimant does not know when the incident happened.
    pub fn mark_incident_date_unknown(&mut self) {
        self.incident_date = None;
        self.incident_date_unknown = true;
    }

    /// Record the ACAS status and, when conciliation has started, its start date.
    ///
    /// Any start date is dropped for statuses other than `Started`.
    pub fn set_acas_status(
        &mut self,
        status: AcasStatus,
        start_date: Option<&str>,
        today: NaiveDate,
    ) -> Result<(), DateInputError> {
        let start = match (status, start_date) {
            (AcasStatus::Started, Some(input)) => {
                let date = validation::validate_date_input(input, today)?;
                Some(date.format("%Y-%m-%d").to_string())
            }
            _ => None,
        };
        self.acas_status = status;
        self.acas_start_date = start;
        Ok(())
    }

    /// Store a draft, replacing any earlier draft of the same document type.
    pub fn save_draft(&mut self, draft: DocumentDraft) {
        self.document_drafts.insert(draft.doc_type, draft);
    }

    pub fn draft(&self, doc_type: DocumentType) -> Option<&DocumentDraft> {
        self.document_drafts.get(&doc_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_step_order() {
        for (i, key) in JourneyStepKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(JourneyStepKey::from_index(i), Some(*key));
        }
        assert_eq!(JourneyStepKey::from_index(7), None);
    }

    #[test]
    fn test_wire_names_match_serde() {
        for key in JourneyStepKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        assert_eq!(serde_json::to_string(&Scenario::HoursCut).unwrap(), "\"hourscut\"");
        assert_eq!(serde_json::to_string(&AcasStatus::NotStarted).unwrap(), "\"not_started\"");
        assert_eq!(serde_json::to_string(&Language::EnglishA2).unwrap(), "\"en-A2\"");
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let json = r#"{
            "scenario": "fired",
            "incidentDate": "2025-01-01",
            "journeyProgress": {"incident": {"completed": true}}
        }"#;
        let record: CaseRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.scenario, Some(Scenario::Fired));
        assert_eq!(record.acas_status, AcasStatus::NotStarted);
        assert_eq!(record.language, Language::EnglishA2);
        assert!(record.journey_progress.is_completed(JourneyStepKey::Incident));
        assert!(!record.journey_progress.contains(JourneyStepKey::Acas));
        assert_eq!(record.accessibility, AccessibilitySettings::default());
    }

    #[test]
    fn test_reset_preserves_preferences() {
        let mut record = CaseRecord::default();
        record.language = Language::Welsh;
        record.accessibility.high_contrast = true;
        record.scenario = Some(Scenario::Bullying);
        record.journey_progress.entry(JourneyStepKey::Incident).completed = true;

        let fresh = record.reset();
        assert_eq!(fresh.language, Language::Welsh);
        assert!(fresh.accessibility.high_contrast);
        assert_eq!(fresh.scenario, None);
        assert!(fresh.journey_progress.is_empty());
    }

    #[test]
    fn test_incident_date_rejects_future() {
        let mut record = CaseRecord::default();
        let err = record.set_incident_date("2025-06-01", day(2025, 5, 1)).unwrap_err();
        assert_eq!(err, DateInputError::InFuture);
        assert_eq!(record.incident_date, None);

        record.mark_incident_date_unknown();
        record.set_incident_date("2025-04-30", day(2025, 5, 1)).unwrap();
        assert_eq!(record.incident_date.as_deref(), Some("2025-04-30"));
        assert!(!record.incident_date_unknown);
    }

    #[test]
    fn test_acas_start_date_dropped_unless_started() {
        let today = day(2025, 5, 1);
        let mut record = CaseRecord::default();
        record.set_acas_status(AcasStatus::Started, Some("2025-02-10"), today).unwrap();
        assert_eq!(record.acas_start_date.as_deref(), Some("2025-02-10"));

        record.set_acas_status(AcasStatus::Unknown, Some("2025-02-10"), today).unwrap();
        assert_eq!(record.acas_status, AcasStatus::Unknown);
        assert_eq!(record.acas_start_date, None);
    }

    #[test]
    fn test_contact_validation() {
        assert_eq!(LegalAdvisorContact::default().validate(), Err(ContactError::Empty));

        let contact = LegalAdvisorContact {
            name: Some("Citizens Advice".to_string()),
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(matches!(contact.validate(), Err(ContactError::InvalidEmail(_))));

        let contact = LegalAdvisorContact {
            email: Some("advice@example.org".to_string()),
            ..Default::default()
        };
        assert!(contact.validate().is_ok());
    }

    #[test]
    fn test_language_codes() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert!(Language::Arabic.is_rtl());
        assert!(!Language::Welsh.is_rtl());
    }
}
