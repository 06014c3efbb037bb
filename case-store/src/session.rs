//! A claimant's working session.
//!
//! [`CaseSession`] holds the in-memory record together with its store and
//! re-persists after every successful mutation. Validation failures leave
//! both the record and storage untouched. A failed save keeps the change
//! in memory and reports the error; the next successful save catches
//! storage up.

use case_record::{
    AcasStatus, CaseRecord, ContactError, DateInputError, DocumentDraft, DocumentError,
    DocumentType, JourneyStepKey, Language, LegalAdvisorContact, StepProgress,
};
use chrono::{Local, NaiveDate, Utc};
use journey_engine::{DeadlineCalculator, DeadlineResult, JourneyError, JourneySummary, StepView};
use tracing::{debug, info};

use crate::backend::KeyValueBackend;
use crate::config::NavigatorConfig;
use crate::store::{CaseStore, StoreError};

/// Error types for session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// A journey transition was rejected
    #[error(transparent)]
    Journey(#[from] JourneyError),

    /// An intake date was rejected
    #[error(transparent)]
    Intake(#[from] DateInputError),

    /// Legal advisor details were rejected
    #[error(transparent)]
    Contact(#[from] ContactError),

    /// A document edit was rejected
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The change was applied but could not be saved
    #[error("Change not saved: {0}")]
    Store(#[from] StoreError),
}

impl SessionError {
    /// True when the in-memory record changed but storage is behind.
    pub fn is_unsaved_change(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// In-memory case record backed by a [`CaseStore`].
#[derive(Debug)]
pub struct CaseSession<B: KeyValueBackend> {
    store: CaseStore<B>,
    record: CaseRecord,
}

impl<B: KeyValueBackend> CaseSession<B> {
    /// Open a session on whatever the store holds.
    ///
    /// A separately saved language preference wins over the one inside the
    /// record.
    pub fn open(store: CaseStore<B>) -> Self {
        let mut record = store.load();
        if let Some(language) = store.load_language() {
            record.language = language;
        }
        Self { store, record }
    }

    /// Open a session using the storage keys and default language in
    /// `config`.
    pub fn open_with_config(backend: B, config: &NavigatorConfig) -> Self {
        let store = CaseStore::with_config(backend, &config.storage);
        let first_visit = store.load_language().is_none() && store.load() == CaseRecord::default();
        let mut session = Self::open(store);
        if first_visit {
            session.record.language = config.general.default_language;
        }
        info!(language = %session.record.language.code(), first_visit, "Opened case session");
        session
    }

    pub fn record(&self) -> &CaseRecord {
        &self.record
    }

    pub fn store(&self) -> &CaseStore<B> {
        &self.store
    }

    /// Save the current record.
    pub fn persist(&self) -> Result<(), SessionError> {
        Ok(self.store.save(&self.record)?)
    }

    /// Complete a journey step and save.
    pub fn mark_step_complete(
        &mut self,
        key: JourneyStepKey,
        certificate: Option<&str>,
    ) -> Result<(), SessionError> {
        journey_engine::mark_step_complete(
            &mut self.record.journey_progress,
            key,
            certificate,
            Utc::now(),
        )?;
        self.persist()
    }

    /// Clear a step's progress and save. Returns what was cleared.
    pub fn unmark_step(
        &mut self,
        key: JourneyStepKey,
    ) -> Result<Option<StepProgress>, SessionError> {
        let removed = journey_engine::unmark_step(&mut self.record.journey_progress, key);
        self.persist()?;
        Ok(removed)
    }

    pub fn toggle_checklist_item(
        &mut self,
        key: JourneyStepKey,
        item_id: &str,
        checked: bool,
    ) -> Result<(), SessionError> {
        journey_engine::toggle_checklist_item(
            &mut self.record.journey_progress,
            key,
            item_id,
            checked,
        );
        self.persist()
    }

    /// Record the incident date, validated against `today`, and save.
    pub fn set_incident_date(
        &mut self,
        input: &str,
        today: NaiveDate,
    ) -> Result<NaiveDate, SessionError> {
        let date = self.record.set_incident_date(input, today)?;
        self.persist()?;
        Ok(date)
    }

    pub fn mark_incident_date_unknown(&mut self) -> Result<(), SessionError> {
        self.record.mark_incident_date_unknown();
        self.persist()
    }

    /// Record the ACAS status and start date, validated against `today`, and save.
    pub fn set_acas_status(
        &mut self,
        status: AcasStatus,
        start_date: Option<&str>,
        today: NaiveDate,
    ) -> Result<(), SessionError> {
        self.record.set_acas_status(status, start_date, today)?;
        self.persist()
    }

    /// Store legal advisor details after checking them.
    pub fn set_legal_advisor(&mut self, contact: LegalAdvisorContact) -> Result<(), SessionError> {
        contact.validate()?;
        self.record.legal_advisor = Some(contact);
        self.persist()
    }

    /// Replace a whole draft and save.
    pub fn save_draft(&mut self, draft: DocumentDraft) -> Result<(), SessionError> {
        self.record.save_draft(draft);
        self.persist()
    }

    /// Set one section of a draft, starting the draft if there is none.
    pub fn update_draft_section(
        &mut self,
        doc_type: DocumentType,
        section_id: &str,
        text: &str,
    ) -> Result<(), SessionError> {
        let now = Utc::now();
        let mut draft = self
            .record
            .draft(doc_type)
            .cloned()
            .unwrap_or_else(|| DocumentDraft::new(doc_type, now));
        draft.set_section(section_id, text, now)?;
        self.save_draft(draft)
    }

    /// Mark a draft finished once its required sections are filled.
    pub fn finish_draft(&mut self, doc_type: DocumentType) -> Result<(), SessionError> {
        let now = Utc::now();
        let mut draft = self
            .record
            .draft(doc_type)
            .cloned()
            .unwrap_or_else(|| DocumentDraft::new(doc_type, now));
        draft.finish(now)?;
        self.save_draft(draft)
    }

    /// Switch language, saving both the preference and the record.
    pub fn change_language(&mut self, language: Language) -> Result<(), SessionError> {
        self.record.language = language;
        self.store.save_language(language)?;
        self.persist()
    }

    /// Start the case over, keeping language and accessibility settings.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.record = self.record.reset();
        debug!("Case reset");
        self.persist()
    }

    /// Apply an arbitrary edit and save.
    pub fn update<F>(&mut self, edit: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut CaseRecord),
    {
        edit(&mut self.record);
        self.persist()
    }

    pub fn deadline(&self, calculator: &DeadlineCalculator) -> DeadlineResult {
        calculator.for_record(&self.record)
    }

    pub fn steps(&self) -> Vec<StepView<'_>> {
        journey_engine::step_views(&self.record.journey_progress)
    }

    pub fn current_step_index(&self) -> usize {
        journey_engine::current_step_index(&self.record.journey_progress)
    }

    pub fn summary(&self) -> JourneySummary {
        journey_engine::journey_summary(&self.record.journey_progress)
    }

    /// Plain-text case summary stamped with the current local time.
    pub fn export(&self) -> String {
        let locale = journey_engine::DateLocale::new(self.record.language);
        journey_engine::generate_case_details(&self.record, Local::now().naive_local(), &locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use journey_engine::{CertificateError, StepState};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session() -> CaseSession<MemoryBackend> {
        CaseSession::open(CaseStore::new(MemoryBackend::new()))
    }

    #[test]
    fn test_mutation_is_persisted() {
        let mut session = session();
        session.mark_step_complete(JourneyStepKey::Incident, None).unwrap();
        assert!(session.store().load().journey_progress.is_completed(JourneyStepKey::Incident));
        assert_eq!(session.current_step_index(), 1);
    }

    #[test]
    fn test_rejected_transition_changes_nothing() {
        let mut session = session();
        session.mark_step_complete(JourneyStepKey::Incident, None).unwrap();

        let err = session
            .mark_step_complete(JourneyStepKey::Acas, Some("nope"))
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Journey(JourneyError::Certificate {
                reason: CertificateError::InvalidFormat(_),
                ..
            })
        ));
        assert!(!session.record().journey_progress.contains(JourneyStepKey::Acas));
        assert!(!session.store().load().journey_progress.contains(JourneyStepKey::Acas));
    }

    #[test]
    fn test_failed_save_keeps_change_in_memory() {
        let mut session = CaseSession::open(CaseStore::new(MemoryBackend::new().with_quota(10)));
        let err = session.mark_step_complete(JourneyStepKey::Incident, None).unwrap_err();
        assert!(err.is_unsaved_change());
        assert!(session.record().journey_progress.is_completed(JourneyStepKey::Incident));
        assert_eq!(session.store().load(), CaseRecord::default());
    }

    #[test]
    fn test_intake_and_deadline() {
        let mut session = session();
        let today = day(2025, 3, 1);
        session.set_incident_date("2025-01-01", today).unwrap();
        session
            .set_acas_status(AcasStatus::Started, Some("2025-01-10"), today)
            .unwrap();
        assert!(matches!(
            session.set_incident_date("2025-04-01", today),
            Err(SessionError::Intake(DateInputError::InFuture))
        ));

        let result = session.deadline(&DeadlineCalculator::new(today));
        assert_eq!(result.deadline, Some(day(2025, 4, 9)));
        assert!(result.includes_acas_extension);
        assert_eq!(session.store().load().incident_date.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn test_language_preference() {
        let backend = MemoryBackend::new();
        let store = CaseStore::new(backend);
        let mut session = CaseSession::open(store);
        session.change_language(Language::Welsh).unwrap();

        assert_eq!(session.store().load_language(), Some(Language::Welsh));
        assert_eq!(session.store().load().language, Language::Welsh);
    }

    #[test]
    fn test_reset_keeps_preferences() {
        let mut session = session();
        session.change_language(Language::Romanian).unwrap();
        session.update(|r| r.accessibility.high_contrast = true).unwrap();
        session.mark_step_complete(JourneyStepKey::Incident, None).unwrap();

        session.reset().unwrap();
        let saved = session.store().load();
        assert!(saved.journey_progress.is_empty());
        assert_eq!(saved.language, Language::Romanian);
        assert!(saved.accessibility.high_contrast);
    }

    #[test]
    fn test_drafts() {
        let mut session = session();
        session
            .update_draft_section(DocumentType::WitnessStatement, "introduction", "My name is Sam.")
            .unwrap();
        assert!(matches!(
            session.update_draft_section(DocumentType::WitnessStatement, "nonsense", "x"),
            Err(SessionError::Document(DocumentError::UnknownSection { .. }))
        ));
        assert!(matches!(
            session.finish_draft(DocumentType::WitnessStatement),
            Err(SessionError::Document(DocumentError::MissingSections(_)))
        ));

        session
            .update_draft_section(DocumentType::Chronology, "events", "1 Jan: dismissed")
            .unwrap();
        session.finish_draft(DocumentType::Chronology).unwrap();

        let saved = session.store().load();
        assert!(saved.draft(DocumentType::Chronology).unwrap().completed);
        assert!(!saved.draft(DocumentType::WitnessStatement).unwrap().completed);
        assert!(session.export().contains("CHRONOLOGY"));
    }

    #[test]
    fn test_legal_advisor_validation() {
        let mut session = session();
        assert!(matches!(
            session.set_legal_advisor(LegalAdvisorContact::default()),
            Err(SessionError::Contact(ContactError::Empty))
        ));
        session
            .set_legal_advisor(LegalAdvisorContact {
                phone: Some("01234 567890".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(session.store().load().legal_advisor.is_some());
    }

    #[test]
    fn test_open_with_config_default_language() {
        let mut config = NavigatorConfig::default();
        config.general.default_language = Language::Polish;
        let session = CaseSession::open_with_config(MemoryBackend::new(), &config);
        assert_eq!(session.record().language, Language::Polish);

        let backend = MemoryBackend::new();
        backend.set("wrn-language", "cy").unwrap();
        let session = CaseSession::open_with_config(backend, &config);
        assert_eq!(session.record().language, Language::Welsh);
    }

    #[test]
    fn test_step_views() {
        let mut session = session();
        session.mark_step_complete(JourneyStepKey::Incident, None).unwrap();
        let views = session.steps();
        assert_eq!(views[0].state, StepState::Completed);
        assert_eq!(views[1].state, StepState::Current);
        assert_eq!(views[2].state, StepState::Locked);
        assert_eq!(session.summary().completed, 1);
    }
}
