//! File-backed persistence and session flow.

use case_record::{AcasStatus, CaseRecord, JourneyStepKey, Language, Scenario};
use case_store::{
    open_file_session, CaseSession, CaseStore, FileBackend, NavigatorConfig, StorageConfig,
};
use chrono::{NaiveDate, TimeZone, Utc};
use journey_engine::{DeadlineCalculator, StepState, Urgency};
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn config_for(dir: &TempDir) -> NavigatorConfig {
    NavigatorConfig {
        storage: StorageConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_save_load_round_trip_on_disk() {
    let dir = TempDir::new().unwrap();
    let store = CaseStore::new(FileBackend::new(dir.path()).unwrap());

    let done = Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();
    let mut record = CaseRecord::default();
    record.scenario = Some(Scenario::JobChanged);
    record.incident_date = Some("2025-01-01".to_string());
    record.acas_status = AcasStatus::Started;
    record.acas_start_date = Some("2025-03-01".to_string());
    let progress = &mut record.journey_progress;
    journey_engine::mark_step_complete(progress, JourneyStepKey::Incident, None, done).unwrap();
    journey_engine::mark_step_complete(progress, JourneyStepKey::Acas, Some("R123456/01/23"), done)
        .unwrap();
    journey_engine::toggle_checklist_item(progress, JourneyStepKey::Et1, "et1-details", true);
    journey_engine::toggle_checklist_item(progress, JourneyStepKey::Et1, "et1-employer", true);

    store.save(&record).unwrap();

    // Fresh store over the same directory
    let reopened = CaseStore::new(FileBackend::new(dir.path()).unwrap());
    let loaded = reopened.load();
    assert_eq!(loaded, record);

    let acas = loaded.journey_progress.get(JourneyStepKey::Acas).unwrap();
    assert_eq!(acas.certificate_number.as_deref(), Some("R123456/01/23"));
    let et1 = loaded.journey_progress.get(JourneyStepKey::Et1).unwrap();
    assert!(!et1.completed);
    assert_eq!(et1.checklist_items.len(), 2);

    let result = DeadlineCalculator::new(day(2025, 4, 1)).for_record(&loaded);
    assert_eq!(result.deadline, Some(day(2025, 4, 30)));
    assert_eq!(result.days_left, Some(29));
    assert_eq!(result.urgency, Urgency::Ok);
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("wrn-case-state.json"), "{\"journeyProgress\": [").unwrap();

    let store = CaseStore::new(FileBackend::new(dir.path()).unwrap());
    assert_eq!(store.load(), CaseRecord::default());
}

#[test]
fn test_session_flow_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    let today = day(2025, 2, 10);

    {
        let mut session = open_file_session(&config).unwrap();
        session.set_incident_date("2025-01-15", today).unwrap();
        session.set_acas_status(AcasStatus::NotStarted, None, today).unwrap();
        session.mark_step_complete(JourneyStepKey::Incident, None).unwrap();
        assert!(session.mark_step_complete(JourneyStepKey::Acas, Some("")).is_err());
        session.mark_step_complete(JourneyStepKey::Acas, Some("r123456/01/23")).unwrap();
        session.mark_step_complete(JourneyStepKey::Et1, Some("6001234/2025")).unwrap();
        session.change_language(Language::Welsh).unwrap();
    }

    let mut session = open_file_session(&config).unwrap();
    assert_eq!(session.current_step_index(), 3);
    assert_eq!(session.record().language, Language::Welsh);

    let views = session.steps();
    assert_eq!(views[2].state, StepState::Completed);
    assert_eq!(views[3].state, StepState::Current);
    assert!(views[4].can_mark_complete);
    assert!(!views[5].can_mark_complete);

    let deadline = session.deadline(&DeadlineCalculator::new(today));
    assert_eq!(deadline.formatted_deadline.as_deref(), Some("14 Ebrill 2025"));

    // Un-completing ACAS makes it current again; ET1 stays completed
    let removed = session.unmark_step(JourneyStepKey::Acas).unwrap().unwrap();
    assert_eq!(removed.certificate_number.as_deref(), Some("r123456/01/23"));
    assert_eq!(session.current_step_index(), 1);

    let reopened = CaseSession::open(CaseStore::new(FileBackend::new(dir.path()).unwrap()));
    assert!(!reopened.record().journey_progress.contains(JourneyStepKey::Acas));
    assert!(reopened.record().journey_progress.is_completed(JourneyStepKey::Et1));
}

#[test]
fn test_quota_from_config() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    config.storage.quota_bytes = Some(16);

    let mut session = open_file_session(&config).unwrap();
    let err = session.mark_step_complete(JourneyStepKey::Incident, None).unwrap_err();
    assert!(err.is_unsaved_change());
    assert!(!dir.path().join("wrn-case-state.json").exists());
}
