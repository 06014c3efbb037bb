//! Plain-text case summary.
//!
//! Produces the human-readable document a claimant downloads or sends to a
//! legal advisor. Journey progress is listed for every step in journey
//! order, including steps with no recorded progress.

use case_record::validation::parse_iso_date;
use case_record::{CaseRecord, JourneyStepKey, DOCUMENT_TEMPLATES};
use chrono::NaiveDateTime;

use crate::locale::DateLocale;

const RULE_WIDTH: usize = 60;
const DOCUMENT_RULE_WIDTH: usize = 40;

/// Subject line used when the summary is emailed to an advisor.
pub const MAILTO_SUBJECT: &str = "Case Details - Work Rights Navigator";

/// Render the full case summary.
///
/// `generated_at` is the local time stamped into the header.
pub fn generate_case_details(
    record: &CaseRecord,
    generated_at: NaiveDateTime,
    locale: &DateLocale,
) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{heavy}\n"));
    out.push_str("WORK RIGHTS NAVIGATOR - CASE DETAILS\n");
    out.push_str(&format!("{heavy}\n"));
    out.push_str(&format!(
        "Generated: {}\n\n",
        locale.padded_date_time(generated_at)
    ));

    out.push_str("BASIC INFORMATION\n");
    out.push_str(&format!("{light}\n"));
    let situation = record.scenario.map(|s| s.label()).unwrap_or("Not specified");
    out.push_str(&format!("Situation: {situation}\n"));
    let incident = match record.incident_date.as_deref() {
        Some(raw) => render_date(raw, locale),
        None if record.incident_date_unknown => "Unknown".to_string(),
        None => "Not provided".to_string(),
    };
    out.push_str(&format!("Incident Date: {incident}\n"));

    out.push_str("\nACAS EARLY CONCILIATION\n");
    out.push_str(&format!("{light}\n"));
    out.push_str(&format!("Status: {}\n", record.acas_status.label()));
    if let Some(raw) = record.acas_start_date.as_deref() {
        out.push_str(&format!("Start Date: {}\n", render_date(raw, locale)));
    }

    out.push_str("\nJOURNEY PROGRESS\n");
    out.push_str(&format!("{light}\n"));
    for key in JourneyStepKey::ALL {
        let Some(progress) = record.journey_progress.get(key) else {
            out.push_str(&format!("{}: Not started\n", key.label()));
            continue;
        };
        let status = if progress.completed { "Completed" } else { "In Progress" };
        out.push_str(&format!("{}: {status}\n", key.label()));
        if let Some(at) = progress.completed_at {
            out.push_str(&format!(
                "  Completed: {}\n",
                locale.padded_date(at.date_naive())
            ));
        }
        if let Some(cert) = progress.certificate_number.as_deref() {
            out.push_str(&format!("  Reference Number: {cert}\n"));
        }
    }

    if let Some(advisor) = &record.legal_advisor {
        out.push_str("\nLEGAL ADVISOR CONTACT\n");
        out.push_str(&format!("{light}\n"));
        if let Some(name) = advisor.name.as_deref() {
            out.push_str(&format!("Name: {name}\n"));
        }
        if let Some(phone) = advisor.phone.as_deref() {
            out.push_str(&format!("Phone: {phone}\n"));
        }
        if let Some(email) = advisor.email.as_deref() {
            out.push_str(&format!("Email: {email}\n"));
        }
    }

    out.push_str("\nDOCUMENTS PREPARED\n");
    out.push_str(&format!("{light}\n"));
    let mut has_documents = false;
    for template in &DOCUMENT_TEMPLATES {
        let Some(draft) = record.draft(template.doc_type) else {
            continue;
        };
        has_documents = true;

        out.push_str(&format!("\n{}\n", template.title.to_uppercase()));
        out.push_str(&format!("{}\n", "─".repeat(DOCUMENT_RULE_WIDTH)));
        let status = if draft.completed { "Completed" } else { "Draft" };
        out.push_str(&format!("Status: {status}\n"));
        out.push_str(&format!(
            "Created: {}\n",
            locale.padded_date(draft.created_at.date_naive())
        ));
        out.push_str(&format!(
            "Last Updated: {}\n",
            locale.padded_date(draft.updated_at.date_naive())
        ));

        for section in template.sections {
            let Some(text) = draft.sections.get(section.id).filter(|t| !t.is_empty()) else {
                continue;
            };
            out.push_str(&format!("\n{}:\n", section.title));
            for line in text.split('\n') {
                out.push_str(&format!("  {line}\n"));
            }
        }
    }
    if !has_documents {
        out.push_str("No documents have been prepared yet.\n");
    }

    out.push_str(&format!("\n{heavy}\n"));
    out.push_str("END OF CASE DETAILS\n");
    out.push_str(&format!("{heavy}\n"));

    out
}

/// Suggested download file name for a summary generated at `generated_at`.
pub fn case_details_file_name(generated_at: NaiveDateTime) -> String {
    format!("case-details-{}.txt", generated_at.format("%Y-%m-%d"))
}

/// `mailto:` link that opens an email to the legal advisor with the case
/// summary as its body. `None` when no advisor email is recorded.
pub fn mailto_link(
    record: &CaseRecord,
    generated_at: NaiveDateTime,
    locale: &DateLocale,
) -> Option<String> {
    let email = record
        .legal_advisor
        .as_ref()
        .and_then(|advisor| advisor.email.as_deref())
        .map(str::trim)
        .filter(|email| !email.is_empty())?;

    let body = generate_case_details(record, generated_at, locale);
    Some(format!(
        "mailto:{email}?subject={}&body={}",
        urlencoding::encode(MAILTO_SUBJECT),
        urlencoding::encode(&body)
    ))
}

fn render_date(raw: &str, locale: &DateLocale) -> String {
    parse_iso_date(raw)
        .map(|d| locale.padded_date(d))
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_record::{AcasStatus, DocumentDraft, DocumentType, LegalAdvisorContact, Scenario};
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::journey::{mark_step_complete, toggle_checklist_item};

    fn generated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 2)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_record() {
        let text =
            generate_case_details(&CaseRecord::default(), generated(), &DateLocale::english());
        assert!(text.starts_with(&"=".repeat(60)));
        assert!(text.contains("Generated: 02 April 2025, 14:30\n"));
        assert!(text.contains("Situation: Not specified\n"));
        assert!(text.contains("Incident Date: Not provided\n"));
        assert!(text.contains("Status: Not started\n"));
        assert!(text.contains("Hearing: Not started\n"));
        assert!(text.contains("No documents have been prepared yet.\n"));
        assert!(!text.contains("LEGAL ADVISOR CONTACT"));
        assert!(text.trim_end().ends_with(&"=".repeat(60)));
    }

    #[test]
    fn test_populated_record() {
        let mut record = CaseRecord::default();
        record.scenario = Some(Scenario::Fired);
        record.incident_date = Some("2025-01-06".to_string());
        record.acas_status = AcasStatus::Started;
        record.acas_start_date = Some("2025-01-20".to_string());
        record.legal_advisor = Some(LegalAdvisorContact {
            name: Some("Jo Adviser".to_string()),
            email: Some("jo@example.org".to_string()),
            ..Default::default()
        });

        let done = Utc.with_ymd_and_hms(2025, 2, 3, 10, 0, 0).unwrap();
        let progress = &mut record.journey_progress;
        mark_step_complete(progress, JourneyStepKey::Incident, None, done).unwrap();
        mark_step_complete(progress, JourneyStepKey::Acas, Some("R123456/01/23"), done).unwrap();
        toggle_checklist_item(progress, JourneyStepKey::Et1, "et1-details", true);

        let mut draft = DocumentDraft::new(DocumentType::Chronology, done);
        draft
            .set_section("events", "6 Jan: dismissed\n20 Jan: called ACAS", done)
            .unwrap();
        record.save_draft(draft);

        let text = generate_case_details(&record, generated(), &DateLocale::english());
        assert!(text.contains("Situation: I was fired or dismissed\n"));
        assert!(text.contains("Incident Date: 06 January 2025\n"));
        assert!(text.contains("Start Date: 20 January 2025\n"));
        assert!(text.contains("ACAS Early Conciliation: Completed\n"));
        assert!(text.contains("  Completed: 03 February 2025\n"));
        assert!(text.contains("  Reference Number: R123456/01/23\n"));
        assert!(text.contains("ET1 Form Submission: In Progress\n"));
        assert!(text.contains("Name: Jo Adviser\n"));
        assert!(!text.contains("Phone:"));
        assert!(text.contains("\nCHRONOLOGY\n"));
        assert!(text.contains("Status: Draft\n"));
        assert!(text.contains("Timeline of events:\n  6 Jan: dismissed\n  20 Jan: called ACAS\n"));
        assert!(!text.contains("No documents have been prepared yet."));
    }

    #[test]
    fn test_unticked_untouched_step_reads_not_started() {
        let mut record = CaseRecord::default();
        toggle_checklist_item(
            &mut record.journey_progress,
            JourneyStepKey::Hearing,
            "hr-travel",
            false,
        );
        let text = generate_case_details(&record, generated(), &DateLocale::english());
        assert!(text.contains("Hearing: Not started\n"));
    }

    #[test]
    fn test_unknown_and_unparseable_dates() {
        let mut record = CaseRecord::default();
        record.incident_date_unknown = true;
        let text = generate_case_details(&record, generated(), &DateLocale::english());
        assert!(text.contains("Incident Date: Unknown\n"));

        record.incident_date = Some("sometime in spring".to_string());
        let text = generate_case_details(&record, generated(), &DateLocale::english());
        assert!(text.contains("Incident Date: sometime in spring\n"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(case_details_file_name(generated()), "case-details-2025-04-02.txt");
    }

    #[test]
    fn test_mailto_link() {
        let locale = DateLocale::english();
        let mut record = CaseRecord::default();
        assert_eq!(mailto_link(&record, generated(), &locale), None);

        record.legal_advisor = Some(LegalAdvisorContact {
            phone: Some("01234 567890".to_string()),
            email: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(mailto_link(&record, generated(), &locale), None);

        record.legal_advisor = Some(LegalAdvisorContact {
            email: Some(" jo@example.org ".to_string()),
            ..Default::default()
        });
        let link = mailto_link(&record, generated(), &locale).unwrap();
        assert!(link.starts_with(
            "mailto:jo@example.org?subject=Case%20Details%20-%20Work%20Rights%20Navigator&body="
        ));
        assert!(link.contains("WORK%20RIGHTS%20NAVIGATOR%20-%20CASE%20DETAILS%0A"));
        assert!(!link.contains('\n'));
        assert!(!link.contains(' '));
    }
}
