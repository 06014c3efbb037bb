//! Per-step checklists.
//!
//! Checklist items are sub-tasks the claimant can tick off inside a step.
//! Ticking them never completes the step; the two are tracked separately.

use case_record::{JourneyProgress, JourneyStepKey};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// One tickable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub label_key: &'static str,
    /// Question handed to the chat assistant when the user asks for help
    pub help_prompt: Option<&'static str>,
    pub external_link: Option<&'static str>,
    pub external_link_label: Option<&'static str>,
}

impl ChecklistItem {
    const fn new(id: &'static str, label_key: &'static str) -> Self {
        Self {
            id,
            label_key,
            help_prompt: None,
            external_link: None,
            external_link_label: None,
        }
    }

    const fn help(mut self, prompt: &'static str) -> Self {
        self.help_prompt = Some(prompt);
        self
    }

    const fn link(mut self, url: &'static str, label_key: &'static str) -> Self {
        self.external_link = Some(url);
        self.external_link_label = Some(label_key);
        self
    }
}

/// Checklist items for each step that has one.
pub static STEP_CHECKLISTS: [(JourneyStepKey, &[ChecklistItem]); 5] = [
    (
        JourneyStepKey::Et1,
        &[
            ChecklistItem::new("et1-acas-cert", "checklists.et1.acasCert")
                .help("Where do I find my ACAS certificate number?"),
            ChecklistItem::new("et1-details", "checklists.et1.personalDetails"),
            ChecklistItem::new("et1-employer", "checklists.et1.employerDetails")
                .help("What employer details do I need for ET1?"),
            ChecklistItem::new("et1-claim", "checklists.et1.claimDetails")
                .help("How do I describe my claim on the ET1 form?"),
            ChecklistItem::new("et1-submit", "checklists.et1.submit").link(
                "https://www.gov.uk/employment-tribunals/make-a-claim",
                "checklists.et1.submitLink",
            ),
        ],
    ),
    (
        JourneyStepKey::Et3,
        &[
            ChecklistItem::new("et3-received", "checklists.et3.received")
                .help("What happens after the employer responds with ET3?"),
            ChecklistItem::new("et3-review", "checklists.et3.review")
                .help("How do I respond to what my employer said in their ET3?"),
        ],
    ),
    (
        JourneyStepKey::CaseManagement,
        &[
            ChecklistItem::new("cm-orders", "checklists.caseManagement.readOrders")
                .help("What are case management orders and what do I need to do?"),
            ChecklistItem::new("cm-deadlines", "checklists.caseManagement.noteDeadlines"),
            ChecklistItem::new("cm-documents", "checklists.caseManagement.gatherDocuments")
                .help("What documents do I need to gather for my case?"),
        ],
    ),
    (
        JourneyStepKey::Witness,
        &[
            ChecklistItem::new("wit-statement", "checklists.witness.writeStatement")
                .help("How do I write a good witness statement?"),
            ChecklistItem::new("wit-others", "checklists.witness.getOthers")
                .help("Can other people write witness statements for my case?"),
            ChecklistItem::new("wit-bundle", "checklists.witness.prepareBundle")
                .help("What is a bundle and how do I prepare one?"),
            ChecklistItem::new("wit-schedule", "checklists.witness.scheduleOfLoss")
                .help("What is a schedule of loss and how do I create one?"),
        ],
    ),
    (
        JourneyStepKey::Hearing,
        &[
            ChecklistItem::new("hr-prepare", "checklists.hearing.prepare")
                .help("How do I prepare for my tribunal hearing?"),
            ChecklistItem::new("hr-travel", "checklists.hearing.travel"),
            ChecklistItem::new("hr-dress", "checklists.hearing.dress")
                .help("What should I wear to a tribunal hearing?"),
            ChecklistItem::new("hr-documents", "checklists.hearing.bringDocuments"),
        ],
    ),
];

/// Checklist items for `key`; empty for steps without a checklist.
pub fn checklist_for(key: JourneyStepKey) -> &'static [ChecklistItem] {
    STEP_CHECKLISTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, items)| *items)
        .unwrap_or(&[])
}

/// How much of a step's checklist is ticked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ChecklistProgress {
    pub completed: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent; 0 when there is no checklist
    pub percent: u8,
}

/// Count ticked catalog items for `key`. Unknown item IDs are not counted.
pub fn checklist_progress(progress: &JourneyProgress, key: JourneyStepKey) -> ChecklistProgress {
    let items = checklist_for(key);
    let completed = progress
        .get(key)
        .map(|p| items.iter().filter(|item| p.checklist_items.contains(item.id)).count())
        .unwrap_or(0);

    ChecklistProgress {
        completed,
        total: items.len(),
        percent: percent(completed, items.len()),
    }
}

pub(crate) fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u8
}
