//! Journey progress state machine.
//!
//! Per step the states are `Locked`, `Current` and `Completed`. Only
//! `Completed` is stored (as [`StepProgress::completed`]); `Current` is the
//! first incomplete step in journey order and everything after it is
//! `Locked`. Transitions:
//!
//! ```text
//!   Locked ──(earlier steps done)──▶ Current ──mark_step_complete──▶ Completed
//!      ▲                                                              │
//!      └────────────────────────── unmark_step ───────────────────────┘
//! ```
//!
//! Completing a step is validated (certificate gate, ordering guard) before
//! any mutation. Unmarking removes the step's entry outright, including its
//! certificate and checklist ticks.

use case_record::{JourneyProgress, JourneyStepKey, StepProgress};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::checklist::percent;
use crate::steps::{CertificateError, StepDefinition, JOURNEY_STEPS};

/// Error types for journey transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    /// The certificate or reference number failed the step's validator
    #[error("Invalid certificate for step {step}: {reason}")]
    Certificate {
        step: JourneyStepKey,
        #[source]
        reason: CertificateError,
    },

    /// The step is more than one ahead of the current step
    #[error("Step {step} cannot be completed before step {current}")]
    OutOfOrder {
        step: JourneyStepKey,
        current: JourneyStepKey,
    },
}

impl JourneyError {
    /// Step the error refers to, for field-level reporting.
    pub fn step(&self) -> JourneyStepKey {
        match self {
            Self::Certificate { step, .. } | Self::OutOfOrder { step, .. } => *step,
        }
    }
}

/// Derived display state of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Current,
    Locked,
}

/// One row of the journey stepper.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView<'a> {
    pub definition: &'static StepDefinition,
    pub state: StepState,
    /// Whether the complete action should be offered
    pub can_mark_complete: bool,
    pub progress: Option<&'a StepProgress>,
}

/// Overall completion across the journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct JourneySummary {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
    pub current_step: JourneyStepKey,
}

/// Index of the first step not marked complete, or the last index when
/// every step is complete.
pub fn current_step_index(progress: &JourneyProgress) -> usize {
    JourneyStepKey::ALL
        .iter()
        .position(|key| !progress.is_completed(*key))
        .unwrap_or(JourneyStepKey::ALL.len() - 1)
}

/// A step may be completed if it is the current step, one step ahead of it,
/// or already behind it.
pub fn can_mark_complete(step_index: usize, current_step_index: usize) -> bool {
    step_index <= current_step_index + 1
}

/// Mark a step complete, recording its certificate where the step needs one.
///
/// Re-marking a completed step is an edit: the certificate and timestamp are
/// replaced and checklist ticks are kept. On error nothing is changed.
pub fn mark_step_complete(
    progress: &mut JourneyProgress,
    key: JourneyStepKey,
    certificate: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), JourneyError> {
    let definition = StepDefinition::for_key(key);

    let certificate = definition.certificate.validate(certificate).map_err(|reason| {
        tracing::debug!(step = %key, error = %reason, "Rejected step completion");
        JourneyError::Certificate { step: key, reason }
    })?;

    let current = current_step_index(progress);
    if !progress.is_completed(key) && !can_mark_complete(key.index(), current) {
        let current = JourneyStepKey::ALL[current];
        tracing::debug!(step = %key, current = %current, "Rejected out-of-order step completion");
        return Err(JourneyError::OutOfOrder { step: key, current });
    }

    let entry = progress.entry(key);
    entry.completed = true;
    entry.completed_at = Some(now);
    if definition.requires_certificate() {
        entry.certificate_number = certificate;
    }

    tracing::debug!(step = %key, "Step marked complete");
    Ok(())
}

/// Remove everything recorded for a step: completion, certificate and
/// checklist ticks. Returns what was removed.
pub fn unmark_step(progress: &mut JourneyProgress, key: JourneyStepKey) -> Option<StepProgress> {
    let removed = progress.remove(key);
    if removed.is_some() {
        tracing::debug!(step = %key, "Step progress cleared");
    }
    removed
}

/// Tick or untick a checklist item. Does not touch the step's completion.
///
/// Unticking on a step with no recorded progress leaves it unrecorded.
pub fn toggle_checklist_item(
    progress: &mut JourneyProgress,
    key: JourneyStepKey,
    item_id: &str,
    checked: bool,
) {
    if checked {
        progress.entry(key).checklist_items.insert(item_id.to_string());
    } else if let Some(entry) = progress.get_mut(key) {
        entry.checklist_items.remove(item_id);
    }
    tracing::debug!(step = %key, item = item_id, checked, "Checklist item toggled");
}

/// Stepper rows in journey order.
pub fn step_views(progress: &JourneyProgress) -> Vec<StepView<'_>> {
    let current = current_step_index(progress);
    JOURNEY_STEPS
        .iter()
        .enumerate()
        .map(|(index, definition)| {
            let entry = progress.get(definition.key);
            let completed = entry.map(|p| p.completed).unwrap_or(false);
            let state = if completed {
                StepState::Completed
            } else if index == current {
                StepState::Current
            } else {
                StepState::Locked
            };
            StepView {
                definition,
                state,
                can_mark_complete: completed || can_mark_complete(index, current),
                progress: entry,
            }
        })
        .collect()
}

/// Completed-step count and percentage for the progress sidebar.
pub fn journey_summary(progress: &JourneyProgress) -> JourneySummary {
    let completed = JourneyStepKey::ALL
        .iter()
        .filter(|key| progress.is_completed(**key))
        .count();
    let total = JourneyStepKey::ALL.len();
    JourneySummary {
        completed,
        total,
        percent: percent(completed, total),
        current_step: JourneyStepKey::ALL[current_step_index(progress)],
    }
}
