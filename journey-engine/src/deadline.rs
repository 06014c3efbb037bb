//! Employment tribunal filing deadline.
//!
//! The primary limit is three calendar months less one day from the
//! incident. Time spent in ACAS Early Conciliation extends it by up to
//! 30 days. The calculation never fails: a missing or unreadable incident
//! date yields an unknown deadline flagged as `Warning`.

use case_record::validation::parse_iso_date;
use case_record::{AcasStatus, CaseRecord};
use chrono::{Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::locale::DateLocale;

/// Calendar months from the incident to the primary limit.
pub const LIMITATION_MONTHS: u32 = 3;

/// Cap on the ACAS Early Conciliation extension, in days.
pub const MAX_ACAS_EXTENSION_DAYS: i64 = 30;

/// Days left at or below which the deadline is urgent.
pub const URGENT_DAYS: i64 = 7;

/// Days left at or below which the deadline needs attention.
pub const WARNING_DAYS: i64 = 21;

/// How close the deadline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Ok,
    Warning,
    Urgent,
}

impl Urgency {
    /// Tier for a raw (possibly negative) day count.
    pub fn from_days_left(days_left: i64) -> Self {
        if days_left <= URGENT_DAYS {
            Self::Urgent
        } else if days_left <= WARNING_DAYS {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    /// Translation key for the status line
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::Ok => "deadline.statusOk",
            Self::Warning => "deadline.statusWarning",
            Self::Urgent => "deadline.statusUrgent",
        }
    }
}

/// What the claimant should do next about ACAS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    /// Conciliation has not started (or the claimant is unsure)
    StartAcas,
    /// Conciliation is under way
    AcasStarted,
}

impl NextAction {
    pub fn for_status(status: AcasStatus) -> Self {
        match status {
            AcasStatus::Started => Self::AcasStarted,
            AcasStatus::NotStarted | AcasStatus::Unknown => Self::StartAcas,
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Self::StartAcas => "deadline.nextAction.startAcas",
            Self::AcasStarted => "deadline.nextAction.acasStarted",
        }
    }
}

/// Result of a deadline calculation, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DeadlineResult {
    pub deadline: Option<NaiveDate>,
    /// Never negative; a passed deadline reports 0
    pub days_left: Option<u32>,
    pub urgency: Urgency,
    pub formatted_deadline: Option<String>,
    pub includes_acas_extension: bool,
}

impl DeadlineResult {
    /// The deadline cannot be determined.
    pub fn unknown() -> Self {
        Self {
            deadline: None,
            days_left: None,
            urgency: Urgency::Warning,
            formatted_deadline: None,
            includes_acas_extension: false,
        }
    }

    pub fn is_known(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Computes filing deadlines relative to a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct DeadlineCalculator {
    today: NaiveDate,
    locale: DateLocale,
}

impl DeadlineCalculator {
    /// Calculator evaluating days left from `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            locale: DateLocale::english(),
        }
    }

    /// Calculator for the current local date.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Builder: render dates for `locale`.
    pub fn with_locale(mut self, locale: DateLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn evaluation_date(&self) -> NaiveDate {
        self.today
    }

    /// Deadline for the dates and ACAS status held on a case record,
    /// rendered in the record's language.
    pub fn for_record(&self, record: &CaseRecord) -> DeadlineResult {
        self.with_locale(DateLocale::new(record.language)).compute(
            record.incident_date.as_deref(),
            record.acas_status,
            record.acas_start_date.as_deref(),
        )
    }

    /// Compute the deadline from raw date strings.
    ///
    /// `acas_start_date` is only consulted when `acas_status` is `Started`.
    pub fn compute(
        &self,
        incident_date: Option<&str>,
        acas_status: AcasStatus,
        acas_start_date: Option<&str>,
    ) -> DeadlineResult {
        let Some(incident) = incident_date.and_then(parse_iso_date) else {
            return DeadlineResult::unknown();
        };
        let Some(base) = primary_limit(incident) else {
            tracing::warn!(%incident, "Incident date out of calendar range");
            return DeadlineResult::unknown();
        };

        let acas_start = match acas_status {
            AcasStatus::Started => acas_start_date.and_then(parse_iso_date),
            AcasStatus::NotStarted | AcasStatus::Unknown => None,
        };
        let extension = acas_start.map(|start| acas_extension_days(incident, start)).unwrap_or(0);

        let deadline = if extension > 0 {
            base.checked_add_days(Days::new(extension as u64))
        } else {
            Some(base)
        };
        let Some(deadline) = deadline else {
            return DeadlineResult::unknown();
        };

        let raw_days_left = (deadline - self.today).num_days();
        let urgency = Urgency::from_days_left(raw_days_left);

        tracing::debug!(
            %incident,
            %deadline,
            extension_days = extension,
            days_left = raw_days_left,
            "Computed tribunal deadline"
        );

        DeadlineResult {
            deadline: Some(deadline),
            days_left: Some(u32::try_from(raw_days_left.max(0)).unwrap_or(u32::MAX)),
            urgency,
            formatted_deadline: Some(self.locale.long_date(deadline)),
            includes_acas_extension: extension > 0,
        }
    }
}

/// Deadline for the current local date, rendered in English.
pub fn compute_deadline(
    incident_date: Option<&str>,
    acas_status: AcasStatus,
    acas_start_date: Option<&str>,
) -> DeadlineResult {
    DeadlineCalculator::today().compute(incident_date, acas_status, acas_start_date)
}

/// Incident date plus three calendar months, less one day.
///
/// Month addition clamps to the end of shorter months, so 31 January maps
/// to 30 April before the day is taken off.
pub fn primary_limit(incident: NaiveDate) -> Option<NaiveDate> {
    incident
        .checked_add_months(Months::new(LIMITATION_MONTHS))?
        .checked_sub_days(Days::new(1))
}

/// Days of ACAS extension, capped at [`MAX_ACAS_EXTENSION_DAYS`].
///
/// A start date before the incident gives no extension and is not treated
/// as an error.
pub fn acas_extension_days(incident: NaiveDate, acas_start: NaiveDate) -> i64 {
    if acas_start < incident {
        tracing::debug!(%incident, %acas_start, "ACAS start precedes incident; no extension");
        return 0;
    }
    (acas_start - incident).num_days().clamp(0, MAX_ACAS_EXTENSION_DAYS)
}
