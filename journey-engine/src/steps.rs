//! The fixed seven-step tribunal journey.
//!
//! [`JOURNEY_STEPS`] is the single table the state machine reads: ordering,
//! display flags, and which steps need a certificate or reference number
//! before they can be completed. Certificate rules are looked up here by
//! step key rather than checked ad hoc by callers.

use case_record::JourneyStepKey;
use regex::RegexBuilder;

/// ACAS Early Conciliation certificate number, e.g. `R123456/01/23`.
pub const ACAS_CERTIFICATE_PATTERN: &str = r"^[A-Z]{1,2}\d{6}/\d{2}/\d{2}$";

/// Error types for certificate validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CertificateError {
    /// No certificate was supplied, or only whitespace
    #[error("A reference number is required")]
    Missing,

    /// The value does not match the step's format
    #[error("Reference number '{0}' is not in the expected format")]
    InvalidFormat(String),

    /// The step's pattern could not be compiled
    #[error("Certificate pattern error: {0}")]
    Pattern(String),
}

/// What a step demands of its certificate number before completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateRule {
    /// No certificate is recorded for this step
    NotRequired,
    /// Any non-empty value
    Required,
    /// Non-empty and matching the pattern, case-insensitively
    Pattern(&'static str),
}

impl CertificateRule {
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::NotRequired)
    }

    pub fn pattern(&self) -> Option<&'static str> {
        match self {
            Self::Pattern(p) => Some(p),
            _ => None,
        }
    }

    /// Check a supplied certificate, returning the trimmed value to store.
    ///
    /// Steps that take no certificate always return `Ok(None)`.
    pub fn validate(&self, certificate: Option<&str>) -> Result<Option<String>, CertificateError> {
        if !self.is_required() {
            return Ok(None);
        }

        let value = certificate.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Err(CertificateError::Missing);
        }

        if let Some(pattern) = self.pattern() {
            let re = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| CertificateError::Pattern(e.to_string()))?;
            if !re.is_match(value) {
                return Err(CertificateError::InvalidFormat(value.to_string()));
            }
        }

        Ok(Some(value.to_string()))
    }
}

/// Static description of one journey step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub key: JourneyStepKey,
    /// Shown as a mandatory badge; has no effect on transitions
    pub mandatory: bool,
    pub certificate: CertificateRule,
    /// Whether the step has a checklist in [`crate::checklist::STEP_CHECKLISTS`]
    pub has_checklist: bool,
}

impl StepDefinition {
    pub fn requires_certificate(&self) -> bool {
        self.certificate.is_required()
    }

    pub fn index(&self) -> usize {
        self.key.index()
    }

    /// Translation key for the step title
    pub fn title_key(&self) -> String {
        format!("journey.steps.{}.title", self.key)
    }

    /// Definition for a step key.
    pub fn for_key(key: JourneyStepKey) -> &'static StepDefinition {
        &JOURNEY_STEPS[key.index()]
    }
}

/// The journey in order. Index `i` holds the step whose key has index `i`.
pub static JOURNEY_STEPS: [StepDefinition; 7] = [
    StepDefinition {
        key: JourneyStepKey::Incident,
        mandatory: false,
        certificate: CertificateRule::NotRequired,
        has_checklist: false,
    },
    StepDefinition {
        key: JourneyStepKey::Acas,
        mandatory: true,
        certificate: CertificateRule::Pattern(ACAS_CERTIFICATE_PATTERN),
        has_checklist: false,
    },
    StepDefinition {
        key: JourneyStepKey::Et1,
        mandatory: false,
        certificate: CertificateRule::Required,
        has_checklist: true,
    },
    StepDefinition {
        key: JourneyStepKey::Et3,
        mandatory: false,
        certificate: CertificateRule::NotRequired,
        has_checklist: true,
    },
    StepDefinition {
        key: JourneyStepKey::CaseManagement,
        mandatory: false,
        certificate: CertificateRule::NotRequired,
        has_checklist: true,
    },
    StepDefinition {
        key: JourneyStepKey::Witness,
        mandatory: false,
        certificate: CertificateRule::NotRequired,
        has_checklist: true,
    },
    StepDefinition {
        key: JourneyStepKey::Hearing,
        mandatory: false,
        certificate: CertificateRule::NotRequired,
        has_checklist: true,
    },
];
