//! Tribunal document drafts and their templates.
//!
//! Drafts are opaque to the journey and deadline logic; they are carried on
//! the record so they persist and export with the rest of the case.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Error types for document drafting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// Section ID is not part of the template
    #[error("Unknown section '{section}' for {doc_type:?}")]
    UnknownSection { doc_type: DocumentType, section: String },

    /// Required sections are still empty
    #[error("Required sections are empty: {}", .0.join(", "))]
    MissingSections(Vec<String>),
}

/// Documents the claimant can prepare for the tribunal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    WitnessStatement,
    ScheduleOfLoss,
    Chronology,
    ListOfIssues,
}

impl DocumentType {
    pub fn template(&self) -> &'static DocumentTemplate {
        match self {
            Self::WitnessStatement => &DOCUMENT_TEMPLATES[0],
            Self::ScheduleOfLoss => &DOCUMENT_TEMPLATES[1],
            Self::Chronology => &DOCUMENT_TEMPLATES[2],
            Self::ListOfIssues => &DOCUMENT_TEMPLATES[3],
        }
    }
}

/// One section of a document template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSection {
    pub id: &'static str,
    /// English heading used in exports
    pub title: &'static str,
    pub required: bool,
    /// Question handed to the chat assistant when the user asks for help
    pub help_prompt: &'static str,
}

/// Fixed structure of a tribunal document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentTemplate {
    pub doc_type: DocumentType,
    /// Translation key for the title
    pub title_key: &'static str,
    /// English title used in exports
    pub title: &'static str,
    pub sections: &'static [DocumentSection],
}

impl DocumentTemplate {
    pub fn section(&self, id: &str) -> Option<&'static DocumentSection> {
        self.sections.iter().find(|s| s.id == id)
    }
}

pub static DOCUMENT_TEMPLATES: [DocumentTemplate; 4] = [
    DocumentTemplate {
        doc_type: DocumentType::WitnessStatement,
        title_key: "documents.witnessStatement.title",
        title: "Witness Statement",
        sections: &[
            DocumentSection {
                id: "introduction",
                title: "Introduction",
                required: true,
                help_prompt: "What should I write in my witness statement introduction?",
            },
            DocumentSection {
                id: "background",
                title: "Background",
                required: true,
                help_prompt:
                    "What background information should I include in my witness statement?",
            },
            DocumentSection {
                id: "events",
                title: "What happened",
                required: true,
                help_prompt: "How should I describe what happened in my witness statement?",
            },
            DocumentSection {
                id: "impact",
                title: "Impact on me",
                required: true,
                help_prompt: "How do I explain the impact of what happened to me?",
            },
            DocumentSection {
                id: "conclusion",
                title: "Conclusion",
                required: true,
                help_prompt: "How should I end my witness statement?",
            },
        ],
    },
    DocumentTemplate {
        doc_type: DocumentType::ScheduleOfLoss,
        title_key: "documents.scheduleOfLoss.title",
        title: "Schedule of Loss",
        sections: &[
            DocumentSection {
                id: "pastLoss",
                title: "Past loss of earnings",
                required: true,
                help_prompt: "What past losses can I claim in my schedule of loss?",
            },
            DocumentSection {
                id: "futureLoss",
                title: "Future loss of earnings",
                required: false,
                help_prompt: "How do I calculate future losses for my tribunal claim?",
            },
            DocumentSection {
                id: "benefits",
                title: "Lost benefits",
                required: false,
                help_prompt: "What benefits did I lose that I can include?",
            },
            DocumentSection {
                id: "injury",
                title: "Injury to feelings",
                required: false,
                help_prompt: "Can I claim for injury to feelings in my schedule of loss?",
            },
        ],
    },
    DocumentTemplate {
        doc_type: DocumentType::Chronology,
        title_key: "documents.chronology.title",
        title: "Chronology",
        sections: &[DocumentSection {
            id: "events",
            title: "Timeline of events",
            required: true,
            help_prompt: "How do I create a chronology for my tribunal case?",
        }],
    },
    DocumentTemplate {
        doc_type: DocumentType::ListOfIssues,
        title_key: "documents.listOfIssues.title",
        title: "List of Issues",
        sections: &[DocumentSection {
            id: "claims",
            title: "Claims and issues",
            required: true,
            help_prompt: "What should I include in my list of issues?",
        }],
    },
];

/// A document in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DocumentDraft {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Section ID to entered text
    #[serde(default)]
    pub sections: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

impl DocumentDraft {
    pub fn new(doc_type: DocumentType, now: DateTime<Utc>) -> Self {
        Self {
            doc_type,
            sections: BTreeMap::new(),
            created_at: now,
            updated_at: now,
            completed: false,
        }
    }

    /// Set the text of one section. Only sections in the template are accepted.
    pub fn set_section(
        &mut self,
        section_id: &str,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DocumentError> {
        let template = self.doc_type.template();
        if template.section(section_id).is_none() {
            return Err(DocumentError::UnknownSection {
                doc_type: self.doc_type,
                section: section_id.to_string(),
            });
        }

        self.sections.insert(section_id.to_string(), text.into());
        self.updated_at = now;
        Ok(())
    }

    /// Required sections with no non-whitespace text, in template order.
    pub fn missing_required_sections(&self) -> Vec<&'static str> {
        self.doc_type
            .template()
            .sections
            .iter()
            .filter(|s| s.required)
            .filter(|s| {
                self.sections
                    .get(s.id)
                    .map(|text| text.trim().is_empty())
                    .unwrap_or(true)
            })
            .map(|s| s.id)
            .collect()
    }

    /// Mark the draft finished once every required section has text.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<(), DocumentError> {
        let missing = self.missing_required_sections();
        if !missing.is_empty() {
            return Err(DocumentError::MissingSections(
                missing.into_iter().map(String::from).collect(),
            ));
        }

        self.completed = true;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_templates_indexed_by_type() {
        for template in &DOCUMENT_TEMPLATES {
            assert_eq!(template.doc_type.template(), template);
        }
    }

    #[test]
    fn test_unknown_section_rejected() {
        let mut draft = DocumentDraft::new(DocumentType::Chronology, at(9));
        let err = draft.set_section("impact", "text", at(10)).unwrap_err();
        assert!(matches!(err, DocumentError::UnknownSection { .. }));
        assert!(draft.sections.is_empty());
        assert_eq!(draft.updated_at, at(9));
    }

    #[test]
    fn test_finish_requires_required_sections() {
        let mut draft = DocumentDraft::new(DocumentType::ScheduleOfLoss, at(9));
        assert_eq!(draft.missing_required_sections(), vec!["pastLoss"]);

        draft.set_section("pastLoss", "   ", at(10)).unwrap();
        assert!(draft.finish(at(10)).is_err());
        assert!(!draft.completed);

        draft.set_section("pastLoss", "Six weeks of wages", at(11)).unwrap();
        draft.finish(at(12)).unwrap();
        assert!(draft.completed);
        assert_eq!(draft.updated_at, at(12));
        assert_eq!(draft.created_at, at(9));
    }

    #[test]
    fn test_draft_type_serialized_as_type() {
        let draft = DocumentDraft::new(DocumentType::ListOfIssues, at(9));
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "listOfIssues");
        assert_eq!(value["completed"], false);
    }
}
