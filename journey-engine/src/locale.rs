//! Date rendering for a given interface language.
//!
//! Callers pass a [`DateLocale`] explicitly; nothing here reads a global
//! language setting.

use case_record::Language;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const WELSH_MONTHS: [&str; 12] = [
    "Ionawr", "Chwefror", "Mawrth", "Ebrill", "Mai", "Mehefin", "Gorffennaf", "Awst", "Medi",
    "Hydref", "Tachwedd", "Rhagfyr",
];

// Genitive forms, as used after a day number
const POLISH_MONTHS: [&str; 12] = [
    "stycznia", "lutego", "marca", "kwietnia", "maja", "czerwca", "lipca", "sierpnia", "września",
    "października", "listopada", "grudnia",
];

const ROMANIAN_MONTHS: [&str; 12] = [
    "ianuarie", "februarie", "martie", "aprilie", "mai", "iunie", "iulie", "august", "septembrie",
    "octombrie", "noiembrie", "decembrie",
];

/// Month naming for rendered dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateLocale {
    language: Language,
}

impl DateLocale {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn english() -> Self {
        Self::new(Language::EnglishA2)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Full month name. Languages without a table use English names.
    pub fn month_name(&self, month: u32) -> &'static str {
        let table = match self.language {
            Language::Welsh => &WELSH_MONTHS,
            Language::Polish => &POLISH_MONTHS,
            Language::Romanian => &ROMANIAN_MONTHS,
            _ => &ENGLISH_MONTHS,
        };
        let idx = (month.clamp(1, 12) - 1) as usize;
        table[idx]
    }

    /// "15 March 2025"
    pub fn long_date(&self, date: NaiveDate) -> String {
        format!("{} {} {}", date.day(), self.month_name(date.month()), date.year())
    }

    /// "05 March 2025", zero-padded day as in exported documents
    pub fn padded_date(&self, date: NaiveDate) -> String {
        format!("{:02} {} {}", date.day(), self.month_name(date.month()), date.year())
    }

    /// "05 March 2025, 14:30"
    pub fn padded_date_time(&self, at: NaiveDateTime) -> String {
        format!("{}, {}", self.padded_date(at.date()), at.format("%H:%M"))
    }
}
