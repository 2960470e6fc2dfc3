//! Notice type catalog.
//!
//! Maps known notice-type labels to a guidance sentence that steers the
//! model. Built once at startup and shared read-only.

use std::collections::BTreeMap;

const BUILTIN_GUIDANCE: [(&str, &str); 10] = [
    (
        "Annual Function",
        "Highlight the cultural performances and prize distribution, and warmly invite students and parents to attend.",
    ),
    (
        "Holiday Notice",
        "State clearly that the school will remain closed, mention the occasion if it is known, and specify when regular classes resume.",
    ),
    (
        "Parent-Teacher Meeting",
        "Encourage parents to attend, explain that student progress will be discussed with class teachers, and request punctuality.",
    ),
    (
        "Examination Schedule",
        "Emphasize the examination dates and reporting time, and remind students to carry their admit cards and required stationery.",
    ),
    (
        "Sports Day",
        "Mention the athletic events, ask students to report in sports uniform, and invite parents to cheer the participants.",
    ),
    (
        "Field Trip",
        "Mention the destination and its educational purpose, the need for signed parental consent, and what students should carry.",
    ),
    (
        "Fee Reminder",
        "Politely remind parents of the pending fee payment and its due date, and note that late payment may attract a fine.",
    ),
    (
        "Admission Notice",
        "Announce that admissions are open, mention the classes and the application process, and list the documents required.",
    ),
    (
        "Workshop",
        "Describe the workshop topic and its benefits, name the intended participants, and mention any registration requirement.",
    ),
    (
        "Cultural Event",
        "Describe the cultural programme, invite students to participate, and welcome the school community to attend.",
    ),
];

/// Read-only mapping from notice-type label to guidance sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeTypeCatalog {
    entries: BTreeMap<String, String>,
}

impl NoticeTypeCatalog {
    /// The built-in notice types.
    pub fn builtin() -> Self {
        Self::default().with_entries(
            BUILTIN_GUIDANCE
                .iter()
                .map(|(label, guidance)| (label.to_string(), guidance.to_string())),
        )
    }

    /// Add or replace entries, consuming the catalog.
    pub fn with_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (label, guidance) in entries {
            self.entries
                .insert(label.trim().to_string(), guidance.trim().to_string());
        }
        self
    }

    /// Guidance for an exact (trimmed, case-sensitive) label match.
    pub fn guidance(&self, notice_type: &str) -> Option<&str> {
        self.entries.get(notice_type.trim()).map(String::as_str)
    }

    /// Known labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
