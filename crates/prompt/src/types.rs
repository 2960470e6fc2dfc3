//! Domain types for notice prompts.

use serde::{Deserialize, Serialize};

/// The fields describing one school notice.
///
/// Inferable fields are `Option`s: `None`, an empty string and a
/// whitespace-only string all mean "not supplied".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeFields {
    /// Notice category label (e.g., "Holiday Notice")
    #[serde(default = "default_notice_type")]
    pub notice_type: String,

    /// Event date (e.g., "June 20, 2025")
    #[serde(default)]
    pub event_date: Option<String>,

    /// Event time (e.g., "5:00 PM")
    #[serde(default)]
    pub time: Option<String>,

    /// Event venue (e.g., "School Auditorium")
    #[serde(default)]
    pub venue: Option<String>,

    /// Intended recipients (e.g., "All Students and Parents")
    #[serde(default)]
    pub recipient: Option<String>,

    /// Contact information (e.g., "office@school.edu | (555) 123-4567")
    #[serde(default)]
    pub contact_info: Option<String>,

    /// Free-text summary; also the source for field inference
    #[serde(default = "default_key_details")]
    pub key_details: String,

    /// Authority signing the notice
    #[serde(default = "default_signature_title")]
    pub signature_title: String,
}

fn default_notice_type() -> String {
    "Annual Function".to_string()
}

fn default_key_details() -> String {
    "Annual cultural program and prize distribution".to_string()
}

fn default_signature_title() -> String {
    "Principal".to_string()
}

impl Default for NoticeFields {
    fn default() -> Self {
        Self {
            notice_type: default_notice_type(),
            event_date: None,
            time: None,
            venue: None,
            recipient: None,
            contact_info: None,
            key_details: default_key_details(),
            signature_title: default_signature_title(),
        }
    }
}

/// Every field listed in the summary block, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedField {
    NoticeType,
    KeyDetails,
    EventDate,
    EventTime,
    Venue,
    Recipient,
    ContactInfo,
    SignatureTitle,
}

impl TrackedField {
    pub const ALL: [TrackedField; 8] = [
        Self::NoticeType,
        Self::KeyDetails,
        Self::EventDate,
        Self::EventTime,
        Self::Venue,
        Self::Recipient,
        Self::ContactInfo,
        Self::SignatureTitle,
    ];

    /// Label used in the summary block.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoticeType => "Notice Type",
            Self::KeyDetails => "Key Details",
            Self::EventDate => "Event Date",
            Self::EventTime => "Event Time",
            Self::Venue => "Venue",
            Self::Recipient => "Recipient",
            Self::ContactInfo => "Contact Info",
            Self::SignatureTitle => "Signature Title",
        }
    }

    /// Raw value of this field on a record.
    pub fn raw<'a>(&self, fields: &'a NoticeFields) -> Option<&'a str> {
        match self {
            Self::NoticeType => Some(fields.notice_type.as_str()),
            Self::KeyDetails => Some(fields.key_details.as_str()),
            Self::EventDate => fields.event_date.as_deref(),
            Self::EventTime => fields.time.as_deref(),
            Self::Venue => fields.venue.as_deref(),
            Self::Recipient => fields.recipient.as_deref(),
            Self::ContactInfo => fields.contact_info.as_deref(),
            Self::SignatureTitle => Some(fields.signature_title.as_str()),
        }
    }
}

/// Trimmed value, or `None` when blank.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Heading for a notice type: "Sports Day" becomes "Sports Day Notice",
/// "Holiday Notice" stays as is. `None` for a blank type.
pub fn notice_heading(notice_type: &str) -> Option<String> {
    let trimmed = present(Some(notice_type))?;
    if trimmed.to_lowercase().ends_with("notice") {
        Some(trimmed.to_string())
    } else {
        Some(format!("{} Notice", trimmed))
    }
}

/// A fully built prompt ready for the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// Instruction block: formatting rules and category guidance
    pub system: String,

    /// Field summary block
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltPromptMetadata {
    /// Notice heading, if the notice type was not blank
    pub heading: Option<String>,

    /// Whether the notice type matched a catalog entry
    pub guidance_matched: bool,

    /// Fields rendered as the placeholder token
    pub placeholder_fields: Vec<TrackedField>,
}
