//! Field resolver: fills gaps in a notice from its key details.
//!
//! Each inferable field has its own pattern. Patterns never depend on each
//! other, and the leftmost match in `key_details` wins. A caller-supplied
//! value is never replaced.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{present, NoticeFields};

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:on\s+)?((?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4})\b",
    )
    .expect("valid date regex")
});

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:at\s+)?(\d{1,2}:[0-5]\d(?:\s*(?:[ap]\.m\.|[ap]\.?m\b))?)")
        .expect("valid time regex")
});

static VENUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[Ii]n|[Aa]t)\s+(?:[Tt]he\s+)?((?:[A-Z][\w'&-]*\s+)*(?:Auditorium|Hall|Ground|Room|Center|Block|Building|Lab|Field)s?(?:\s+\d+[A-Z]?)?)\b",
    )
    .expect("valid venue regex")
});

static RECIPIENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:for|to)\s+(all\s+[^.,;:!?\n]+|(?:the\s+)?((?:[\w-]+\s+){0,3}?)(?:students|parents|guardians|teachers|staff|faculty|pupils|members|employees)\b[^.,;:!?\n]*)|\b(all\s+[^.,;:!?\n]+)",
    )
    .expect("valid recipient regex")
});

static CONTACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}|\(?\b\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b",
    )
    .expect("valid contact regex")
});

/// Fill every blank inferable field that `key_details` can supply.
///
/// Non-blank caller values pass through untouched; fields with no match stay
/// unset for the placeholder policy.
pub fn resolve_fields(mut fields: NoticeFields) -> NoticeFields {
    if present(Some(&fields.key_details)).is_none() {
        return fields;
    }

    let text = fields.key_details.clone();
    fill(&mut fields.event_date, || extract_date(&text));
    fill(&mut fields.time, || extract_time(&text));
    fill(&mut fields.venue, || extract_venue(&text));
    fill(&mut fields.recipient, || extract_recipient(&text));
    fill(&mut fields.contact_info, || extract_contact(&text));

    tracing::debug!(
        event_date = ?fields.event_date,
        time = ?fields.time,
        venue = ?fields.venue,
        recipient = ?fields.recipient,
        contact_info = ?fields.contact_info,
        "Resolved notice fields"
    );

    fields
}

fn fill<F>(slot: &mut Option<String>, infer: F)
where
    F: FnOnce() -> Option<String>,
{
    if present(slot.as_deref()).is_none() {
        if let Some(value) = infer() {
            *slot = Some(value);
        }
    }
}

/// "Month D, YYYY", without a leading "on".
pub fn extract_date(text: &str) -> Option<String> {
    first_capture(&DATE_RE, text)
}

/// "H:MM" with optional AM/PM, without a leading "at".
pub fn extract_time(text: &str) -> Option<String> {
    first_capture(&TIME_RE, text)
}

/// Capitalized place name after "in"/"at" ending in a venue noun.
pub fn extract_venue(text: &str) -> Option<String> {
    first_capture(&VENUE_RE, text)
}

/// Audience phrase, title-cased word by word.
///
/// The words between "for"/"to" and the audience noun may not contain
/// another "for"/"to"; such a match is skipped so the later phrase wins.
pub fn extract_recipient(text: &str) -> Option<String> {
    let mut start = 0;

    while let Some(caps) = RECIPIENT_RE.captures_at(text, start) {
        let crosses_intro = caps
            .get(2)
            .map(|window| window.as_str().split_whitespace().any(is_intro_word))
            .unwrap_or(false);

        if !crosses_intro {
            return caps
                .iter()
                .skip(1)
                .flatten()
                .next()
                .map(|m| title_case(m.as_str().trim()))
                .filter(|phrase| !phrase.is_empty());
        }

        // The intro word is ASCII, so one byte past it is a char boundary.
        start = caps.get(0).map_or(text.len(), |m| m.start() + 1);
    }

    None
}

fn is_intro_word(word: &str) -> bool {
    word.eq_ignore_ascii_case("for") || word.eq_ignore_ascii_case("to")
}

/// Email address or "(NNN) NNN-NNNN" style phone number.
pub fn extract_contact(text: &str) -> Option<String> {
    CONTACT_RE.find(text).map(|m| m.as_str().to_string())
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str().trim().to_string())
}

fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_details(details: &str) -> NoticeFields {
        NoticeFields {
            key_details: details.to_string(),
            ..NoticeFields::default()
        }
    }

    #[test]
    fn test_holiday_scenario() {
        let fields = NoticeFields {
            notice_type: "Holiday Notice".to_string(),
            key_details: "School will remain closed on March 10, 2026 for all students."
                .to_string(),
            event_date: Some(String::new()),
            recipient: Some(String::new()),
            ..NoticeFields::default()
        };

        let resolved = resolve_fields(fields);
        assert_eq!(resolved.event_date.as_deref(), Some("March 10, 2026"));
        assert_eq!(resolved.recipient.as_deref(), Some("All Students"));
        assert_eq!(resolved.time, None);
        assert_eq!(resolved.venue, None);
        assert_eq!(resolved.contact_info, None);
    }

    #[test]
    fn test_contact_email_scenario() {
        let resolved = resolve_fields(with_details(
            "Uniform sale next week. For queries, contact us at admin@example.org.",
        ));
        assert_eq!(resolved.contact_info.as_deref(), Some("admin@example.org"));
    }

    #[test]
    fn test_caller_values_are_never_overwritten() {
        let fields = NoticeFields {
            notice_type: "Sports Day".to_string(),
            event_date: Some("June 20, 2025".to_string()),
            time: Some("8:00 AM".to_string()),
            venue: Some("Main Ground".to_string()),
            recipient: Some("Classes 6 to 10".to_string()),
            contact_info: Some("sports@school.edu".to_string()),
            key_details: "Held on March 3, 2026 at 9:30 AM in the Indoor Hall for all parents. \
                          Call (555) 123-4567."
                .to_string(),
            signature_title: "Sports Coordinator".to_string(),
        };

        assert_eq!(resolve_fields(fields.clone()), fields);
    }

    #[test]
    fn test_empty_key_details_extracts_nothing() {
        let fields = with_details("   ");
        assert_eq!(resolve_fields(fields.clone()), fields);
    }

    #[test]
    fn test_full_extraction() {
        let resolved = resolve_fields(with_details(
            "The annual day will be held on December 5th, 2025 at 5:30 PM in the School \
             Auditorium for all students and parents. Contact (555) 123-4567 for passes.",
        ));
        assert_eq!(resolved.event_date.as_deref(), Some("December 5th, 2025"));
        assert_eq!(resolved.time.as_deref(), Some("5:30 PM"));
        assert_eq!(resolved.venue.as_deref(), Some("School Auditorium"));
        assert_eq!(resolved.recipient.as_deref(), Some("All Students And Parents"));
        assert_eq!(resolved.contact_info.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_first_date_wins() {
        assert_eq!(
            extract_date("Exams run from April 2, 2026 to April 9, 2026.").as_deref(),
            Some("April 2, 2026")
        );
        assert_eq!(extract_date("Sometime in 2026"), None);
    }

    #[test]
    fn test_time_variants() {
        assert_eq!(extract_time("Reporting at 7:45 a.m. sharp").as_deref(), Some("7:45 a.m."));
        assert_eq!(extract_time("Starts 14:00 onwards").as_deref(), Some("14:00"));
        assert_eq!(extract_time("at 10:30am,").as_deref(), Some("10:30am"));
        assert_eq!(extract_time("no clock here"), None);
    }

    #[test]
    fn test_time_leaves_sentence_period() {
        assert_eq!(
            extract_time("The function starts at 5:30 PM.").as_deref(),
            Some("5:30 PM")
        );
        assert_eq!(
            extract_time("Gates open at 9:00 am. Bring ID.").as_deref(),
            Some("9:00 am")
        );
        assert_eq!(extract_time("Doors close at 6:15 p.m").as_deref(), Some("6:15 p.m"));

        let resolved = resolve_fields(with_details("Meet at 5:30 PM."));
        assert_eq!(resolved.time.as_deref(), Some("5:30 PM"));
    }

    #[test]
    fn test_venue_requires_capitalized_noun() {
        assert_eq!(extract_venue("Meet in Room 12 after lunch").as_deref(), Some("Room 12"));
        assert_eq!(extract_venue("Assemble at the Science Block.").as_deref(), Some("Science Block"));
        assert_eq!(extract_venue("gather in the hall"), None);
        assert_eq!(extract_venue("at 9:00 AM in Hallway 3"), None);
    }

    #[test]
    fn test_recipient_skips_verbs() {
        assert_eq!(
            extract_recipient("Parents are requested to attend the meeting."),
            None
        );
        assert_eq!(
            extract_recipient("This circular is for Class 8 students; please read.").as_deref(),
            Some("Class 8 Students")
        );
        assert_eq!(
            extract_recipient("All teaching staff must report early.").as_deref(),
            Some("All Teaching Staff Must Report Early")
        );
        assert_eq!(
            extract_recipient("Parents are requested to submit forms for students by Friday.")
                .as_deref(),
            Some("Students By Friday")
        );
    }

    #[test]
    fn test_contact_phone_separators() {
        assert_eq!(extract_contact("Call 555.123.4567 today").as_deref(), Some("555.123.4567"));
        assert_eq!(extract_contact("Call (555)123 4567").as_deref(), Some("(555)123 4567"));
        assert_eq!(extract_contact("Roll 12345"), None);
    }

    #[test]
    fn test_contact_leftmost_match_wins() {
        assert_eq!(
            extract_contact("Phone (555) 987-6543 or mail office@school.edu").as_deref(),
            Some("(555) 987-6543")
        );
    }
}
