//! Prompt builder: renders the instruction block and the field summary.

use crate::catalog::NoticeTypeCatalog;
use crate::types::{
    notice_heading, present, BuiltPrompt, BuiltPromptMetadata, NoticeFields, TrackedField,
};
use handlebars::Handlebars;
use notice_core::{AppError, AppResult};
use serde_json::json;

const SYSTEM_TEMPLATE: &str = include_str!("../templates/system_instructions.hbs");

/// Instruction used when the notice type has no catalog entry.
pub const GENERIC_TONE_CLAUSE: &str = "No category-specific guidance applies to this notice type. \
Adopt a generic formal tone suitable for any school announcement.";

/// Tunables for prompt rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOptions {
    /// Token shown for fields that could not be filled
    pub placeholder: String,

    /// Word ceiling stated in the instructions
    pub word_limit: u32,

    /// Preformatted date of issue; `None` forbids the model from adding one
    pub issue_date: Option<String>,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            placeholder: "[Placeholder]".to_string(),
            word_limit: 120,
            issue_date: None,
        }
    }
}

/// Build the instruction block and field summary for a resolved notice.
///
/// Pure and deterministic: the same fields, catalog and options always
/// produce byte-identical output.
///
/// # Example
/// ```
/// use notice_prompt::{build_prompt, NoticeFields, NoticeTypeCatalog, PromptOptions};
///
/// let catalog = NoticeTypeCatalog::builtin();
/// let built = build_prompt(&NoticeFields::default(), &catalog, &PromptOptions::default())?;
/// assert!(built.user.starts_with("SCHOOL NOTICE DETAILS:"));
/// # Ok::<(), notice_core::AppError>(())
/// ```
pub fn build_prompt(
    fields: &NoticeFields,
    catalog: &NoticeTypeCatalog,
    options: &PromptOptions,
) -> AppResult<BuiltPrompt> {
    let guidance = catalog.guidance(&fields.notice_type);
    let heading = notice_heading(&fields.notice_type);

    tracing::debug!(
        notice_type = %fields.notice_type,
        guidance_matched = guidance.is_some(),
        "Building notice prompt"
    );

    let system = render_system(guidance, options)?;
    let (user, placeholder_fields) = render_summary(fields, heading.as_deref(), guidance, options);

    Ok(BuiltPrompt {
        system,
        user,
        metadata: BuiltPromptMetadata {
            heading,
            guidance_matched: guidance.is_some(),
            placeholder_fields,
        },
    })
}

fn render_system(guidance: Option<&str>, options: &PromptOptions) -> AppResult<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string("system", SYSTEM_TEMPLATE)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let data = json!({
        "guidance": guidance.unwrap_or_default(),
        "generic_clause": GENERIC_TONE_CLAUSE,
        "placeholder": options.placeholder,
        "word_limit": options.word_limit,
        "issue_date": options.issue_date.as_deref().unwrap_or_default(),
    });

    handlebars
        .render("system", &data)
        .map(|rendered| rendered.trim_end().to_string())
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

fn render_summary(
    fields: &NoticeFields,
    heading: Option<&str>,
    guidance: Option<&str>,
    options: &PromptOptions,
) -> (String, Vec<TrackedField>) {
    let mut out = String::from("SCHOOL NOTICE DETAILS:");
    let mut placeholder_fields = Vec::new();

    for field in TrackedField::ALL {
        let value = match field {
            TrackedField::NoticeType => heading,
            TrackedField::KeyDetails => present(field.raw(fields)).or(guidance),
            _ => present(field.raw(fields)),
        };

        let value = match value {
            Some(v) => single_line(v),
            None => {
                placeholder_fields.push(field);
                options.placeholder.clone()
            }
        };

        out.push_str("\n- ");
        out.push_str(field.label());
        out.push_str(": ");
        out.push_str(&value);
    }

    if let Some(ref issue_date) = options.issue_date {
        out.push_str("\n- Date of Issue: ");
        out.push_str(&single_line(issue_date));
    }

    (out, placeholder_fields)
}

/// Collapse internal whitespace so a value never spans lines.
fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
