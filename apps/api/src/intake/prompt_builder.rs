//! Prompt Builder — renders extracted fields into the user prompt.

use crate::intake::fields::ExtractedFields;
use crate::intake::schema::{FieldLayout, FormSchema};

/// Renders the user prompt for a submission.
///
/// Sections are separated by a blank line and titled sections open with their
/// title. Every declared field produces its line(s) even when the value is
/// empty, so the model always sees the full questionnaire.
pub fn build_user_prompt(schema: &FormSchema, fields: &ExtractedFields) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (i, section) in schema.sections.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        if let Some(title) = section.title {
            lines.push(format!("{title}:"));
        }
        for field in section.fields {
            let value = fields.get(field.name);
            match field.layout {
                FieldLayout::Inline => lines.push(format!("{}: {}", field.label, value)),
                FieldLayout::Block => {
                    lines.push(format!("{}:", field.label));
                    lines.push(value.to_string());
                }
            }
        }
    }

    lines.join("\n")
}
