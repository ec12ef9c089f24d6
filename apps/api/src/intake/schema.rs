//! Form schemas for the two intake variants.
//!
//! A schema is the single source of truth for a form: which fields it
//! collects, their labels, how they are grouped into sections, and the order
//! in which they appear in the prompt, the HTML form, and the CSV record.

/// How a field is laid out in the prompt and the HTML form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLayout {
    /// `Label: value` on one line. Rendered as a single-line input.
    Inline,
    /// `Label:` on one line, the free-text value on the next. Rendered as a textarea.
    Block,
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub layout: FieldLayout,
}

impl FieldSpec {
    const fn inline(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            layout: FieldLayout::Inline,
        }
    }

    const fn block(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            layout: FieldLayout::Block,
        }
    }

    /// Used by the form template to pick `<textarea>` over `<input>`.
    pub fn is_block(&self) -> bool {
        self.layout == FieldLayout::Block
    }
}

/// A group of fields. Sections are separated by a blank line in the prompt.
#[derive(Debug)]
pub struct Section {
    pub title: Option<&'static str>,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug)]
pub struct FormSchema {
    pub key: &'static str,
    pub title: &'static str,
    pub intro: &'static str,
    pub sections: &'static [Section],
}

impl FormSchema {
    /// All declared field names, in prompt order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .map(|f| f.name)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Variant A: Dream Chaser application helper
// ────────────────────────────────────────────────────────────────────────────

pub static SCHOLARSHIP_SCHEMA: FormSchema = FormSchema {
    key: "scholarship",
    title: "Dream Chaser Scholarship Application Helper",
    intro: "Answer in your own words. We will turn your answers into a first draft \
        of your Dream Chaser application that you can edit before submitting.",
    sections: &[
        Section {
            title: None,
            fields: &[
                FieldSpec::inline("name", "Name"),
                FieldSpec::inline("age", "Age"),
                FieldSpec::inline("location", "City/Country"),
            ],
        },
        Section {
            title: None,
            fields: &[FieldSpec::block("academic_background", "Academic Background")],
        },
        Section {
            title: None,
            fields: &[FieldSpec::block("financial_situation", "Financial Situation")],
        },
        Section {
            title: None,
            fields: &[FieldSpec::block(
                "support_system",
                "Support System / Family Structure",
            )],
        },
        Section {
            title: None,
            fields: &[FieldSpec::block("future_plans", "Future Dreams & Plans")],
        },
        Section {
            title: None,
            fields: &[FieldSpec::block(
                "extra_info",
                "Anything else the student wants to share",
            )],
        },
    ],
};

// ────────────────────────────────────────────────────────────────────────────
// Variant B: student intake
// ────────────────────────────────────────────────────────────────────────────

pub static INTAKE_SCHEMA: FormSchema = FormSchema {
    key: "intake",
    title: "Light Your Mind Student Intake",
    intro: "Tell us about yourself. There are no wrong answers, and you can leave \
        anything blank that you would rather not share.",
    sections: &[
        Section {
            title: Some("BASIC INFORMATION"),
            fields: &[
                FieldSpec::inline("name", "Name"),
                FieldSpec::inline("age", "Age"),
                FieldSpec::inline("location", "City/Country"),
                FieldSpec::inline("school", "School"),
                FieldSpec::inline("grade", "Grade/Class"),
            ],
        },
        Section {
            title: Some("ACADEMIC PROFILE"),
            fields: &[
                FieldSpec::inline("favorite_subjects", "Favorite Subjects"),
                FieldSpec::block("academic_background", "Academic Background"),
                FieldSpec::block("achievements", "Achievements"),
            ],
        },
        Section {
            title: Some("SUPPORT SYSTEM"),
            fields: &[
                FieldSpec::block("family_structure", "Family Structure"),
                FieldSpec::block("support_system", "Who Supports You"),
                FieldSpec::inline("role_models", "Role Models / Mentors"),
            ],
        },
        Section {
            title: Some("FINANCIAL SITUATION"),
            fields: &[FieldSpec::block("financial_situation", "Financial Situation")],
        },
        Section {
            title: Some("CHALLENGES & HOPE"),
            fields: &[
                FieldSpec::block("challenges", "Challenges"),
                FieldSpec::inline("hope_score", "Hope Score (1-10)"),
            ],
        },
        Section {
            title: Some("FUTURE PLANS"),
            fields: &[
                FieldSpec::block("future_plans", "Future Dreams & Plans"),
                FieldSpec::inline("career_goal", "Career Goal"),
            ],
        },
        Section {
            title: Some("SCHOLARSHIP"),
            fields: &[FieldSpec::inline(
                "scholarship_10k",
                "Wants to apply for the 10k Dream Chaser scholarship",
            )],
        },
        Section {
            title: Some("ANYTHING ELSE"),
            fields: &[FieldSpec::block(
                "extra_info",
                "Anything else the student wants to share",
            )],
        },
    ],
};
