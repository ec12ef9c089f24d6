// Intake forms: field schemas, field extraction, and prompt building.
// Both forms run through the same pipeline; the variant selects the schema.

pub mod fields;
pub mod prompt_builder;
pub mod schema;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::bail;

use crate::intake::schema::{FormSchema, INTAKE_SCHEMA, SCHOLARSHIP_SCHEMA};

/// Which of the two forms this deployment serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppVariant {
    /// Dream Chaser application helper: one application draft per submission.
    #[default]
    Scholarship,
    /// Student intake: profile summary (recorded) plus an encouragement message.
    Intake,
}

impl AppVariant {
    pub fn form_schema(self) -> &'static FormSchema {
        match self {
            AppVariant::Scholarship => &SCHOLARSHIP_SCHEMA,
            AppVariant::Intake => &INTAKE_SCHEMA,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppVariant::Scholarship => "scholarship",
            AppVariant::Intake => "intake",
        }
    }

    /// One file per form; the two forms have different column sets.
    pub fn default_records_path(self) -> PathBuf {
        PathBuf::from(format!("data/{}_submissions.csv", self.as_str()))
    }
}

impl FromStr for AppVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scholarship" => Ok(AppVariant::Scholarship),
            "intake" => Ok(AppVariant::Intake),
            other => bail!("Unknown APP_VARIANT '{other}' (expected 'scholarship' or 'intake')"),
        }
    }
}
