//! Record — the flattened row persisted for every submission.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::generation::router::GenerationOutcome;
use crate::intake::fields::ExtractedFields;
use crate::intake::schema::FormSchema;

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const OUTPUT_TYPE_COLUMN: &str = "output_type";
/// Artifact columns, identical for both variants.
pub const ARTIFACT_COLUMNS: [&str; 3] = ["profile_summary", "application_text", "encouragement_text"];

/// The fixed column set of a Record Store file, declared once per form.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    columns: Vec<&'static str>,
}

impl RecordSchema {
    /// `timestamp`, every form field in schema order, the artifacts, then `output_type`.
    pub fn for_form(form: &FormSchema) -> Self {
        let mut columns = vec![TIMESTAMP_COLUMN];
        columns.extend(form.field_names());
        columns.extend(ARTIFACT_COLUMNS);
        columns.push(OUTPUT_TYPE_COLUMN);
        Self { columns }
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }
}

/// One submission and everything generated for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: HashMap<String, String>,
}

impl Record {
    pub fn new(fields: &ExtractedFields, outcome: &GenerationOutcome, at: DateTime<Utc>) -> Self {
        let mut values: HashMap<String, String> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        values.insert(
            TIMESTAMP_COLUMN.to_string(),
            at.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        values.insert(
            "profile_summary".to_string(),
            outcome.profile_summary.clone(),
        );
        values.insert(
            "application_text".to_string(),
            outcome.application_text.clone(),
        );
        values.insert(
            "encouragement_text".to_string(),
            outcome.encouragement_text.clone(),
        );
        values.insert(
            OUTPUT_TYPE_COLUMN.to_string(),
            outcome.output_type.as_str().to_string(),
        );

        Self { values }
    }

    /// The row for `schema`: exactly one value per column, `""` where missing.
    pub fn to_row(&self, schema: &RecordSchema) -> Vec<String> {
        schema
            .columns()
            .iter()
            .map(|c| self.values.get(*c).cloned().unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
impl Record {
    /// Builds a record from raw column values. Columns outside the schema are
    /// dropped when the row is written.
    pub fn from_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::generation::router::OutputType;
    use crate::intake::fields::{extract_fields, Submission};
    use crate::intake::schema::{INTAKE_SCHEMA, SCHOLARSHIP_SCHEMA};

    fn outcome() -> GenerationOutcome {
        GenerationOutcome {
            output_type: OutputType::Encouragement,
            application_text: String::new(),
            profile_summary: "Ama, 16, Accra".to_string(),
            encouragement_text: "Keep going.".to_string(),
            display_text: "Keep going.".to_string(),
        }
    }

    #[test]
    fn test_schema_columns_for_scholarship_form() {
        let schema = RecordSchema::for_form(&SCHOLARSHIP_SCHEMA);
        assert_eq!(
            schema.columns(),
            &[
                "timestamp",
                "name",
                "age",
                "location",
                "academic_background",
                "financial_situation",
                "support_system",
                "future_plans",
                "extra_info",
                "profile_summary",
                "application_text",
                "encouragement_text",
                "output_type",
            ]
        );
    }

    #[test]
    fn test_row_matches_schema_whatever_was_submitted() {
        let schema = RecordSchema::for_form(&INTAKE_SCHEMA);
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();

        for pairs in [
            vec![],
            vec![("name".to_string(), "Ama".to_string())],
            vec![
                ("name".to_string(), "Ama".to_string()),
                ("unexpected".to_string(), "ignored".to_string()),
            ],
        ] {
            let fields = extract_fields(&Submission::from_pairs(pairs), &INTAKE_SCHEMA);
            let row = Record::new(&fields, &outcome(), at).to_row(&schema);
            assert_eq!(row.len(), schema.columns().len());
        }
    }

    #[test]
    fn test_row_values_land_in_their_columns() {
        let schema = RecordSchema::for_form(&INTAKE_SCHEMA);
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let fields = extract_fields(
            &Submission::from_pairs(vec![("name".to_string(), "Ama".to_string())]),
            &INTAKE_SCHEMA,
        );

        let row = Record::new(&fields, &outcome(), at).to_row(&schema);
        let column = |name: &str| {
            let i = schema.columns().iter().position(|c| *c == name).unwrap();
            row[i].as_str()
        };

        assert_eq!(column("timestamp"), "2025-03-14T09:26:53Z");
        assert_eq!(column("name"), "Ama");
        assert_eq!(column("age"), "");
        assert_eq!(column("profile_summary"), "Ama, 16, Accra");
        assert_eq!(column("application_text"), "");
        assert_eq!(column("output_type"), "encouragement");
    }

    #[test]
    fn test_from_values_defaults_missing_columns() {
        let schema = RecordSchema::for_form(&SCHOLARSHIP_SCHEMA);
        let row = Record::from_values([("name", "Kofi"), ("not_a_column", "x")]).to_row(&schema);
        assert_eq!(row[1], "Kofi");
        assert!(row.iter().all(|v| v != "x"));
        assert_eq!(row.iter().filter(|v| v.is_empty()).count(), row.len() - 1);
    }
}
