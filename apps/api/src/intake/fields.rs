//! Field extraction — restricts a raw form submission to a schema's fields.

use crate::intake::schema::FormSchema;

/// A raw form submission, in the order the fields were posted.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pairs: Vec<(String, String)>,
}

impl Submission {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value posted under `name`. Later duplicates are ignored.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Submission values for exactly the fields a schema declares, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields {
    values: Vec<(&'static str, String)>,
}

impl ExtractedFields {
    /// Value for `name`, or `""` when the field is absent or not in the schema.
    pub fn get(&self, name: &str) -> &str {
        self.values
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Extracts every schema field from the submission. Absent fields become `""`,
/// unknown extra fields are dropped, and values are kept as posted (no trimming,
/// no numeric coercion).
pub fn extract_fields(submission: &Submission, schema: &FormSchema) -> ExtractedFields {
    let values = schema
        .field_names()
        .map(|name| (name, submission.get(name).unwrap_or("").to_string()))
        .collect();

    ExtractedFields { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::schema::{INTAKE_SCHEMA, SCHOLARSHIP_SCHEMA};

    fn submission(pairs: &[(&str, &str)]) -> Submission {
        Submission::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_absent_fields_default_to_empty() {
        let fields = extract_fields(&submission(&[("name", "Ama")]), &SCHOLARSHIP_SCHEMA);
        assert_eq!(fields.get("name"), "Ama");
        assert_eq!(fields.get("age"), "");
        assert_eq!(fields.get("extra_info"), "");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let fields = extract_fields(
            &submission(&[("name", "Kofi"), ("csrf", "abc"), ("is_admin", "1")]),
            &SCHOLARSHIP_SCHEMA,
        );
        assert!(fields.iter().all(|(k, _)| k != "csrf" && k != "is_admin"));
        assert_eq!(fields.get("csrf"), "");
    }

    #[test]
    fn test_output_follows_schema_order_not_post_order() {
        let fields = extract_fields(
            &submission(&[("age", "16"), ("location", "Accra"), ("name", "Ama")]),
            &SCHOLARSHIP_SCHEMA,
        );
        let names: Vec<_> = fields.iter().map(|(k, _)| k).take(3).collect();
        assert_eq!(names, vec!["name", "age", "location"]);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let fields = extract_fields(
            &submission(&[("name", "Ama"), ("name", "Akosua")]),
            &SCHOLARSHIP_SCHEMA,
        );
        assert_eq!(fields.get("name"), "Ama");
    }

    #[test]
    fn test_numeric_looking_values_stay_verbatim() {
        let fields = extract_fields(
            &submission(&[("age", " 016 "), ("hope_score", "7.5")]),
            &INTAKE_SCHEMA,
        );
        assert_eq!(fields.get("age"), " 016 ");
        assert_eq!(fields.get("hope_score"), "7.5");
    }

    #[test]
    fn test_every_schema_field_is_present() {
        let fields = extract_fields(&Submission::default(), &INTAKE_SCHEMA);
        assert_eq!(fields.iter().count(), INTAKE_SCHEMA.field_names().count());
    }
}
