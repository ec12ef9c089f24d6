//! askama page templates for the form and the generated result.

use askama::Template;

use crate::intake::schema::{FormSchema, Section};
use crate::intake::AppVariant;

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub title: &'static str,
    pub intro: &'static str,
    pub sections: &'static [Section],
}

impl FormTemplate {
    pub fn for_schema(schema: &'static FormSchema) -> Self {
        Self {
            title: schema.title,
            intro: schema.intro,
            sections: schema.sections,
        }
    }
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub title: &'static str,
    pub heading: &'static str,
    pub body: String,
    pub is_fallback: bool,
}

impl ResultTemplate {
    pub fn new(variant: AppVariant, body: String, is_fallback: bool) -> Self {
        let schema = variant.form_schema();
        let heading = match variant {
            AppVariant::Scholarship => "Your Dream Chaser Application Draft",
            AppVariant::Intake => "A Message For You",
        };
        Self {
            title: schema.title,
            heading,
            body,
            is_fallback,
        }
    }
}
