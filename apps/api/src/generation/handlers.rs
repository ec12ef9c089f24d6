//! Axum route handlers for the form and the generation pipeline.

use askama::Template;
use axum::{extract::State, response::Html, Form};
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::generation::router::route_and_generate;
use crate::generation::views::{FormTemplate, ResultTemplate};
use crate::intake::fields::{extract_fields, Submission};
use crate::records::Record;
use crate::state::AppState;

/// GET /
///
/// Renders the intake form for the configured variant.
pub async fn handle_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = FormTemplate::for_schema(state.config.variant.form_schema());
    Ok(Html(page.render()?))
}

/// POST /generate
///
/// Full pipeline: extract fields → route and generate → enqueue record → render.
/// Persistence is best-effort; the page renders whether or not the record is written.
pub async fn handle_generate(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let variant = state.config.variant;
    let submission = Submission::from_pairs(pairs);
    let fields = extract_fields(&submission, variant.form_schema());

    let outcome = route_and_generate(
        variant,
        state.config.scholarship_routing,
        &fields,
        state.generator.as_ref(),
    )
    .await;

    info!(
        "Generated {} output for {} submission",
        outcome.output_type.as_str(),
        variant.as_str()
    );

    state
        .records
        .submit(Record::new(&fields, &outcome, Utc::now()));

    let is_fallback = outcome.is_fallback();
    let page = ResultTemplate::new(variant, outcome.display_text, is_fallback);
    Ok(Html(page.render()?))
}
