//! Response Router — decides which artifacts a submission gets and assembles the output.
//!
//! Flow: build user prompt → generate each needed artifact (one retry on
//! retryable failures) → pick the displayed text → tag the output type.
//!
//! Generation failures never escape this module. A failed displayed artifact
//! becomes a fixed fallback message and the outcome is tagged `failed`, so the
//! submission is still recorded.

use std::str::FromStr;
use std::time::Duration;

use anyhow::bail;
use tracing::{info, warn};

use crate::generation::prompts::{
    APPLICATION_FALLBACK, APPLICATION_PARAMS, APPLICATION_SYSTEM, ENCOURAGEMENT_FALLBACK,
    ENCOURAGEMENT_PARAMS, ENCOURAGEMENT_SYSTEM, PROFILE_SUMMARY_PARAMS, PROFILE_SUMMARY_SYSTEM,
};
use crate::intake::fields::ExtractedFields;
use crate::intake::prompt_builder::build_user_prompt;
use crate::intake::AppVariant;
use crate::llm_client::{GenerationRequest, LlmError, SamplingParams, TextGenerator};

/// Retries after the first attempt, for retryable failures only.
const MAX_GENERATION_RETRIES: u32 = 1;
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Form field carrying the student's 10k scholarship choice (intake variant).
pub const SCHOLARSHIP_CHOICE_FIELD: &str = "scholarship_10k";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Application,
    ProfileSummary,
    Encouragement,
}

impl ArtifactKind {
    fn system_prompt(self) -> &'static str {
        match self {
            ArtifactKind::Application => APPLICATION_SYSTEM,
            ArtifactKind::ProfileSummary => PROFILE_SUMMARY_SYSTEM,
            ArtifactKind::Encouragement => ENCOURAGEMENT_SYSTEM,
        }
    }

    fn params(self) -> SamplingParams {
        match self {
            ArtifactKind::Application => APPLICATION_PARAMS,
            ArtifactKind::ProfileSummary => PROFILE_SUMMARY_PARAMS,
            ArtifactKind::Encouragement => ENCOURAGEMENT_PARAMS,
        }
    }
}

/// Tag stored in the `output_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Application,
    Encouragement,
    /// The displayed artifact could not be generated; the fallback message was shown.
    Failed,
}

impl OutputType {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputType::Application => "application",
            OutputType::Encouragement => "encouragement",
            OutputType::Failed => "failed",
        }
    }
}

/// How the intake variant treats the `scholarship_10k` answer.
///
/// `Unconditional` is the deployed behavior: the answer is recorded but every
/// student gets the encouragement message. `ByChoice` generates the
/// application letter for students who said yes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScholarshipRouting {
    #[default]
    Unconditional,
    ByChoice,
}

impl FromStr for ScholarshipRouting {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "false" | "0" | "no" | "off" => Ok(ScholarshipRouting::Unconditional),
            "true" | "1" | "yes" | "on" => Ok(ScholarshipRouting::ByChoice),
            other => bail!("SCHOLARSHIP_BRANCHING must be true or false, got '{other}'"),
        }
    }
}

/// Everything a submission produced. Empty strings for artifacts not generated.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub output_type: OutputType,
    pub application_text: String,
    pub profile_summary: String,
    pub encouragement_text: String,
    /// What the student sees.
    pub display_text: String,
}

impl GenerationOutcome {
    pub fn is_fallback(&self) -> bool {
        self.output_type == OutputType::Failed
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Routing
// ────────────────────────────────────────────────────────────────────────────

/// Generates the artifacts the variant calls for and assembles the outcome.
pub async fn route_and_generate(
    variant: AppVariant,
    routing: ScholarshipRouting,
    fields: &ExtractedFields,
    generator: &dyn TextGenerator,
) -> GenerationOutcome {
    let prompt = build_user_prompt(variant.form_schema(), fields);

    match variant {
        AppVariant::Scholarship => application_outcome(generator, &prompt, String::new()).await,
        AppVariant::Intake => {
            let profile_summary =
                match generate_with_retry(generator, ArtifactKind::ProfileSummary, &prompt).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Profile summary unavailable, recording empty summary: {e}");
                        String::new()
                    }
                };

            let wants = wants_scholarship(fields.get(SCHOLARSHIP_CHOICE_FIELD));
            if routing == ScholarshipRouting::ByChoice && wants {
                info!("Scholarship choice is yes, generating application letter");
                return application_outcome(generator, &prompt, profile_summary).await;
            }

            encouragement_outcome(generator, &prompt, profile_summary).await
        }
    }
}

async fn application_outcome(
    generator: &dyn TextGenerator,
    prompt: &str,
    profile_summary: String,
) -> GenerationOutcome {
    match generate_with_retry(generator, ArtifactKind::Application, prompt).await {
        Ok(text) => GenerationOutcome {
            output_type: OutputType::Application,
            display_text: text.clone(),
            application_text: text,
            profile_summary,
            encouragement_text: String::new(),
        },
        Err(e) => {
            warn!("Application draft failed, showing fallback: {e}");
            GenerationOutcome {
                output_type: OutputType::Failed,
                display_text: APPLICATION_FALLBACK.to_string(),
                application_text: String::new(),
                profile_summary,
                encouragement_text: String::new(),
            }
        }
    }
}

async fn encouragement_outcome(
    generator: &dyn TextGenerator,
    prompt: &str,
    profile_summary: String,
) -> GenerationOutcome {
    match generate_with_retry(generator, ArtifactKind::Encouragement, prompt).await {
        Ok(text) => {
            let text = expand_paragraphs(&text);
            GenerationOutcome {
                output_type: OutputType::Encouragement,
                display_text: text.clone(),
                application_text: String::new(),
                profile_summary,
                encouragement_text: text,
            }
        }
        Err(e) => {
            warn!("Encouragement message failed, showing fallback: {e}");
            GenerationOutcome {
                output_type: OutputType::Failed,
                display_text: ENCOURAGEMENT_FALLBACK.to_string(),
                application_text: String::new(),
                profile_summary,
                encouragement_text: String::new(),
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LLM call with retry
// ────────────────────────────────────────────────────────────────────────────

/// Calls the generator, retrying up to MAX_GENERATION_RETRIES times after a
/// fixed backoff when the failure is retryable.
async fn generate_with_retry(
    generator: &dyn TextGenerator,
    kind: ArtifactKind,
    prompt: &str,
) -> Result<String, LlmError> {
    let request = GenerationRequest {
        system: kind.system_prompt(),
        prompt,
        params: kind.params(),
    };

    let mut attempt = 0;
    loop {
        match generator.generate(request).await {
            Ok(text) => return Ok(text),
            Err(e) if e.is_retryable() && attempt < MAX_GENERATION_RETRIES => {
                attempt += 1;
                warn!(
                    "{:?} generation attempt {}/{} failed ({e}), retrying after {}ms",
                    kind,
                    attempt,
                    MAX_GENERATION_RETRIES + 1,
                    RETRY_BACKOFF.as_millis()
                );
                tokio::time::sleep(RETRY_BACKOFF).await;
            }
            Err(e) => return Err(e),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Formatting helpers
// ────────────────────────────────────────────────────────────────────────────

/// Turns every line break (`\n` or `\r\n`) into a paragraph break.
pub fn expand_paragraphs(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\n\n")
}

/// Interprets the scholarship choice answer. Anything unrecognized counts as no.
pub fn wants_scholarship(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1" | "on"
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
