// Generation: routes a submission to its artifacts and renders the result.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod handlers;
pub mod prompts;
pub mod router;
pub mod views;
