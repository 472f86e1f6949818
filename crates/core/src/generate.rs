//! Two-stage generation orchestration.
//!
//! For each persona the [`Generator`] runs a draft call against the fast
//! model and an edit call against the compliance model, in sequence. All
//! persona pipelines run concurrently and the batch always settles: a failed
//! stage degrades that persona's result to a placeholder string instead of
//! aborting the batch, and an empty edit output falls back to the draft.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::persona::{Persona, personas};
use crate::prompt::build_prompts;
use crate::provider::{CompletionRequest, TextModel};
use crate::settings::UserSettings;

/// Edit-stage temperature when the request does not supply one. Low, to
/// bias the editor toward literal compliance over creativity.
const EDIT_DEFAULT_TEMPERATURE: f32 = 0.3;

/// How a persona's pipeline settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// Both stages succeeded; the content is the edited text.
    #[default]
    Edited,
    /// The edit stage returned nothing usable; the content is the draft.
    DraftFallback,
    /// A stage errored; the content is the placeholder string.
    Failed,
}

/// One persona's generated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    /// Persona display name.
    pub platform: String,
    /// Persona stable id.
    pub platform_id: String,
    /// Final content (edited text, draft fallback, or placeholder).
    pub content: String,
    /// Stage outcome, for observability and tests. Not part of the wire
    /// format.
    #[serde(skip)]
    pub outcome: GenerationOutcome,
}

/// Runs the draft→edit pipeline across all personas.
pub struct Generator {
    draft_model: Arc<dyn TextModel>,
    edit_model: Arc<dyn TextModel>,
}

impl Generator {
    pub fn new(draft_model: Arc<dyn TextModel>, edit_model: Arc<dyn TextModel>) -> Self {
        Self { draft_model, edit_model }
    }

    /// Generates content for every configured persona concurrently.
    ///
    /// Waits for all pipelines to settle and returns exactly one result per
    /// persona, in persona-definition order. Never fails as a whole.
    pub async fn generate_all(&self, text: &str, settings: &UserSettings) -> Vec<TransformResult> {
        let start = Instant::now();
        let tasks = personas().iter().map(|persona| self.generate_one(persona, text, settings));
        let results = join_all(tasks).await;

        debug!(
            personas = results.len(),
            failed = results.iter().filter(|r| r.outcome == GenerationOutcome::Failed).count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "generation batch settled"
        );

        results
    }

    async fn generate_one(&self, persona: &Persona, text: &str, settings: &UserSettings) -> TransformResult {
        let prompts = build_prompts(persona, settings);

        let draft = match self
            .draft_model
            .complete(CompletionRequest {
                system_prompt: &prompts.draft,
                user_prompt: text,
                temperature: persona.temperature,
                max_tokens: persona.max_tokens,
            })
            .await
        {
            Ok(draft) if !draft.trim().is_empty() => draft.trim().to_string(),
            Ok(_) => {
                warn!(persona = persona.id, model = self.draft_model.name(), "draft stage returned empty output");
                return placeholder_result(persona);
            }
            Err(e) => {
                warn!(persona = persona.id, model = self.draft_model.name(), error = %e, "draft stage failed");
                return placeholder_result(persona);
            }
        };

        let edit_user_prompt = format!("Edit and finalize this draft:\n\n{}", draft);

        match self
            .edit_model
            .complete(CompletionRequest {
                system_prompt: &prompts.edit,
                user_prompt: &edit_user_prompt,
                temperature: settings.temperature.unwrap_or(EDIT_DEFAULT_TEMPERATURE),
                max_tokens: persona.max_tokens,
            })
            .await
        {
            Ok(finalized) if !finalized.trim().is_empty() => TransformResult {
                platform: persona.name.to_string(),
                platform_id: persona.id.to_string(),
                content: finalized.trim().to_string(),
                outcome: GenerationOutcome::Edited,
            },
            Ok(_) => {
                debug!(persona = persona.id, "edit stage returned empty output, keeping draft");
                TransformResult {
                    platform: persona.name.to_string(),
                    platform_id: persona.id.to_string(),
                    content: draft,
                    outcome: GenerationOutcome::DraftFallback,
                }
            }
            Err(e) => {
                warn!(persona = persona.id, model = self.edit_model.name(), error = %e, "edit stage failed");
                placeholder_result(persona)
            }
        }
    }
}

fn placeholder_result(persona: &Persona) -> TransformResult {
    TransformResult {
        platform: persona.name.to_string(),
        platform_id: persona.id.to_string(),
        content: format!("Error: Could not generate {} content. Please try again.", persona.name),
        outcome: GenerationOutcome::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockModel, MockResponse};

    fn generator(draft: MockResponse, edit: MockResponse) -> (Generator, Arc<MockModel>, Arc<MockModel>) {
        let draft_model = Arc::new(MockModel::new("mock-draft", draft));
        let edit_model = Arc::new(MockModel::new("mock-edit", edit));
        (Generator::new(draft_model.clone(), edit_model.clone()), draft_model, edit_model)
    }

    #[tokio::test]
    async fn test_one_result_per_persona_in_order() {
        let (generator, _, _) = generator(MockResponse::text("draft"), MockResponse::text("final"));
        let results = generator.generate_all("some article text", &UserSettings::default()).await;

        let ids: Vec<&str> = results.iter().map(|r| r.platform_id.as_str()).collect();
        assert_eq!(ids, vec!["twitter", "linkedin", "newsletter", "instagram"]);
        assert!(results.iter().all(|r| r.outcome == GenerationOutcome::Edited));
        assert!(results.iter().all(|r| r.content == "final"));
    }

    #[tokio::test]
    async fn test_empty_edit_output_falls_back_to_draft_verbatim() {
        let (generator, _, _) = generator(MockResponse::text("the draft text"), MockResponse::text("   \n"));
        let results = generator.generate_all("some article text", &UserSettings::default()).await;

        for result in &results {
            assert_eq!(result.outcome, GenerationOutcome::DraftFallback);
            assert_eq!(result.content, "the draft text");
        }
    }

    #[tokio::test]
    async fn test_draft_failure_yields_placeholder_for_that_persona() {
        let (generator, _, edit_model) = generator(MockResponse::error(), MockResponse::text("final"));
        let results = generator.generate_all("some article text", &UserSettings::default()).await;

        assert_eq!(results.len(), 4);
        for result in &results {
            assert_eq!(result.outcome, GenerationOutcome::Failed);
            assert!(result.content.starts_with("Error: Could not generate"));
            assert!(result.content.contains(&result.platform));
        }
        // Edit stage never runs when drafting fails.
        assert_eq!(edit_model.calls().len(), 0);
    }

    #[tokio::test]
    async fn test_edit_failure_yields_placeholder() {
        let (generator, _, _) = generator(MockResponse::text("draft"), MockResponse::error());
        let results = generator.generate_all("some article text", &UserSettings::default()).await;

        assert!(results.iter().all(|r| r.outcome == GenerationOutcome::Failed));
        let twitter = &results[0];
        assert_eq!(twitter.content, "Error: Could not generate Twitter Thread content. Please try again.");
    }

    #[tokio::test]
    async fn test_draft_stage_uses_persona_sampling() {
        let (generator, draft_model, _) = generator(MockResponse::text("draft"), MockResponse::text("final"));
        generator.generate_all("some article text", &UserSettings::default()).await;

        let calls = draft_model.calls();
        assert_eq!(calls.len(), 4);
        for (persona, call) in personas().iter().zip(calls.iter()) {
            assert_eq!(call.temperature, persona.temperature);
            assert_eq!(call.max_tokens, persona.max_tokens);
            assert_eq!(call.user_prompt, "some article text");
        }
    }

    #[tokio::test]
    async fn test_edit_stage_wraps_draft_and_defaults_temperature() {
        let (generator, _, edit_model) = generator(MockResponse::text("the draft"), MockResponse::text("final"));
        generator.generate_all("some article text", &UserSettings::default()).await;

        let calls = edit_model.calls();
        assert_eq!(calls.len(), 4);
        for call in &calls {
            assert_eq!(call.user_prompt, "Edit and finalize this draft:\n\nthe draft");
            assert_eq!(call.temperature, EDIT_DEFAULT_TEMPERATURE);
        }
    }

    #[tokio::test]
    async fn test_edit_stage_uses_request_temperature_when_set() {
        let (generator, _, edit_model) = generator(MockResponse::text("draft"), MockResponse::text("final"));
        let settings = UserSettings { temperature: Some(0.9), ..Default::default() };
        generator.generate_all("some article text", &settings).await;

        assert!(edit_model.calls().iter().all(|c| c.temperature == 0.9));
    }
}
