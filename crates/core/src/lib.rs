pub mod cache;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod generate;
pub mod parse;
pub mod persona;
pub mod prompt;
pub mod provider;
pub mod settings;
#[doc(hidden)]
pub mod testing;
pub mod transform;

pub use cache::{DEFAULT_TTL, ResponseCache};
pub use error::{Result, ShapeshiftError};
pub use extract::{ExtractConfig, ExtractedContent, NO_CONTENT_SENTINEL, extract_content, extract_from_html};
pub use fetch::{FetchConfig, fetch_url};
pub use generate::{GenerationOutcome, Generator, TransformResult};
pub use parse::{Document, Element};
pub use persona::{Guideline, GuidelineScope, Persona, persona_by_id, personas};
pub use prompt::{PromptPair, build_draft_prompt, build_edit_prompt, build_prompts};
pub use provider::{CompletionRequest, GeminiModel, GroqModel, TextModel};
pub use settings::{LengthPreference, LinkedinFormat, UserSettings, XAccountType, XFormat};
pub use transform::{MIN_CONTENT_CHARS, TransformResponse, Transformer, TransformerConfig};
