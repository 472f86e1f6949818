//! System-prompt construction for the two generation stages.
//!
//! [`build_prompts`] is a pure function from a persona definition and the
//! request's [`UserSettings`] to the pair of system prompts used by the
//! draft and edit model calls. Composition is fragment selection over the
//! persona's tagged guideline list plus a conditional edit checklist —
//! identical inputs always produce byte-identical prompts.

use crate::persona::{GuidelineScope, MICROBLOG_PERSONA_ID, PROFESSIONAL_PERSONA_ID, Persona};
use crate::settings::{LengthPreference, LinkedinFormat, UserSettings, XAccountType, XFormat};

/// The system prompts for one persona's draft and edit stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub draft: String,
    pub edit: String,
}

/// Builds both system prompts for a persona under the given settings.
pub fn build_prompts(persona: &Persona, settings: &UserSettings) -> PromptPair {
    PromptPair { draft: build_draft_prompt(persona, settings), edit: build_edit_prompt(persona, settings) }
}

fn guideline_applies(scope: GuidelineScope, settings: &UserSettings) -> bool {
    match scope {
        GuidelineScope::Always => true,
        GuidelineScope::EmojiOnly => settings.include_emojis,
        GuidelineScope::ThreadOnly => settings.x_format == XFormat::Thread,
        GuidelineScope::SinglePostOnly => settings.x_format == XFormat::Post,
    }
}

/// Composes the draft-stage system prompt: persona intro, the guideline
/// fragments whose scope matches the settings, and exactly one of the two
/// mutually exclusive emoji directives.
pub fn build_draft_prompt(persona: &Persona, settings: &UserSettings) -> String {
    let mut lines = Vec::with_capacity(persona.guidelines.len() + 6);
    lines.push(persona.intro.to_string());
    lines.push(String::new());
    lines.push("Guidelines:".to_string());

    for guideline in persona.guidelines {
        if guideline_applies(guideline.scope, settings) {
            lines.push(format!("- {}", guideline.text));
        }
    }

    if settings.include_emojis {
        lines.push("- Use emojis liberally where they add energy".to_string());
    } else {
        lines.push("- Do not use any emojis".to_string());
    }

    lines.push(String::new());
    lines.push("Content to transform:".to_string());
    lines.join("\n")
}

/// Composes the edit-stage system prompt: a fixed return-only-the-text
/// preamble followed by the compliance checklist selected by the settings.
///
/// Every applicable rule appears; the enabled/disabled hashtag and emoji
/// directives are mutually exclusive pairs.
pub fn build_edit_prompt(persona: &Persona, settings: &UserSettings) -> String {
    let mut lines = vec![
        "You are a strict formatting and compliance editor.".to_string(),
        "Return only the final polished text, with no preamble, no commentary, and no conversational wrapper."
            .to_string(),
        String::new(),
        "Apply every rule in this checklist:".to_string(),
    ];

    if settings.include_hashtags {
        lines.push("- Place hashtags naturally at the end".to_string());
    } else {
        lines.push("- Remove all hashtags".to_string());
    }

    if settings.include_emojis {
        lines.push("- Include emojis naturally".to_string());
    } else {
        lines.push("- Remove all emojis".to_string());
    }

    match settings.length_preference {
        LengthPreference::Short => lines.push("- Tighten the text: cut filler and keep it concise".to_string()),
        LengthPreference::Long => lines.push("- Elaborate: expand key points with more detail and examples".to_string()),
        LengthPreference::Default => {}
    }

    if persona.id == MICROBLOG_PERSONA_ID {
        match settings.x_format {
            XFormat::Post => lines.push("- Deliver a single post with no thread numbering".to_string()),
            XFormat::Thread => {
                lines.push("- Deliver a numbered thread with markers like \"1/\", \"2/\", etc.".to_string())
            }
        }
        if settings.x_account_type == XAccountType::Basic {
            lines.push("- Hard limit: every post must be 280 characters or fewer".to_string());
        }
    }

    if persona.id == PROFESSIONAL_PERSONA_ID {
        match settings.linkedin_format {
            LinkedinFormat::Article => {
                lines.push("- Write as a long-form article with section headings".to_string())
            }
            LinkedinFormat::Post => {
                lines.push("- Write as a short feed post with line breaks between ideas".to_string())
            }
        }
    }

    lines.join("\n")
}
