//! Static persona definitions.
//!
//! A persona describes one target output format: its prompt template,
//! sampling temperature, and output-token ceiling. The set is fixed at four
//! and known at startup; [`personas`] returns them in definition order, and
//! every transform response carries exactly one result per persona in that
//! order.
//!
//! Templates are structured as an intro line plus an ordered list of
//! [`Guideline`] fragments, each tagged with the settings condition under
//! which it applies. The prompt builder selects fragments; it never rewrites
//! template text.

/// Condition under which a guideline fragment is included in the draft
/// prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidelineScope {
    /// Included unconditionally.
    Always,
    /// Included only when emojis are enabled.
    EmojiOnly,
    /// Included only when the microblog sub-format is a thread.
    ThreadOnly,
    /// Included only when the microblog sub-format is a single post.
    SinglePostOnly,
}

/// One line of a persona's guideline list.
#[derive(Debug, Clone, Copy)]
pub struct Guideline {
    pub text: &'static str,
    pub scope: GuidelineScope,
}

const fn always(text: &'static str) -> Guideline {
    Guideline { text, scope: GuidelineScope::Always }
}

const fn emoji(text: &'static str) -> Guideline {
    Guideline { text, scope: GuidelineScope::EmojiOnly }
}

const fn thread(text: &'static str) -> Guideline {
    Guideline { text, scope: GuidelineScope::ThreadOnly }
}

const fn single_post(text: &'static str) -> Guideline {
    Guideline { text, scope: GuidelineScope::SinglePostOnly }
}

/// A named output-format definition.
#[derive(Debug, Clone, Copy)]
pub struct Persona {
    /// Stable identifier used on the wire (`platformId`).
    pub id: &'static str,
    /// Display name used on the wire (`platform`) and in placeholders.
    pub name: &'static str,
    /// Short human description of the format.
    pub description: &'static str,
    /// Opening line of the draft system prompt.
    pub intro: &'static str,
    /// Ordered guideline fragments; the prompt builder filters by scope.
    pub guidelines: &'static [Guideline],
    /// Output-token ceiling for both generation stages.
    pub max_tokens: u32,
    /// Draft-stage sampling temperature.
    pub temperature: f32,
}

/// Stable id of the short-form microblog persona, which carries the
/// thread/post sub-format and the account-tier character ceiling.
pub const MICROBLOG_PERSONA_ID: &str = "twitter";

/// Stable id of the professional-network persona, which carries the
/// post/article sub-format.
pub const PROFESSIONAL_PERSONA_ID: &str = "linkedin";

static PERSONAS: [Persona; 4] = [
    Persona {
        id: MICROBLOG_PERSONA_ID,
        name: "Twitter Thread",
        description: "Viral, attention-grabbing thread with hooks",
        intro: "Transform the following content into a viral Twitter thread (X post).",
        guidelines: &[
            always("Start with an irresistible hook that stops the scroll"),
            thread("Break content into 5-10 bite-sized tweets"),
            thread("Each tweet should be under 280 characters"),
            thread("Use line breaks between tweets"),
            single_post("Condense everything into one self-contained post"),
            always("Include numbers or bullets for easy reading"),
            thread("Add 1-2 relevant hashtags on the final tweet"),
            single_post("Add 1-2 relevant hashtags at the end"),
            always("Use casual, conversational language"),
            always("Ask questions or use controversy to drive engagement"),
            always("Focus on the most surprising or valuable insights"),
            thread("Format as a thread with tweet numbers like \"1/\", \"2/\", etc."),
            single_post("Format as a single post with no thread numbering"),
        ],
        max_tokens: 1500,
        temperature: 0.8,
    },
    Persona {
        id: PROFESSIONAL_PERSONA_ID,
        name: "LinkedIn Post",
        description: "Professional, thought-leadership style",
        intro: "Transform the following content into a professional LinkedIn post.",
        guidelines: &[
            always("Start with a compelling personal story or insight"),
            always("Use short paragraphs (1-2 sentences max) for readability"),
            always("Include 3-5 key takeaways formatted with bullet points"),
            always("Add a thoughtful question at the end to drive comments"),
            always("Use professional but approachable tone"),
            always("Mention lessons learned or actionable advice"),
            always("Keep it under 1500 characters"),
            always("Add 3-5 relevant hashtags at the end"),
            always("Sign off with your name or initials (use \"CS\" as placeholder)"),
        ],
        max_tokens: 1000,
        temperature: 0.7,
    },
    Persona {
        id: "newsletter",
        name: "Newsletter",
        description: "Summarized with bullet points and clear structure",
        intro: "Transform the following content into a newsletter format.",
        guidelines: &[
            always("Create a catchy subject line (label as \"Subject:\")"),
            always("Write a brief, engaging introduction (2-3 sentences)"),
            always("Break down main points into 3-5 clear bullet points"),
            always("Add a \"Key Takeaway\" section at the end"),
            always("Include a \"What to do next\" or action item section"),
            always("Use formatting like **bold** for emphasis"),
            always("Keep it scannable and easy to read"),
            always("Professional but conversational tone"),
            always("Include placeholders for [Your Name] and [Company/Brand]"),
        ],
        max_tokens: 1200,
        temperature: 0.6,
    },
    Persona {
        id: "instagram",
        name: "Instagram Caption",
        description: "Emoji-rich, hashtag-optimized caption",
        intro: "Transform the following content into an engaging Instagram caption.",
        guidelines: &[
            emoji("Start with a hook line with emojis"),
            always("Use line breaks after every 1-2 sentences"),
            emoji("Include 8-12 relevant emojis throughout the text"),
            always("Keep the main caption under 150 words"),
            always("Add a clear call-to-action (\"Comment below\", \"Save this\", \"Tag a friend\")"),
            always("Include 15-20 relevant hashtags (mix of popular and niche)"),
            always("Add a one-sentence \"ALT text\" description for accessibility"),
            always("Use casual, friendly tone"),
            always("Format with spacing for readability"),
            emoji("Can include \"Save this post 📌\" or similar engagement prompt"),
        ],
        max_tokens: 800,
        temperature: 0.9,
    },
];

/// All configured personas in definition order.
pub fn personas() -> &'static [Persona] {
    &PERSONAS
}

/// Looks up a persona by its stable id.
pub fn persona_by_id(id: &str) -> Option<&'static Persona> {
    PERSONAS.iter().find(|p| p.id == id)
}
