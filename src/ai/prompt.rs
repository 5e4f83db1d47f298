use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One scraped feed post, supplied per generation request.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub content: String,
    pub author: String,
}

impl PostInput {
    pub fn new(content: impl Into<String>, author: Option<String>) -> Self {
        Self {
            content: content.into(),
            author: author.unwrap_or_else(|| "someone".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    HotTake,
    #[default]
    Insightful,
    Supportive,
    Curious,
}

impl Tone {
    /// Parse a stored tone value, falling back to insightful for anything
    /// unrecognized. Tone is cosmetic, so a stale settings file must not
    /// break generation.
    pub fn parse_lossy(value: &str) -> Self {
        match value {
            "hot-take" => Self::HotTake,
            "insightful" => Self::Insightful,
            "supportive" => Self::Supportive,
            "curious" => Self::Curious,
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HotTake => "hot-take",
            Self::Insightful => "insightful",
            Self::Supportive => "supportive",
            Self::Curious => "curious",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl Length {
    /// Parse a stored length value, falling back to medium.
    pub fn parse_lossy(value: &str) -> Self {
        match value {
            "short" => Self::Short,
            "medium" => Self::Medium,
            "detailed" => Self::Detailed,
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Detailed => "detailed",
        }
    }

    fn guideline(&self) -> &'static str {
        match self {
            Self::Short => "1-2 sentences (max 150 characters)",
            Self::Medium => "2-3 sentences (max 250 characters)",
            Self::Detailed => "3-4 sentences (max 350 characters)",
        }
    }
}

/// Optional user identity woven into the prompt. The profile block is
/// all-or-nothing: it appears only when both `name` and `role` are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub role: Option<String>,
    pub expertise: Option<String>,
}

impl Profile {
    fn is_complete(&self) -> bool {
        self.name.as_deref().is_some_and(|s| !s.is_empty())
            && self.role.as_deref().is_some_and(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerationConfig {
    pub tone: Tone,
    pub length: Length,
    pub profile: Profile,
}

const DEFAULT_PERSONA_NAME: &str = "an automation consultant";
const DEFAULT_PERSONA_ROLE: &str = "helping businesses implement AI and automation";
const DEFAULT_EXPERTISE: &str = "Business automation, AI implementation";

fn tone_instructions(tone: Tone) -> &'static str {
    match tone {
        Tone::HotTake => {
            r#"TONE: HOT TAKE / CONTRARIAN
Your goal is to share a bold, contrarian opinion that makes people stop and think.

STYLE GUIDE:
- Start with a bold statement that challenges the norm
- Back it up with quick logic or experience
- Don't be rude, be thought-provoking
- Use confident language: "Here's the thing...", "Unpopular opinion:", "Most people miss this..."

EXAMPLES OF GREAT HOT TAKES:
"Unpopular opinion: the 'hustle culture' this promotes is exactly why burnout rates are skyrocketing. Working smarter beats working harder 10/10 times."

"Here's the thing most people miss about AI tools - they're not replacing jobs, they're exposing who was actually adding value vs who was just busy."

"Hot take: This 'overnight success' probably took 10 years of failures nobody posted about. The highlight reel culture needs to die.""#
        }
        Tone::Insightful => {
            r#"TONE: INSIGHTFUL / THOUGHTFUL
Your goal is to add genuine value with a unique perspective or insight.

STYLE GUIDE:
- Start with an observation about what you noticed
- Add a layer of insight others might miss
- Connect it to a broader trend or pattern
- Sound like a smart friend sharing wisdom, not a consultant pitching

EXAMPLES OF GREAT INSIGHTS:
"What's interesting here is the timing. Companies are realizing AI isn't optional anymore - it's table stakes. The ones still 'evaluating' are already behind."

"This hits different when you realize it's not about the tool, it's about the process change. Most automation fails because people automate broken workflows."

"I've noticed this pattern with every major tech shift - the early adopters don't win because they're first, they win because they learn to adapt faster.""#
        }
        Tone::Supportive => {
            r#"TONE: SUPPORTIVE / AGREEMENT
Your goal is to validate and add value, building connection with the author.

STYLE GUIDE:
- Start with genuine appreciation (NOT "Great post!" - that's lazy)
- Add your own related experience or observation
- Make the author feel seen and understood
- End by reinforcing or extending their point

EXAMPLES OF GREAT SUPPORTIVE COMMENTS:
"This resonates hard. We've seen the exact same thing with our B2B clients - the resistance to change costs way more than the change itself."

"Saving this one. The framework here is solid, especially the part about starting small. Too many people try to automate everything at once and burn out."

"Needed this reminder today. It's easy to get caught up in the noise and forget the fundamentals actually work.""#
        }
        Tone::Curious => {
            r#"TONE: CURIOUS / QUESTION-LED
Your goal is to ask a smart question that positions you as thoughtful and sparks discussion.

STYLE GUIDE:
- Start with a brief observation or reaction
- Ask a genuine question you'd actually want answered
- The question should showcase your expertise subtly
- Make it open-ended to invite discussion

EXAMPLES OF GREAT CURIOUS COMMENTS:
"This is fascinating. Curious though - have you seen this approach work better for B2B or B2C? The buying cycles are so different."

"Love the framework. One thing I'm wondering: how do you handle the resistance from teams who see automation as a threat to their jobs?"

"Solid point. I'm curious what changed the most for you during this process - the systems or the mindset?""#
        }
    }
}

fn profile_context(profile: &Profile) -> String {
    if !profile.is_complete() {
        return String::new();
    }

    format!(
        r#"
YOUR PROFILE:
- Name: {}
- Role: {}
- Expertise: {}

Naturally weave your expertise when relevant. Don't force it. You help businesses automate and implement AI - only mention this if the post topic allows it organically."#,
        profile.name.as_deref().unwrap_or_default(),
        profile.role.as_deref().unwrap_or_default(),
        profile.expertise.as_deref().unwrap_or(DEFAULT_EXPERTISE),
    )
}

/// Build the full generation prompt. Pure text assembly, no I/O.
pub fn build_prompt(post: &PostInput, config: &GenerationConfig) -> String {
    let persona_name = config
        .profile
        .name
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_PERSONA_NAME);
    let persona_role = config
        .profile
        .role
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_PERSONA_ROLE);

    format!(
        r#"You are writing a LinkedIn comment as a professional. You're {persona_name} - {persona_role}.

POST BY {author}:
"{content}"

{tone}
{profile}

CRITICAL RULES:
1. LENGTH: {length}. Stay within this limit strictly.
2. NO AI-SPEAK: Never say "Great post!", "Absolutely!", "Couldn't agree more!", "This is so true!", "Well said!"
3. BE HUMAN: Use contractions (I've, that's, don't). Mix sentence lengths. Be conversational.
4. NO HASHTAGS: Never include hashtags
5. BE SPECIFIC: Reference something specific from the post
6. NO FILLER: Every word should add value
7. COMPLETE THOUGHTS: Write full sentences that end properly

BANNED PHRASES (never use these):
- "Great post"
- "Love this"
- "So true"
- "Absolutely"
- "Couldn't agree more"
- "This resonates"
- "Well articulated"
- "Thank you for sharing"
- "Spot on"

Write your comment now. Just the comment text, nothing else."#,
        author = post.author,
        content = post.content,
        tone = tone_instructions(config.tone),
        profile = profile_context(&config.profile),
        length = config.length.guideline(),
    )
}
