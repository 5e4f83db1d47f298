use std::sync::LazyLock;

use regex::Regex;

static ROLE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(Comment|Response|Reply):\s*").unwrap());

static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// Generic openers are only stripped when they stand alone as an opening
// phrase, i.e. followed by punctuation or ending the text. "Love this
// approach" is a real sentence and stays intact.
static BANNED_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(Great post|Love this|So true|Absolutely|Well said|This is great|Spot on|This resonates)([!.,]\s*|$)",
    )
    .unwrap()
});

/// Clean raw model output into a publishable comment.
///
/// Deterministic and idempotent. An empty return value means the model
/// produced nothing usable; callers must treat that as a failure.
pub fn sanitize(raw: &str) -> String {
    // Models sometimes wrap the whole comment in quotes.
    let mut text = raw;
    for quote in ['"', '\''] {
        if let Some(stripped) = text.strip_prefix(quote) {
            text = stripped;
            break;
        }
    }
    for quote in ['"', '\''] {
        if let Some(stripped) = text.strip_suffix(quote) {
            text = stripped;
            break;
        }
    }

    let text = ROLE_PREFIX.replace(text, "");
    let text = HASHTAG.replace_all(&text, "");
    let text = WHITESPACE_RUN.replace_all(&text, " ");

    let mut text = text.trim().to_string();
    while let Some(m) = BANNED_OPENER.find(&text) {
        if m.len() == text.len() {
            return String::new();
        }
        text = text[m.end()..].to_string();
    }

    let mut cleaned = text.trim().to_string();
    if let Some(first) = cleaned.chars().next() {
        if !first.is_uppercase() {
            let upper: String = first.to_uppercase().collect();
            cleaned.replace_range(..first.len_utf8(), &upper);
        }
    }

    if !cleaned.is_empty() && !cleaned.ends_with(['.', '!', '?']) {
        cleaned.push('.');
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_wrapping_quotes_and_banned_opener() {
        assert_eq!(
            sanitize("\"Great post! This is so true.\""),
            "This is so true."
        );
    }

    #[test]
    fn strips_role_prefix_and_hashtags() {
        assert_eq!(
            sanitize("Comment: love this approach #ai #growth"),
            "Love this approach."
        );
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn opener_only_output_becomes_empty() {
        assert_eq!(sanitize("Great post!"), "");
        assert_eq!(sanitize("\"Absolutely\""), "");
    }

    #[test]
    fn stacked_openers_are_all_removed() {
        assert_eq!(
            sanitize("Great post! Spot on. The metrics part was new to me"),
            "The metrics part was new to me."
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(
            sanitize("the  follow-up\n\nquestion   matters"),
            "The follow-up question matters."
        );
    }

    #[test]
    fn appends_terminal_punctuation_once() {
        assert_eq!(sanitize("worth a closer look"), "Worth a closer look.");
        assert_eq!(sanitize("is this scalable?"), "Is this scalable?");
    }

    #[test]
    fn idempotent_on_sanitized_text() {
        let cases = [
            "This is so true.",
            "Love this approach.",
            "Worth a closer look.",
            "Is this scalable?",
        ];
        for case in cases {
            assert_eq!(sanitize(case), case);
            assert_eq!(sanitize(&sanitize(case)), sanitize(case));
        }
    }
}
