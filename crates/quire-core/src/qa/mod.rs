mod answer;
mod questions;

pub use answer::AnswerEngine;
pub use questions::QuestionExtractor;

/// Largest slice of document text forwarded to the LLM per call.
pub(crate) const CONTEXT_LIMIT: usize = 10_000;

/// Truncate to at most `limit` characters without splitting a char.
pub(crate) fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        // Multi-byte chars must not be split mid-boundary.
        let text = "déjà vu";
        assert_eq!(truncate_chars(text, 4), "déjà");
    }

    #[test]
    fn test_truncate_at_limit() {
        let text = "x".repeat(CONTEXT_LIMIT + 50);
        assert_eq!(truncate_chars(&text, CONTEXT_LIMIT).len(), CONTEXT_LIMIT);
    }
}
