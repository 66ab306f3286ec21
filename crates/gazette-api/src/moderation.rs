use gazette_types::api::FieldErrors;

/// Forbidden substrings. Matching is case-sensitive, exactly as written.
pub const BAD_WORDS: &[&str] = &["редиска", "негодяй"];

/// Fixed warning attached to the `text` field when a forbidden word is found.
pub const WARNING: &str = "Не ругайтесь!";

/// Message for an empty or blank submission.
pub const REQUIRED: &str = "Обязательное поле.";

pub fn find_bad_word(text: &str) -> Option<&'static str> {
    BAD_WORDS.iter().copied().find(|word| text.contains(word))
}

/// Validate submitted comment text. Empty map means the text is acceptable.
pub fn validate_comment_text(text: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if text.trim().is_empty() {
        errors.entry("text".to_string()).or_default().push(REQUIRED.to_string());
    } else if find_bad_word(text).is_some() {
        errors.entry("text".to_string()).or_default().push(WARNING.to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes() {
        assert!(validate_comment_text("Новый комментарий").is_empty());
    }

    #[test]
    fn bad_word_anywhere_in_text_is_rejected() {
        for word in BAD_WORDS {
            let text = format!("Какой-то текст, {word}, еще текст");
            let errors = validate_comment_text(&text);
            assert_eq!(errors["text"], vec![WARNING.to_string()]);
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        // "Редиска" != "редиска": the filter takes the configured words as
        // written and does not normalize case.
        assert!(validate_comment_text("Редиска и Негодяй").is_empty());
    }

    #[test]
    fn blank_text_is_rejected_as_required() {
        let errors = validate_comment_text("   ");
        assert_eq!(errors["text"], vec![REQUIRED.to_string()]);
    }
}
