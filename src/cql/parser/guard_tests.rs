use crate::cql::parser::guard;
use crate::cql::parser::tokenizer::tokenize;
use crate::shared::error::CogError;

#[cfg(test)]
mod guard_tests {
    use super::*;

    #[test]
    fn test_exact_keyword_rejected() {
        let tokens = tokenize("FROM cells WHERE loop = 1");
        assert_eq!(
            guard::check(&tokens),
            Err(CogError::Unsupported("loop".to_string()))
        );
    }

    #[test]
    fn test_rejection_is_case_insensitive() {
        let tokens = tokenize("FROM cells WHERE TRIGGER = 1");
        assert_eq!(
            guard::check(&tokens),
            Err(CogError::Unsupported("trigger".to_string()))
        );
    }

    #[test]
    fn test_ai_prefix_rejected() {
        let tokens = tokenize("FROM cells SELECT ai_summary");
        assert_eq!(
            guard::check(&tokens),
            Err(CogError::Unsupported("ai_".to_string()))
        );
    }

    #[test]
    fn test_word_containing_banned_substring_passes() {
        // Only whole identifiers match; "webhook_url" is not "webhook".
        let tokens = tokenize("FROM cells SELECT webhook_url, notify_count");
        assert!(guard::check(&tokens).is_ok());
    }

    #[test]
    fn test_string_literal_is_exempt() {
        let tokens = tokenize(r#"FROM cells WHERE name = "trigger""#);
        assert!(guard::check(&tokens).is_ok());
    }

    #[test]
    fn test_clean_query_passes() {
        let tokens = tokenize("FROM cells WHERE friction > 0.5 AGGREGATE count()");
        assert!(guard::check(&tokens).is_ok());
    }

    #[test]
    fn test_error_code_is_unsupported_feature() {
        let tokens = tokenize("if");
        let err = guard::check(&tokens).unwrap_err();
        assert_eq!(err.code(), "CQL_UNSUPPORTED_FEATURE");
        assert_eq!(err.status(), 400);
    }
}
