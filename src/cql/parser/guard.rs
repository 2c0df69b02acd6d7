use crate::cql::parser::tokenizer::Token;
use crate::shared::error::CogError;

/// Control-flow and side-effecting vocabulary rejected in the read-only API.
/// Entries ending in `_` are prefix matches; everything else matches a whole
/// identifier. The check runs over word tokens only, so field names and string
/// literals that merely contain a banned substring pass.
const DENYLIST: [&str; 6] = ["loop", "if", "trigger", "webhook", "notify", "ai_"];

pub fn check(tokens: &[Token]) -> Result<(), CogError> {
    for token in tokens {
        if let Token::Word(word) = token {
            let lower = word.to_ascii_lowercase();
            for banned in DENYLIST {
                let hit = if banned.ends_with('_') {
                    lower.starts_with(banned)
                } else {
                    lower == banned
                };
                if hit {
                    return Err(CogError::Unsupported(banned.to_string()));
                }
            }
        }
    }
    Ok(())
}
