//! Normalization of raw name fields into comparable tokens.
//!
//! Surrounding whitespace is trimmed and the text is lowercased. Accents,
//! punctuation and internal spacing are left as they are.

use crate::{ClientError, ClientResult};

pub const CARD_MIN_TOKENS: usize = 2;
pub const CARD_MAX_TOKENS: usize = 3;

pub fn normalize_token(value: &str) -> String {
    value.trim().to_lowercase()
}

/// A normalized first-name field, optionally carrying a middle name.
///
/// Only the first whitespace boundary splits the field. Anything after it
/// is kept verbatim as the middle part, so `"mary ann lee"` yields the
/// middle part `"ann lee"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredName {
    Single(String),
    WithMiddle { first: String, middle: String },
}

impl StructuredName {
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_token(raw);
        if let Some((first, middle)) = normalized.split_once(char::is_whitespace) {
            return Self::WithMiddle {
                first: first.to_string(),
                middle: middle.to_string(),
            };
        }
        Self::Single(normalized)
    }

    pub fn first(&self) -> &str {
        match self {
            Self::Single(first) | Self::WithMiddle { first, .. } => first,
        }
    }

    pub fn middle(&self) -> Option<&str> {
        match self {
            Self::Single(_) => None,
            Self::WithMiddle { middle, .. } => Some(middle),
        }
    }

    pub fn has_middle(&self) -> bool {
        matches!(self, Self::WithMiddle { .. })
    }
}

/// The name printed on the card, split on every whitespace run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardName {
    tokens: Vec<String>,
}

impl CardName {
    pub fn parse(raw: &str) -> ClientResult<Self> {
        let tokens = normalize_token(raw)
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<String>>();

        if !(CARD_MIN_TOKENS..=CARD_MAX_TOKENS).contains(&tokens.len()) {
            return Err(ClientError::card_token_count(tokens.len()));
        }

        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn first(&self) -> &str {
        &self.tokens[0]
    }

    pub fn last(&self) -> &str {
        &self.tokens[self.tokens.len() - 1]
    }

    /// The middle token, present only on three-word card names.
    pub fn middle(&self) -> Option<&str> {
        if self.tokens.len() == CARD_MAX_TOKENS {
            return Some(&self.tokens[1]);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{CardName, StructuredName, normalize_token};

    #[test]
    fn tokens_are_trimmed_and_lowercased_only() {
        assert_eq!(normalize_token("  DeBorah \t"), "deborah");
        assert_eq!(normalize_token("O'Neil"), "o'neil");
    }

    #[test]
    fn structured_name_splits_on_first_whitespace_only() {
        let single = StructuredName::parse(" Deborah ");
        assert_eq!(single, StructuredName::Single("deborah".to_string()));
        assert_eq!(single.middle(), None);
        assert!(!single.has_middle());

        let with_middle = StructuredName::parse("Mary Ann Lee");
        assert_eq!(with_middle.first(), "mary");
        assert_eq!(with_middle.middle(), Some("ann lee"));
        assert!(with_middle.has_middle());
    }

    #[test]
    fn structured_name_keeps_extra_spacing_in_middle_part() {
        let parsed = StructuredName::parse("anna  j");
        assert_eq!(parsed.first(), "anna");
        assert_eq!(parsed.middle(), Some(" j"));
    }

    #[test]
    fn card_name_accepts_two_or_three_words() {
        let two = CardName::parse("Deborah   Egli");
        assert!(two.is_ok());
        if let Ok(card) = two {
            assert_eq!(card.first(), "deborah");
            assert_eq!(card.last(), "egli");
            assert_eq!(card.middle(), None);
        }

        let three = CardName::parse(" Anna J Levi ");
        assert!(three.is_ok());
        if let Ok(card) = three {
            assert_eq!(card.tokens().len(), 3);
            assert_eq!(card.middle(), Some("j"));
            assert_eq!(card.last(), "levi");
        }
    }

    #[test]
    fn card_name_rejects_other_word_counts() {
        for raw in ["", "   ", "oneword", "a b c d"] {
            let parsed = CardName::parse(raw);
            assert!(parsed.is_err());
            if let Err(error) = parsed {
                assert!(error.is_invalid_input());
            }
        }
    }
}
