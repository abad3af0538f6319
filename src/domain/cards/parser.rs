use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use super::Card;
use crate::domain::LlmError;

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fence pattern is valid")
});

/// Parse an LLM response into flashcards
///
/// Accepts a bare JSON array or one wrapped in a ```` ```json ```` fence.
/// Elements that are not usable cards are skipped; only a response that is
/// not a JSON list fails.
pub fn parse_cards(response: &str) -> Result<Vec<Card>, LlmError> {
    let json = JSON_FENCE
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map_or(response, |m| m.as_str());

    let value: Value = serde_json::from_str(json)
        .map_err(|e| LlmError::parse(format!("Failed to parse card response: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(LlmError::parse(
            "Failed to parse card response: Response is not a list",
        ));
    };

    let cards = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Card>(item) {
            Ok(card) => Some(card),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed flashcard");
                None
            }
        })
        .collect();

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    #[test]
    fn test_parse_fenced_array() {
        let response =
            "```json\n[{\"type\":\"basic\",\"front\":\"Q\",\"back\":\"A\",\"tags\":[]}]\n```";

        let cards = parse_cards(response).unwrap();
        assert_eq!(cards, vec![Card::basic("Q", "A")]);
    }

    #[test]
    fn test_parse_fence_with_surrounding_text() {
        let response = concat!(
            "Here are your cards:\n```json\n",
            r#"[{"type":"basic","front":"What is Rust?","back":"A language","tags":["lang"]}]"#,
            "\n```\nEnjoy!"
        );

        let cards = parse_cards(response).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].tags, vec!["lang".to_string()]);
    }

    #[test]
    fn test_parse_bare_array() {
        let cards = parse_cards(r#"  [{"type":"basic","front":"1+1","back":"2"}]  "#).unwrap();
        assert_eq!(cards[0].front, "1+1");
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_cards("[]").unwrap().is_empty());
    }

    #[test]
    fn test_object_is_rejected() {
        let error = parse_cards(r#"{"type":"basic","front":"Q","back":"A"}"#).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ParseError);
        assert!(!error.is_retryable());
        assert!(error.message().contains("not a list"));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let error = parse_cards("Sorry, I cannot help with that.").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn test_null_tags_accepted() {
        let cards =
            parse_cards(r#"[{"type":"basic","front":"Q","back":"A","tags":null}]"#).unwrap();
        assert_eq!(cards, vec![Card::basic("Q", "A")]);
    }

    #[test]
    fn test_malformed_element_skipped() {
        let response = r#"[
            {"type":"cloze","front":"{{c1::Tokio}} is an async runtime"},
            {"type":"basic","back":"no front"},
            "not a card",
            {"type":"basic","front":"Q","back":"A"}
        ]"#;

        let cards = parse_cards(response).unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].card_type, "cloze");
        assert_eq!(cards[0].back, "");
        assert_eq!(cards[1], Card::basic("Q", "A"));
    }

    #[test]
    fn test_extra_keys_kept() {
        let cards =
            parse_cards(r#"[{"type":"basic","front":"Q","back":"A","difficulty":3}]"#).unwrap();
        assert_eq!(cards[0].extra.get("difficulty"), Some(&Value::from(3)));
    }
}
