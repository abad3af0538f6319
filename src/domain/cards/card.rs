use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const DEFAULT_CARD_TYPE: &str = "basic";

/// A single flashcard produced by the LLM
///
/// Only `front` is required. Keys the model adds beyond the known ones are
/// kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Card type, e.g. `basic` or `cloze`
    #[serde(rename = "type", default = "default_card_type")]
    pub card_type: String,
    pub front: String,
    /// Empty for cloze cards that carry the answer inside `front`
    #[serde(default)]
    pub back: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    pub fn basic(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            card_type: DEFAULT_CARD_TYPE.to_string(),
            front: front.into(),
            back: back.into(),
            tags: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

fn default_card_type() -> String {
    DEFAULT_CARD_TYPE.to_string()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_serialization_uses_type_key() {
        let card = Card::basic("Q", "A").with_tags(vec!["rust".to_string()]);
        let json = serde_json::to_value(&card).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"type": "basic", "front": "Q", "back": "A", "tags": ["rust"]})
        );
    }

    #[test]
    fn test_tags_default_to_empty() {
        let card: Card =
            serde_json::from_str(r#"{"type": "cloze", "front": "{{c1::Rust}}", "back": ""}"#)
                .unwrap();
        assert!(card.tags.is_empty());
        assert_eq!(card.card_type, "cloze");
    }

    #[test]
    fn test_null_tags_are_empty() {
        let card: Card =
            serde_json::from_str(r#"{"type": "basic", "front": "Q", "back": "A", "tags": null}"#)
                .unwrap();
        assert_eq!(card, Card::basic("Q", "A"));
    }

    #[test]
    fn test_cloze_without_back() {
        let card: Card =
            serde_json::from_str(r#"{"type": "cloze", "front": "{{c1::Ferris}} is a crab"}"#)
                .unwrap();
        assert_eq!(card.back, "");
    }

    #[test]
    fn test_extra_keys_round_trip() {
        let json = serde_json::json!({
            "type": "basic",
            "front": "Q",
            "back": "A",
            "tags": [],
            "difficulty": "hard"
        });

        let card: Card = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(card.extra.get("difficulty"), Some(&Value::from("hard")));
        assert_eq!(serde_json::to_value(&card).unwrap(), json);
    }
}
