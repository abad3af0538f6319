//! Prompt construction for card and answer generation

use crate::domain::Message;

const CARD_SYSTEM_PROMPT: &str = "You are a helpful assistant that creates high-quality flashcards \
from markdown content. Generate clear, concise questions with accurate answers. \
Respond ONLY with valid JSON.";

const ANSWER_SYSTEM_PROMPT: &str =
    "You are a knowledgeable tutor providing clear, accurate answers.";

const CARD_FORMAT_EXAMPLE: &str = r#"[
  {
    "type": "basic",
    "front": "Question",
    "back": "Answer",
    "tags": ["tag1"]
  }
]"#;

/// Messages asking the model for flashcards covering `content`
pub fn card_messages(content: &str, context: Option<&str>) -> Vec<Message> {
    let mut prompt = format!(
        "Analyze this markdown content and generate flashcards:\n\n{}\n\n",
        content
    );

    if let Some(context) = context {
        prompt.push_str(&format!("Additional context:\n{}\n\n", context));
    }

    prompt.push_str(&format!(
        "Generate flashcards in JSON format (respond ONLY with the JSON array):\n{}\n",
        CARD_FORMAT_EXAMPLE
    ));

    vec![Message::system(CARD_SYSTEM_PROMPT), Message::user(prompt)]
}

/// Messages asking the model to answer `question`
pub fn answer_messages(question: &str, context: Option<&str>) -> Vec<Message> {
    let prompt = format!(
        "Question: {}\n\nContext: {}\n\nProvide a comprehensive answer:",
        question,
        context.unwrap_or("None")
    );

    vec![Message::system(ANSWER_SYSTEM_PROMPT), Message::user(prompt)]
}
