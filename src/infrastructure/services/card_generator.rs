//! Card generator service - flashcards and answers through the LLM router

use std::sync::Arc;

use tracing::debug;

use crate::domain::cards::{answer_messages, card_messages};
use crate::domain::{parse_cards, Card, LlmError};
use crate::infrastructure::router::LlmRouter;

/// Generates flashcards and answers using whichever provider the router picks
#[derive(Debug, Clone)]
pub struct CardGenerator {
    router: Arc<LlmRouter>,
}

impl CardGenerator {
    pub fn new(router: Arc<LlmRouter>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &LlmRouter {
        &self.router
    }

    /// Generate flashcards from markdown content
    pub async fn generate_cards(
        &self,
        content: &str,
        context: Option<&str>,
    ) -> Result<Vec<Card>, LlmError> {
        self.generate_cards_with_provider(content, context, None)
            .await
    }

    pub async fn generate_cards_with_provider(
        &self,
        content: &str,
        context: Option<&str>,
        provider: Option<&str>,
    ) -> Result<Vec<Card>, LlmError> {
        let messages = card_messages(content, context);
        let response = self.router.generate(&messages, provider).await?;

        let cards = parse_cards(response.content())?;
        debug!(count = cards.len(), model = %response.model(), "Parsed flashcards");

        Ok(cards)
    }

    /// Generate a free-text answer to a question
    pub async fn generate_answer(
        &self,
        question: &str,
        context: Option<&str>,
    ) -> Result<String, LlmError> {
        self.generate_answer_with_provider(question, context, None)
            .await
    }

    pub async fn generate_answer_with_provider(
        &self,
        question: &str,
        context: Option<&str>,
        provider: Option<&str>,
    ) -> Result<String, LlmError> {
        let messages = answer_messages(question, context);
        let response = self.router.generate(&messages, provider).await?;

        Ok(response.content().trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletionResult, ErrorKind, MockLlmProvider};

    fn generator_with(provider: MockLlmProvider) -> CardGenerator {
        let mut router = LlmRouter::new();
        router.register_provider("main", Arc::new(provider));
        router.set_default_provider("main").unwrap();
        CardGenerator::new(Arc::new(router))
    }

    #[tokio::test]
    async fn test_generate_cards() {
        let generator = generator_with(MockLlmProvider::succeeding(
            "main",
            "```json\n[{\"type\":\"basic\",\"front\":\"Q\",\"back\":\"A\",\"tags\":[]}]\n```",
        ));

        let cards = generator.generate_cards("# Notes", None).await.unwrap();
        assert_eq!(cards, vec![Card::basic("Q", "A")]);
    }

    #[tokio::test]
    async fn test_generate_cards_rejects_object() {
        let generator = generator_with(MockLlmProvider::succeeding(
            "main",
            r#"{"cards": []}"#,
        ));

        let error = generator.generate_cards("# Notes", None).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ParseError);
    }

    #[tokio::test]
    async fn test_generate_answer_is_trimmed() {
        let generator = generator_with(
            MockLlmProvider::new("main").then(Ok(CompletionResult::new(
                "\n  Borrowing lets you use a value without owning it.  \n",
                "m",
            ))),
        );

        let answer = generator
            .generate_answer("What is borrowing?", Some("Rust book ch. 4"))
            .await
            .unwrap();
        assert_eq!(answer, "Borrowing lets you use a value without owning it.");
    }

    #[tokio::test]
    async fn test_router_failure_propagates() {
        let generator = generator_with(MockLlmProvider::failing(
            "main",
            LlmError::authentication("Authentication failed: 401"),
        ));

        let error = generator.generate_answer("Why?", None).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::AuthenticationError);
    }

    #[tokio::test]
    async fn test_preferred_provider_forwarded() {
        let mut router = LlmRouter::new();
        router.register_provider("main", Arc::new(MockLlmProvider::succeeding("main", "main")));
        router.register_provider(
            "backup",
            Arc::new(MockLlmProvider::succeeding("backup", "backup")),
        );
        router.set_default_provider("main").unwrap();
        let generator = CardGenerator::new(Arc::new(router));

        let answer = generator
            .generate_answer_with_provider("Q", None, Some("backup"))
            .await
            .unwrap();
        assert_eq!(answer, "backup");
    }
}
