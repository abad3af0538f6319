//! Flashcard domain - card records, prompts and response parsing

mod card;
mod parser;
mod prompt;

pub use card::Card;
pub use parser::parse_cards;
pub use prompt::{answer_messages, card_messages};
