//! CLI module for flashcard-llm
//!
//! Subcommands:
//! - `cards`: generate flashcards from a markdown file
//! - `answer`: answer a question
//! - `providers`: show configured providers and their availability

pub mod answer;
pub mod cards;
pub mod providers;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::router::LlmRouter;
use crate::infrastructure::services::CardGenerator;

/// Flashcard LLM - study cards and answers from any OpenAI-compatible backend
#[derive(Parser)]
#[command(name = "flashcard-llm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Extra configuration file layered over config/default and config/local
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate flashcards from a markdown file
    Cards(cards::CardsArgs),

    /// Answer a question
    Answer(answer::AnswerArgs),

    /// List configured providers with availability
    Providers,
}

/// Load configuration, install logging and build the LLM system
pub(crate) async fn bootstrap(
    config_path: Option<&Path>,
) -> anyhow::Result<(Arc<LlmRouter>, CardGenerator)> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load(config_path).context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    let system = crate::create_llm_system(&config.llm).await?;
    Ok(system)
}
