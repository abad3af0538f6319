//! Cards command - flashcards from a markdown file, printed as JSON

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct CardsArgs {
    /// Markdown file to generate cards from
    pub file: PathBuf,

    /// Extra context passed to the model
    #[arg(long)]
    pub context: Option<String>,

    /// Provider to try first
    #[arg(long)]
    pub provider: Option<String>,
}

pub async fn run(config_path: Option<&Path>, args: CardsArgs) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let (_, generator) = super::bootstrap(config_path).await?;

    let cards = generator
        .generate_cards_with_provider(&content, args.context.as_deref(), args.provider.as_deref())
        .await?;
    info!(count = cards.len(), file = %args.file.display(), "Generated flashcards");

    println!("{}", serde_json::to_string_pretty(&cards)?);
    Ok(())
}
