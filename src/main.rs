use clap::Parser;
use flashcard_llm::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Command::Cards(args) => cli::cards::run(config, args).await,
        Command::Answer(args) => cli::answer::run(config, args).await,
        Command::Providers => cli::providers::run(config).await,
    }
}
