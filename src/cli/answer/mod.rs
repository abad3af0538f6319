//! Answer command

use std::path::Path;

use clap::Args;

#[derive(Args)]
pub struct AnswerArgs {
    /// Question to answer
    pub question: String,

    /// Extra context passed to the model
    #[arg(long)]
    pub context: Option<String>,

    /// Provider to try first
    #[arg(long)]
    pub provider: Option<String>,
}

pub async fn run(config_path: Option<&Path>, args: AnswerArgs) -> anyhow::Result<()> {
    let (_, generator) = super::bootstrap(config_path).await?;

    let answer = generator
        .generate_answer_with_provider(
            &args.question,
            args.context.as_deref(),
            args.provider.as_deref(),
        )
        .await?;

    println!("{answer}");
    Ok(())
}
