//! Providers command - registered providers, availability and chain order

use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let (router, _) = super::bootstrap(config_path).await?;

    let status = router.provider_status().await;
    if status.is_empty() {
        println!("No providers configured");
        return Ok(());
    }

    for (name, available) in &status {
        let marker = if *available { "available" } else { "unavailable" };
        println!("{name}\t{marker}");
    }

    println!("chain: {}", router.build_provider_chain(None).join(" -> "));
    Ok(())
}
