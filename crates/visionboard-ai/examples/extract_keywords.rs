//! Extract keywords from a goal with the stub embedder.

use std::sync::Arc;

use anyhow::Result;

fn main() -> Result<()> {
    use visionboard::{EmbedderConfig, GoalEmbedder, KeywordExtractor};

    let embedder = Arc::new(GoalEmbedder::load(EmbedderConfig::stub())?);
    let extractor = KeywordExtractor::new(embedder);

    let keywords = extractor.extract("Practice Spanish daily for 30 minutes", 5)?;
    println!("keywords={:?}", keywords);
    Ok(())
}
