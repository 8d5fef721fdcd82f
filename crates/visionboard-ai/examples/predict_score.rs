//! Train the success model on a stub embedder and score a goal.

use std::sync::Arc;

use anyhow::Result;

fn main() -> Result<()> {
    use visionboard::{EmbedderConfig, GoalEmbedder, SuccessPredictor};

    let embedder = Arc::new(GoalEmbedder::load(EmbedderConfig::stub())?);
    let predictor = SuccessPredictor::train(embedder)?;

    let score = predictor.predict("Start jogging", "Run for 15 minutes every day for 6 months.")?;
    println!("score={}", score);
    Ok(())
}
