//! Build-time training data for the success predictor.
//!
//! Ten curated goal examples with hand-assigned success scores. The model is
//! refit from these on every startup; nothing is persisted between runs, so
//! editing this table is the only way the fitted weights change.

/// One labelled goal used to fit the success model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingExample {
    pub title: &'static str,
    pub description: &'static str,
    /// Hand-assigned success score in `[0, 100]`.
    pub score: f64,
}

impl TrainingExample {
    /// The text fed to the embedder for this example.
    pub fn embedding_text(&self) -> String {
        embedding_text(self.title, self.description)
    }
}

/// Joins a goal title and description into the embedder input.
///
/// The single-space join is a wire-level contract: stored goals were scored
/// against exactly this concatenation, so changing the separator shifts every
/// prediction.
pub fn embedding_text(title: &str, description: &str) -> String {
    format!("{} {}", title, description)
}

/// The fixed training set, scores included.
pub const TRAINING_SET: [TrainingExample; 10] = [
    TrainingExample {
        title: "Start jogging",
        description: "Run for 15 minutes every day for 6 months.",
        score: 85.0,
    },
    TrainingExample {
        title: "Build an app",
        description: "Launch MVP for startup idea in 4 months.",
        score: 50.0,
    },
    TrainingExample {
        title: "Write a novel",
        description: "Write 1 chapter per week for 12 months.",
        score: 65.0,
    },
    TrainingExample {
        title: "Learn Python",
        description: "Complete 2 coding projects and 1 certification.",
        score: 90.0,
    },
    TrainingExample {
        title: "Lose weight",
        description: "Lose 20 pounds by maintaining diet and exercise.",
        score: 75.0,
    },
    TrainingExample {
        title: "Start meditation",
        description: "Practice mindfulness for 10 minutes daily.",
        score: 80.0,
    },
    TrainingExample {
        title: "Publish blog",
        description: "Write and publish 12 articles over the next year.",
        score: 60.0,
    },
    TrainingExample {
        title: "Prepare for certification",
        description: "Study for and pass AWS Solutions Architect exam.",
        score: 85.0,
    },
    TrainingExample {
        title: "Learn Spanish",
        description: "Practice Spanish daily for 30 minutes for 8 months.",
        score: 70.0,
    },
    TrainingExample {
        title: "Finish online course",
        description: "Complete a machine learning course within 3 months.",
        score: 88.0,
    },
];
