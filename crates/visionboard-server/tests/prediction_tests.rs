mod common;

use common::harness::{TestServerConfig, spawn_test_server};
use common::http_client::TestClient;
use visionboard::TRAINING_SET;

#[tokio::test]
async fn test_predict_score_in_range() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .unwrap();
    let client = TestClient::new(server.url());

    let response = client
        .predict("Start jogging", "Run for 15 minutes every day for 6 months.")
        .await
        .expect("Predict request failed");

    assert!(response.score <= 100, "score {} out of range", response.score);
}

#[tokio::test]
async fn test_predict_deterministic_across_requests() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .unwrap();
    let client = TestClient::new(server.url());

    let first = client
        .predict("Learn Spanish", "Practice daily for 8 months.")
        .await
        .expect("Predict request failed");
    let second = client
        .predict("Learn Spanish", "Practice daily for 8 months.")
        .await
        .expect("Predict request failed");

    assert_eq!(first.score, second.score);
}

#[tokio::test]
async fn test_training_goal_scores_near_its_label() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .unwrap();
    let client = TestClient::new(server.url());

    // Ten independent rows in 384 dimensions interpolate, so a goal the
    // model was fitted on lands close to its label.
    let learn_python = TRAINING_SET
        .iter()
        .find(|ex| ex.title == "Learn Python")
        .expect("Learn Python is part of the fixed training set");

    let response = client
        .predict(learn_python.title, learn_python.description)
        .await
        .expect("Predict request failed");

    assert!(
        (response.score as f64 - learn_python.score).abs() <= 15.0,
        "'{}' scored {} but is labelled {}",
        learn_python.title,
        response.score,
        learn_python.score
    );
}

#[tokio::test]
async fn test_predict_handles_odd_inputs() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .unwrap();
    let client = TestClient::new(server.url());

    let long_description = "repeat ".repeat(500);
    let inputs = [
        ("", ""),
        ("xq zvw", "asdf qwerty 123"),
        ("目標", "毎日30分勉強する。"),
        ("A very long goal", long_description.as_str()),
    ];

    for (title, description) in inputs {
        let response = client
            .predict(title, description)
            .await
            .unwrap_or_else(|e| panic!("Predict failed for ({:?}, ..): {}", title, e));
        assert!(response.score <= 100);
    }
}

#[tokio::test]
async fn test_predict_score_stable_under_field_split() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .unwrap();
    let client = TestClient::new(server.url());

    // The model sees "{title} {description}", so moving a word across the
    // field boundary must not change the score.
    let a = client
        .predict("Learn Python", "basics fast")
        .await
        .expect("Predict request failed");
    let b = client
        .predict("Learn", "Python basics fast")
        .await
        .expect("Predict request failed");

    assert_eq!(a.score, b.score);
}

#[tokio::test]
async fn test_first_request_after_startup_succeeds() {
    // The predictor is fitted before the listener binds; a request sent the
    // moment the port accepts must never see an untrained model.
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .unwrap();
    let client = TestClient::new(server.url());

    let response = client
        .predict("Ship the feature", "Land the last two pull requests this week.")
        .await
        .expect("First request after startup failed");

    assert!(response.score <= 100);
}

#[tokio::test]
async fn test_concurrent_predictions_agree() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .unwrap();

    let url = server.url();
    let requests = (0..8).map(|_| {
        let client = TestClient::new(url.clone());
        async move {
            client
                .predict("Start meditation", "Practice mindfulness for 10 minutes daily.")
                .await
                .expect("Predict request failed")
                .score
        }
    });

    let scores = futures::future::join_all(requests).await;

    let first = scores[0];
    assert!(
        scores.iter().all(|&s| s == first),
        "concurrent scores diverged: {:?}",
        scores
    );
}
