//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use visionboard::config::DEFAULT_ALLOWED_ORIGIN;
use visionboard::embedding::{EmbedderConfig, GoalEmbedder};
use visionboard::generation::GoalGenerator;
use visionboard::keywords::KeywordExtractor;
use visionboard::predict::SuccessPredictor;
use visionboard::sentiment::{SentimentAnalyzer, SentimentConfig};
use visionboard_server::gateway::{HandlerState, create_router_with_state};

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self { port: 0 }
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn find_available_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    Ok(addr.port())
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a fully-offline test server.
///
/// Every capability runs on its fallback backing, so no model files, no
/// provider key and no network access are required:
/// - **Embedder**: stub (deterministic hash-based vectors)
/// - **Sentiment**: lexicon fallback
/// - **LLM provider**: mock (fabricated completions)
///
/// The success predictor is still fitted for real on the stub embeddings
/// before the listener starts accepting, exactly like the production
/// startup path.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let port = if config.port == 0 {
        find_available_port().await?
    } else {
        config.port
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let embedder = Arc::new(
        GoalEmbedder::load(EmbedderConfig::stub())
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?,
    );

    let predictor = Arc::new(
        SuccessPredictor::train(embedder.clone())
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?,
    );

    let keywords = Arc::new(KeywordExtractor::new(embedder.clone()));

    let sentiment = Arc::new(
        SentimentAnalyzer::stub().map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?,
    );

    let generator = Arc::new(GoalGenerator::mock());

    let allowed_origin = DEFAULT_ALLOWED_ORIGIN
        .parse()
        .expect("default origin is a valid header value");

    let state = HandlerState::new(
        embedder,
        predictor,
        keywords,
        sentiment,
        generator,
        allowed_origin,
    );

    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Spawns a test server that loads real model weights when the usual env
/// vars point at them.
///
/// - **Embedder**: real if `VISIONBOARD_EMBEDDER_DIR` is set, stub otherwise
/// - **Sentiment**: real if `VISIONBOARD_SENTIMENT_DIR` is set, lexicon otherwise
/// - **LLM provider**: always mock, to keep tests free of API costs
///
/// Intended for `#[ignore]`d smoke tests that validate inference against
/// downloaded checkpoints.
pub async fn spawn_real_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let port = if config.port == 0 {
        find_available_port().await?
    } else {
        config.port
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let embedder_config = if let Ok(path) = std::env::var("VISIONBOARD_EMBEDDER_DIR") {
        println!("Using Real Embedder: {}", path);
        EmbedderConfig::new(path)
    } else {
        println!("Using Stub Embedder");
        EmbedderConfig::stub()
    };
    let embedder = Arc::new(
        GoalEmbedder::load(embedder_config)
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?,
    );

    let predictor = Arc::new(
        SuccessPredictor::train(embedder.clone())
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?,
    );

    let keywords = Arc::new(KeywordExtractor::new(embedder.clone()));

    let sentiment_config = if let Ok(path) = std::env::var("VISIONBOARD_SENTIMENT_DIR") {
        println!("Using Real Sentiment Classifier: {}", path);
        SentimentConfig::new(path)
    } else {
        println!("Using Lexicon Sentiment Fallback");
        SentimentConfig::stub()
    };
    let sentiment = Arc::new(
        SentimentAnalyzer::load(sentiment_config)
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?,
    );

    let generator = Arc::new(GoalGenerator::mock());

    let allowed_origin = DEFAULT_ALLOWED_ORIGIN
        .parse()
        .expect("default origin is a valid header value");

    let state = HandlerState::new(
        embedder,
        predictor,
        keywords,
        sentiment,
        generator,
        allowed_origin,
    );

    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_available_port() {
        let port = find_available_port()
            .await
            .expect("Should find available port");
        assert!(port > 0);
    }

    #[tokio::test]
    async fn test_server_config_defaults() {
        let config = TestServerConfig::default();
        assert_eq!(config.port, 0);
    }

    #[tokio::test]
    async fn test_server_helpers_are_callable() {
        let (shutdown_tx, _shutdown_rx) = oneshot::channel();
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();

        let server = TestServer {
            addr,
            _server_handle: tokio::spawn(async {}),
            shutdown_tx: Some(shutdown_tx),
        };

        let _ = server.url();
        server.shutdown().await;
    }

    #[test]
    fn test_server_url_formatting() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let url = format!("http://{}", addr);
        assert_eq!(url, "http://127.0.0.1:8080");
    }
}
