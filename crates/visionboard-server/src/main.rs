//! VisionBoard AI server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use visionboard::config::Config;
use visionboard::embedding::GoalEmbedder;
use visionboard::generation::GoalGenerator;
use visionboard::keywords::KeywordExtractor;
use visionboard::predict::SuccessPredictor;
use visionboard::sentiment::SentimentAnalyzer;
use visionboard_server::gateway::{HandlerState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
██╗   ██╗██╗███████╗██╗ ██████╗ ███╗   ██╗██████╗  ██████╗  █████╗ ██████╗ ██████╗
██║   ██║██║██╔════╝██║██╔═══██╗████╗  ██║██╔══██╗██╔═══██╗██╔══██╗██╔══██╗██╔══██╗
██║   ██║██║███████╗██║██║   ██║██╔██╗ ██║██████╔╝██║   ██║███████║██████╔╝██║  ██║
╚██╗ ██╔╝██║╚════██║██║██║   ██║██║╚██╗██║██╔══██╗██║   ██║██╔══██║██╔══██╗██║  ██║
 ╚████╔╝ ██║███████║██║╚██████╔╝██║ ╚████║██████╔╝╚██████╔╝██║  ██║██║  ██║██████╔╝
  ╚═══╝  ╚═╝╚══════╝╚═╝ ╚═════╝ ╚═╝  ╚═══╝╚═════╝  ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚═════╝

        DREAM. PLAN. SCORE.
                                                                              MIT
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "VisionBoard AI starting"
    );

    if config.embedder_model_dir.is_none() {
        tracing::warn!("No VISIONBOARD_EMBEDDER_DIR configured, running embedder in stub mode");
    }
    let embedder = Arc::new(GoalEmbedder::load(config.embedder_config())?);

    // Fit before binding the listener so the first request never races the
    // regression solve.
    tracing::info!("Fitting the success predictor on the reference goals...");
    let predictor = Arc::new(SuccessPredictor::train(embedder.clone())?);
    tracing::info!(dim = predictor.model().dim(), "Success predictor fitted");

    let keywords = Arc::new(KeywordExtractor::new(embedder.clone()));

    if config.sentiment_model_dir.is_none() {
        tracing::warn!(
            "No VISIONBOARD_SENTIMENT_DIR configured, sentiment falls back to the lexicon"
        );
    }
    let sentiment = Arc::new(SentimentAnalyzer::load(config.sentiment_config())?);

    let generator = Arc::new(GoalGenerator::new(config.generator_config()));

    let allowed_origin: HeaderValue = config.allowed_origin.parse()?;
    let state = HandlerState::new(
        embedder,
        predictor,
        keywords,
        sentiment,
        generator,
        allowed_origin,
    );

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("VisionBoard AI shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("VISIONBOARD_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
