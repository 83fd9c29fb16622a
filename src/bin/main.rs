use dotenv::dotenv;
use lendbot::{
    console::StdConsole,
    engine::DialogueEngine,
    search::GeminiSearchClient,
};
use tracing::info;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("LendBot starting");

    // Missing credential is fatal at startup: plain message, clean exit.
    let search = match GeminiSearchClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mut engine = DialogueEngine::new(StdConsole::new(), search);

    match engine.run().await {
        Ok(session) => {
            info!(session_id = %session.session_id, "Session finished");
        }
        Err(e) => {
            eprintln!("Session ended with an error: {}", e);
            std::process::exit(1);
        }
    }
}
