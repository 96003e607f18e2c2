use storebot::adapters::{ChunkedHttpTransport, PushEventTransport};
use storebot::cli::{parse_args, CliCommand, RunOptions, TerminalPresenter};
use storebot::session::ChatSession;
use storebot::traits::Transport;

use color_eyre::Result;
use std::io::Write;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default chatbot API address (the service's development port).
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001";

/// Greeting printed when the chat loop starts.
const WELCOME_MESSAGE: &str = "안녕하세요! SmartStore FaQ 봇입니다.\n무엇을 도와드릴까요?";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("storebot {}", VERSION);
            Ok(())
        }
        CliCommand::Run(options) => run_chat(options).await,
    }
}

/// Resolve the base URL from flag, environment, or default.
fn resolve_base_url(options: &RunOptions) -> String {
    options
        .base_url
        .clone()
        .or_else(|| std::env::var("STOREBOT_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Run the interactive chat loop with the selected transport binding.
async fn run_chat(options: RunOptions) -> Result<()> {
    let base_url = resolve_base_url(&options);

    if options.push {
        chat_loop(PushEventTransport::new(base_url)).await
    } else {
        chat_loop(ChunkedHttpTransport::new(base_url)).await
    }
}

/// Read queries from stdin and stream each answer to the terminal.
async fn chat_loop<T: Transport>(transport: T) -> Result<()> {
    let mut session = ChatSession::new(transport, TerminalPresenter::new());

    println!("{}", WELCOME_MESSAGE);
    println!();

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query == "/quit" || query == "/exit" {
            break;
        }

        session.submit(query).await;
    }

    Ok(())
}
