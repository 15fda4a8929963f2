mod api;
mod ask_cmd;
mod chat;
mod config_cmd;
mod doctor_cmd;
mod personas_cmd;
mod session;
mod status_cmd;
mod terminal_output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use expertdesk_config::{config_dir, config_file_path, ExpertDeskConfig};
use expertdesk_core::ApiKey;
use expertdesk_dispatcher::providers::OpenAiProvider;
use expertdesk_dispatcher::{Dispatcher, DispatcherConfig};
use expertdesk_logging::init_logger;
use expertdesk_personas::Persona;

use api::AppState;
use config_cmd::ConfigCommands;
use session::Session;

#[derive(Parser)]
#[command(name = "expertdesk")]
#[command(about = "ExpertDesk: ask a panel of AI expert personas")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.expertdesk/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available expert personas
    Personas,
    /// Ask one question and print the answer
    Ask {
        /// Persona id or slug (health, recipe, programming, travel)
        #[arg(short, long)]
        persona: String,
        /// The question
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Interactive consultation session
    Chat {
        /// Start with this persona instead of the menu
        #[arg(short, long)]
        persona: Option<String>,
    },
    /// Start the HTTP API server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(long)]
        bind: Option<String>,
    },
    /// Show whether a local server is running
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Check configuration and credentials
    Doctor,
    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            terminal_output::note_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<bool> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let env = expertdesk_config::process_env();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir(&env)));

    // `config` and `doctor` report problems instead of refusing to start.
    let config = match &cli.command {
        Commands::Config(_) | Commands::Doctor => {
            expertdesk_config::load(Some(config_path.as_path()), &env).await?
        }
        _ => expertdesk_config::load_and_prepare(Some(config_path.as_path()), &env).await?,
    };

    init_logger(
        config.logging.dir.as_deref().map(Path::new),
        &config.logging.level,
    )?;

    match cli.command {
        Commands::Personas => {
            personas_cmd::run();
            Ok(true)
        }
        Commands::Ask { persona, text } => {
            let session = Session::new();
            let dispatcher = build_dispatcher(&config).with_session_id(session.id());
            Ok(ask_cmd::run(&dispatcher, &persona, &text.join(" ")).await)
        }
        Commands::Chat { persona } => {
            let initial = persona
                .map(|p| p.parse::<Persona>())
                .transpose()?;
            let mut session = Session::new();
            let dispatcher = build_dispatcher(&config).with_session_id(session.id());
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            chat::run_chat(&dispatcher, &mut session, initial, stdin, &mut stdout).await?;
            Ok(true)
        }
        Commands::Serve { port, bind } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            run_server(config).await?;
            Ok(true)
        }
        Commands::Status { port } => {
            status_cmd::run(&config.server.bind, port.unwrap_or(config.server.port)).await
        }
        Commands::Doctor => Ok(doctor_cmd::run(&config, &config_path)),
        Commands::Config(cmd) => config_cmd::run(cmd, &config, &config_path).await,
    }
}

fn build_dispatcher(config: &ExpertDeskConfig) -> Dispatcher {
    let provider = OpenAiProvider::new().with_base_url(&config.openai.base_url);
    let dispatcher_config = DispatcherConfig {
        api_key: config.openai.api_key.as_deref().map(ApiKey::new),
        model: config.openai.model.clone(),
        temperature: config.openai.temperature,
    };
    Dispatcher::new(dispatcher_config, Arc::new(provider))
}

async fn run_server(config: ExpertDeskConfig) -> Result<()> {
    let session = Session::new();
    let dispatcher = build_dispatcher(&config).with_session_id(session.id());

    info!(
        port = config.server.port,
        bind = %config.server.bind,
        model = %config.openai.model,
        "Starting ExpertDesk API"
    );

    let app_state = Arc::new(AppState::new(dispatcher, session));
    let app = api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let bind = config.server.bind.trim_matches(['[', ']']);
    let listener = TcpListener::bind((bind, config.server.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", bind, config.server.port))?;

    info!(addr = %listener.local_addr()?, "HTTP API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
