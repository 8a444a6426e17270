use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cockpit::api::ApiService;
use cockpit::auth::{EnvIdentity, NullSessionObserver};
use cockpit::cli::{Cli, Commands, OfflineAction};
use cockpit::commands::{
    cmd_ls, cmd_offline_set, cmd_offline_status, cmd_offline_toggle, cmd_search, cmd_show,
};
use cockpit::config::{ApiConfig, TOKEN_ENV};
use cockpit::error::Result;
use cockpit::incident::IncidentService;
use cockpit::logger::RequestLog;
use cockpit::notify::{Notifier, TerminalNotifier};
use cockpit::store::{FileStateStore, MemoryStateStore, StateStore};
use cockpit::transport::HttpTransport;

async fn run(cli: Cli) -> Result<()> {
    let config = ApiConfig::from_env()?;
    let logger = RequestLog::new(config.log_http);

    let store: Arc<dyn StateStore> = match FileStateStore::default_path() {
        Some(path) => Arc::new(FileStateStore::new(path)),
        None => Arc::new(MemoryStateStore::new()),
    };
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);

    let transport = HttpTransport::new(
        config,
        Arc::new(EnvIdentity::new(TOKEN_ENV)),
        store.clone(),
        Arc::new(NullSessionObserver),
    )?;
    let api = Arc::new(ApiService::new(Arc::new(transport), notifier.clone(), logger));
    let service = IncidentService::new(api, store.clone(), notifier.clone());

    match cli.command {
        Commands::List { json } => cmd_ls(&service, json).await,
        Commands::Show { id, json } => cmd_show(&service, &id, json).await,
        Commands::Search { query, json } => cmd_search(&service, &query, json).await,
        Commands::Offline { action } => match action.unwrap_or(OfflineAction::Status) {
            OfflineAction::Status => cmd_offline_status(store.as_ref()),
            OfflineAction::On => cmd_offline_set(store.as_ref(), notifier.as_ref(), true),
            OfflineAction::Off => cmd_offline_set(store.as_ref(), notifier.as_ref(), false),
            OfflineAction::Toggle => cmd_offline_toggle(store.as_ref(), notifier.as_ref()),
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
