//! Entry point for the Language Server Protocol implementation.

use std::sync::Arc;

use i18n_extract_language_server::Backend;
use i18n_extract_language_server::config::ConfigManager;
use i18n_extract_language_server::ide::state::ServerState;
use tokio::sync::Mutex;
use tower_lsp::{
    LspService,
    Server,
};

#[tokio::main]
async fn main() {
    // stdout は LSP のチャネルなのでログは stderr へ
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .init();

    let config_manager = Arc::new(Mutex::new(ConfigManager::new()));
    let state = ServerState::new();

    let (stdin, stdout) = (tokio::io::stdin(), tokio::io::stdout());
    let (service, socket) = LspService::new(|client| Backend { client, config_manager, state });
    Server::new(stdin, stdout, socket).serve(service).await;
}
