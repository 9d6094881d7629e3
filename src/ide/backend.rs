//! LSP Backend 実装

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams,
    DidChangeTextDocumentParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
    DidSaveTextDocumentParams,
    ExecuteCommandParams,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    MessageType,
};
use tower_lsp::{
    Client,
    LanguageServer,
};

use super::handlers;
use super::state::ServerState;
use crate::config::ConfigManager;

/// LSP Backend
#[derive(Clone)]
pub struct Backend {
    /// LSP クライアント
    pub client: Client,
    /// 設定管理
    pub config_manager: Arc<Mutex<ConfigManager>>,
    /// 共有状態
    pub state: ServerState,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("config_manager", &"<ConfigManager>")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::lifecycle::handle_initialize(self, params).await
    }

    async fn initialized(&self, params: InitializedParams) {
        handlers::lifecycle::handle_initialized(self, params).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handlers::lifecycle::handle_shutdown().await
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.client.log_message(MessageType::INFO, "configuration changed!").await;

        // 設定を更新
        match serde_json::from_value::<crate::config::ExtractSettings>(params.settings) {
            Ok(new_settings) => {
                let mut config_manager = self.config_manager.lock().await;
                match config_manager.update_settings(new_settings) {
                    Ok(()) => {
                        drop(config_manager); // ロックを解放
                        self.client
                            .log_message(MessageType::INFO, "Configuration updated successfully")
                            .await;
                    }
                    Err(error) => {
                        self.client
                            .log_message(
                                MessageType::ERROR,
                                format!("Configuration validation error: {error}"),
                            )
                            .await;
                    }
                }
            }
            Err(error) => {
                tracing::warn!("Invalid configuration payload: {}", error);
                self.client
                    .log_message(MessageType::ERROR, format!("Invalid configuration: {error}"))
                    .await;
            }
        }
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::document_sync::handle_did_open(self, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::document_sync::handle_did_change(self, params).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        handlers::document_sync::handle_did_save(self, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::document_sync::handle_did_close(self, params).await;
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        handlers::execute_command::handle_execute_command(self, params).await
    }
}
