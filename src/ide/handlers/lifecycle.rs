//! LSP lifecycle handlers: `initialize`, `initialized`, `shutdown`.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    ExecuteCommandOptions,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    MessageType,
    OneOf,
    ServerCapabilities,
    TextDocumentSyncCapability,
    TextDocumentSyncKind,
    WorkDoneProgressOptions,
    WorkspaceFoldersServerCapabilities,
    WorkspaceServerCapabilities,
};

use super::super::backend::Backend;

pub async fn handle_initialize(
    backend: &Backend,
    params: InitializeParams,
) -> Result<InitializeResult> {
    let workspace_root = params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .and_then(|folder| folder.uri.to_file_path().ok());

    let mut config_manager = backend.config_manager.lock().await;
    if let Err(error) = config_manager.load_settings(workspace_root) {
        backend
            .client
            .log_message(MessageType::ERROR, format!("Configuration error: {error}"))
            .await;
        tracing::error!("Configuration error during initialize: {}", error);
    }
    drop(config_manager);

    Ok(InitializeResult {
        server_info: None,
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec!["i18n.extractTranslation".to_string()],
                work_done_progress_options: WorkDoneProgressOptions::default(),
            }),
            workspace: Some(WorkspaceServerCapabilities {
                workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                    supported: Some(true),
                    change_notifications: Some(OneOf::Left(true)),
                }),
                file_operations: None,
            }),
            ..ServerCapabilities::default()
        },
    })
}

pub async fn handle_initialized(backend: &Backend, _: InitializedParams) {
    backend.client.log_message(MessageType::INFO, "initialized!").await;
}

#[allow(clippy::unused_async)]
pub async fn handle_shutdown() -> Result<()> {
    Ok(())
}
