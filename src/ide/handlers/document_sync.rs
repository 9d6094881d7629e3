//! Document synchronization handlers.

use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
    DidSaveTextDocumentParams,
    MessageType,
};

use super::super::backend::Backend;

pub async fn handle_did_open(backend: &Backend, params: DidOpenTextDocumentParams) {
    let uri = params.text_document.uri;
    let text = params.text_document.text;

    tracing::debug!(uri = %uri, "file opened");
    backend.state.upsert_document(uri, text).await;
}

pub async fn handle_did_change(backend: &Backend, params: DidChangeTextDocumentParams) {
    let uri = params.text_document.uri;

    // FULL 同期なので最後の変更が全文
    let Some(change) = params.content_changes.into_iter().next_back() else {
        return;
    };

    backend.state.upsert_document(uri, change.text).await;
}

pub async fn handle_did_save(backend: &Backend, _: DidSaveTextDocumentParams) {
    backend.client.log_message(MessageType::INFO, "file saved!").await;
}

pub async fn handle_did_close(backend: &Backend, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;

    tracing::debug!(uri = %uri, "file closed");
    backend.state.remove_document(&uri).await;
}
