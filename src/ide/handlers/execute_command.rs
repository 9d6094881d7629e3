//! Execute Command ハンドラー
//!
//! `workspace/executeCommand` リクエストを処理し、
//! カスタムコマンドを実行します。

use serde::Deserialize;
use serde_json::Value;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    ExecuteCommandParams,
    MessageType,
    Range,
    Url,
};

use super::super::backend::Backend;
use super::super::editor::ClientSelectionEditor;
use super::super::prompt::ClientPrompter;
use crate::reconciler::{
    AbortReason,
    Outcome,
    SnippetTemplate,
    reconcile,
};
use crate::remote::GraphqlTranslationStore;
use crate::types::{
    SourceRange,
    text_in_range,
};

/// `workspace/executeCommand` リクエストを処理
#[allow(clippy::single_match_else)] // 将来的にコマンドが増える可能性を考慮
pub async fn handle_execute_command(
    backend: &Backend,
    params: ExecuteCommandParams,
) -> Result<Option<Value>> {
    tracing::debug!(command = %params.command, "Execute Command request");

    match params.command.as_str() {
        "i18n.extractTranslation" => {
            handle_extract_translation(backend, Some(params.arguments)).await
        }
        _ => {
            tracing::warn!("Unknown command: {}", params.command);
            Ok(None)
        }
    }
}

/// `i18n.extractTranslation` コマンドの引数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractTranslationArgs {
    /// 対象ドキュメントの URI
    uri: String,
    /// エディタの選択範囲
    range: Range,
}

/// `i18n.extractTranslation` コマンドを実行
///
/// # Arguments
/// * `arguments[0]` - `ExtractTranslationArgs` オブジェクト
///
/// # 動作
/// 選択テキストを解決し、キーと翻訳のプロンプトを経てリモートストアと
/// 照合する。結果（置換・再利用・競合・中断）は `window/showMessage` で
/// ユーザーに報告する。
async fn handle_extract_translation(
    backend: &Backend,
    arguments: Option<Vec<Value>>,
) -> Result<Option<Value>> {
    let args = arguments.unwrap_or_default();

    // 引数をパース
    let Some(first_arg) = args.first().cloned() else {
        tracing::warn!("Missing arguments for i18n.extractTranslation");
        return Ok(None);
    };

    let parsed_args: ExtractTranslationArgs = match serde_json::from_value(first_arg) {
        Ok(args) => args,
        Err(e) => {
            tracing::warn!("Invalid arguments for i18n.extractTranslation: {}", e);
            return Ok(None);
        }
    };

    // URI をパース
    let Ok(uri) = Url::parse(&parsed_args.uri) else {
        tracing::warn!("Invalid URI: {}", parsed_args.uri);
        return Ok(None);
    };

    // 選択テキストを解決（空の選択は前提条件違反としてユーザーに報告）
    let Some(document) = backend.state.document_text(&uri).await else {
        backend
            .client
            .show_message(MessageType::ERROR, format!("Document is not open: {uri}"))
            .await;
        return Ok(None);
    };

    let range = SourceRange::from(parsed_args.range);
    let selection = text_in_range(&document, range).unwrap_or_default().to_string();
    if selection.is_empty() {
        backend.client.show_message(MessageType::ERROR, "No text selected").await;
        return Ok(None);
    }

    // 設定からストアとスニペットを構築
    let (remote_config, snippet) = {
        let config = backend.config_manager.lock().await;
        let settings = config.get_settings();
        (settings.remote.clone(), SnippetTemplate::new(settings.snippet_template.clone()))
    };

    let store = match GraphqlTranslationStore::from_config(&remote_config) {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("Failed to build remote store client: {}", error);
            backend
                .client
                .show_message(MessageType::ERROR, format!("Remote store unavailable: {error}"))
                .await;
            return Ok(None);
        }
    };

    let prompter = ClientPrompter::new(backend.client.clone());
    let editor = ClientSelectionEditor::new(backend.client.clone(), uri, range);

    match reconcile(&selection, &prompter, &store, &editor, &snippet).await {
        Ok(outcome) => report_outcome(backend, &outcome).await,
        Err(error) => {
            tracing::error!("Translation extraction failed: {}", error);
            backend
                .client
                .show_message(MessageType::ERROR, format!("Translation extraction failed: {error}"))
                .await;
        }
    }

    Ok(None)
}

/// 終端状態をユーザーに報告する
async fn report_outcome(backend: &Backend, outcome: &Outcome) {
    match outcome {
        Outcome::Replaced { key, text } | Outcome::Reused { key, text } => {
            backend
                .client
                .show_message(
                    MessageType::INFO,
                    format!("Replaced {text} with translation key \"{key}\""),
                )
                .await;
        }
        Outcome::Conflict { key } => {
            backend
                .client
                .show_message(
                    MessageType::ERROR,
                    format!("Key {key} already exists with different translation"),
                )
                .await;
        }
        Outcome::Aborted(AbortReason::KeyMissing) => {
            backend.client.show_message(MessageType::WARNING, "No key provided").await;
        }
        Outcome::Aborted(AbortReason::TranslationMissing) => {
            backend.client.show_message(MessageType::WARNING, "No translation provided").await;
        }
    }
}
