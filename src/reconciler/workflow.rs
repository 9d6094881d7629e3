//! 照合ワークフロー本体
//!
//! プロンプト → リモート照会 → 判定 → 書き込み → ドキュメント編集 の
//! 直列パイプライン。各ステップは待機呼び出しで、キャンセルされた時点で
//! 副作用なしに短絡する。

use tower_lsp::async_trait;

use super::error::{
    EditError,
    PromptError,
    ReconcileError,
};
use super::types::{
    AbortReason,
    Outcome,
    PromptResponse,
    SnippetTemplate,
    TranslationRecord,
};
use crate::remote::{
    StoreError,
    TranslationStore,
};

/// ユーザーへの文字列プロンプト
///
/// エディタ側の入力 UI を抽象化する。キャンセルは正常系の応答であり、
/// `Err` は通信自体の失敗を表す。
#[async_trait]
pub trait Prompter: Send + Sync {
    /// 翻訳キーの入力を求める
    async fn prompt_key(&self) -> Result<PromptResponse, PromptError>;

    /// 翻訳テキストの入力を求める（選択テキストが初期値）
    async fn prompt_translation(&self, default_value: &str)
    -> Result<PromptResponse, PromptError>;
}

/// 呼び出し元の選択範囲を置き換える編集機能
#[async_trait]
pub trait SelectionEditor: Send + Sync {
    /// 選択範囲を `replacement` で置き換える
    async fn replace_selection(&self, replacement: &str) -> Result<(), EditError>;
}

/// プロンプト応答をトリムして検証する
///
/// キャンセル・空文字・空白のみの入力はすべて「未入力」として扱う。
fn non_empty_input(response: PromptResponse) -> Option<String> {
    match response {
        PromptResponse::Cancelled => None,
        PromptResponse::Value(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
        }
    }
}

/// 翻訳キーの照合ワークフローを実行する
///
/// 判定表（順に評価）:
/// 1. キー未入力 → `Aborted(KeyMissing)`（副作用なし）
/// 2. 翻訳未入力 → `Aborted(TranslationMissing)`（副作用なし）
/// 3. `store.get(key)`:
///    - 不在 → レコードを書き込み、選択範囲を置換 → `Replaced`
///    - 既存かつ同一テキスト → 書き込みをスキップし、選択範囲を置換 → `Reused`
///    - 既存かつ異なるテキスト → 書き込みも編集もしない → `Conflict`
///
/// ドキュメント編集は書き込み成功の後にのみ適用される。書き込みが
/// 重複キーで失敗した場合（並行書き込みに先を越された場合）は、
/// ドキュメントに手を付けず `Conflict` を返す。
///
/// # Errors
/// プロンプト・リモートストア・編集のいずれかがトランスポートレベルで
/// 失敗した場合。入力不足や競合はエラーではなく [`Outcome`] で表現される。
pub async fn reconcile<P, S, E>(
    selection_text: &str,
    prompter: &P,
    store: &S,
    editor: &E,
    snippet: &SnippetTemplate,
) -> Result<Outcome, ReconcileError>
where
    P: Prompter + ?Sized,
    S: TranslationStore + ?Sized,
    E: SelectionEditor + ?Sized,
{
    let Some(key) = non_empty_input(prompter.prompt_key().await?) else {
        tracing::debug!("Reconciliation aborted: no key provided");
        return Ok(Outcome::Aborted(AbortReason::KeyMissing));
    };

    let Some(translation) = non_empty_input(prompter.prompt_translation(selection_text).await?)
    else {
        tracing::debug!(key = %key, "Reconciliation aborted: no translation provided");
        return Ok(Outcome::Aborted(AbortReason::TranslationMissing));
    };

    match store.get(&key).await? {
        None => {
            let record = TranslationRecord::new(key.clone(), translation.clone());
            match store.create(record).await {
                Ok(()) => {}
                Err(StoreError::AlreadyExists { .. }) => {
                    // 並行する書き込みに先を越された。編集は未適用のまま競合として報告
                    tracing::warn!(key = %key, "Concurrent write detected for key");
                    return Ok(Outcome::Conflict { key });
                }
                Err(error) => return Err(error.into()),
            }

            editor.replace_selection(&snippet.render(&key)).await?;
            tracing::info!(key = %key, "Created translation and replaced selection");
            Ok(Outcome::Replaced { key, text: translation })
        }
        Some(existing) if existing.text == translation => {
            // レコードは既に正しい。書き込みせず参照だけ張り替える
            editor.replace_selection(&snippet.render(&key)).await?;
            tracing::info!(key = %key, "Reused existing translation key");
            Ok(Outcome::Reused { key, text: translation })
        }
        Some(_) => {
            tracing::info!(key = %key, "Key exists with a different translation");
            Ok(Outcome::Conflict { key })
        }
    }
}
