//! `workspace/applyEdit` 経由の選択範囲置換

use std::collections::HashMap;

use tower_lsp::Client;
use tower_lsp::async_trait;
use tower_lsp::lsp_types::{
    TextEdit,
    Url,
    WorkspaceEdit,
};

use crate::reconciler::{
    EditError,
    SelectionEditor,
};
use crate::types::SourceRange;

/// LSP クライアント経由の [`SelectionEditor`] 実装
///
/// コマンド呼び出し時の選択範囲（URI + 範囲）に束縛され、
/// その範囲だけを置き換える。
pub struct ClientSelectionEditor {
    /// LSP クライアント
    client: Client,
    /// 対象ドキュメントの URI
    uri: Url,
    /// 置換する選択範囲
    range: SourceRange,
}

impl ClientSelectionEditor {
    /// 選択範囲に束縛されたエディタを作成
    #[must_use]
    pub const fn new(client: Client, uri: Url, range: SourceRange) -> Self {
        Self { client, uri, range }
    }
}

#[async_trait]
impl SelectionEditor for ClientSelectionEditor {
    async fn replace_selection(&self, replacement: &str) -> Result<(), EditError> {
        let text_edit = TextEdit { range: self.range.into(), new_text: replacement.to_string() };

        let mut changes = HashMap::new();
        changes.insert(self.uri.clone(), vec![text_edit]);

        let response = self
            .client
            .apply_edit(WorkspaceEdit { changes: Some(changes), ..WorkspaceEdit::default() })
            .await
            .map_err(|error| EditError(error.to_string()))?;

        if !response.applied {
            let reason = response
                .failure_reason
                .unwrap_or_else(|| "client declined the edit".to_string());
            return Err(EditError(reason));
        }

        tracing::debug!(uri = %self.uri, "Selection replaced");
        Ok(())
    }
}

impl std::fmt::Debug for ClientSelectionEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSelectionEditor")
            .field("uri", &self.uri)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}
