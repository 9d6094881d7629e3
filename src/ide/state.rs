//! LSP サーバーの共有状態

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::Url;

/// LSP サーバーの共有状態
///
/// `Backend` から状態管理の責務を分離し、ハンドラー間で共有可能にします。
/// 選択範囲の解決に必要な、開いているドキュメントの全文を保持する
/// （FULL 同期なので常に最新のテキストが届く）。
#[derive(Clone, Default)]
pub struct ServerState {
    /// 開いているドキュメントのテキスト（URI → 全文）
    pub documents: Arc<Mutex<HashMap<Url, String>>>,
}

impl ServerState {
    /// 新しい `ServerState` を作成
    #[must_use]
    pub fn new() -> Self {
        Self { documents: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// ドキュメントのテキストを登録・更新する
    pub async fn upsert_document(&self, uri: Url, text: String) {
        self.documents.lock().await.insert(uri, text);
    }

    /// ドキュメントを破棄する
    pub async fn remove_document(&self, uri: &Url) {
        self.documents.lock().await.remove(uri);
    }

    /// ドキュメントのテキストを取得する
    pub async fn document_text(&self, uri: &Url) -> Option<String> {
        self.documents.lock().await.get(uri).cloned()
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState").field("documents", &"<HashMap<Url, String>>").finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn new_creates_empty_state() {
        let state = ServerState::new();

        expect_that!(Arc::strong_count(&state.documents), eq(1));
    }

    #[googletest::test]
    fn clone_shares_state() {
        let state1 = ServerState::new();
        let state2 = state1.clone();

        expect_that!(Arc::strong_count(&state1.documents), eq(2));
        expect_that!(Arc::ptr_eq(&state1.documents, &state2.documents), eq(true));
    }

    #[tokio::test]
    async fn documents_can_be_upserted_and_removed() {
        let state = ServerState::new();
        let uri = Url::parse("file:///test.ts").unwrap();

        state.upsert_document(uri.clone(), "const x = 1;".to_string()).await;
        assert_eq!(state.document_text(&uri).await.as_deref(), Some("const x = 1;"));

        state.upsert_document(uri.clone(), "const x = 2;".to_string()).await;
        assert_eq!(state.document_text(&uri).await.as_deref(), Some("const x = 2;"));

        state.remove_document(&uri).await;
        assert!(state.document_text(&uri).await.is_none());
    }

    #[tokio::test]
    async fn cloned_state_shares_modifications() {
        let state1 = ServerState::new();
        let state2 = state1.clone();
        let uri = Url::parse("file:///test.ts").unwrap();

        state1.upsert_document(uri.clone(), "hello".to_string()).await;

        assert_eq!(state2.document_text(&uri).await.as_deref(), Some("hello"));
    }
}
