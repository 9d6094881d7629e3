use thiserror::Error;
use tower_lsp::async_trait;

use crate::reconciler::TranslationRecord;

/// Defines errors that may occur when talking to the remote store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store rejected a create because the key is already taken
    #[error("Translation key '{key}' already exists")]
    AlreadyExists {
        /// The conflicting key
        key: String,
    },
    /// The request did not reach the store or the store did not answer
    #[error("Remote store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The store answered with something this client does not understand
    #[error("Remote store returned an unexpected response: {0}")]
    Protocol(String),
}

/// リモート翻訳ストアの操作
///
/// レコードはキーで一意。`create` は既存キーに対して
/// [`StoreError::AlreadyExists`] で失敗する（上書きはしない）。
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// キーでレコードを照会する
    async fn get(&self, key: &str) -> Result<Option<TranslationRecord>, StoreError>;

    /// レコードを新規作成する
    async fn create(&self, record: TranslationRecord) -> Result<(), StoreError>;
}
