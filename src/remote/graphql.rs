//! Hasura スタイルの GraphQL エンドポイントに対するストア実装
//!
//! 照会は `translations_by_pk`、作成は `insert_translations_one` を使い、
//! 資格情報は `x-hasura-admin-secret` ヘッダーで送る（設定由来、
//! ソースには埋め込まない）。

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tower_lsp::async_trait;

use super::store::{
    StoreError,
    TranslationStore,
};
use crate::config::RemoteStoreConfig;
use crate::reconciler::TranslationRecord;

/// キー照会クエリ
const GET_TRANSLATION_QUERY: &str = "
query getTranslationByKey($key: String!) {
  translation: translations_by_pk(key: $key) {
    key
    text
    length
  }
}
";

/// レコード作成ミューテーション
const CREATE_TRANSLATION_MUTATION: &str = "
mutation createTranslation($key: String!, $text: String!, $length: Int!) {
  insert_translations_one(object: { key: $key, text: $text, length: $length }) {
    key
  }
}
";

/// `x-hasura-admin-secret` ヘッダー名
const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// GraphQL over HTTP の翻訳ストアクライアント
#[derive(Debug, Clone)]
pub struct GraphqlTranslationStore {
    /// HTTP クライアント
    client: reqwest::Client,
    /// GraphQL エンドポイント URL
    endpoint: String,
    /// 管理者シークレット（設定で渡される）
    admin_secret: Option<String>,
}

impl GraphqlTranslationStore {
    /// 設定からストアクライアントを構築する
    ///
    /// # Errors
    /// HTTP クライアントの初期化に失敗した場合
    pub fn from_config(config: &RemoteStoreConfig) -> Result<Self, StoreError> {
        let client =
            reqwest::Client::builder().timeout(Duration::from_millis(config.timeout_ms)).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            admin_secret: config.admin_secret.clone(),
        })
    }

    /// GraphQL リクエストを送信してレスポンスをデコードする
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<GraphqlResponse<T>, StoreError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));

        if let Some(secret) = &self.admin_secret {
            request = request.header(ADMIN_SECRET_HEADER, secret);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<GraphqlResponse<T>>().await?)
    }
}

#[async_trait]
impl TranslationStore for GraphqlTranslationStore {
    async fn get(&self, key: &str) -> Result<Option<TranslationRecord>, StoreError> {
        tracing::debug!(key = %key, "Looking up translation key");

        let response: GraphqlResponse<GetTranslationData> =
            self.execute(GET_TRANSLATION_QUERY, json!({ "key": key })).await?;

        if !response.errors.is_empty() {
            return Err(store_error_from_graphql(key, &response.errors));
        }

        Ok(response.data.and_then(|data| data.translation).map(TranslationRecord::from))
    }

    async fn create(&self, record: TranslationRecord) -> Result<(), StoreError> {
        tracing::debug!(key = %record.key, length = record.length, "Creating translation record");

        let response: GraphqlResponse<CreateTranslationData> = self
            .execute(
                CREATE_TRANSLATION_MUTATION,
                json!({ "key": record.key, "text": record.text, "length": record.length }),
            )
            .await?;

        if !response.errors.is_empty() {
            return Err(store_error_from_graphql(&record.key, &response.errors));
        }

        if response.data.and_then(|data| data.insert_translations_one).is_none() {
            return Err(StoreError::Protocol("mutation returned no inserted row".to_string()));
        }

        Ok(())
    }
}

/// GraphQL レスポンスの共通エンベロープ
#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    /// 成功時のデータ
    data: Option<T>,
    /// エラーの配列（成功時は空）
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

/// GraphQL エラーオブジェクト
#[derive(Debug, Deserialize)]
struct GraphqlError {
    /// エラーメッセージ
    message: String,
    /// Hasura が付与する拡張情報
    extensions: Option<GraphqlErrorExtensions>,
}

/// GraphQL エラーの `extensions` フィールド
#[derive(Debug, Deserialize)]
struct GraphqlErrorExtensions {
    /// エラーコード（例: "constraint-violation"）
    code: Option<String>,
}

/// `getTranslationByKey` のレスポンスデータ
#[derive(Debug, Deserialize)]
struct GetTranslationData {
    /// 見つかったレコード（不在なら null）
    translation: Option<WireTranslation>,
}

/// `createTranslation` のレスポンスデータ
#[derive(Debug, Deserialize)]
struct CreateTranslationData {
    /// 挿入された行（キーのみ返る）
    insert_translations_one: Option<InsertedRow>,
}

/// 挿入結果の行
#[derive(Debug, Deserialize)]
struct InsertedRow {
    /// 挿入されたキー
    #[allow(dead_code)] // レスポンス検証のためにデコードだけする
    key: String,
}

/// ワイヤ上の翻訳レコード
///
/// 古い行には `length` 列が無いことがあるため、欠けていればテキストから導出する。
#[derive(Debug, Deserialize)]
struct WireTranslation {
    key: String,
    text: String,
    #[serde(default)]
    length: Option<usize>,
}

impl From<WireTranslation> for TranslationRecord {
    fn from(wire: WireTranslation) -> Self {
        match wire.length {
            Some(length) => Self { key: wire.key, text: wire.text, length },
            None => Self::new(wire.key, wire.text),
        }
    }
}

/// GraphQL エラー配列を [`StoreError`] に変換する
fn store_error_from_graphql(key: &str, errors: &[GraphqlError]) -> StoreError {
    if errors.iter().any(is_uniqueness_violation) {
        return StoreError::AlreadyExists { key: key.to_string() };
    }

    let messages =
        errors.iter().map(|error| error.message.as_str()).collect::<Vec<_>>().join("; ");
    StoreError::Protocol(messages)
}

/// Hasura の一意性制約違反かどうか
fn is_uniqueness_violation(error: &GraphqlError) -> bool {
    error.extensions.as_ref().and_then(|ext| ext.code.as_deref()) == Some("constraint-violation")
        || error.message.contains("Uniqueness violation")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    /// 照会レスポンス: レコードが存在する場合
    #[rstest]
    fn deserialize_get_response_with_record() {
        let body = r#"{
            "data": {
                "translation": { "key": "greeting.hello", "text": "Hello", "length": 5 }
            }
        }"#;

        let response: GraphqlResponse<GetTranslationData> = serde_json::from_str(body).unwrap();

        assert_that!(response.errors, is_empty());
        let record: TranslationRecord =
            response.data.unwrap().translation.map(TranslationRecord::from).unwrap();
        assert_that!(record.key, eq("greeting.hello"));
        assert_that!(record.text, eq("Hello"));
        assert_that!(record.length, eq(5));
    }

    /// 照会レスポンス: レコードが存在しない場合
    #[rstest]
    fn deserialize_get_response_absent() {
        let body = r#"{ "data": { "translation": null } }"#;

        let response: GraphqlResponse<GetTranslationData> = serde_json::from_str(body).unwrap();

        assert_that!(response.data.unwrap().translation.is_none(), eq(true));
    }

    /// 照会レスポンス: `length` 列が無い行はテキストから導出する
    #[rstest]
    fn deserialize_get_response_without_length() {
        let body = r#"{
            "data": { "translation": { "key": "greeting.hello", "text": "Hello" } }
        }"#;

        let response: GraphqlResponse<GetTranslationData> = serde_json::from_str(body).unwrap();

        let record: TranslationRecord =
            response.data.unwrap().translation.map(TranslationRecord::from).unwrap();
        assert_that!(record.length, eq(5));
    }

    /// 作成レスポンス: 挿入された行が返る
    #[rstest]
    fn deserialize_create_response() {
        let body = r#"{ "data": { "insert_translations_one": { "key": "greeting.hello" } } }"#;

        let response: GraphqlResponse<CreateTranslationData> = serde_json::from_str(body).unwrap();

        assert_that!(response.data.unwrap().insert_translations_one.is_some(), eq(true));
    }

    /// 一意性制約違反（extensions.code）は `AlreadyExists` に変換される
    #[rstest]
    fn uniqueness_violation_by_code_maps_to_already_exists() {
        let body = r#"{
            "errors": [
                {
                    "message": "Uniqueness violation. duplicate key value violates unique constraint \"translations_pkey\"",
                    "extensions": { "path": "$.selectionSet.insert_translations_one", "code": "constraint-violation" }
                }
            ]
        }"#;

        let response: GraphqlResponse<CreateTranslationData> = serde_json::from_str(body).unwrap();
        let error = store_error_from_graphql("greeting.hello", &response.errors);

        assert_that!(error, matches_pattern!(StoreError::AlreadyExists { key: eq("greeting.hello") }));
    }

    /// コードが無くてもメッセージから一意性制約違反を検出する
    #[rstest]
    fn uniqueness_violation_by_message_maps_to_already_exists() {
        let errors = vec![GraphqlError {
            message: "Uniqueness violation on key".to_string(),
            extensions: None,
        }];

        let error = store_error_from_graphql("a.b", &errors);

        assert_that!(error, matches_pattern!(StoreError::AlreadyExists { key: eq("a.b") }));
    }

    /// その他の GraphQL エラーは `Protocol` に変換される
    #[rstest]
    fn other_graphql_errors_map_to_protocol() {
        let errors = vec![
            GraphqlError { message: "field 'translations' not found".to_string(), extensions: None },
            GraphqlError { message: "permission denied".to_string(), extensions: None },
        ];

        let error = store_error_from_graphql("a.b", &errors);

        assert_that!(
            error,
            matches_pattern!(StoreError::Protocol(all![
                contains_substring("not found"),
                contains_substring("permission denied")
            ]))
        );
    }

    /// 設定からクライアントが構築できる
    #[rstest]
    fn from_config_builds_client() {
        let config = RemoteStoreConfig {
            endpoint: "http://localhost:8082/v1/graphql".to_string(),
            admin_secret: Some("admin12345".to_string()),
            timeout_ms: 5_000,
        };

        let store = GraphqlTranslationStore::from_config(&config).unwrap();

        assert_that!(store.endpoint, eq("http://localhost:8082/v1/graphql"));
        assert_that!(store.admin_secret, some(eq("admin12345")));
    }
}
