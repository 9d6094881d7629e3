//! クライアントへの入力プロンプト
//!
//! LSP 標準には自由入力のプロンプトが無いため、カスタムリクエスト
//! `i18n/inputBox` でクライアント側の入力 UI を呼び出す。クライアントは
//! 入力された文字列を、キャンセル時は `null` を返す。

use serde::{
    Deserialize,
    Serialize,
};
use tower_lsp::Client;
use tower_lsp::async_trait;
use tower_lsp::lsp_types::request::Request;

use crate::reconciler::{
    PromptError,
    PromptResponse,
    Prompter,
};

/// `i18n/inputBox` カスタムリクエスト
#[derive(Debug)]
pub enum InputBox {}

impl Request for InputBox {
    type Params = InputBoxParams;
    type Result = Option<String>;

    const METHOD: &'static str = "i18n/inputBox";
}

/// `i18n/inputBox` のパラメータ
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputBoxParams {
    /// 入力欄に表示する説明
    pub prompt: String,
    /// 入力欄の初期値
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// LSP クライアント経由の [`Prompter`] 実装
#[derive(Clone)]
pub struct ClientPrompter {
    /// LSP クライアント
    client: Client,
}

impl ClientPrompter {
    /// 新しいプロンプトを作成
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// `i18n/inputBox` リクエストを送信する
    async fn input_box(
        &self,
        prompt: &str,
        value: Option<&str>,
    ) -> Result<PromptResponse, PromptError> {
        let params =
            InputBoxParams { prompt: prompt.to_string(), value: value.map(ToString::to_string) };

        match self.client.send_request::<InputBox>(params).await {
            Ok(Some(text)) => Ok(PromptResponse::Value(text)),
            Ok(None) => Ok(PromptResponse::Cancelled),
            Err(error) => Err(PromptError(error.to_string())),
        }
    }
}

#[async_trait]
impl Prompter for ClientPrompter {
    async fn prompt_key(&self) -> Result<PromptResponse, PromptError> {
        self.input_box("Specify key", None).await
    }

    async fn prompt_translation(
        &self,
        default_value: &str,
    ) -> Result<PromptResponse, PromptError> {
        self.input_box("Specify translation", Some(default_value)).await
    }
}

impl std::fmt::Debug for ClientPrompter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientPrompter").field("client", &"<Client>").finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    /// パラメータは camelCase でシリアライズされ、初期値なしの場合は省略される
    #[rstest]
    fn input_box_params_serialization_without_value() {
        let params = InputBoxParams { prompt: "Specify key".to_string(), value: None };

        let json = serde_json::to_value(&params).unwrap();

        assert_that!(json, eq(&serde_json::json!({ "prompt": "Specify key" })));
    }

    #[rstest]
    fn input_box_params_serialization_with_value() {
        let params =
            InputBoxParams { prompt: "Specify translation".to_string(), value: Some("Hello".to_string()) };

        let json = serde_json::to_value(&params).unwrap();

        assert_that!(
            json,
            eq(&serde_json::json!({ "prompt": "Specify translation", "value": "Hello" }))
        );
    }
}
