//! 照合ワークフローのデータ型

use serde::{
    Deserialize,
    Serialize,
};

/// リモートストアに永続化される翻訳レコード
///
/// `key` はストア内で一意。`text` は一度書き込まれたら変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// 翻訳キー（ユーザー指定の一意な識別子）
    pub key: String,
    /// 原文テキスト
    pub text: String,
    /// `text` の長さ（UTF-16 コードユニット数、書き込み時に導出）
    pub length: usize,
}

impl TranslationRecord {
    /// キーとテキストからレコードを作成（`length` は導出）
    #[must_use]
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let length = text.encode_utf16().count();
        Self { key: key.into(), text, length }
    }
}

/// ユーザープロンプトの応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// 入力された文字列
    Value(String),
    /// ユーザーがプロンプトをキャンセルした
    Cancelled,
}

/// ワークフローを中断した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// キーが未入力またはプロンプトがキャンセルされた
    KeyMissing,
    /// 翻訳が未入力またはプロンプトがキャンセルされた
    TranslationMissing,
}

/// 照合ワークフローの終端状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 入力不足により中断（副作用なし）
    Aborted(AbortReason),
    /// 新規レコードを書き込み、選択範囲を置換した
    Replaced {
        /// 書き込まれた翻訳キー
        key: String,
        /// 書き込まれた翻訳テキスト
        text: String,
    },
    /// 同一テキストの既存レコードを再利用し、選択範囲を置換した
    Reused {
        /// 再利用された翻訳キー
        key: String,
        /// 既存レコードの翻訳テキスト（入力された翻訳と同一）
        text: String,
    },
    /// 既存レコードと翻訳が異なるため拒否（書き込み・編集なし）
    Conflict {
        /// 競合した翻訳キー
        key: String,
    },
}

/// 選択範囲を置き換える参照スニペットのテンプレート
///
/// `{key}` プレースホルダーに翻訳キーが埋め込まれる。設定由来の定数であり、
/// ユーザー入力ではない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetTemplate(String);

impl SnippetTemplate {
    /// テンプレート文字列からスニペットテンプレートを作成
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// キーを埋め込んだ参照スニペットを生成
    #[must_use]
    pub fn render(&self, key: &str) -> String {
        self.0.replace("{key}", key)
    }
}
