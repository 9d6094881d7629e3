//! 翻訳キーの照合ワークフロー
//!
//! 選択テキスト・ユーザー入力・リモートストアの既存レコードを突き合わせ、
//! 「新規書き込み / 既存キー再利用 / 競合」を判定する中核モジュール。

mod error;
mod types;
mod workflow;

pub use error::{
    EditError,
    PromptError,
    ReconcileError,
};
pub use types::{
    AbortReason,
    Outcome,
    PromptResponse,
    SnippetTemplate,
    TranslationRecord,
};
pub use workflow::{
    Prompter,
    SelectionEditor,
    reconcile,
};
