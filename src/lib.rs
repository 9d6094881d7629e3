//! i18n-extract-language-server
//!
//! 選択テキストをリモートの翻訳ストアへ登録し、翻訳キー参照に置き換える
//! Language Server Protocol (LSP) 実装

pub mod config;
pub mod ide;
pub mod reconciler;
pub mod remote;
pub mod types;

// Backend を再エクスポート
pub use ide::backend::Backend;
