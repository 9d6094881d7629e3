//! リモート翻訳ストアとの連携
//!
//! ストアは `get` と `create` の2操作のみを公開する外部コラボレーター。
//! ワイヤ層（GraphQL over HTTP）は [`TranslationStore`] トレイトの背後に隠れる。

mod graphql;
mod store;

pub use graphql::GraphqlTranslationStore;
pub use store::{
    StoreError,
    TranslationStore,
};
