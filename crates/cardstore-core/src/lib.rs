//! cardstore-core
//!
//! Core building blocks for the birthday card collection store.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Card, CardFields, CardId, StoreState, StoreError）
//! - **ports**: 抽象化レイヤー（KeyValueStore, IdGenerator, Clock）
//! - **impls**: ports の実装（InMemoryKeyValueStore, FileKeyValueStore）
//! - **store**: CardStore 本体と blob codec
//! - **config**: 設定（永続化キー）
//! - **share**: 共有用メッセージの組み立て

pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod share;
pub mod store;

pub use config::StoreConfig;
pub use domain::{Card, CardFields, CardId, StoreError, StoreState};
pub use store::CardStore;
