//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryKeyValueStore**: 開発・テスト用（失敗・遅延の注入）
//! - **FileKeyValueStore**: JSON ファイルに保存（CLI 用）

pub mod file_kv;
pub mod inmem_kv;

// 主要な型を再エクスポート
pub use self::file_kv::FileKeyValueStore;
pub use self::inmem_kv::InMemoryKeyValueStore;
