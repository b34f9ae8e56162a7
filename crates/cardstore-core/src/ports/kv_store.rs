//! KeyValueStore port - 単一キーの永続化ストア
//!
//! CardStore はコレクション全体を 1 つのキーに 1 つの文字列として保存します。
//! このポートはその読み書きだけを提供します。
//!
//! # 実装
//! - **InMemoryKeyValueStore**: テスト・開発用（失敗や遅延を注入できる）
//! - **FileKeyValueStore**: JSON ファイルに保存（CLI 用）

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// KvError は下位ストアの失敗
#[derive(Debug, Error)]
pub enum KvError {
    #[error("read failed for key '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("write failed for key '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backing store is malformed: {0}")]
    Format(String),
}

/// KeyValueStore は文字列値の非同期 key-value ストア
///
/// # 設計原則
/// - `get` はキーがなければ `Ok(None)`（エラーではない）
/// - `set` は値全体を置き換える（部分書き込みなし）
/// - キャンセルやタイムアウトは定義しない（いずれ成功か失敗で返る前提）
///
/// # Thread Safety
/// - `Send + Sync` を要求（`Arc` で共有される CardStore から使うため）
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    async fn set(&self, key: &str, value: String) -> Result<(), KvError>;
}

// テストで fake ストアのハンドルを手元に残せるように Arc 越しにも使えるようにする
#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), KvError> {
        (**self).set(key, value).await
    }
}
