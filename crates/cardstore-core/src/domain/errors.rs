//! Errors - CardStore のエラー分類
//!
//! # 分類
//! - NotReady: load 完了前の操作
//! - NotFound: update 対象の id が存在しない
//! - CorruptState: 永続化 blob が期待するフォーマットで読めない
//! - PersistenceFailure: 下位ストアの読み書き失敗（I/O, 容量, 権限）
//! - Encode: 書き込む blob を作れなかった
//!
//! どの分類も呼び出し側に返します（黙って復旧しない）。

use thiserror::Error;

use super::ids::CardId;
use crate::ports::KvError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("card store is not loaded yet")]
    NotReady,

    #[error("card not found: id={0}")]
    NotFound(CardId),

    /// 生の blob は削除せずに残す（リカバリや再読み込みのため）
    #[error("persisted card collection is corrupt: {0}")]
    CorruptState(String),

    /// 書き込み前のシリアライズ失敗（永続化済みのデータには触れていない）
    #[error("failed to encode card collection: {0}")]
    Encode(String),

    #[error("persistence failure: {0}")]
    PersistenceFailure(#[from] KvError),

    #[error("invalid field: {0}")]
    InvalidField(String),
}

impl StoreError {
    /// 再試行で解決しうるエラーか（UI のリトライ導線用）
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::PersistenceFailure(_))
    }
}
