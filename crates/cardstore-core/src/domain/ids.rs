//! Card identifiers.
//!
//! # 方針
//! 新しく発行する ID は ULID ベース（`card-` プレフィックス付き）ですが、
//! 永続化済みの blob から読み込む ID は任意の非空文字列を受け入れます。
//! 既存データ（`Date.now()` の文字列など）をそのまま扱えるようにするためです。
//!
//! ## ULID の特性
//! - **時刻でソート可能**: timestamp が先頭にあるため、発行順序でソートできる
//! - **衝突しにくい**: 80-bit のランダム部分を持つ

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// 新規発行する ID のプレフィックス
const PREFIX: &str = "card-";

/// CardId はカードの識別子（不透明な文字列）
///
/// 作成時に一度だけ割り当てられ、以後変更されません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// 任意の文字列から CardId を作成
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// ULID から CardId を作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(format!("{PREFIX}{ulid}"))
    }

    /// 内部の ULID を取得（ULID 形式でない ID は None）
    pub fn as_ulid(&self) -> Option<Ulid> {
        self.0
            .strip_prefix(PREFIX)
            .and_then(|raw| Ulid::from_string(raw).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
