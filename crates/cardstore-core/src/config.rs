//! Store configuration, loaded from environment variables.

use std::str::FromStr;

/// 既定の永続化キー
pub const DEFAULT_KEY: &str = "savedCards";

/// StoreConfig は CardStore の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// コレクション blob を保存するキー
    pub key: String,
}

impl StoreConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// `CARDSTORE_KEY` から読み込む（未設定・空なら既定値）
    pub fn from_env() -> Self {
        Self {
            key: env_parse("CARDSTORE_KEY", DEFAULT_KEY.to_string()),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_KEY)
    }
}

pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    parse_or(std::env::var(key).ok().as_deref(), default)
}

/// 空・未設定・パース失敗なら default
fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.filter(|v| !v.trim().is_empty())
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
