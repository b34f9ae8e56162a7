//! InMemoryKeyValueStore - 開発・テスト用の key-value ストア
//!
//! # 学習ポイント
//! - tokio::sync::Mutex による排他制御
//! - Atomic によるフラグ・カウンタ（ロック不要）
//! - 遅延の注入で並行書き込みの競合を再現する

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::{KeyValueStore, KvError};

/// InMemoryKeyValueStore はプロセス内だけで完結するストア
///
/// # テスト用のつまみ
/// - `set_fail_writes` / `set_fail_reads`: 失敗を注入
/// - `set_write_delay`: `set` が値を書き込む前に待つ時間
/// - `write_count`: 成功した `set` の回数
///
/// # 使用例
/// ```ignore
/// let kv = Arc::new(InMemoryKeyValueStore::new());
/// kv.set_write_delay(Duration::from_millis(50));
/// let store = CardStore::with_defaults(kv.clone());
/// ```
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    write_delay_ms: AtomicU64,
    writes: AtomicUsize,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を 1 件持ったストアを作成
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_write_delay(&self, delay: Duration) {
        self.write_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// 失敗注入を無視して生の値を取得
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(KvError::Read {
                key: key.to_string(),
                reason: "simulated read error".to_string(),
            });
        }
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), KvError> {
        let delay = self.write_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KvError::Write {
                key: key.to_string(),
                reason: "simulated write error".to_string(),
            });
        }
        self.entries.lock().await.insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
