//! FileKeyValueStore - JSON ファイルに保存する key-value ストア
//!
//! プラットフォームのローカルストレージの代わりに CLI が使う永続化先です。
//!
//! # ファイル形式
//! キー → 文字列値の JSON object を 1 ファイルに保存します。
//! ```json
//! { "savedCards": "[{\"id\":\"card-...\", ...}]" }
//! ```
//!
//! # 書き込み
//! 同じディレクトリの一意な一時ファイルに書いてから rename するので、
//! 途中で落ちても古い内容か新しい内容のどちらかが残ります。

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

use crate::ports::{KeyValueStore, KvError};

pub struct FileKeyValueStore {
    path: PathBuf,
    /// 同一プロセス内の read-modify-write を直列化する
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// ファイル全体を読む（ファイルがなければ空）
    async fn read_all(&self) -> Result<BTreeMap<String, String>, KvError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(KvError::Io(e)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| KvError::Format(format!("{}: {e}", self.path.display())))
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), KvError> {
        let serialized = serde_json::to_string_pretty(entries)
            .map_err(|e| KvError::Format(e.to_string()))?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_replace(&path, serialized.as_bytes()))
            .await
            .map_err(|e| KvError::Write {
                key: self.path.display().to_string(),
                reason: format!("write task failed: {e}"),
            })??;
        debug!(path = %self.path.display(), keys = entries.len(), "key-value file written");
        Ok(())
    }
}

/// 一意な名前の一時ファイルに書いてから `path` に rename する
///
/// 一時ファイルは同じディレクトリに作るので rename は同一ファイルシステム内で完結し、
/// 別プロセスが同時に書いても互いの一時ファイルを壊さない。
fn write_replace(path: &Path, bytes: &[u8]) -> Result<(), KvError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| KvError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let mut entries = self.read_all().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), KvError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries).await
    }
}
