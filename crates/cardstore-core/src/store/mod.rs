//! CardStore - カードコレクションの正本
//!
//! メモリ上のミラー（`Vec<Card>`）と、key-value ストアの 1 キーに保存された
//! blob を同期させます。
//!
//! # 変更操作の流れ（create / update / delete）
//! 1. ミラーの Mutex を取る（await 中も保持し続ける）
//! 2. 変更後のコレクションを組み立てる
//! 3. コレクション全体を 1 回の `set` で書き込む
//! 4. 書き込みに成功した場合だけミラーに反映する
//!
//! 書き込みが失敗したらミラーは変更前のまま残ります（ロールバック）。
//! Mutex を書き込み完了まで保持するので、並行した create が同じ元の
//! コレクションを読んで片方の追加を失うことはありません。

pub mod codec;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::domain::{Card, CardFields, CardId, StoreError, StoreState};
use crate::ports::{IdGenerator, KeyValueStore, SystemClock, UlidGenerator};

/// CardStore はカードコレクションの単一の正本
///
/// # 使用例
/// ```ignore
/// let store = CardStore::with_defaults(FileKeyValueStore::new("cards.json"));
/// store.load().await?;
/// let card = store.create(CardFields::default().with_title("Happy 30th!")).await?;
/// store.delete(card.id()).await?;
/// ```
///
/// # Thread Safety
/// `K` と `G` が `Send + Sync` なので、`Arc<CardStore<..>>` で共有できます。
pub struct CardStore<K, G> {
    kv: K,
    id_gen: G,
    config: StoreConfig,
    /// None = Uninitialized, Some = Ready
    mirror: Mutex<Option<Vec<Card>>>,
}

impl<K: KeyValueStore> CardStore<K, UlidGenerator<SystemClock>> {
    /// システム時刻の ULID 生成器と既定の設定で作成
    pub fn with_defaults(kv: K) -> Self {
        Self::new(kv, UlidGenerator::new(SystemClock), StoreConfig::default())
    }
}

impl<K: KeyValueStore, G: IdGenerator> CardStore<K, G> {
    pub fn new(kv: K, id_gen: G, config: StoreConfig) -> Self {
        Self {
            kv,
            id_gen,
            config,
            mirror: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub async fn state(&self) -> StoreState {
        match *self.mirror.lock().await {
            Some(_) => StoreState::Ready,
            None => StoreState::Uninitialized,
        }
    }

    /// 永続化されたコレクションを読み込む
    ///
    /// - キーがなければ空のコレクションで Ready になる
    /// - blob が読めなければ `CorruptState`（blob には触らない）
    /// - 再度呼ぶと永続化された状態を読み直す（reload）
    /// - 失敗した場合は Ready だったストアも Uninitialized に戻る
    ///   （古いミラーで壊れた blob を上書きしないため）
    pub async fn load(&self) -> Result<(), StoreError> {
        let mut mirror = self.mirror.lock().await;
        match self.read_collection().await {
            Ok(cards) => {
                info!(key = %self.config.key, count = cards.len(), "card collection loaded");
                *mirror = Some(cards);
                Ok(())
            }
            Err(e) => {
                *mirror = None;
                Err(e)
            }
        }
    }

    async fn read_collection(&self) -> Result<Vec<Card>, StoreError> {
        match self.kv.get(&self.config.key).await? {
            None => Ok(Vec::new()),
            Some(raw) => codec::decode(&raw).inspect_err(|e| {
                warn!(key = %self.config.key, error = %e, "persisted cards are unreadable; leaving blob untouched");
            }),
        }
    }

    /// 新しいカードを末尾に追加
    pub async fn create(&self, fields: CardFields) -> Result<Card, StoreError> {
        let mut mirror = self.mirror.lock().await;
        let cards = mirror.as_mut().ok_or(StoreError::NotReady)?;

        let card = Card::new(self.id_gen.generate_card_id(), fields.normalized());
        let mut next = cards.clone();
        next.push(card.clone());

        self.persist(&next).await?;
        *cards = next;
        debug!(id = %card.id(), "card created");
        Ok(card)
    }

    /// id のカードを丸ごと差し替える（位置は変わらない）
    pub async fn update(&self, id: &CardId, fields: CardFields) -> Result<Card, StoreError> {
        let mut mirror = self.mirror.lock().await;
        let cards = mirror.as_mut().ok_or(StoreError::NotReady)?;

        let Some(position) = cards.iter().position(|c| c.id() == id) else {
            return Err(StoreError::NotFound(id.clone()));
        };
        let card = Card::new(id.clone(), fields.normalized());
        let mut next = cards.clone();
        next[position] = card.clone();

        self.persist(&next).await?;
        *cards = next;
        debug!(id = %id, position, "card updated");
        Ok(card)
    }

    /// id のカードを削除する
    ///
    /// 存在しない id は成功扱い（冪等）で、書き込みもしません。
    /// 戻り値は実際に削除したかどうか。
    pub async fn delete(&self, id: &CardId) -> Result<bool, StoreError> {
        let mut mirror = self.mirror.lock().await;
        let cards = mirror.as_mut().ok_or(StoreError::NotReady)?;

        if !cards.iter().any(|c| c.id() == id) {
            debug!(id = %id, "delete of absent card ignored");
            return Ok(false);
        }
        let next: Vec<Card> = cards.iter().filter(|c| c.id() != id).cloned().collect();

        self.persist(&next).await?;
        *cards = next;
        debug!(id = %id, "card deleted");
        Ok(true)
    }

    /// 現在のコレクションのスナップショット（挿入順）
    ///
    /// 返した後の変更は反映されないので、変更後は呼び直すこと。
    pub async fn list(&self) -> Result<Vec<Card>, StoreError> {
        let mirror = self.mirror.lock().await;
        mirror.as_ref().cloned().ok_or(StoreError::NotReady)
    }

    /// id のカードを取得
    pub async fn get(&self, id: &CardId) -> Result<Option<Card>, StoreError> {
        let mirror = self.mirror.lock().await;
        let cards = mirror.as_ref().ok_or(StoreError::NotReady)?;
        Ok(cards.iter().find(|c| c.id() == id).cloned())
    }

    async fn persist(&self, cards: &[Card]) -> Result<(), StoreError> {
        let blob = codec::encode(cards)?;
        self.kv
            .set(&self.config.key, blob)
            .await
            .inspect_err(|e| warn!(key = %self.config.key, error = %e, "card write failed; mirror unchanged"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FontFamily;
    use crate::impls::InMemoryKeyValueStore;
    use std::sync::Arc;

    type TestStore = CardStore<Arc<InMemoryKeyValueStore>, UlidGenerator<SystemClock>>;

    async fn ready_store() -> (TestStore, Arc<InMemoryKeyValueStore>) {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = CardStore::with_defaults(kv.clone());
        store.load().await.unwrap();
        (store, kv)
    }

    #[tokio::test]
    async fn starts_uninitialized() {
        let store = CardStore::with_defaults(InMemoryKeyValueStore::new());
        assert_eq!(store.state().await, StoreState::Uninitialized);

        store.load().await.unwrap();
        assert_eq!(store.state().await, StoreState::Ready);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn operations_before_load_are_not_ready() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = CardStore::with_defaults(kv.clone());
        let id = CardId::new("x");

        assert!(matches!(
            store.create(CardFields::default()).await,
            Err(StoreError::NotReady)
        ));
        assert!(matches!(
            store.update(&id, CardFields::default()).await,
            Err(StoreError::NotReady)
        ));
        assert!(matches!(store.delete(&id).await, Err(StoreError::NotReady)));
        assert!(matches!(store.list().await, Err(StoreError::NotReady)));
        assert!(matches!(store.get(&id).await, Err(StoreError::NotReady)));
        assert_eq!(kv.write_count(), 0);
    }

    #[tokio::test]
    async fn create_normalizes_and_persists() {
        let (store, kv) = ready_store().await;

        let card = store
            .create(CardFields::default().with_title("  ").with_font_family(FontFamily::Courier))
            .await
            .unwrap();

        assert_eq!(card.title, "Happy Birthday");
        assert_eq!(card.font_family, FontFamily::Courier);
        assert_eq!(kv.write_count(), 1);

        let persisted = codec::decode(&kv.raw("savedCards").await.unwrap()).unwrap();
        assert_eq!(persisted, vec![card]);
    }

    #[tokio::test]
    async fn failed_create_rolls_back() {
        let (store, kv) = ready_store().await;
        let kept = store.create(CardFields::default()).await.unwrap();

        kv.set_fail_writes(true);
        let result = store.create(CardFields::default().with_title("lost")).await;

        assert!(matches!(result, Err(StoreError::PersistenceFailure(_))));
        assert!(result.unwrap_err().is_retryable());
        assert_eq!(store.list().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn failed_update_and_delete_roll_back() {
        let (store, kv) = ready_store().await;
        let card = store.create(CardFields::default()).await.unwrap();

        kv.set_fail_writes(true);
        let update = store
            .update(card.id(), card.fields().with_title("changed"))
            .await;
        let delete = store.delete(card.id()).await;

        assert!(matches!(update, Err(StoreError::PersistenceFailure(_))));
        assert!(matches!(delete, Err(StoreError::PersistenceFailure(_))));
        assert_eq!(store.list().await.unwrap(), vec![card]);
    }

    #[tokio::test]
    async fn delete_of_absent_id_does_not_write() {
        let (store, kv) = ready_store().await;
        store.create(CardFields::default()).await.unwrap();
        kv.set_fail_writes(true);

        let removed = store.delete(&CardId::new("missing")).await.unwrap();

        assert!(!removed);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn corrupt_blob_surfaces_and_is_preserved() {
        let kv = Arc::new(InMemoryKeyValueStore::with_entry("savedCards", "[{oops"));
        let store = CardStore::with_defaults(kv.clone());

        let result = store.load().await;

        assert!(matches!(result, Err(StoreError::CorruptState(_))));
        assert_eq!(store.state().await, StoreState::Uninitialized);
        assert_eq!(kv.raw("savedCards").await.as_deref(), Some("[{oops"));
        assert_eq!(kv.write_count(), 0);
    }

    #[tokio::test]
    async fn failed_reload_returns_to_uninitialized() {
        let (store, kv) = ready_store().await;
        store.create(CardFields::default()).await.unwrap();

        kv.set("savedCards", "[{corrupt".to_string()).await.unwrap();
        let writes = kv.write_count();

        assert!(matches!(store.load().await, Err(StoreError::CorruptState(_))));
        assert_eq!(store.state().await, StoreState::Uninitialized);
        assert!(matches!(
            store.create(CardFields::default().with_title("after")).await,
            Err(StoreError::NotReady)
        ));
        assert!(matches!(store.list().await, Err(StoreError::NotReady)));
        assert_eq!(kv.raw("savedCards").await.as_deref(), Some("[{corrupt"));
        assert_eq!(kv.write_count(), writes);
    }

    #[tokio::test]
    async fn failed_reload_read_returns_to_uninitialized() {
        let (store, kv) = ready_store().await;
        let card = store.create(CardFields::default()).await.unwrap();

        kv.set_fail_reads(true);
        assert!(matches!(
            store.load().await,
            Err(StoreError::PersistenceFailure(_))
        ));
        assert_eq!(store.state().await, StoreState::Uninitialized);
        assert!(matches!(
            store.delete(card.id()).await,
            Err(StoreError::NotReady)
        ));

        kv.set_fail_reads(false);
        store.load().await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![card]);
    }

    #[tokio::test]
    async fn read_failure_is_persistence_failure() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        kv.set_fail_reads(true);
        let store = CardStore::with_defaults(kv.clone());

        assert!(matches!(
            store.load().await,
            Err(StoreError::PersistenceFailure(_))
        ));

        kv.set_fail_reads(false);
        store.load().await.unwrap();
        assert_eq!(store.state().await, StoreState::Ready);
    }

    #[tokio::test]
    async fn reload_picks_up_external_changes() {
        let (store, kv) = ready_store().await;
        store.create(CardFields::default()).await.unwrap();

        kv.set("savedCards", "[]".to_string()).await.unwrap();
        store.load().await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn custom_key_is_used() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = CardStore::new(
            kv.clone(),
            UlidGenerator::new(SystemClock),
            StoreConfig::new("birthdayCards"),
        );
        store.load().await.unwrap();
        store.create(CardFields::default()).await.unwrap();

        assert_eq!(store.config().key, "birthdayCards");
        assert!(kv.raw("birthdayCards").await.is_some());
        assert!(kv.raw("savedCards").await.is_none());
    }

    #[tokio::test]
    async fn get_returns_copy() {
        let (store, _kv) = ready_store().await;
        let card = store.create(CardFields::default()).await.unwrap();

        let mut fetched = store.get(card.id()).await.unwrap().unwrap();
        fetched.title = "local edit".to_string();

        assert_eq!(store.get(card.id()).await.unwrap().unwrap(), card);
        assert_eq!(store.get(&CardId::new("nope")).await.unwrap(), None);
    }
}
