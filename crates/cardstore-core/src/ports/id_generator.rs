//! IdGenerator port - CardId 生成の抽象化
//!
//! # 要件
//! 同じプロセス内で一度発行した ID は二度と発行しない（削除済みの ID も含む）。
//!
//! # 実装
//! - **UlidGenerator**: 単調増加する ULID（本番用）

use std::sync::Mutex;

use crate::domain::CardId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は新しい CardId を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数タスクから使える）
pub trait IdGenerator: Send + Sync {
    fn generate_card_id(&self) -> CardId;
}

/// UlidGenerator は単調増加する ULID ベースの ID 生成器
///
/// # 単調性
/// - 直前の ID 以下の ULID が得られた場合（同一ミリ秒・時計の巻き戻り）は
///   直前の ID を +1 したものを使う
/// - そのため連続呼び出しでも ID は必ず厳密に増加し、重複しない
pub struct UlidGenerator<C> {
    clock: C,
    last: Mutex<Option<Ulid>>,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last: Mutex::new(None),
        }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        let candidate = Ulid::from_parts(timestamp_ms, rand::random());

        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let next = match *last {
            Some(prev) if candidate <= prev => prev
                .increment()
                // ランダム部分が溢れたら次のミリ秒に進める
                .unwrap_or_else(|| Ulid::from_parts(prev.timestamp_ms() + 1, 0)),
            _ => candidate,
        };
        *last = Some(next);
        next
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_card_id(&self) -> CardId {
        CardId::from_ulid(self.next_ulid())
    }
}
