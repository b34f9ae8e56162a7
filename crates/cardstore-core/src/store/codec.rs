//! BlobCodec - コレクションと永続化 blob の相互変換
//!
//! # フォーマット
//! レコードの JSON 配列（順序 = 挿入順）。空のコレクションは `[]`。
//!
//! # デコード時の検証
//! 1. JSON として読めること
//! 2. 各レコードが `{id, photo?, title, bottomText, backgroundColor, fontFamily}` であること
//! 3. id が空でなく、コレクション内で一意であること
//!
//! どれかが満たされなければ `CorruptState` を返します（空のコレクションにはしない）。

use std::collections::HashSet;

use crate::domain::{Card, StoreError};

/// コレクションを blob に変換
pub fn encode(cards: &[Card]) -> Result<String, StoreError> {
    serde_json::to_string(cards).map_err(encode_error)
}

fn encode_error(e: serde_json::Error) -> StoreError {
    StoreError::Encode(e.to_string())
}

/// blob をコレクションに変換
pub fn decode(raw: &str) -> Result<Vec<Card>, StoreError> {
    let cards: Vec<Card> = serde_json::from_str(raw)
        .map_err(|e| StoreError::CorruptState(format!("failed to decode collection: {e}")))?;

    let mut seen = HashSet::with_capacity(cards.len());
    for card in &cards {
        if card.id().as_str().is_empty() {
            return Err(StoreError::CorruptState("card with empty id".to_string()));
        }
        if !seen.insert(card.id()) {
            return Err(StoreError::CorruptState(format!(
                "duplicate card id '{}'",
                card.id()
            )));
        }
    }
    Ok(cards)
}
