//! Share - 共有シートに渡す内容の組み立て
//!
//! 実際の共有（メッセージアプリ連携など）は扱わず、
//! 渡すテキストと写真の参照だけを作ります。

use serde::Serialize;

use crate::domain::Card;

/// ShareMessage は共有シートへの入力
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareMessage {
    /// タイトルと下部テキストを改行でつないだもの
    pub message: String,
    /// 写真の参照（あれば）
    pub url: Option<String>,
}

impl ShareMessage {
    pub fn for_card(card: &Card) -> Self {
        Self {
            message: format!("{}\n{}", card.title, card.bottom_text),
            url: card.photo.clone(),
        }
    }
}
