//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! CardStore は外部の永続化ストアや時刻・ID 生成にこれらの trait 越しに依存し、
//! 実装の詳細（ファイル、メモリ、プラットフォームのストレージなど）を知りません。

pub mod clock;
pub mod id_generator;
pub mod kv_store;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::kv_store::{KeyValueStore, KvError};
