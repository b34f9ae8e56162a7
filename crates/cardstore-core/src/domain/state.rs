//! State - CardStore の外部から見える状態

/// StoreState は CardStore のライフサイクル
///
/// # 状態遷移
/// - uninitialized: load 完了前（変更操作は NotReady）
/// - ready: load 成功後（終端状態はなく、プロセス終了まで続く）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Ready,
}
