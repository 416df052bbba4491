/// 对局相关模块
///
/// 包含状态聚合体、意图入口、回合状态机、电脑策略、结算与战绩

pub mod action;
pub mod advisor;
pub mod engine;
pub mod history;
pub mod scoring;
pub mod state;

// 重新导出常用类型
pub use action::Intent;
pub use advisor::best_discard;
pub use engine::{AuxView, Cue, GameEngine, GameError, DECISION_TICKS};
pub use history::{HistoryStore, MatchRecord, MemoryHistoryStore};
pub use scoring::{compute_payout, Payout, PayoutKind};
pub use state::{GameMode, GamePhase, GameState, Player, WaitingReason, START_CHIPS};
