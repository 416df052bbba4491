/// 台湾象棋麻将引擎
///
/// 规则引擎 + 主机权威网络同步层，前端只负责渲染

pub mod game;
pub mod net;
pub mod tile;

// 重新导出常用类型
pub use tile::{generate_deck, sort_tiles, Color, PieceKind, Tile, Wall};
pub use tile::{can_chi, check_win_with_incoming, is_five_pawns, is_winning_hand};
pub use game::action::Intent;
pub use game::advisor::best_discard;
pub use game::engine::{AuxView, Cue, GameEngine, GameError};
pub use game::history::{HistoryStore, MatchRecord, MemoryHistoryStore};
pub use game::scoring::{compute_payout, Payout, PayoutKind};
pub use game::state::{GameMode, GamePhase, GameState, Player, WaitingReason};
pub use net::{ClientSession, HostSession, NetMessage, Transport};
