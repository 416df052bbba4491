/// 牌相关模块
///
/// 包含牌（Tile）、牌墙（Wall）、胡牌判定和吃牌枚举的实现

pub mod chi;
pub mod tile;
pub mod wall;
pub mod win_check;

// 重新导出常用类型
pub use chi::{can_chi, chi_combinations, ChiCombination};
pub use tile::{generate_deck, sort_tiles, Color, PieceKind, Tile};
pub use wall::{Wall, STACK_COUNT};
pub use win_check::{check_win_with_incoming, is_five_pawns, is_winning_hand};
