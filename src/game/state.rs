use crate::tile::{Tile, Wall};

/// 游戏阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GamePhase {
    /// 准备室（等待所有座位准备）
    Lobby,
    /// 切牌（庄家选择起手疊）
    Cutting,
    /// 发牌
    Dealing,
    /// 对局中
    Playing,
    /// 本局结束（结算完成）
    GameOver,
}

/// 游戏模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameMode {
    /// 单机（本地人类 + 电脑）
    SinglePlayer,
    /// 多人连线（主机权威）
    MultiPlayer,
}

/// 决策等待原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WaitingReason {
    /// 无等待
    None,
    /// 等待当前座位决定摸牌或吃牌（10 tick 倒计时）
    TurnDecision,
    /// 等待玩家决定是否胡别家打出的牌
    Hu,
}

/// 玩家初始筹码
pub const START_CHIPS: i32 = 100;

/// 事件日志上限（超过后丢弃最旧的记录）
pub const MAX_LOGS: usize = 100;

/// 玩家状态
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Player {
    /// 座位号（0..N-1，固定不变）
    pub id: u8,
    /// 显示名称
    pub name: String,
    /// 是否由真人控制（本地或远端）
    pub is_human: bool,
    /// 是否已准备（仅准备室阶段有意义）
    pub is_ready: bool,
    /// 手牌（有序；打牌后 4 张，摸/吃后 5 张）
    pub hand: Vec<Tile>,
    /// 弃牌堆（一局内只追加，吃牌时弹出最后一张）
    pub discards: Vec<Tile>,
    /// 筹码（可为负；任一玩家 <= 0 时整场结束）
    pub chips: i32,
}

impl Player {
    /// 创建新玩家
    pub fn new(id: u8, name: impl Into<String>, is_human: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_human,
            is_ready: false,
            hand: Vec::new(),
            discards: Vec::new(),
            chips: START_CHIPS,
        }
    }

    /// 按 id 从手牌移除一张牌
    pub fn remove_from_hand(&mut self, tile_id: u8) -> Option<Tile> {
        let pos = self.hand.iter().position(|t| t.id == tile_id)?;
        Some(self.hand.remove(pos))
    }
}

/// 游戏状态（权威聚合体）
///
/// 这是唯一跨网络边界序列化的实体；非主机端只会用收到的
/// 快照整体替换本地副本，从不局部修改。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameState {
    /// 模式
    pub mode: GameMode,
    /// 阶段
    pub phase: GamePhase,
    /// 座位数（2-4）
    pub player_count: u8,
    /// 当前行动座位
    pub turn_index: u8,
    /// 本局庄家座位
    pub dealer_index: u8,
    /// 牌墙（含切牌疊位）
    pub wall: Wall,
    /// 玩家列表
    pub players: Vec<Player>,
    /// 最近一张弃牌（指向打出者弃牌堆的最后一张；被吃后双双移除）
    pub last_discard: Option<Tile>,
    /// 胡牌座位（None 表示未分出胜负或流局）
    pub winner: Option<u8>,
    /// 点炮座位（None 表示自摸或流局）
    pub loser: Option<u8>,
    /// 胡牌时的 5 张牌快照
    pub winning_hand: Option<Vec<Tile>>,
    /// 事件日志（人类可读，上限 MAX_LOGS 条）
    pub logs: Vec<String>,
}

impl GameState {
    /// 创建初始状态（准备室阶段）
    pub fn new(mode: GameMode, players: Vec<Player>) -> Self {
        let player_count = players.len() as u8;
        Self {
            mode,
            phase: GamePhase::Lobby,
            player_count,
            turn_index: 0,
            dealer_index: 0,
            wall: Wall::from_tiles(Vec::new()),
            players,
            last_discard: None,
            winner: None,
            loser: None,
            winning_hand: None,
            logs: vec!["欢迎来到象棋麻将！".to_string()],
        }
    }

    /// 追加一条事件日志（超过上限时丢弃最旧的）
    pub fn push_log(&mut self, message: impl Into<String>) {
        self.logs.push(message.into());
        if self.logs.len() > MAX_LOGS {
            let overflow = self.logs.len() - MAX_LOGS;
            self.logs.drain(0..overflow);
        }
    }

    /// 当前可见的总牌数：牌墙 + 各家手牌 + 各家弃牌
    ///
    /// `last_discard` 指向弃牌堆里的最后一张，不单独占有牌，
    /// 因此不计入。对局中任一时刻都应等于 32（守恒不变量）。
    pub fn tiles_in_play(&self) -> usize {
        let in_hands: usize = self.players.iter().map(|p| p.hand.len()).sum();
        let in_discards: usize = self.players.iter().map(|p| p.discards.len()).sum();
        self.wall.len() + in_hands + in_discards
    }

    /// 所有座位是否都已准备
    pub fn all_ready(&self) -> bool {
        self.players.iter().all(|p| p.is_ready)
    }

    /// 是否有玩家筹码见底（整场结束条件）
    pub fn session_over(&self) -> bool {
        self.players.iter().any(|p| p.chips <= 0)
    }

    /// 座位是否有效
    pub fn seat_exists(&self, seat: u8) -> bool {
        (seat as usize) < self.players.len()
    }
}
