use crate::game::state::{GameState, Player};
use crate::tile::Tile;

/// 对局历史记录
///
/// 每局结算后主机生成一条记录交给外部存储（fire-and-forget，
/// 存储失败只记日志，不影响对局）。

/// 单局战绩
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchRecord {
    /// 结算时间（Unix 秒）
    pub timestamp: u64,
    /// 房间标签（单机为 "单机"）
    pub room_label: String,
    /// 胡牌者名称
    pub winner_name: String,
    /// 胡牌牌面（空格分隔的牌面汉字）
    pub winning_hand_labels: String,
    /// 点炮者名称（自摸时为 "自摸"）
    pub loser_name: String,
    /// 各座位结算后筹码
    pub scores: Vec<SeatScore>,
}

/// 座位战绩
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeatScore {
    /// 名称
    pub name: String,
    /// 结算后筹码
    pub chips: i32,
}

impl MatchRecord {
    /// 从结算后的对局状态生成记录
    pub fn from_round(
        state: &GameState,
        room_label: &str,
        winner: u8,
        winning_hand: &[Tile],
        loser: Option<u8>,
    ) -> Self {
        let name_of = |seat: u8| {
            state
                .players
                .get(seat as usize)
                .map(|p: &Player| p.name.clone())
                .unwrap_or_default()
        };
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            timestamp,
            room_label: room_label.to_string(),
            winner_name: name_of(winner),
            winning_hand_labels: winning_hand
                .iter()
                .map(|t| t.label())
                .collect::<Vec<_>>()
                .join(" "),
            loser_name: loser.map_or_else(|| "自摸".to_string(), name_of),
            scores: state
                .players
                .iter()
                .map(|p| SeatScore {
                    name: p.name.clone(),
                    chips: p.chips,
                })
                .collect(),
        }
    }
}

/// 历史存储接口（外部协作方）
///
/// 追加失败返回错误字符串，调用方记日志后吞掉。
pub trait HistoryStore {
    /// 追加一条记录（最新的排最前，超过上限丢弃最旧的）
    fn append(&mut self, record: MatchRecord) -> Result<(), String>;
}

/// 历史记录上限：最近 50 条
pub const MAX_HISTORY: usize = 50;

/// 内存历史存储（默认实现，最新在前）
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: Vec<MatchRecord>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已保存的记录（最新在前）
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&mut self, record: MatchRecord) -> Result<(), String> {
        self.records.insert(0, record);
        if self.records.len() > MAX_HISTORY {
            self.records.pop();
        }
        Ok(())
    }
}
