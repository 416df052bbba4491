use super::tile::{generate_deck, Tile};
use rand::seq::SliceRandom;
use rand::thread_rng;

/// 牌墙（Wall）
///
/// 存储未发出的 32 张牌。物理上摆成 16 疊、每疊 2 张，
/// 庄家切牌选定起手疊（break index），发牌从该疊开始。
///
/// 牌墙随 GameState 整体序列化同步，因此使用 Vec 而不做其他优化。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Wall {
    /// 未发出的牌（从前往后抽取）
    tiles: Vec<Tile>,
    /// 切牌疊位（0-15）
    break_index: usize,
}

/// 牌墙疊数（32 张 / 每疊 2 张）
pub const STACK_COUNT: usize = 16;

impl Wall {
    /// 创建一面新牌墙（完整一副，洗牌）
    pub fn new_shuffled() -> Self {
        let mut tiles = generate_deck();
        tiles.shuffle(&mut thread_rng());
        Self {
            tiles,
            break_index: 0,
        }
    }

    /// 从给定的牌序创建牌墙（用于测试预摆牌墙）
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self {
            tiles,
            break_index: 0,
        }
    }

    /// 切牌：记录疊位并旋转抽牌顺序，使发牌从第 `stack_index` 疊开始
    ///
    /// # 返回
    ///
    /// 疊位超出范围或牌墙不完整时返回 false，不做任何修改
    pub fn cut(&mut self, stack_index: usize) -> bool {
        if stack_index >= STACK_COUNT || self.tiles.len() != Tile::TOTAL_COUNT {
            return false;
        }
        self.break_index = stack_index;
        self.tiles.rotate_left(stack_index * 2);
        true
    }

    /// 抽取一张牌（从牌墙前端）
    pub fn draw(&mut self) -> Option<Tile> {
        if self.tiles.is_empty() {
            None
        } else {
            Some(self.tiles.remove(0))
        }
    }

    /// 剩余牌数
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// 牌墙是否已空
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// 切牌疊位
    pub fn break_index(&self) -> usize {
        self.break_index
    }

    /// 查看剩余的牌（只读）
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

impl Default for Wall {
    fn default() -> Self {
        Self::new_shuffled()
    }
}
