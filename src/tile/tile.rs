/// 象棋麻将牌类型
///
/// 使用中国象棋棋子作为牌面：每色 16 张（将 1、士象车马炮各 2、兵 5），
/// 红黑两色共 32 张，单副牌。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Color {
    /// 红方
    Red,
    /// 黑方
    Black,
}

impl Color {
    /// 所有颜色
    pub fn all() -> [Color; 2] {
        [Color::Red, Color::Black]
    }
}

/// 棋子种类（按大小排序：将 7 > 士 6 > 象 5 > 车 4 > 马 3 > 炮 2 > 兵 1）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PieceKind {
    /// 将/帅
    General,
    /// 士/仕
    Advisor,
    /// 象/相
    Elephant,
    /// 车/俥
    Chariot,
    /// 马/傌
    Horse,
    /// 炮/包
    Cannon,
    /// 兵/卒
    Soldier,
}

impl PieceKind {
    /// 所有棋子种类（按大小降序）
    pub fn all() -> [PieceKind; 7] {
        [
            PieceKind::General,
            PieceKind::Advisor,
            PieceKind::Elephant,
            PieceKind::Chariot,
            PieceKind::Horse,
            PieceKind::Cannon,
            PieceKind::Soldier,
        ]
    }

    /// 大小值（1-7，用于排序）
    pub fn rank(&self) -> u8 {
        match self {
            PieceKind::General => 7,
            PieceKind::Advisor => 6,
            PieceKind::Elephant => 5,
            PieceKind::Chariot => 4,
            PieceKind::Horse => 3,
            PieceKind::Cannon => 2,
            PieceKind::Soldier => 1,
        }
    }

    /// 单副牌中每色的张数
    pub fn count_per_color(&self) -> usize {
        match self {
            PieceKind::General => 1,
            PieceKind::Soldier => 5,
            _ => 2,
        }
    }

    /// 是否属于"将士象"组（吃牌时将可跨色替代）
    pub fn is_palace_group(&self) -> bool {
        matches!(
            self,
            PieceKind::General | PieceKind::Advisor | PieceKind::Elephant
        )
    }

    /// 是否属于"车马炮"组（吃牌时严格同色）
    pub fn is_officer_group(&self) -> bool {
        matches!(
            self,
            PieceKind::Chariot | PieceKind::Horse | PieceKind::Cannon
        )
    }
}

/// 一张牌
///
/// `id` 在生成牌堆时一次性分配（0-31），之后不再变化；
/// 牌在牌墙、手牌、弃牌堆之间移动时靠 id 区分具体是哪一张。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Tile {
    /// 全局唯一编号（0-31）
    pub id: u8,
    /// 棋子种类
    pub kind: PieceKind,
    /// 颜色
    pub color: Color,
}

impl Tile {
    /// 总牌数：32 张
    pub const TOTAL_COUNT: usize = 32;

    /// 每色牌数：16 张
    pub const PER_COLOR_COUNT: usize = 16;

    /// 牌面汉字
    pub fn label(&self) -> &'static str {
        match (self.color, self.kind) {
            (Color::Red, PieceKind::General) => "帥",
            (Color::Red, PieceKind::Advisor) => "仕",
            (Color::Red, PieceKind::Elephant) => "相",
            (Color::Red, PieceKind::Chariot) => "俥",
            (Color::Red, PieceKind::Horse) => "傌",
            (Color::Red, PieceKind::Cannon) => "炮",
            (Color::Red, PieceKind::Soldier) => "兵",
            (Color::Black, PieceKind::General) => "將",
            (Color::Black, PieceKind::Advisor) => "士",
            (Color::Black, PieceKind::Elephant) => "象",
            (Color::Black, PieceKind::Chariot) => "車",
            (Color::Black, PieceKind::Horse) => "馬",
            (Color::Black, PieceKind::Cannon) => "包",
            (Color::Black, PieceKind::Soldier) => "卒",
        }
    }

    /// 是否同种同色（不考虑具体是哪一张）
    pub fn same_piece(&self, other: &Tile) -> bool {
        self.kind == other.kind && self.color == other.color
    }
}

/// 生成一副完整的牌（32 张，id 按生成顺序 0-31）
///
/// 组成固定：每色将 1、士 2、象 2、车 2、马 2、炮 2、兵 5。
pub fn generate_deck() -> Vec<Tile> {
    let mut deck = Vec::with_capacity(Tile::TOTAL_COUNT);
    let mut id: u8 = 0;

    for color in Color::all() {
        for kind in PieceKind::all() {
            for _ in 0..kind.count_per_color() {
                deck.push(Tile { id, kind, color });
                id += 1;
            }
        }
    }
    deck
}

/// 手牌显示排序：红在前，同色按大小降序
pub fn sort_tiles(tiles: &mut [Tile]) {
    tiles.sort_by(|a, b| {
        if a.color != b.color {
            // 红方排前
            return if a.color == Color::Red {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Greater
            };
        }
        b.kind.rank().cmp(&a.kind.rank())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_deck_composition() {
        let deck = generate_deck();
        assert_eq!(deck.len(), Tile::TOTAL_COUNT);

        // id 全局唯一
        let ids: HashSet<u8> = deck.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), Tile::TOTAL_COUNT);

        // 每种（种类，颜色）的张数固定
        let mut counts: HashMap<(PieceKind, Color), usize> = HashMap::new();
        for tile in &deck {
            *counts.entry((tile.kind, tile.color)).or_insert(0) += 1;
        }
        for color in Color::all() {
            assert_eq!(counts[&(PieceKind::General, color)], 1);
            assert_eq!(counts[&(PieceKind::Advisor, color)], 2);
            assert_eq!(counts[&(PieceKind::Elephant, color)], 2);
            assert_eq!(counts[&(PieceKind::Chariot, color)], 2);
            assert_eq!(counts[&(PieceKind::Horse, color)], 2);
            assert_eq!(counts[&(PieceKind::Cannon, color)], 2);
            assert_eq!(counts[&(PieceKind::Soldier, color)], 5);
        }
    }

    #[test]
    fn test_sort_red_first_then_rank_desc() {
        let mut tiles = vec![
            Tile { id: 0, kind: PieceKind::Soldier, color: Color::Black },
            Tile { id: 1, kind: PieceKind::General, color: Color::Black },
            Tile { id: 2, kind: PieceKind::Cannon, color: Color::Red },
            Tile { id: 3, kind: PieceKind::General, color: Color::Red },
        ];
        sort_tiles(&mut tiles);
        assert_eq!(tiles[0].id, 3); // 红帅
        assert_eq!(tiles[1].id, 2); // 红炮
        assert_eq!(tiles[2].id, 1); // 黑将
        assert_eq!(tiles[3].id, 0); // 黑卒
    }

    #[test]
    fn test_labels() {
        let red_general = Tile { id: 0, kind: PieceKind::General, color: Color::Red };
        let black_soldier = Tile { id: 1, kind: PieceKind::Soldier, color: Color::Black };
        assert_eq!(red_general.label(), "帥");
        assert_eq!(black_soldier.label(), "卒");
    }
}
