use super::tile::{Color, PieceKind, Tile};
use smallvec::SmallVec;
use std::collections::HashSet;

/// 吃牌组合枚举
///
/// 给定手牌和一张别家打出的牌，枚举手牌中所有能与之组成
/// 三张组的两张牌组合。只有两种跨种类组合可以吃：
/// - 将士象（将不限色，士象须与目标色一致）
/// - 车马炮（严格同色）
///
/// 同种三张与三张兵走碰/暗刻路径，不在吃牌范围内。

/// 吃牌组合：手牌中的两张搭子
pub type ChiCombination = (Tile, Tile);

/// 枚举所有合法吃牌组合（按牌 id 去重，不排序）
pub fn chi_combinations(hand: &[Tile], incoming: &Tile) -> SmallVec<[ChiCombination; 4]> {
    let mut combinations: SmallVec<[ChiCombination; 4]> = SmallVec::new();

    let find_pieces = |kind: PieceKind, color: Option<Color>| -> Vec<&Tile> {
        hand.iter()
            .filter(|t| t.kind == kind && color.map_or(true, |c| t.color == c))
            .collect()
    };

    if incoming.kind.is_palace_group() {
        // 将士象组：分别尝试组成红组和黑组
        for target_color in Color::all() {
            // 进张须与目标色兼容（将不限色，士象须同色）
            if incoming.kind != PieceKind::General && incoming.color != target_color {
                continue;
            }

            let needed: Vec<PieceKind> = [PieceKind::General, PieceKind::Advisor, PieceKind::Elephant]
                .into_iter()
                .filter(|k| *k != incoming.kind)
                .collect();

            // 将位不限色，其余须为目标色
            let slot_color = |kind: PieceKind| {
                if kind == PieceKind::General {
                    None
                } else {
                    Some(target_color)
                }
            };
            let candidates1 = find_pieces(needed[0], slot_color(needed[0]));
            let candidates2 = find_pieces(needed[1], slot_color(needed[1]));

            for c1 in &candidates1 {
                for c2 in &candidates2 {
                    if c1.id != c2.id {
                        combinations.push((**c1, **c2));
                    }
                }
            }
        }
    } else if incoming.kind.is_officer_group() {
        // 车马炮组：两张搭子都须与进张同色
        let needed: Vec<PieceKind> = [PieceKind::Chariot, PieceKind::Horse, PieceKind::Cannon]
            .into_iter()
            .filter(|k| *k != incoming.kind)
            .collect();

        let candidates1 = find_pieces(needed[0], Some(incoming.color));
        let candidates2 = find_pieces(needed[1], Some(incoming.color));

        for c1 in &candidates1 {
            for c2 in &candidates2 {
                if c1.id != c2.id {
                    combinations.push((**c1, **c2));
                }
            }
        }
    }

    // 按无序 id 对去重
    let mut seen: HashSet<(u8, u8)> = HashSet::new();
    combinations.retain(|(a, b)| {
        let key = if a.id < b.id { (a.id, b.id) } else { (b.id, a.id) };
        seen.insert(key)
    });

    combinations
}

/// 是否存在至少一个吃牌组合（用于判断"吃"按钮是否可用）
pub fn can_chi(hand: &[Tile], incoming: &Tile) -> bool {
    !chi_combinations(hand, incoming).is_empty()
}
