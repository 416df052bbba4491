use crate::tile::win_check::palace_compatible;
use crate::tile::{PieceKind, Tile};
use std::collections::HashSet;

/// 电脑弃牌建议
///
/// 对手牌中每张牌计算"保留价值"，打出价值最低的一张。
/// 这是贪心的单层启发式，不向胡牌线做搜索。

/// 计算一张牌的保留价值
///
/// 评分项：
/// - 已有对子搭档（恰好 2 张同种同色）：+20；3 张及以上：+50
/// - 将士象组：兼容搭档（共用 palace_compatible 判定）>=1 张 +10，>=2 张再 +30
/// - 车马炮组：同色组内缺自己这门时，已有 1 门搭档 +5，已有 2 门 +40
/// - 兵：同色兵 >=3 张（含自己）+30，否则只值 +2
pub fn keep_score(hand: &[Tile], tile: &Tile) -> i32 {
    let mut score = 0;

    let identical = hand.iter().filter(|h| h.same_piece(tile)).count();
    if identical == 2 {
        score += 20;
    }
    if identical >= 3 {
        score += 50;
    }

    if tile.kind.is_palace_group() {
        let useful_partners = hand
            .iter()
            .filter(|h| {
                h.id != tile.id
                    && h.kind.is_palace_group()
                    && h.kind != tile.kind
                    && palace_compatible(tile, h)
            })
            .count();
        if useful_partners >= 1 {
            score += 10;
        }
        if useful_partners >= 2 {
            score += 30;
        }
    }

    if tile.kind.is_officer_group() {
        let partner_kinds: HashSet<PieceKind> = hand
            .iter()
            .filter(|h| h.id != tile.id && h.color == tile.color && h.kind.is_officer_group())
            .map(|h| h.kind)
            .collect();
        // 组内还没有自己这门的重复时才算搭子价值
        if !partner_kinds.contains(&tile.kind) {
            if partner_kinds.len() == 1 {
                score += 5;
            }
            if partner_kinds.len() >= 2 {
                score += 40;
            }
        }
    }

    if tile.kind == PieceKind::Soldier {
        let same_color_soldiers = hand
            .iter()
            .filter(|h| h.kind == PieceKind::Soldier && h.color == tile.color)
            .count();
        if same_color_soldiers >= 3 {
            score += 30;
        } else {
            score += 2;
        }
    }

    score
}

/// 选出保留价值最低的一张牌（同分取先遇到的）
pub fn best_discard(hand: &[Tile]) -> Option<Tile> {
    let mut worst: Option<(Tile, i32)> = None;
    for tile in hand {
        let score = keep_score(hand, tile);
        match worst {
            Some((_, min_score)) if score >= min_score => {}
            _ => worst = Some((*tile, score)),
        }
    }
    worst.map(|(t, _)| t)
}
