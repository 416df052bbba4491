use super::tile::{Color, PieceKind, Tile};

/// 胡牌判定
///
/// 牌型规则：
/// - 五兵/五卒：5 张同色兵，特殊牌型，直接胡
/// - 一般胡牌：1 个对子 + 1 个三张组（顺/刻）
///
/// 三张组的四种形态（任一成立即可）：
/// 1. 三张同种同色
/// 2. 将士象：将不限色，士象必须同色
/// 3. 车马炮：三张严格同色
/// 4. 三张同色兵

/// 对子判定
///
/// 特殊规则：红帅与黑将可以互配成对（仅限对子，三张组不适用）
pub fn is_pair(a: &Tile, b: &Tile) -> bool {
    if a.kind == PieceKind::General && b.kind == PieceKind::General {
        return true;
    }
    a.same_piece(b)
}

/// "将士象"组潜在搭档判定：任一方是将即兼容，否则须同色
///
/// 胡牌判定、吃牌枚举与 AI 弃牌评分共用此判定，避免规则编码不一致。
pub fn palace_compatible(a: &Tile, b: &Tile) -> bool {
    a.kind == PieceKind::General || b.kind == PieceKind::General || a.color == b.color
}

/// 三张组判定
pub fn is_set(tiles: &[Tile]) -> bool {
    if tiles.len() != 3 {
        return false;
    }

    // 1. 三张同种同色
    if tiles[1].same_piece(&tiles[0]) && tiles[2].same_piece(&tiles[0]) {
        return true;
    }

    let find = |kind: PieceKind| tiles.iter().find(|t| t.kind == kind);

    // 2. 将士象：将不限色，士象同色
    if let (Some(_), Some(advisor), Some(elephant)) = (
        find(PieceKind::General),
        find(PieceKind::Advisor),
        find(PieceKind::Elephant),
    ) {
        if advisor.color == elephant.color {
            return true;
        }
    }

    // 3. 车马炮：严格同色
    if find(PieceKind::Chariot).is_some()
        && find(PieceKind::Horse).is_some()
        && find(PieceKind::Cannon).is_some()
        && tiles[0].color == tiles[1].color
        && tiles[1].color == tiles[2].color
    {
        return true;
    }

    // 4. 三张同色兵
    tiles.iter().all(|t| t.kind == PieceKind::Soldier) && tiles[0].color == tiles[2].color
        && tiles[0].color == tiles[1].color
}

/// 五兵/五卒判定（5 张同色兵，特殊牌型）
pub fn is_five_pawns(hand: &[Tile]) -> bool {
    for color in Color::all() {
        let count = hand
            .iter()
            .filter(|t| t.kind == PieceKind::Soldier && t.color == color)
            .count();
        if count == 5 {
            return true;
        }
    }
    false
}

/// 判定 5 张手牌是否胡牌
///
/// 枚举所有对子选法，剩余 3 张做三张组判定，任一划分成立即胡；
/// 手牌不是 5 张时返回 false。
pub fn is_winning_hand(hand: &[Tile]) -> bool {
    if hand.len() != 5 {
        return false;
    }

    if is_five_pawns(hand) {
        return true;
    }

    for i in 0..hand.len() {
        for j in (i + 1)..hand.len() {
            if is_pair(&hand[i], &hand[j]) {
                let remaining: Vec<Tile> = hand
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != i && *idx != j)
                    .map(|(_, t)| *t)
                    .collect();
                if is_set(&remaining) {
                    return true;
                }
            }
        }
    }
    false
}

/// 判定 4 张手牌加上一张进张是否胡牌（用于荣和/点炮检查）
///
/// 手牌不是 4 张时返回 false（不报错）。
pub fn check_win_with_incoming(hand: &[Tile], incoming: &Tile) -> bool {
    if hand.len() != 4 {
        return false;
    }
    let mut virtual_hand: Vec<Tile> = hand.to_vec();
    virtual_hand.push(*incoming);
    is_winning_hand(&virtual_hand)
}
