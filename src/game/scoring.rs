use crate::tile::{is_five_pawns, Tile};

/// 筹码结算
///
/// 给定（胡牌座位、胡牌牌型、点炮座位、胡牌时牌墙张数、庄家、座位数），
/// 支付金额与下局庄家是纯函数，无任何隐藏随机性。

/// 天胡 / 五兵合手的固定支付额
pub const SPECIAL_PAYOUT: i32 = 50;
/// 普通自摸每家支付额
pub const SELF_DRAW_PAYOUT: i32 = 20;
/// 点炮支付额（仅点炮者支付）
pub const DISCARD_PAYOUT: i32 = 10;

/// 胡牌结算类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutKind {
    /// 天胡（庄家发完牌即自摸，墙未动）
    Heavenly,
    /// 五兵/五卒合手
    FivePawns,
    /// 普通自摸
    SelfDraw,
    /// 荣和（胡别家弃牌）
    DiscardWin,
}

/// 一次胡牌的结算结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    /// 结算类型
    pub kind: PayoutKind,
    /// 单家支付额
    pub amount: i32,
    /// 各座位筹码增减（下标即座位号，总和为 0）
    pub deltas: Vec<i32>,
    /// 下局庄家座位
    pub next_dealer: u8,
}

/// 发牌完成后牌墙的满额张数（庄家多拿 1 张）
pub fn post_deal_wall_len(player_count: u8) -> usize {
    Tile::TOTAL_COUNT - 4 * player_count as usize - 1
}

/// 计算一次胡牌的支付与下局庄家
///
/// 规则：
/// - 天胡（自摸、胡牌者是庄家、牌墙仍是发牌后满额）或五兵合手：
///   固定 50，自摸时每家支付，点炮时仅点炮者支付
/// - 普通自摸：每家付 20，下局庄家 = 胡牌者下家
/// - 荣和：仅点炮者付 10，下局庄家 = 点炮者（点炮连庄惩罚）
pub fn compute_payout(
    winner: u8,
    winning_hand: &[Tile],
    loser: Option<u8>,
    wall_len_at_win: usize,
    dealer: u8,
    player_count: u8,
) -> Payout {
    let count = player_count as usize;
    let is_heavenly =
        loser.is_none() && winner == dealer && wall_len_at_win == post_deal_wall_len(player_count);
    let is_five = is_five_pawns(winning_hand);

    let (kind, amount) = if is_heavenly {
        (PayoutKind::Heavenly, SPECIAL_PAYOUT)
    } else if is_five {
        (PayoutKind::FivePawns, SPECIAL_PAYOUT)
    } else if loser.is_some() {
        (PayoutKind::DiscardWin, DISCARD_PAYOUT)
    } else {
        (PayoutKind::SelfDraw, SELF_DRAW_PAYOUT)
    };

    let mut deltas = vec![0i32; count];
    let next_dealer;
    match loser {
        Some(loser_id) => {
            // 点炮：仅点炮者支付，且下局连庄
            deltas[loser_id as usize] -= amount;
            deltas[winner as usize] += amount;
            next_dealer = loser_id;
        }
        None => {
            // 自摸（含天胡、五兵）：其余每家支付
            for seat in 0..count {
                if seat != winner as usize {
                    deltas[seat] -= amount;
                    deltas[winner as usize] += amount;
                }
            }
            next_dealer = (winner + 1) % player_count;
        }
    }

    Payout {
        kind,
        amount,
        deltas,
        next_dealer,
    }
}

/// 流局：无支付，下局庄家为当前庄家的下家
pub fn drawn_round_next_dealer(dealer: u8, player_count: u8) -> u8 {
    (dealer + 1) % player_count
}
