/// 意图（Intent）类型
///
/// 非主机端把本地操作包装成意图发给主机，主机以发送者座位为
/// 归属执行对应的状态转移；主机本地操作走同一条入口。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Intent {
    /// 切换准备状态（准备室阶段）
    ToggleReady,
    /// 切牌（庄家选择起手疊，0-15）
    Cut { stack_index: usize },
    /// 摸牌
    Draw,
    /// 打出一张手牌（按牌 id 指定）
    Discard { tile_id: u8 },
    /// 吃上家打出的牌
    Eat,
    /// 胡牌（自摸或荣和）
    Win,
    /// 过（放弃荣和）
    Pass,
    /// 开始游戏 / 下一局（仅主机座位）
    StartGame,
    /// 整场重开（筹码见底后，仅主机座位）
    RestartSession,
}
