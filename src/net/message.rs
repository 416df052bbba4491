use crate::game::action::Intent;
use crate::game::engine::AuxView;
use crate::game::state::GameState;

/// 连线协议消息
///
/// 所有消息经 JSON 序列化后走传输层。协议是主机权威的：
/// 非主机端只发 `JoinRequest` 和 `Intent`，主机只发
/// `AssignSeat`（定向）和 `Snapshot`（广播）。
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum NetMessage {
    /// 加入请求（非主机端 -> 主机，连上后第一条）
    JoinRequest {
        /// 请求者显示名称
        name: String,
    },
    /// 座位分配（主机 -> 指定端，接受加入后第一条）
    AssignSeat {
        /// 分到的座位号
        seat: u8,
    },
    /// 远端意图（非主机端 -> 主机）
    Intent {
        /// 发送者座位
        seat: u8,
        /// 意图内容
        intent: Intent,
    },
    /// 全量状态快照（主机 -> 所有端）
    ///
    /// 快照整体替换接收端的本地状态，协议里没有增量更新。
    Snapshot {
        /// 权威游戏状态
        state: GameState,
        /// 瞬态字段
        aux: AuxView,
    },
}
