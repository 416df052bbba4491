use crate::game::action::Intent;
use crate::game::engine::AuxView;
use crate::game::state::GameState;
use crate::net::message::NetMessage;
use crate::net::transport::{NetError, Transport};

/// 非主机侧会话
///
/// 只读镜像：收到快照就整体替换本地副本，本地操作一律
/// 包装成意图发给主机，绝不直接改状态。
pub struct ClientSession<T: Transport> {
    transport: T,
    name: String,
    /// 分到的座位（握手完成后才有）
    pub my_seat: Option<u8>,
    /// 最近一次收到的权威状态
    pub state: Option<GameState>,
    /// 最近一次收到的瞬态字段
    pub aux: Option<AuxView>,
}

impl<T: Transport> ClientSession<T> {
    pub fn new(name: &str, transport: T) -> Self {
        Self {
            transport,
            name: name.to_string(),
            my_seat: None,
            state: None,
            aux: None,
        }
    }

    /// 连上主机后发出加入请求（握手第一步）
    pub fn request_join(&mut self) -> Result<(), NetError> {
        let name = self.name.clone();
        self.transport.send(None, &NetMessage::JoinRequest { name })
    }

    /// 处理一条来自主机的消息
    pub fn handle_message(&mut self, message: NetMessage) {
        match message {
            NetMessage::AssignSeat { seat } => {
                self.my_seat = Some(seat);
            }
            NetMessage::Snapshot { state, aux } => {
                // 整体替换，不做增量合并
                self.state = Some(state);
                self.aux = Some(aux);
            }
            // 只有主机处理这两类
            NetMessage::JoinRequest { .. } | NetMessage::Intent { .. } => {}
        }
    }

    /// 把本地操作发给主机执行
    pub fn send_intent(&mut self, intent: Intent) -> Result<(), NetError> {
        let seat = self.my_seat.ok_or(NetError::NotJoined)?;
        self.transport
            .send(None, &NetMessage::Intent { seat, intent })
    }
}
