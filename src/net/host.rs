use crate::game::action::Intent;
use crate::game::engine::{AuxView, GameEngine, GameError};
use crate::game::history::HistoryStore;
use crate::game::state::GameState;
use crate::net::message::NetMessage;
use crate::net::transport::{NetError, PeerId, Transport};
use std::collections::HashMap;

/// 主机侧会话
///
/// 持有权威引擎，处理远端消息，并在每次可见状态变化后
/// 向所有端广播全量快照。被引擎拒绝的远端意图静默丢弃，
/// 协议里没有否定回执（过期快照很快会被新广播顶掉）。
pub struct HostSession<T: Transport, S: HistoryStore> {
    /// 权威引擎
    pub engine: GameEngine,
    transport: T,
    history: S,
    /// 对端 -> 座位
    peers: HashMap<PeerId, u8>,
    last_broadcast: Option<(GameState, AuxView)>,
}

impl<T: Transport, S: HistoryStore> HostSession<T, S> {
    /// 创建会话；`room_label` 记入战绩
    pub fn new(mut engine: GameEngine, transport: T, history: S, room_label: &str) -> Self {
        engine.room_label = room_label.to_string();
        Self {
            engine,
            transport,
            history,
            peers: HashMap::new(),
            last_broadcast: None,
        }
    }

    /// 某对端的座位
    pub fn seat_of(&self, peer: &PeerId) -> Option<u8> {
        self.peers.get(peer).copied()
    }

    /// 处理一条远端消息
    pub fn handle_message(&mut self, from: &PeerId, message: NetMessage) -> Result<(), NetError> {
        match message {
            NetMessage::JoinRequest { name } => self.handle_join(from, &name)?,
            NetMessage::Intent { seat, intent } => {
                // 座位归属校验：只认对端自己的座位，冒名消息直接丢弃
                if self.peers.get(from) != Some(&seat) {
                    return Ok(());
                }
                // 被拒绝的意图静默丢弃
                if self.engine.apply_intent(seat, intent).is_ok() {
                    self.after_change()?;
                }
            }
            // 主机不接受快照或座位分配
            NetMessage::AssignSeat { .. } | NetMessage::Snapshot { .. } => {}
        }
        Ok(())
    }

    /// 以主机座位（0）执行本地意图
    pub fn apply_local(&mut self, intent: Intent) -> Result<(), GameError> {
        let result = self.engine.apply_intent(0, intent);
        if result.is_ok() {
            // 广播失败不影响本地状态
            let _ = self.after_change();
        }
        result
    }

    /// 推进一个时间单位并在有变化时广播
    pub fn tick(&mut self) -> Result<(), NetError> {
        self.engine.tick();
        self.broadcast_if_changed()
    }

    /// 已保存的历史存储
    pub fn history(&self) -> &S {
        &self.history
    }

    fn handle_join(&mut self, from: &PeerId, name: &str) -> Result<(), NetError> {
        // 重复的加入请求：重发座位分配即可
        if let Some(&seat) = self.peers.get(from) {
            self.transport
                .send(Some(from), &NetMessage::AssignSeat { seat })?;
            return Ok(());
        }
        // 满员时不回应
        if let Some(seat) = self.engine.admit_human(name) {
            self.peers.insert(from.clone(), seat);
            // 先定向分配座位，再广播快照
            self.transport
                .send(Some(from), &NetMessage::AssignSeat { seat })?;
            self.after_change()?;
        }
        Ok(())
    }

    fn after_change(&mut self) -> Result<(), NetError> {
        self.flush_history();
        self.broadcast_snapshot()
    }

    fn broadcast_if_changed(&mut self) -> Result<(), NetError> {
        let current = (self.engine.state.clone(), self.engine.aux_view());
        if self.last_broadcast.as_ref() == Some(&current) {
            return Ok(());
        }
        self.flush_history();
        self.last_broadcast = Some(current);
        self.send_snapshot()
    }

    fn broadcast_snapshot(&mut self) -> Result<(), NetError> {
        self.last_broadcast = Some((self.engine.state.clone(), self.engine.aux_view()));
        self.send_snapshot()
    }

    fn send_snapshot(&mut self) -> Result<(), NetError> {
        let snapshot = NetMessage::Snapshot {
            state: self.engine.state.clone(),
            aux: self.engine.aux_view(),
        };
        self.transport.send(None, &snapshot)
    }

    /// 把结算出的战绩交给历史存储；保存失败只记录，不影响对局
    fn flush_history(&mut self) {
        while let Some(record) = self.engine.take_match_record() {
            if let Err(err) = self.history.append(record) {
                eprintln!("战绩保存失败: {}", err);
            }
        }
    }
}
