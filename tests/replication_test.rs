use std::cell::RefCell;
use std::rc::Rc;

use xqmj_engine::game::engine::GameEngine;
use xqmj_engine::game::history::MemoryHistoryStore;
use xqmj_engine::net::transport::NetError;
use xqmj_engine::net::{ClientSession, HostSession, NetMessage, PeerId, Transport};
use xqmj_engine::{GamePhase, Intent};

/// 进程内传输：把发出的消息原样记录下来供断言
#[derive(Clone, Default)]
struct RecordingTransport {
    sent: Rc<RefCell<Vec<(Option<PeerId>, NetMessage)>>>,
}

impl RecordingTransport {
    fn new() -> Self {
        Self::default()
    }

    fn sent(&self) -> Vec<(Option<PeerId>, NetMessage)> {
        self.sent.borrow().clone()
    }

    fn count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, target: Option<&PeerId>, message: &NetMessage) -> Result<(), NetError> {
        self.sent
            .borrow_mut()
            .push((target.cloned(), message.clone()));
        Ok(())
    }
}

fn new_host(
    player_count: u8,
) -> (
    HostSession<RecordingTransport, MemoryHistoryStore>,
    RecordingTransport,
) {
    let engine = GameEngine::new_multiplayer(player_count, "主机").unwrap();
    let transport = RecordingTransport::new();
    let host = HostSession::new(
        engine,
        transport.clone(),
        MemoryHistoryStore::new(),
        "AB3DE",
    );
    (host, transport)
}

/// 快照序列化是确定的：同一状态两次序列化逐字节一致
#[test]
fn test_snapshot_serialization_deterministic() {
    let engine = GameEngine::new_multiplayer(4, "主机").unwrap();
    let snapshot = NetMessage::Snapshot {
        state: engine.state.clone(),
        aux: engine.aux_view(),
    };
    let a = serde_json::to_string(&snapshot).unwrap();
    let b = serde_json::to_string(&snapshot).unwrap();
    assert_eq!(a, b);

    let back: NetMessage = serde_json::from_str(&a).unwrap();
    assert_eq!(snapshot, back);
}

/// 加入握手：先定向 AssignSeat，再广播含新玩家的快照
#[test]
fn test_join_handshake() {
    let (mut host, transport) = new_host(4);
    let peer: PeerId = "peer-1".to_string();

    host.handle_message(&peer, NetMessage::JoinRequest { name: "阿明".to_string() })
        .unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(
        sent[0],
        (Some(peer.clone()), NetMessage::AssignSeat { seat: 1 })
    );
    match &sent[1] {
        (None, NetMessage::Snapshot { state, .. }) => {
            let joined = &state.players[1];
            assert_eq!(joined.name, "阿明");
            assert!(joined.is_human);
            // 新加入的真人要自己按准备
            assert!(!joined.is_ready);
        }
        other => panic!("期望广播快照，得到 {:?}", other),
    }
    assert_eq!(host.seat_of(&peer), Some(1));

    // 重复加入：重发座位分配，不再占新座位
    host.handle_message(&peer, NetMessage::JoinRequest { name: "阿明".to_string() })
        .unwrap();
    assert_eq!(host.seat_of(&peer), Some(1));
    assert_eq!(
        transport.sent().last().unwrap(),
        &(Some(peer), NetMessage::AssignSeat { seat: 1 })
    );
}

/// 满员后的加入请求被忽略
#[test]
fn test_join_when_full_is_ignored() {
    let (mut host, transport) = new_host(2);
    host.handle_message(&"p1".to_string(), NetMessage::JoinRequest { name: "乙".to_string() })
        .unwrap();
    let before = transport.count();

    host.handle_message(&"p2".to_string(), NetMessage::JoinRequest { name: "丙".to_string() })
        .unwrap();
    assert_eq!(transport.count(), before);
    assert_eq!(host.seat_of(&"p2".to_string()), None);
}

/// 冒用别人座位的意图被静默丢弃
#[test]
fn test_spoofed_seat_intent_dropped() {
    let (mut host, transport) = new_host(4);
    let peer: PeerId = "peer-1".to_string();
    host.handle_message(&peer, NetMessage::JoinRequest { name: "阿明".to_string() })
        .unwrap();
    let before = transport.count();

    host.handle_message(
        &peer,
        NetMessage::Intent {
            seat: 2,
            intent: Intent::ToggleReady,
        },
    )
    .unwrap();

    // 没有状态变化，也没有新广播
    assert_eq!(transport.count(), before);
    assert!(!host.engine.state.players[2].is_ready);
}

/// 被引擎拒绝的意图同样静默丢弃（无否定回执）
#[test]
fn test_rejected_intent_dropped_silently() {
    let (mut host, transport) = new_host(4);
    let peer: PeerId = "peer-1".to_string();
    host.handle_message(&peer, NetMessage::JoinRequest { name: "阿明".to_string() })
        .unwrap();
    let before = transport.count();

    // 准备室阶段不能打牌
    host.handle_message(
        &peer,
        NetMessage::Intent {
            seat: 1,
            intent: Intent::Discard { tile_id: 0 },
        },
    )
    .unwrap();
    assert_eq!(transport.count(), before);
}

/// 非主机端：握手前不能发意图，快照整体替换本地副本
#[test]
fn test_client_mirror_replaced_wholesale() {
    let transport = RecordingTransport::new();
    let mut client = ClientSession::new("阿明", transport.clone());

    assert_eq!(client.send_intent(Intent::ToggleReady), Err(NetError::NotJoined));

    client.request_join().unwrap();
    client.handle_message(NetMessage::AssignSeat { seat: 2 });
    assert_eq!(client.my_seat, Some(2));

    let engine_a = GameEngine::new_multiplayer(4, "主机").unwrap();
    let mut engine_b = engine_a.clone();
    engine_b.state.push_log("第二份快照".to_string());
    engine_b.state.phase = GamePhase::Cutting;

    client.handle_message(NetMessage::Snapshot {
        state: engine_a.state.clone(),
        aux: engine_a.aux_view(),
    });
    client.handle_message(NetMessage::Snapshot {
        state: engine_b.state.clone(),
        aux: engine_b.aux_view(),
    });

    // 后到的快照完全顶掉前一份
    assert_eq!(client.state.as_ref(), Some(&engine_b.state));

    client.send_intent(Intent::ToggleReady).unwrap();
    assert_eq!(
        transport.sent().last().unwrap(),
        &(
            None,
            NetMessage::Intent {
                seat: 2,
                intent: Intent::ToggleReady,
            }
        )
    );
}

/// 完整流程：加入 -> 准备 -> 开局 -> 引擎推进到终局，战绩落库
#[test]
fn test_host_runs_game_and_stores_history() {
    let (mut host, transport) = new_host(4);

    // 全电脑推进（主机座位也交给电脑）
    host.engine.state.players[0].is_human = false;
    host.apply_local(Intent::StartGame).unwrap();
    assert_eq!(host.engine.state.phase, GamePhase::Cutting);

    for _ in 0..2000 {
        host.tick().unwrap();
        if host.engine.state.phase == GamePhase::GameOver {
            break;
        }
    }
    assert_eq!(host.engine.state.phase, GamePhase::GameOver);

    if host.engine.state.winner.is_some() {
        // 胡牌的一局恰好落一条战绩，房间标签来自会话
        assert_eq!(host.history().records().len(), 1);
        assert_eq!(host.history().records()[0].room_label, "AB3DE");
    } else {
        assert!(host.history().records().is_empty());
    }

    // 终局快照广播过，且与引擎当前状态一致
    let last_snapshot = transport
        .sent()
        .iter()
        .rev()
        .find_map(|(target, msg)| match (target, msg) {
            (None, NetMessage::Snapshot { state, .. }) => Some(state.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(last_snapshot, host.engine.state);
}
