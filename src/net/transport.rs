use crate::net::message::NetMessage;
use rand::Rng;

/// 传输层抽象
///
/// 引擎不关心消息怎么送达（WebRTC、WebSocket、进程内信道都行），
/// 只要求"定向发送"和"广播"两种能力。会话层通过本 trait 解耦。

/// 对端标识（由具体传输层定义含义）
pub type PeerId = String;

/// 传输层错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetError {
    /// 房间号已被占用
    RoomCodeTaken,
    /// 连接失败
    ConnectFailed,
    /// 房间号格式不合法
    MalformedRoomCode,
    /// 发送失败（对端已断开等）
    SendFailed,
    /// 尚未分到座位
    NotJoined,
}

/// 消息发送接口
pub trait Transport {
    /// 发送一条消息；`target` 为 None 时广播给所有已连接对端
    fn send(&mut self, target: Option<&PeerId>, message: &NetMessage) -> Result<(), NetError>;
}

/// 房间号长度
pub const ROOM_CODE_LEN: usize = 5;

const ROOM_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 校验房间号格式：恰好 5 位大写字母或数字
pub fn validate_room_code(code: &str) -> Result<(), NetError> {
    let valid = code.len() == ROOM_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(NetError::MalformedRoomCode)
    }
}

/// 随机生成一个房间号
pub fn generate_room_code() -> String {
    let mut rng = rand::thread_rng();
    (0..ROOM_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..ROOM_CODE_CHARSET.len());
            ROOM_CODE_CHARSET[idx] as char
        })
        .collect()
}
