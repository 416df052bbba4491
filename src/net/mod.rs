/// 连线相关模块
///
/// 主机权威复制：主机持有引擎，非主机端持有只读镜像，
/// 消息经可替换的传输层收发

pub mod client;
pub mod host;
pub mod message;
pub mod transport;

// 重新导出常用类型
pub use client::ClientSession;
pub use host::HostSession;
pub use message::NetMessage;
pub use transport::{generate_room_code, validate_room_code, NetError, PeerId, Transport};
