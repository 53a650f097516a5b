//! 握手元数据模块：一次 WebSocket 升级协商的被动记录及其组成值对象。
//!
//! # 模块边界（Why）
//! - 升级协商（HTTP Upgrade 解析、`Sec-WebSocket-Accept` 计算）与会话
//!   生命周期管理均不在本模块：这里只固定双方交接的数据形状与不变量；
//! - 校验全部收敛在各值对象的构造工厂中，记录本身的构造因此不可失败，
//!   对象一旦存在即处于合法状态。
//!
//! # 子模块（What）
//! - [`info`]：不可变的握手记录 [`HandshakeInfo`]。
//! - [`uri`]：构造期校验的端点绝对 URI。
//! - [`headers`]：有序、大小写不敏感的头部多值映射。
//! - [`sub_protocol`]：RFC 6455 §1.9 子协议名的校验包装。
//! - [`attributes`]：随会话传播的字符串键/任意值上下文容器。

pub mod attributes;
pub mod headers;
pub mod info;
pub mod sub_protocol;
pub mod uri;

pub use attributes::{AttributeMap, AttributeValue};
pub use headers::{HandshakeHeaders, HeaderEntry};
pub use info::HandshakeInfo;
pub use sub_protocol::SubProtocol;
pub use uri::EndpointUri;
