#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![doc = "comet-core: WebSocket 会话框架的握手元数据与身份解析核心契约。"]
#![doc = ""]
#![doc = "本 crate 固定升级协商层与会话层之间交接的数据形状：不可变的握手记录"]
#![doc = "[`HandshakeInfo`]、组成它的各值对象，以及身份解析协作者的边界契约。"]
#![doc = "协议实现、会话管理、I/O 传输与认证逻辑全部住在外部协作者中。"]
#![doc = ""]
#![doc = "== 内存分配依赖 =="]
#![doc = "`comet-core` 定位于 `no_std + alloc` 场景：契约依赖 [`alloc`] 中的"]
#![doc = "`String`、`Vec`、`Arc`、`Box` 支撑头部容器、属性存储与延迟句柄共享。"]
#![doc = "纯 `no_std`（无分配器）环境不支持。`std` Feature 仅向依赖传播标准库"]
#![doc = "能力，不改变任何契约语义。"]

extern crate alloc;

pub use async_trait::async_trait;

pub mod error;
pub mod handshake;
pub mod security;

pub use error::{HandshakeError, codes};
pub use handshake::{
    AttributeMap, AttributeValue, EndpointUri, HandshakeHeaders, HandshakeInfo, HeaderEntry,
    SubProtocol,
};
pub use security::{
    DeferredPrincipal, Principal, PrincipalKind, PrincipalPromise, PrincipalResolver,
    ResolvePrincipal,
};
