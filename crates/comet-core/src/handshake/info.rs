use core::fmt;

use crate::security::DeferredPrincipal;

use super::attributes::AttributeMap;
use super::headers::HandshakeHeaders;
use super::sub_protocol::SubProtocol;
use super::uri::EndpointUri;

/// `HandshakeInfo` 是描述一次已完成的 WebSocket 升级协商的不可变元数据记录。
///
/// # 设计初衷（Why）
/// - 升级协商组件与会话层之间需要一个被动的边界对象：协商完成的瞬间
///   构造一次，随会话存活整个生命周期，供应用层 Handler 只读内省
///   （读取自定义头部、检查认证主体、取出随请求播种的属性）；
/// - 记录自身没有算法行为、没有状态迁移、没有 I/O：协议实现、会话管理
///   与认证逻辑全部住在产出与消费它的外部协作者中。
///
/// # 字段契约（What）
/// - `uri`：端点的绝对 URI，必填且构造期已校验（见 [`EndpointUri`]）；
/// - `headers`：升级期间交换的 HTTP 头部——服务端会话存请求头，客户端
///   会话存响应头，必填；
/// - `principal`：延迟身份句柄，必填；即便握手未认证，句柄本身也必须
///   存在并最终解析为"未认证"；
/// - `sub_protocol`：协商出的子协议，`None` 表示未协商出任何子协议；
/// - `attributes`：随会话传播的附加上下文，缺省为空映射。
///
/// # 不变量（Invariants）
/// - 构造后不可变：不存在任何改写字段的方法；
/// - 四个必填字段由类型系统保证存在，"空引用"在此不可表达，源协作者
///   构造器里的空值断言因此整体上移进各值对象的校验工厂；
/// - `attributes` 不做防御性拷贝：一经嵌入，调用方应视其为只读。
///
/// # 并发与生命周期
/// - 记录不持有锁、不含内部可变性（延迟句柄的状态单元除外），任意数量
///   的并发读者无需同步；
/// - 由完成（或中介）握手的组件构造一次，随会话终止一同丢弃，无显式
///   销毁流程。
pub struct HandshakeInfo {
    uri: EndpointUri,
    headers: HandshakeHeaders,
    principal: DeferredPrincipal,
    sub_protocol: Option<SubProtocol>,
    attributes: AttributeMap,
}

impl HandshakeInfo {
    /// 构造握手记录，属性映射缺省为空。
    ///
    /// # 契约
    /// - **参数**：`uri` 为端点绝对 URI；`headers` 为升级期间交换的头部
    ///   （服务端取请求头，客户端取响应头）；`principal` 为延迟身份
    ///   句柄；`sub_protocol` 为协商结果，未协商传 `None`；
    /// - **后置条件**：`attributes()` 返回空映射；各访问器返回的值与
    ///   传入值逐一同一。
    pub fn new(
        uri: EndpointUri,
        headers: HandshakeHeaders,
        principal: DeferredPrincipal,
        sub_protocol: Option<SubProtocol>,
    ) -> Self {
        Self::with_attributes(uri, headers, principal, sub_protocol, AttributeMap::new())
    }

    /// 构造携带显式属性映射的握手记录。
    ///
    /// # 契约
    /// - **参数**：`attributes` 为从握手请求提取、需随会话传播的上下文，
    ///   允许为空映射；
    /// - **后置条件**：映射按原样嵌入，不做拷贝。
    pub fn with_attributes(
        uri: EndpointUri,
        headers: HandshakeHeaders,
        principal: DeferredPrincipal,
        sub_protocol: Option<SubProtocol>,
        attributes: AttributeMap,
    ) -> Self {
        Self {
            uri,
            headers,
            principal,
            sub_protocol,
            attributes,
        }
    }

    /// 获取 WebSocket 端点的绝对 URI。
    pub fn uri(&self) -> &EndpointUri {
        &self.uri
    }

    /// 获取握手期间交换的 HTTP 头部。
    ///
    /// 服务端会话返回升级请求头，客户端会话返回升级响应头。
    pub fn headers(&self) -> &HandshakeHeaders {
        &self.headers
    }

    /// 获取延迟身份句柄。
    ///
    /// # 契约
    /// - 每次调用返回同一个底层句柄：不同读者的重复解析尝试观察到一致
    ///   结果，不会各自派生出不同身份；
    /// - 解析由外部协作者调度，本记录不发起、不缓存、不取消；等待完成
    ///   可使用 [`DeferredPrincipal::resolved`] 或直接对借用 `.await`。
    pub fn principal(&self) -> &DeferredPrincipal {
        &self.principal
    }

    /// 获取协商出的子协议；未协商时返回 `None`（RFC 6455 §1.9）。
    pub fn sub_protocol(&self) -> Option<&SubProtocol> {
        self.sub_protocol.as_ref()
    }

    /// 获取随会话传播的属性映射。
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }
}

impl fmt::Display for HandshakeInfo {
    /// 日志友好的渲染，至少包含 URI 与头部，便于排障时做日志关联。
    ///
    /// 输出形态在补丁版本间保持稳定，但不是线上格式，禁止程序化解析。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HandshakeInfo[uri={}, headers={}]",
            self.uri, self.headers
        )
    }
}

impl fmt::Debug for HandshakeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandshakeInfo")
            .field("uri", &self.uri)
            .field("headers", &self.headers)
            .field("principal", &self.principal)
            .field("sub_protocol", &self.sub_protocol)
            .field("attributes", &self.attributes)
            .finish()
    }
}
