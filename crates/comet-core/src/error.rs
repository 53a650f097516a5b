use alloc::borrow::Cow;
use core::fmt;

/// 握手契约层的稳定错误码注册表。
///
/// # 设计背景（Why）
/// - 握手元数据的构造校验是本 crate 唯一的错误来源，错误码集中登记便于日志、
///   指标与上层补救流程做精确分类；
/// - 命名遵循 `<域>.<语义>` 约定，保持与框架其余错误域一致的机读形态。
///
/// # 契约说明（What）
/// - 所有常量均为 `'static` 字符串，一经发布不得变更语义；
/// - 新增错误码须在本模块登记，禁止在调用点散落裸字符串。
pub mod codes {
    /// 端点 URI 为空字符串。
    pub const URI_EMPTY: &str = "handshake.uri_empty";
    /// 端点 URI 缺失 scheme，属于相对引用而非绝对 URI。
    pub const URI_RELATIVE: &str = "handshake.uri_relative";
    /// 端点 URI 的 scheme 含有非法字符或不以字母开头。
    pub const URI_SCHEME_INVALID: &str = "handshake.uri_scheme_invalid";
    /// 端点 URI 缺失 authority（主机）部分。
    pub const URI_AUTHORITY_MISSING: &str = "handshake.uri_authority_missing";
    /// 协商出的子协议名为空或含有非 token 字符。
    pub const SUB_PROTOCOL_INVALID: &str = "handshake.sub_protocol_invalid";
}

/// `HandshakeError` 表示握手元数据在构造期校验失败的唯一错误形态。
///
/// # 设计背景（Why）
/// - 握手记录一经构造即不可变，错误只可能出现在各组成值对象的校验工厂中；
///   对象一旦存在就不会处于非法状态，访问器因此无需返回 `Result`。
/// - 错误码 `code` 为 `'static` 字符串，承载稳定语义；`message` 面向排障人员，
///   说明是哪个参数、因何被拒绝。
///
/// # 契约说明（What）
/// - **前置条件**：`code` 必须取自 [`codes`] 模块；
/// - **后置条件**：错误值拥有独立所有权，可安全跨线程传递（`Send + Sync + 'static`）；
/// - 不存在重试或降级路径：调用方必须修正参数后重新构造。
///
/// # 设计取舍（Trade-offs）
/// - 采用 `Cow<'static, str>` 保存消息：静态文案零分配，动态拼接仅一次堆分配。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandshakeError {
    code: &'static str,
    message: Cow<'static, str>,
}

impl HandshakeError {
    /// 构造校验错误。
    ///
    /// # 契约
    /// - **参数**：`code` 取自 [`codes`]；`message` 指明被拒绝的参数与原因。
    pub fn new(code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// 获取稳定错误码。
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// 获取面向排障人员的描述。
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl core::error::Error for HandshakeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_exposes_stable_code_and_message() {
        let err = HandshakeError::new(codes::URI_EMPTY, "uri must not be empty");
        assert_eq!(err.code(), "handshake.uri_empty");
        assert_eq!(err.message(), "uri must not be empty");
        assert_eq!(
            alloc::format!("{err}"),
            "handshake.uri_empty: uri must not be empty"
        );
    }
}
