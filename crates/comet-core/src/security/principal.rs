use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

/// 标准化身份描述，表示与一次握手关联的已认证主体。
///
/// # 设计背景（Why）
/// - **行业对标**：参考 SPIFFE ID、OIDC `sub`/`iss` 与 Kubernetes
///   ServiceAccount 的命名约定，将身份拆解为"签发方 + 名称 + 类型"；
/// - **架构角色**：作为会话层授权决策与审计日志的关键索引，由外部认证
///   组件在握手期间异步产出，经延迟句柄进入握手记录。
///
/// # 字段契约（What）
/// - `name`：主体名称，需在 `authority` 下唯一；
/// - `authority`：可选的签发机构或命名空间，例如 `https://idp.example`；
/// - `kind`：主体类型，驱动策略细分。
///
/// # 风险提示（Trade-offs）
/// - 不做格式校验以保持轻量：合法性由签发系统保证；若调用者传入空名称，
///   身份语义不明确，建议在接入层配合契约测试拦截。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    name: String,
    authority: Option<String>,
    kind: PrincipalKind,
}

impl Principal {
    /// 构建身份描述，`authority` 默认缺省。
    pub fn new(name: impl Into<String>, kind: PrincipalKind) -> Self {
        Self {
            name: name.into(),
            authority: None,
            kind,
        }
    }

    /// 关联签发方，保持 Builder 风格链式调用。
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    /// 获取主体名称。
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取签发方。
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// 获取主体类型。
    pub fn kind(&self) -> &PrincipalKind {
        &self.kind
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// 主体类别枚举。
///
/// # 设计来源
/// - **用户/服务**：区分终端用户与工作负载，是会话授权策略的最小分类；
/// - **自定义**：允许对接私有身份系统，避免枚举膨胀；`Custom` 的名字应
///   使用稳定标识（如反向域名），方便策略双方匹配。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PrincipalKind {
    /// 终端用户身份。
    User,
    /// 服务或工作负载身份。
    Service,
    /// 私有身份系统的自定义类别。
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_round_trips_fields() {
        let principal =
            Principal::new("alice", PrincipalKind::User).with_authority("https://idp.example");
        assert_eq!(principal.name(), "alice");
        assert_eq!(principal.authority(), Some("https://idp.example"));
        assert_eq!(principal.kind(), &PrincipalKind::User);
        assert_eq!(alloc::format!("{principal}"), "alice");
    }
}
