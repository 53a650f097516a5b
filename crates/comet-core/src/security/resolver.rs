use alloc::boxed::Box;

use crate::async_trait;
use crate::handshake::{EndpointUri, HandshakeHeaders};

use super::principal::Principal;

/// `PrincipalResolver` 是身份解析协作者与握手层之间的边界契约。
///
/// # 设计初衷（Why）
/// - 认证逻辑（令牌校验、证书解析、目录查询）不属于握手元数据层；
///   本 crate 只固定双方见面的接口形状，实现由宿主侧提供；
/// - 握手层在协商完成后调用解析器，并把结果经
///   [`PrincipalPromise`](super::PrincipalPromise) 写入记录持有的延迟句柄，
///   记录本身自始至终不触发解析。
///
/// # 契约说明（What）
/// - **输入**：协商得到的端点 URI 与升级请求头，均以只读借用传入；
/// - **返回值**：`Ok(Some(_))` 表示解析出已认证主体；`Ok(None)` 表示
///   握手未携带可认证身份，属正常结果而非错误；`Err(_)` 表示解析过程
///   本身失败，是否拒绝升级由调用方决策；
/// - **前置条件**：实现必须可跨线程共享（`Send + Sync`），解析可挂起
///   任意时长，超时与取消策略归调用方。
///
/// # 风险提示（Trade-offs）
/// - `#[async_trait]` 装箱返回的 Future，换取对象安全与实现侧的书写
///   便利；解析不在热路径，单次堆分配可接受。
#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    /// 实现方的失败类型，需可跨线程传递并参与错误链。
    type Error: core::error::Error + Send + Sync + 'static;

    /// 依据握手上下文解析身份。
    async fn resolve(
        &self,
        uri: &EndpointUri,
        headers: &HandshakeHeaders,
    ) -> Result<Option<Principal>, Self::Error>;
}
