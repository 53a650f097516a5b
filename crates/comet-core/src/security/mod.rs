//! 安全契约模块，汇集主体描述、延迟身份解析与解析器边界接口。
//!
//! # 模块边界（Why）
//! - **行业吸收**：参考 SPIFFE 身份命名、Servlet/Reactive 框架的
//!   Principal 语义与零信任体系"持续验证"的建模方式；
//! - **架构定位**：只提供契约与数据结构，不承担任何认证实现；握手层
//!   与认证协作者各持本模块的一端（消费句柄 / 生产承诺）在边界相接。
//!
//! # 子模块（What）
//! - [`principal`]：已认证主体的标准化描述。
//! - [`deferred`]：至多产出一个身份的延迟解析原语（句柄/承诺对）。
//! - [`resolver`]：外部认证协作者需要实现的异步解析契约。

pub mod deferred;
pub mod principal;
pub mod resolver;

pub use deferred::{DeferredPrincipal, PrincipalPromise, ResolvePrincipal};
pub use principal::{Principal, PrincipalKind};
pub use resolver::PrincipalResolver;
