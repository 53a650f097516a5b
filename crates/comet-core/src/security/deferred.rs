use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::future::{Future, IntoFuture};
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use spin::Mutex;
use tracing::trace;

use super::principal::Principal;

enum State {
    Pending { wakers: Vec<Waker> },
    Resolved(Option<Principal>),
}

struct Cell {
    state: Mutex<State>,
}

/// `DeferredPrincipal` 是"至多产出一个身份"的延迟解析消费端句柄。
///
/// # 设计背景（Why）
/// - 身份解析可能依赖上游异步认证（令牌校验、目录查询），握手记录在
///   协商完成时即需构造，不能等待解析结束；记录因此只持有句柄，由外部
///   协作者在其自身的调度策略下完成解析；
/// - 句柄可克隆且所有克隆共享同一个单元：不同读者的多次解析尝试观察到
///   同一个最终结果，不会各自重新派生身份。
///
/// # 契约说明（What）
/// - 三种构造途径：[`pending`](Self::pending) 返回生产/消费句柄对；
///   [`ready`](Self::ready) 与 [`anonymous`](Self::anonymous) 返回已就绪
///   的句柄，分别表示已认证与未认证；
/// - 解析结果为 `Option<Principal>`：`None` 表示握手未携带可认证身份，
///   属正常结果而非错误；
/// - 句柄自身从不发起、缓存、取消解析，也不设超时：这些策略全部归
///   持有 [`PrincipalPromise`] 的外部协作者所有。
///
/// # 并发语义
/// - 内部为 `spin::Mutex` 保护的两态单元（挂起携带 waker 列表 / 已就绪
///   携带最终值），临界区仅做状态读写，唤醒在锁外执行；
/// - 任意数量的并发读者无需额外同步即可等待或窥视结果。
#[derive(Clone)]
pub struct DeferredPrincipal {
    cell: Arc<Cell>,
}

impl DeferredPrincipal {
    /// 建立未解析的句柄对：生产端交给认证协作者，消费端嵌入握手记录。
    ///
    /// # 契约
    /// - **后置条件**：在生产端调用 `resolve*` 或被丢弃之前，消费端的
    ///   等待者保持挂起；生产端一旦了结，所有等待者被恰好唤醒一次。
    pub fn pending() -> (PrincipalPromise, DeferredPrincipal) {
        let cell = Arc::new(Cell {
            state: Mutex::new(State::Pending { wakers: Vec::new() }),
        });
        (
            PrincipalPromise {
                cell: Arc::clone(&cell),
                fulfilled: false,
            },
            DeferredPrincipal { cell },
        )
    }

    /// 构造已就绪、携带已认证身份的句柄。
    pub fn ready(principal: Principal) -> Self {
        Self {
            cell: Arc::new(Cell {
                state: Mutex::new(State::Resolved(Some(principal))),
            }),
        }
    }

    /// 构造已就绪、表示"未认证"的句柄。
    pub fn anonymous() -> Self {
        Self {
            cell: Arc::new(Cell {
                state: Mutex::new(State::Resolved(None)),
            }),
        }
    }

    /// 判断解析是否已完成。
    pub fn is_resolved(&self) -> bool {
        matches!(&*self.cell.state.lock(), State::Resolved(_))
    }

    /// 非阻塞窥视：未解析返回 `None`，已解析返回结果的克隆。
    pub fn peek(&self) -> Option<Option<Principal>> {
        match &*self.cell.state.lock() {
            State::Pending { .. } => None,
            State::Resolved(value) => Some(value.clone()),
        }
    }

    /// 取得等待解析完成的 Future。
    ///
    /// # 契约
    /// - 可多次调用、多处等待；所有 Future 完成于同一结果；
    /// - 解析已完成时 Future 立即就绪，不产生额外调度。
    pub fn resolved(&self) -> ResolvePrincipal {
        ResolvePrincipal {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl fmt::Debug for DeferredPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.cell.state.lock() {
            State::Pending { .. } => "pending",
            State::Resolved(Some(_)) => "resolved",
            State::Resolved(None) => "anonymous",
        };
        f.debug_tuple("DeferredPrincipal").field(&state).finish()
    }
}

impl<'a> IntoFuture for &'a DeferredPrincipal {
    type Output = Option<Principal>;
    type IntoFuture = ResolvePrincipal;

    /// 允许直接 `info.principal().await`，等价于 `resolved().await`。
    fn into_future(self) -> Self::IntoFuture {
        self.resolved()
    }
}

/// 等待身份解析完成的 Future，产出 `Option<Principal>`。
pub struct ResolvePrincipal {
    cell: Arc<Cell>,
}

impl Future for ResolvePrincipal {
    type Output = Option<Principal>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.cell.state.lock();
        match &mut *state {
            State::Resolved(value) => Poll::Ready(value.clone()),
            State::Pending { wakers } => {
                if !wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
                    wakers.push(cx.waker().clone());
                }
                Poll::Pending
            }
        }
    }
}

/// `PrincipalPromise` 是延迟身份解析的生产端句柄。
///
/// # 设计背景（Why）
/// - 生产端不可克隆，且 `resolve*` 按值消费自身：第二次了结在类型层面
///   不可表达，无需运行时去重规则；
/// - 未了结即被丢弃时自动以"未认证"收尾，读者因此永远不会无限挂起，
///   等待方无须额外的活性兜底。
///
/// # 契约说明（What）
/// - [`resolve`](Self::resolve) 携带已认证身份了结；
///   [`resolve_anonymous`](Self::resolve_anonymous) 以未认证了结；
/// - 了结后所有已注册等待者被恰好唤醒一次，后续等待者立即就绪。
pub struct PrincipalPromise {
    cell: Arc<Cell>,
    fulfilled: bool,
}

impl PrincipalPromise {
    /// 以已认证身份了结解析。
    pub fn resolve(mut self, principal: Principal) {
        self.complete(Some(principal));
    }

    /// 以"未认证"了结解析。
    pub fn resolve_anonymous(mut self) {
        self.complete(None);
    }

    fn complete(&mut self, value: Option<Principal>) {
        self.fulfilled = true;
        let authenticated = value.is_some();
        let wakers = {
            let mut state = self.cell.state.lock();
            let State::Pending { wakers } = &mut *state else {
                return;
            };
            let wakers = core::mem::take(wakers);
            *state = State::Resolved(value);
            wakers
        };
        for waker in wakers {
            waker.wake();
        }
        trace!(
            target: "comet_core::security",
            authenticated,
            "principal resolution completed"
        );
    }
}

impl Drop for PrincipalPromise {
    fn drop(&mut self) {
        if !self.fulfilled {
            self.complete(None);
        }
    }
}

impl fmt::Debug for PrincipalPromise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrincipalPromise")
            .field(&if self.fulfilled { "fulfilled" } else { "open" })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::PrincipalKind;
    use futures::executor::block_on;

    #[test]
    fn ready_handle_resolves_immediately() {
        let handle = DeferredPrincipal::ready(Principal::new("alice", PrincipalKind::User));
        assert!(handle.is_resolved());
        assert_eq!(
            block_on(handle.resolved()).map(|p| alloc::string::String::from(p.name())),
            Some(alloc::string::String::from("alice"))
        );
    }

    #[test]
    fn anonymous_handle_resolves_to_none() {
        let handle = DeferredPrincipal::anonymous();
        assert_eq!(handle.peek(), Some(None));
        assert_eq!(block_on(handle.resolved()), None);
    }

    #[test]
    fn clones_observe_the_same_outcome() {
        let (promise, handle) = DeferredPrincipal::pending();
        let sibling = handle.clone();
        assert!(handle.peek().is_none());

        promise.resolve(Principal::new("svc-gateway", PrincipalKind::Service));
        let first = block_on(handle.resolved());
        let second = block_on(sibling.resolved());
        assert_eq!(first, second);
        assert_eq!(first.unwrap().name(), "svc-gateway");
    }

    #[test]
    fn dropping_the_promise_resolves_anonymous() {
        let (promise, handle) = DeferredPrincipal::pending();
        assert!(!handle.is_resolved());
        drop(promise);
        assert_eq!(handle.peek(), Some(None));
    }

    #[test]
    fn handle_reference_awaits_via_into_future() {
        let handle = DeferredPrincipal::anonymous();
        assert_eq!(block_on(async { (&handle).await }), None);
    }
}
