//! 视图生命周期
//!
//! 每个视图持有一个取消令牌，视图关闭后进行中的请求结果直接丢弃。
//! 列表刷新另外带递增票据，只接受最新一次发出的刷新结果。

use std::future::Future;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
    issued: u64,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发出新票据，之前的票据随即过期
    pub fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    /// 视图仍存活且票据是最新的
    pub fn accepts(&self, ticket: RequestTicket) -> bool {
        !self.token.is_cancelled() && ticket.0 == self.issued
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    /// 运行请求，视图在完成前关闭则返回 `None`
    pub async fn run<F, T>(&self, request: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        guarded(&self.token, request).await
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

pub async fn guarded<F, T>(token: &CancellationToken, request: F) -> Option<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        value = request => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_only_latest_ticket_is_accepted() {
        let mut scope = ViewScope::new();
        let first = scope.issue();
        let second = scope.issue();

        assert!(!scope.accepts(first));
        assert!(scope.accepts(second));

        scope.close();
        assert!(!scope.accepts(second));
    }

    #[tokio::test]
    async fn test_closed_scope_discards_pending_request() {
        let scope = ViewScope::new();
        let token = scope.token();

        let pending = tokio::spawn(async move {
            guarded(&token, async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                42
            })
            .await
        });

        scope.close();
        assert_eq!(pending.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_open_scope_passes_result_through() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_drop_cancels_token() {
        let scope = ViewScope::new();
        let token = scope.token();
        drop(scope);
        assert!(token.is_cancelled());
    }
}
