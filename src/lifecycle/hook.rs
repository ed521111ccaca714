//! Asynchronous lifecycle hooks and their completion state

use std::future::Future;
use std::task::Poll;

use futures::future::{self, LocalBoxFuture};
use tokio_util::sync::CancellationToken;

use crate::error::HookError;

/// Work started by an asynchronous hook
///
/// Hooks own everything they touch, so the future never borrows the
/// component and may outlive the phase that started it.
pub type HookFuture = LocalBoxFuture<'static, Result<(), HookError>>;

/// Hook that has nothing to wait for
pub fn completed() -> HookFuture {
    Box::pin(future::ready(Ok(())))
}

/// Hook from fallible async work; errors surface as faults
pub fn from_future<F>(work: F) -> HookFuture
where
    F: Future<Output = anyhow::Result<()>> + 'static,
{
    Box::pin(async move { work.await.map_err(HookError::Failed) })
}

/// Hook that ends as canceled once `token` fires
///
/// Cancellation wins when both are ready at the same poll.
pub fn cancellable<F>(token: CancellationToken, work: F) -> HookFuture
where
    F: Future<Output = anyhow::Result<()>> + 'static,
{
    Box::pin(async move {
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(HookError::Canceled),
            result = work => result.map_err(HookError::Failed),
        }
    })
}

/// State of a hook after its first poll
pub enum HookStatus {
    Completed,
    Canceled,
    Faulted(anyhow::Error),
    /// Genuinely suspended; the remaining work still has to be awaited
    Suspended(HookFuture),
}

impl HookStatus {
    /// Poll `hook` exactly once, running its synchronous prefix
    pub async fn start(mut hook: HookFuture) -> Self {
        match futures::poll!(hook.as_mut()) {
            Poll::Ready(Ok(())) => HookStatus::Completed,
            Poll::Ready(Err(HookError::Canceled)) => HookStatus::Canceled,
            Poll::Ready(Err(HookError::Failed(err))) => HookStatus::Faulted(err),
            Poll::Pending => HookStatus::Suspended(hook),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HookStatus::Completed => "completed",
            HookStatus::Canceled => "canceled",
            HookStatus::Faulted(_) => "faulted",
            HookStatus::Suspended(_) => "suspended",
        }
    }
}
