//! Re-render notification entry point

use std::cell::Cell;

use tokio::sync::mpsc;

/// The host renderer's single re-render entry point
pub trait RenderHost {
    fn state_has_changed(&self);
}

/// A queued re-render request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    /// 1-based count of notifications sent through this host
    pub ordinal: u32,
}

/// Host that forwards every notification to a render loop over a channel
///
/// Notifications never render inline, so a lifecycle phase holding the
/// component can notify freely; the loop renders once the phase yields.
pub struct ChannelHost {
    sender: mpsc::UnboundedSender<RenderRequest>,
    sent: Cell<u32>,
}

impl ChannelHost {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RenderRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
                sent: Cell::new(0),
            },
            receiver,
        )
    }

    pub fn notifications(&self) -> u32 {
        self.sent.get()
    }
}

impl RenderHost for ChannelHost {
    fn state_has_changed(&self) {
        let ordinal = self.sent.get() + 1;
        self.sent.set(ordinal);
        // Receiver gone means the render loop shut down; nothing left to refresh
        if self.sender.send(RenderRequest { ordinal }).is_err() {
            tracing::trace!("Render request {} dropped, render loop closed", ordinal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notifications_arrive_in_order() {
        let (host, mut rx) = ChannelHost::new();
        host.state_has_changed();
        host.state_has_changed();

        assert_eq!(host.notifications(), 2);
        assert_eq!(rx.recv().await, Some(RenderRequest { ordinal: 1 }));
        assert_eq!(rx.recv().await, Some(RenderRequest { ordinal: 2 }));
    }

    #[test]
    fn closed_loop_does_not_panic() {
        let (host, rx) = ChannelHost::new();
        drop(rx);
        host.state_has_changed();
        assert_eq!(host.notifications(), 1);
    }
}
