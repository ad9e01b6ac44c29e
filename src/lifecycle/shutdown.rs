//! Shutdown coordination for the server.

use tokio::sync::watch;

/// Coordinator for graceful shutdown.
///
/// Cloned handles share one flag; a [`ShutdownSignal`] resolves once any
/// handle triggers, including triggers that happened before it subscribed.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Future-producing side of [`Shutdown`], handed to the server.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Wait until shutdown is triggered or every [`Shutdown`] handle is
    /// dropped.
    pub async fn recv(mut self) {
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_wakes_subscriber() {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();

        let waiter = tokio::spawn(signal.recv());
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("signal should resolve")
            .unwrap();
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_trigger() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), shutdown.subscribe().recv())
            .await
            .expect("signal should resolve");
    }
}
