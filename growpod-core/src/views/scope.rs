//! Teardown of a view's in-flight requests.
//!
//! Leaving a view tears its scope down. Work guarded by the scope stops
//! waiting at that point, and a result that arrives afterwards is dropped
//! instead of being written into the view.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

pub struct ViewScope {
    torn_down: Arc<watch::Sender<bool>>,
}

/// Tears a scope down from outside the view (e.g. a Ctrl-C handler).
#[derive(Clone)]
pub struct TeardownHandle {
    torn_down: Arc<watch::Sender<bool>>,
}

impl TeardownHandle {
    pub fn teardown(&self) {
        self.torn_down.send_replace(true);
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewScope {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        ViewScope {
            torn_down: Arc::new(tx),
        }
    }

    pub fn handle(&self) -> TeardownHandle {
        TeardownHandle {
            torn_down: self.torn_down.clone(),
        }
    }

    pub fn teardown(&self) {
        self.torn_down.send_replace(true);
    }

    pub fn is_torn_down(&self) -> bool {
        *self.torn_down.borrow()
    }

    /// Run `fut` unless the scope is torn down first. `None` means the result
    /// must not be applied.
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_torn_down() {
            return None;
        }

        let mut rx = self.torn_down.subscribe();
        let torn_down = async move {
            while !*rx.borrow_and_update() {
                if rx.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            biased;
            _ = torn_down => {
                debug!("View torn down, dropping pending request");
                None
            }
            out = fut => Some(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn passes_through_while_active() {
        let scope = ViewScope::new();
        assert_eq!(scope.guard(async { 5 }).await, Some(5));
    }

    #[tokio::test]
    async fn nothing_runs_after_teardown() {
        let scope = ViewScope::new();
        scope.teardown();
        assert_eq!(scope.guard(async { 5 }).await, None);
    }

    #[tokio::test]
    async fn teardown_interrupts_pending_work() {
        let scope = ViewScope::new();
        let handle = scope.handle();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.teardown();
        });

        let out = scope.guard(std::future::pending::<u8>()).await;
        assert_eq!(out, None);
        assert!(scope.is_torn_down());
    }
}
