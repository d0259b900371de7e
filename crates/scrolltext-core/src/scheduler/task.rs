use std::future::Future;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{Error, Result};

/// The tokio runtime tasks would be spawned on
pub(crate) fn current_runtime() -> Result<Handle> {
    Handle::try_current().map_err(|e| Error::Runtime(e.to_string()))
}

/// An owned background task with a shutdown signal.
///
/// Dropping the handle signals shutdown; the task exits at its next
/// `select!` point.
pub struct TaskHandle {
    name: &'static str,
    shutdown: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl TaskHandle {
    /// Spawn `task` on the current tokio runtime, handing it the shutdown receiver
    pub fn spawn<F, Fut>(name: &'static str, task: F) -> Result<Self>
    where
        F: FnOnce(watch::Receiver<bool>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let runtime = current_runtime()?;
        let (shutdown, shutdown_rx) = watch::channel(false);
        let join = runtime.spawn(task(shutdown_rx));
        debug!(task = name, "Background task spawned");
        Ok(Self {
            name,
            shutdown,
            join,
        })
    }

    /// Signal shutdown without waiting
    pub fn cancel(&self) {
        // the receiver is gone once the task has exited
        let _ = self.shutdown.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Signal shutdown and wait for the task to exit
    pub async fn shutdown(mut self) {
        self.cancel();
        if let Err(e) = (&mut self.join).await {
            debug!(task = self.name, error = %e, "Background task ended abnormally");
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
