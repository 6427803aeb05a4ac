//! Interval-driven refresh task
//!
//! The first tick fires one interval after `start`. A tick that fails is
//! logged and the next tick runs as scheduled. Ticks never overlap: if a
//! tick outlasts the interval, the next one is delayed.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::ApiResult;

type Tick = Arc<dyn Fn() -> BoxFuture<'static, ApiResult<()>> + Send + Sync>;

/// Owner of one periodic refresh task.
///
/// Dropping the controller stops the task.
pub struct PollingController {
    name: Arc<str>,
    interval: Duration,
    tick: Tick,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PollingController {
    /// Creates a stopped controller running `tick` every `interval`.
    pub fn new<F, Fut>(name: impl Into<String>, interval: Duration, tick: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<()>> + Send + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            interval,
            tick: Arc::new(move || tick().boxed()),
            task: Mutex::new(None),
        }
    }

    /// Starts ticking, replacing any task already running.
    ///
    /// Must be called within a Tokio runtime.
    pub fn start(&self) {
        let mut task = self.task.lock();
        if let Some(previous) = task.take() {
            previous.abort();
        }

        let name = Arc::clone(&self.name);
        let tick = Arc::clone(&self.tick);
        let interval = self.interval;
        tracing::debug!(poller = %name, ?interval, "poller started");

        *task = Some(tokio::spawn(async move {
            let mut timer = tokio::time::interval_at(Instant::now() + interval, interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                if let Err(error) = tick().await {
                    tracing::warn!(poller = %name, %error, "poll tick failed");
                }
            }
        }));
    }

    /// Stops ticking. A tick in progress is abandoned; work it spawned
    /// elsewhere (such as a cache fetch) still completes.
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
            tracing::debug!(poller = %self.name, "poller stopped");
        }
    }

    /// Whether the task is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Time between ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for PollingController {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for PollingController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollingController")
            .field("name", &self.name)
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
