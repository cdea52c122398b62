//! Background dirty-document watcher.
//!
//! The watcher never touches the script host: it rebuilds the render list
//! and, when configured to, queues a rerun of the page scripts for the frame
//! loop to pick up.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};

use crate::config::WatcherConfig;
use crate::state::PageShared;

/// Work the watcher hands to the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptJob {
    /// Run the page scripts again.
    RerunPageScripts,
}

/// One watcher check: if the document is dirty, rebuild it and queue a
/// rerun when `rerun_scripts` is set. Returns whether the document was dirty.
pub fn watch_step(shared: &PageShared, rerun_scripts: bool, jobs: &Sender<ScriptJob>) -> bool {
    if !shared.take_dirty() {
        return false;
    }
    shared.write().rebuild();
    tracing::debug!(rerun_scripts, "dirty document rebuilt");
    if rerun_scripts && jobs.send(ScriptJob::RerunPageScripts).is_err() {
        tracing::debug!("page closed, rerun dropped");
    }
    true
}

/// A running watcher thread. Dropping it stops and joins the thread.
#[derive(Debug)]
pub struct Watcher {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Watcher {
    /// Start watching `shared` every `config.interval_ms`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn(
        shared: Arc<PageShared>,
        config: WatcherConfig,
        jobs: Sender<ScriptJob>,
    ) -> std::io::Result<Self> {
        let (stop, stopped) = mpsc::channel::<()>();
        let interval = config.interval();
        let handle = thread::Builder::new()
            .name("jtl-watcher".to_string())
            .spawn(move || {
                loop {
                    match stopped.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            let _ = watch_step(&shared, config.rerun_scripts, &jobs);
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                tracing::debug!("watcher stopped");
            })?;
        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::error!("watcher thread panicked");
        }
    }
}
