//! Single worker thread driving a current-thread tokio runtime.
//!
//! The UI thread never blocks on network I/O; controllers spawn their
//! requests onto this runtime through its [`Handle`] and the worker settles
//! them one at a time.

use std::thread;

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::bounded;
use tokio::{runtime::Handle, sync::oneshot};

pub struct BackendRuntime {
    handle: Handle,
    shutdown: Option<oneshot::Sender<()>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl BackendRuntime {
    pub fn launch() -> Result<Self> {
        let (handle_tx, handle_rx) = bounded::<Result<Handle, String>>(1);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let worker = thread::Builder::new()
            .name("backend-worker".into())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        tracing::error!("failed to build backend runtime: {err}");
                        let _ = handle_tx.send(Err(err.to_string()));
                        return;
                    }
                };
                let _ = handle_tx.send(Ok(runtime.handle().clone()));
                tracing::debug!("backend worker ready");

                runtime.block_on(async move {
                    let _ = shutdown_rx.await;
                });
                tracing::debug!("backend worker stopped");
            })
            .context("failed to spawn backend worker thread")?;

        let handle = handle_rx
            .recv()
            .context("backend worker exited before reporting its runtime")?
            .map_err(|err| anyhow!("backend worker startup failure: {err}"))?;

        Ok(Self {
            handle,
            shutdown: Some(shutdown_tx),
            worker: Some(worker),
        })
    }

    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }
}

impl Drop for BackendRuntime {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("backend worker panicked during shutdown");
            }
        }
    }
}
