//! One-shot cancellation signalling
//!
//! A [`CancellationSignal`] is the single cancellation channel shared between
//! the party that requests cancellation and the execution unit that observes
//! it. The same type is used for host-level shutdown (operating system
//! signals) so that both paths can be awaited in the same way.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Debug)]
struct SignalState {
    requested: AtomicBool,
    wake_tx: broadcast::Sender<()>,
}

/// One-shot, never-cleared cancellation flag with async wake-up
///
/// Cloning yields another handle to the same flag. The flag can be set any
/// number of times but only the first [`cancel`](Self::cancel) call changes
/// it; once set it stays set for the lifetime of every handle.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    state: Arc<SignalState>,
}

impl CancellationSignal {
    /// Create a new, unset signal
    pub fn new() -> Self {
        let (wake_tx, _) = broadcast::channel(1);
        Self {
            state: Arc::new(SignalState {
                requested: AtomicBool::new(false),
                wake_tx,
            }),
        }
    }

    /// Request cancellation
    ///
    /// Returns `true` only for the call that actually set the flag. Later
    /// calls are no-ops and return `false`.
    pub fn cancel(&self) -> bool {
        // Release pairs with the Acquire in is_cancelled(); a waiter that sees
        // the flag also sees everything written before cancel() was called.
        let was_requested = self.state.requested.swap(true, Ordering::AcqRel);
        if !was_requested {
            let _ = self.state.wake_tx.send(());
        }
        !was_requested
    }

    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.state.requested.load(Ordering::Acquire)
    }

    /// Wait until cancellation is requested
    ///
    /// Resolves immediately when the flag is already set.
    pub async fn cancelled(&self) {
        // Subscribe before checking the flag so a cancel() racing with this
        // call is seen either through the flag or through the channel.
        let mut wake_rx = self.state.wake_tx.subscribe();
        if self.is_cancelled() {
            return;
        }
        let _ = wake_rx.recv().await;
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Trip `signal` when the host asks the process to stop
///
/// The first interrupt/terminate/hangup/quit sets the signal so the
/// pipeline can wind down through its normal cancellation path. A second
/// one forces an immediate exit with status 130.
pub fn install_signal_handlers(signal: CancellationSignal) {
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }

        use std::sync::atomic::AtomicUsize;
        use tokio::signal::unix::{signal as unix_signal, SignalKind};
        let signal_count = Arc::new(AtomicUsize::new(0));
        let kinds = [
            SignalKind::interrupt(),
            SignalKind::terminate(),
            SignalKind::hangup(),
            SignalKind::quit(),
        ];

        for kind in kinds {
            let target = signal.clone();
            let sig_ctr = signal_count.clone();

            tokio::spawn(async move {
                if let Ok(mut sig) = unix_signal(kind) {
                    while sig.recv().await.is_some() {
                        let prev = sig_ctr.fetch_add(1, Ordering::AcqRel);
                        target.cancel();
                        if prev >= 1 {
                            log::warn!("second shutdown signal received; exiting");
                            std::process::exit(130);
                        }
                        log::info!("shutdown signal received; stopping pipeline");
                    }
                }
            });
        }
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            let mut received = 0usize;
            while tokio::signal::ctrl_c().await.is_ok() {
                received += 1;
                signal.cancel();
                if received > 1 {
                    log::warn!("Ctrl-C received twice; exiting");
                    std::process::exit(130);
                }
            }
        });
    }
}
