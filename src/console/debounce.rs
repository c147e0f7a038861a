use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::Config;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Forwards a value only once no newer value has arrived for the quiet period.
/// Dropping the debouncer flushes whatever is still pending.
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn spawn(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, mut rx) = mpsc::unbounded_channel::<T>();
        let (out, settled) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            while let Some(mut pending) = rx.recv().await {
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => pending = value,
                            None => {
                                let _ = out.send(pending);
                                return;
                            }
                        },
                        _ = tokio::time::sleep(quiet) => {
                            if out.send(pending).is_err() {
                                return;
                            }
                            break;
                        }
                    }
                }
            }
        });

        (Self { input }, settled)
    }

    /// Debouncer for the user search box, using `SEARCH_DEBOUNCE_MS`.
    pub fn for_search(config: &Config) -> (Self, mpsc::UnboundedReceiver<T>) {
        Self::spawn(config.search_debounce())
    }

    /// Returns false once the background task has stopped.
    pub fn push(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }
}
