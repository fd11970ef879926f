//! Last-write-wins coalescing of rapid input.
//!
//! [`Debouncer`] is a plain state machine driven by caller-supplied
//! instants, so it can be embedded in any event loop. [`ColorDebouncer`]
//! drives one on a tokio task and applies the surviving custom color to a
//! [`SettingsCommands`] implementation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use crate::color::ColorTheme;
use crate::error::SettingsResult;
use crate::store::SettingsCommands;

/// Trailing-edge debouncer: each submission replaces the pending value and
/// restarts the quiet window.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Queue `value`, returning the pending value it superseded.
    pub fn submit(&mut self, value: T, now: Instant) -> Option<T> {
        self.pending
            .replace((value, now + self.window))
            .map(|(previous, _)| previous)
    }

    /// Instant at which the pending value becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Whether a value is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if deadline <= now => self.flush(),
            _ => None,
        }
    }

    /// Take the pending value regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

enum DebounceMessage {
    Submit(String),
    Cancel,
    Flush(oneshot::Sender<Option<SettingsResult<ColorTheme>>>),
}

/// Handle to a background task that applies custom colors at a throttled
/// cadence.
///
/// Dropping the handle applies any pending value before the task exits.
#[derive(Debug)]
pub struct ColorDebouncer {
    sender: mpsc::UnboundedSender<DebounceMessage>,
    task: JoinHandle<()>,
}

impl ColorDebouncer {
    /// Spawn the debouncing task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn spawn(store: Arc<dyn SettingsCommands>, window: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_debouncer(store, Debouncer::new(window), receiver));
        Self { sender, task }
    }

    /// Queue a custom color. Never blocks; newer input supersedes older
    /// pending input.
    pub fn submit(&self, value: impl Into<String>) {
        if self.sender.send(DebounceMessage::Submit(value.into())).is_err() {
            warn!("color debouncer task is gone; dropping input");
        }
    }

    /// Discard pending input without applying it.
    pub fn cancel(&self) {
        if self.sender.send(DebounceMessage::Cancel).is_err() {
            warn!("color debouncer task is gone; nothing to cancel");
        }
    }

    /// Apply the pending color immediately.
    ///
    /// Returns `None` when nothing was pending.
    pub async fn flush(&self) -> Option<SettingsResult<ColorTheme>> {
        let (reply, response) = oneshot::channel();
        self.sender.send(DebounceMessage::Flush(reply)).ok()?;
        response.await.ok().flatten()
    }

    /// Stop accepting input, apply whatever is pending and wait for the task.
    pub async fn shutdown(self) {
        let Self { sender, task } = self;
        drop(sender);
        if let Err(err) = task.await {
            warn!(error = %err, "color debouncer task failed");
        }
    }
}

async fn run_debouncer(
    store: Arc<dyn SettingsCommands>,
    mut debouncer: Debouncer<String>,
    mut receiver: mpsc::UnboundedReceiver<DebounceMessage>,
) {
    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            message = receiver.recv() => match message {
                Some(DebounceMessage::Submit(value)) => {
                    if let Some(superseded) = debouncer.submit(value, Instant::now()) {
                        debug!(color = %superseded, "custom color superseded before applying");
                    }
                }
                Some(DebounceMessage::Cancel) => {
                    if let Some(dropped) = debouncer.flush() {
                        debug!(color = %dropped, "pending custom color cancelled");
                    }
                }
                Some(DebounceMessage::Flush(reply)) => {
                    let applied = debouncer.flush().map(|value| store.set_color_theme(&value));
                    let _ = reply.send(applied);
                }
                None => {
                    if let Some(value) = debouncer.flush() {
                        let _ = store.set_color_theme(&value);
                    }
                    break;
                }
            },
            () = wait_until(deadline) => {
                if let Some(value) = debouncer.poll(Instant::now()) {
                    let _ = store.set_color_theme(&value);
                }
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::StoreOptions;
    use crate::store::ResumeStore;
    use resumekit_events::SettingsEvent;
    use tokio::time::sleep;

    const WINDOW: Duration = Duration::from_millis(100);

    #[test]
    fn submit_replaces_pending_value_and_restarts_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        assert_eq!(debouncer.submit("a", start), None);
        let later = start + Duration::from_millis(60);
        assert_eq!(debouncer.submit("b", later), Some("a"));
        assert_eq!(debouncer.deadline(), Some(later + WINDOW));
        assert_eq!(debouncer.poll(start + WINDOW), None);
        assert_eq!(debouncer.poll(later + WINDOW), Some("b"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_and_flush_empty_the_queue() {
        let now = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.submit(1, now);
        debouncer.cancel();
        assert_eq!(debouncer.flush(), None);
        debouncer.submit(2, now);
        assert_eq!(debouncer.flush(), Some(2));
    }

    fn color_events(store: &ResumeStore) -> Vec<String> {
        store
            .events()
            .backlog_since(0)
            .into_iter()
            .filter_map(|env| match env.event {
                SettingsEvent::ColorThemeChanged { color, .. } => Some(color),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_submissions_collapse_to_the_last_value() {
        let store = ResumeStore::new(&StoreOptions::default());
        let debouncer = ColorDebouncer::spawn(Arc::new(store.clone()), WINDOW);

        for value in ["#111111", "#222222", "#333333"] {
            debouncer.submit(value);
            sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(store.snapshot().color_theme.as_str(), "#000000");

        sleep(WINDOW * 2).await;
        assert_eq!(store.snapshot().color_theme.as_str(), "#333333");
        assert_eq!(color_events(&store), vec!["#333333".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_window_restarts_on_every_submission() {
        let store = ResumeStore::new(&StoreOptions::default());
        let debouncer = ColorDebouncer::spawn(Arc::new(store.clone()), WINDOW);

        debouncer.submit("#aaaaaa");
        sleep(Duration::from_millis(60)).await;
        debouncer.submit("#bbbbbb");
        sleep(Duration::from_millis(60)).await;
        assert_eq!(store.snapshot().color_theme.as_str(), "#000000");

        sleep(Duration::from_millis(60)).await;
        assert_eq!(store.snapshot().color_theme.as_str(), "#bbbbbb");
    }

    #[tokio::test]
    async fn flush_applies_pending_value_immediately() {
        let store = ResumeStore::new(&StoreOptions::default());
        let debouncer = ColorDebouncer::spawn(Arc::new(store.clone()), Duration::from_secs(60));

        debouncer.submit("#123456");
        let applied = debouncer.flush().await.expect("value pending").expect("valid color");
        assert_eq!(applied.as_str(), "#123456");
        assert!(debouncer.flush().await.is_none());
    }

    #[tokio::test]
    async fn shutdown_applies_last_pending_value() {
        let store = ResumeStore::new(&StoreOptions::default());
        let debouncer = ColorDebouncer::spawn(Arc::new(store.clone()), Duration::from_secs(60));

        debouncer.submit("#654321");
        debouncer.shutdown().await;
        assert_eq!(store.snapshot().color_theme.as_str(), "#654321");
    }

    #[tokio::test]
    async fn cancel_discards_pending_value() {
        let store = ResumeStore::new(&StoreOptions::default());
        let debouncer = ColorDebouncer::spawn(Arc::new(store.clone()), Duration::from_secs(60));

        debouncer.submit("#abcdef");
        debouncer.cancel();
        assert!(debouncer.flush().await.is_none());
        debouncer.shutdown().await;
        assert_eq!(store.snapshot().color_theme.as_str(), "#000000");
    }

    #[tokio::test]
    async fn malformed_final_value_leaves_previous_color() {
        let store = ResumeStore::new(&StoreOptions::default());
        let debouncer = ColorDebouncer::spawn(Arc::new(store.clone()), Duration::from_secs(60));

        debouncer.submit("#2e8b57");
        debouncer.submit("definitely-not-a-color");
        let result = debouncer.flush().await.expect("value pending");
        assert!(result.is_err());
        assert_eq!(store.snapshot().color_theme.as_str(), "#000000");
    }
}
