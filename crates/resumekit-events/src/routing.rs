//! Event bus routing helpers.

use crate::payloads::{DEFAULT_REPLAY_CAPACITY, EventEnvelope, EventId, SettingsEvent};
use chrono::Utc;
use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tokio::sync::broadcast::{Receiver, Sender};

/// A settings change that no live subscriber observed.
///
/// The envelope is still in the replay ring, so a subscriber attaching with
/// an older `since_id` will receive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndeliveredChange {
    /// Identifier assigned to the event.
    pub event_id: EventId,
    /// Store revision that produced the change.
    pub revision: u64,
    /// Kind of the change, as reported by [`SettingsEvent::kind`].
    pub event_kind: &'static str,
}

impl Display for UndeliveredChange {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} at revision {} reached no subscriber (kept for replay as event {})",
            self.event_kind, self.revision, self.event_id
        )
    }
}

impl std::error::Error for UndeliveredChange {}

#[derive(Debug)]
struct BusState {
    next_id: EventId,
    replay: VecDeque<EventEnvelope>,
}

/// Shared event bus built on top of `tokio::broadcast`.
#[derive(Clone, Debug)]
pub struct EventBus {
    sender: Sender<EventEnvelope>,
    state: Arc<Mutex<BusState>>,
    replay_capacity: usize,
}

impl EventBus {
    /// Construct a bus with a custom replay capacity (at least one entry).
    #[must_use]
    pub fn with_capacity(replay_capacity: usize) -> Self {
        let replay_capacity = replay_capacity.max(1);
        let (sender, _) = broadcast::channel(replay_capacity);
        Self {
            sender,
            state: Arc::new(Mutex::new(BusState {
                next_id: 1,
                replay: VecDeque::with_capacity(replay_capacity),
            })),
            replay_capacity,
        }
    }

    /// Construct a bus with the default replay capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REPLAY_CAPACITY)
    }

    /// Publish an event produced at `revision`, returning the assigned id.
    ///
    /// Events are recorded for replay even when nobody is listening.
    pub fn publish(&self, revision: u64, event: SettingsEvent) -> EventId {
        match self.try_publish(revision, event) {
            Ok(id) | Err(UndeliveredChange { event_id: id, .. }) => id,
        }
    }

    /// Publish an event and report whether any live subscriber received it.
    ///
    /// # Errors
    ///
    /// Returns [`UndeliveredChange`] when the broadcast channel has no
    /// receivers. The event is still stored in the replay ring.
    pub fn try_publish(
        &self,
        revision: u64,
        event: SettingsEvent,
    ) -> Result<EventId, UndeliveredChange> {
        let envelope = {
            let mut state = self.lock_state();
            let id = state.next_id;
            state.next_id = state.next_id.saturating_add(1);
            let envelope = EventEnvelope {
                id,
                revision,
                timestamp: Utc::now(),
                event,
            };
            if state.replay.len() == self.replay_capacity {
                let _ = state.replay.pop_front();
            }
            state.replay.push_back(envelope.clone());
            envelope
        };

        let id = envelope.id;
        let kind = envelope.event.kind();
        self.sender
            .send(envelope)
            .map(|_| id)
            .map_err(|_| UndeliveredChange {
                event_id: id,
                revision,
                event_kind: kind,
            })
    }

    /// Subscribe to the bus, replaying buffered events newer than `since_id`.
    #[must_use]
    pub fn subscribe(&self, since_id: Option<EventId>) -> EventStream {
        // Hold the state lock while attaching so no event lands in both the
        // backlog and the live receiver.
        let state = self.lock_state();
        let backlog = since_id.map_or_else(VecDeque::new, |since| {
            state
                .replay
                .iter()
                .filter(|env| env.id > since)
                .cloned()
                .collect()
        });
        let receiver = self.sender.subscribe();
        drop(state);
        EventStream { backlog, receiver }
    }

    /// Last event id observed in the replay buffer.
    #[must_use]
    pub fn last_event_id(&self) -> Option<EventId> {
        self.lock_state().replay.back().map(|env| env.id)
    }

    /// Collect a backlog of events emitted after the specified id.
    #[must_use]
    pub fn backlog_since(&self, id: EventId) -> Vec<EventEnvelope> {
        self.lock_state()
            .replay
            .iter()
            .filter(|env| env.id > id)
            .cloned()
            .collect()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    fn lock_state(&self) -> MutexGuard<'_, BusState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream wrapper that yields events from the replay backlog first, then
/// from the live broadcast channel.
#[derive(Debug)]
pub struct EventStream {
    backlog: VecDeque<EventEnvelope>,
    receiver: Receiver<EventEnvelope>,
}

impl EventStream {
    /// Receive the next event. Returns `None` once the bus is gone.
    ///
    /// A lagging subscriber skips the events that were overwritten and
    /// resumes with the oldest one still buffered.
    pub async fn next(&mut self) -> Option<EventEnvelope> {
        if let Some(event) = self.backlog.pop_front() {
            return Some(event);
        }

        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Convert into a `tokio_stream` stream over live events, dropping any
    /// pending backlog and lag notifications.
    pub fn into_live_stream(self) -> impl tokio_stream::Stream<Item = EventEnvelope> {
        use tokio_stream::StreamExt;
        tokio_stream::wrappers::BroadcastStream::new(self.receiver).filter_map(Result::ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    fn focus(id: &str) -> SettingsEvent {
        SettingsEvent::ActiveSectionChanged {
            section_id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn publish_and_replay_from_id() {
        let bus = EventBus::with_capacity(4);
        let first = bus.publish(1, focus("basic"));
        let second = bus.publish(
            2,
            SettingsEvent::GlobalSettingsUpdated {
                fields: vec!["line_height".into()],
            },
        );

        assert_eq!(bus.last_event_id(), Some(second));
        let backlog = bus.backlog_since(first);
        assert_eq!(backlog.len(), 1);
        assert_eq!(backlog[0].id, second);
        assert_eq!(backlog[0].revision, 2);
    }

    #[tokio::test]
    async fn replay_ring_drops_oldest_entries() {
        let bus = EventBus::with_capacity(2);
        for revision in 1..=3 {
            let _ = bus.publish(revision, focus("skills"));
        }
        let ids: Vec<_> = bus.backlog_since(0).iter().map(|env| env.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn subscribe_replays_backlog_before_live_events() {
        let bus = EventBus::new();
        let first = bus.publish(1, focus("basic"));
        let second = bus.publish(2, focus("skills"));

        let mut stream = bus.subscribe(Some(first));
        let third = bus.publish(3, focus("projects"));

        let replayed = stream.next().await.expect("backlog item");
        assert_eq!(replayed.id, second);
        let live = timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("live event in time")
            .expect("live item");
        assert_eq!(live.id, third);
    }

    #[tokio::test]
    async fn try_publish_reports_missing_subscribers() {
        let bus = EventBus::new();
        let err = bus
            .try_publish(4, focus("basic"))
            .expect_err("no subscribers attached");
        assert_eq!(err.event_kind, "active_section_changed");
        assert_eq!(err.revision, 4);
        assert_eq!(bus.last_event_id(), Some(err.event_id));
        assert_eq!(
            err.to_string(),
            "active_section_changed at revision 4 reached no subscriber (kept for replay as event 1)"
        );

        let _stream = bus.subscribe(None);
        assert_eq!(bus.subscriber_count(), 1);
        assert!(bus.try_publish(5, focus("skills")).is_ok());
    }

    #[tokio::test]
    async fn live_stream_yields_envelopes() {
        let bus = EventBus::new();
        let mut live = Box::pin(bus.subscribe(None).into_live_stream());
        let id = bus.publish(
            7,
            SettingsEvent::ColorThemeChanged {
                color: "#2e8b57".into(),
                preset: true,
            },
        );
        let envelope = live.next().await.expect("stream item");
        assert_eq!(envelope.id, id);
        assert!(matches!(
            envelope.event,
            SettingsEvent::ColorThemeChanged { preset: true, .. }
        ));
    }
}
