#![forbid(unsafe_code)]
#![warn(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

//! Change notification bus for the resume settings store.
//!
//! The bus carries typed [`SettingsEvent`]s with sequential identifiers and
//! keeps a bounded replay ring so subscribers that attach late (or reconnect)
//! can catch up from a known id. Delivery uses `tokio::broadcast`; when the
//! channel overflows, the oldest events are dropped.

pub mod payloads;
pub mod routing;

pub use payloads::{DEFAULT_REPLAY_CAPACITY, EventEnvelope, EventId, SettingsEvent};
pub use routing::{EventBus, EventStream, UndeliveredChange};
