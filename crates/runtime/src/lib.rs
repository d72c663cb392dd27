//! Runtime orchestration for the streets game.
//!
//! This crate wraps the deterministic [`game_core::Session`] in an async
//! worker that owns the authoritative state, fires queued follow-up tasks on
//! real timers, persists a snapshot after every change, and publishes what
//! happened on a topic-based event bus. Consumers build a [`Runtime`] and
//! talk to it through the cloneable [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] persists snapshots between runs
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, Rejected, SessionEvent, Topic};
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepository, RepositoryError, SnapshotRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
