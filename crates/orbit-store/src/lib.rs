//! # orbit-store
//!
//! The in-memory social-graph state core for Orbit.
//!
//! All mutation goes through a single [`Store`] value: a synchronous,
//! single-writer container owning every collection (users, posts, comments,
//! stories, chats, messages, notifications). Each operation is a
//! read-modify-write that completes before the next one starts, so no
//! operation needs internal locking. Content mutations fan out into derived
//! notifications via the [`notify`] engine.
//!
//! The whole state serializes as one [`StoreState`] document through the
//! [`snapshot`] boundary (load once at startup, save after every mutation —
//! the wiring is the embedder's concern).

pub mod admin;
pub mod chats;
pub mod content;
pub mod models;
pub mod notify;
pub mod session;
pub mod snapshot;
pub mod social;
pub mod state;

mod error;

pub use error::{Result, StoreError};
pub use models::*;
pub use session::ProfileUpdate;
pub use snapshot::{FileSlot, SnapshotSlot};
pub use state::{Store, StoreState};
