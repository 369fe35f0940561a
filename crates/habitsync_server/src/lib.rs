//! # habitsync Server
//!
//! Request handlers and server facade for habitsync.
//!
//! This crate provides:
//! - Sync endpoints (upload, download, reset) over the merge engine
//! - Global and group leaderboard endpoints
//! - The full group lifecycle (create, join, leave, delete, update,
//!   member progress)
//! - A structured error taxonomy mapped from engine and store failures
//!
//! ## Architecture
//!
//! Transport and credential verification live outside this crate: a
//! caller arrives as an already-authenticated [`Caller`] (or `None`,
//! which every protected handler rejects). Handlers take typed request
//! structs and return typed responses; the embedding transport owns
//! serialization, routing, and retry policy.
//!
//! # Example
//!
//! ```
//! use habitsync_server::{Caller, HabitServer, ServerConfig};
//! use habitsync_model::UploadRequest;
//!
//! let server = HabitServer::new(ServerConfig::default());
//! let caller = Caller::new("user-1");
//!
//! let state = server
//!     .upload(Some(&caller), UploadRequest::default())
//!     .unwrap();
//! assert!(state.entries.is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod context;
mod error;
mod groups;
mod identity;
mod leaderboard;
mod server;
mod sync;

pub use config::ServerConfig;
pub use context::HandlerContext;
pub use error::{ApiError, ApiResult};
pub use groups::GroupHandler;
pub use identity::{require_caller, Caller};
pub use leaderboard::LeaderboardHandler;
pub use server::HabitServer;
pub use sync::SyncHandler;
