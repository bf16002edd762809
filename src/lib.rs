//! gocomplete — editor-integrated Go code completion.
//!
//! Snapshots the host editor's buffer and caret, runs the gocode daemon's
//! CSV autocomplete query over it, and drives an interactive preview /
//! commit / cancel session against the buffer.

pub mod config;
pub mod daemon;
pub mod editor;
pub mod engine;
pub mod error;
pub mod request;
pub mod response;
pub mod session;
pub mod transport;

pub use error::{CompletionError, Result};
pub use response::Suggestion;
