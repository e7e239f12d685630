//! Core utilities shared by the chess client's model layer.
//!
//! This crate provides the building blocks the reactive model graph is
//! made of:
//!
//! - [`Event`] - a minimal synchronous publish/subscribe primitive
//! - [`ModelError`] - the error type carried through listener chains
//! - [`PlayerConfig`] - persisted player settings (TOML)
//!
//! The model graph is single-threaded and cooperative: every update runs
//! synchronously on the thread that triggered the originating board
//! mutation. Nothing in this crate is `Send` or `Sync` by design.

pub mod config;
pub mod error;
pub mod event;

pub use config::{ConfigError, PlayerConfig};
pub use error::ModelError;
pub use event::Event;
