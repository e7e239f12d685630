//! Derived game models for the chess client.
//!
//! Each model in this crate subscribes to a
//! [`BoardModel`](client_board::BoardModel)'s update event, rebuilds its
//! own state from the board's accessors, and broadcasts a change event of
//! its own for presenters to subscribe to:
//!
//! - [`MoveListModel`] - the game's move history as SAN with per-ply
//!   metadata, regenerated by replaying the move stack on a private board
//! - [`MaterialDifferenceModel`] - captured-material counts and a
//!   zero-sum advantage score derived from the current piece placement
//! - [`GameSession`] - wires one board to both derived models and holds
//!   the game metadata
//!
//! Updates are full rebuilds, never incremental patches: correctness over
//! efficiency, and the rebuild cost is trivial at chess-game sizes.

pub mod material_difference;
pub mod move_list;
pub mod session;

pub use material_difference::MaterialDifferenceModel;
pub use move_list::{MoveListEntry, MoveListModel};
pub use session::{GameMetadata, GameParameters, GameSession};
