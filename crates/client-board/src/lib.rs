//! Authoritative board state for the chess client.
//!
//! [`BoardModel`] owns the game's current position and move stack, wrapping
//! the `shakmaty` rules engine for legality, SAN, FEN, and variant support.
//! It broadcasts every successful mutation on
//! [`BoardModel::e_board_model_updated`]; derived models subscribe to that
//! event and pull fresh state through the read accessors.
//!
//! The model never generates moves or evaluates positions; everything
//! rules-related is delegated to `shakmaty`.

pub mod model;

pub use model::{color_index, variant_display_name, BoardModel};
