//! Shared error type for the model layer.

use thiserror::Error;

/// Errors raised by model updates and board mutations.
///
/// Listener callbacks return `Result<(), ModelError>`, so any of these can
/// surface from [`Event::notify`](crate::Event::notify) and abort the
/// remainder of a notification chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The starting FEN could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
    /// The starting position is not valid for the selected variant.
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    /// A SAN move string could not be parsed or matched to a legal move.
    #[error("invalid SAN: {0}")]
    InvalidSan(String),
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The move stack contained a move with no piece on its origin square.
    ///
    /// This indicates an upstream contract violation: the authoritative
    /// board produced a stack that cannot be replayed from the initial
    /// position. It is detected and propagated, never skipped.
    #[error("invalid move at ply {ply}: no piece on origin square")]
    InvalidMove { ply: usize },
    /// A takeback was requested with no moves on the stack.
    #[error("no moves to take back")]
    EmptyMoveStack,
}
