//! The authoritative board model.

use client_core::{Event, ModelError};
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::variant::{Variant, VariantPosition};
use shakmaty::{Board, CastlingMode, Color, EnPassantMode, Move, Position};
use std::cell::RefCell;
use tracing::{debug, warn};

/// Number of checks a side must deliver to win at three-check.
const CHECKS_TO_WIN: u32 = 3;

/// Returns the table index for a color (0 for White, 1 for Black).
#[inline]
pub fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

/// Returns the display name of a variant, matching Lichess naming.
pub fn variant_display_name(variant: Variant) -> &'static str {
    match variant {
        Variant::Chess => "standard",
        Variant::Atomic => "atomic",
        Variant::Antichess => "antichess",
        Variant::KingOfTheHill => "kingOfTheHill",
        Variant::ThreeCheck => "threeCheck",
        Variant::Crazyhouse => "crazyhouse",
        Variant::RacingKings => "racingKings",
        Variant::Horde => "horde",
    }
}

/// Mutable board state, kept behind one `RefCell` so accessors can be
/// called from listeners while no mutation is in flight.
struct BoardState {
    /// Current position, always the result of replaying `move_stack`
    /// from `initial`.
    position: VariantPosition,
    /// The game's starting position. Never changes after construction;
    /// not necessarily the variant's default start (custom FENs are
    /// supported).
    initial: VariantPosition,
    /// Every move played so far, in order.
    move_stack: Vec<Move>,
    /// Which color sits at the bottom of the rendered board.
    orientation: Color,
}

/// The authoritative game position and move stack.
///
/// All mutations go through this model; anything derived from the
/// position (move list, material difference) subscribes to
/// [`e_board_model_updated`](Self::e_board_model_updated) and rebuilds
/// from the accessors. The state borrow is always released before
/// listeners run, so listeners are free to call any accessor.
pub struct BoardModel {
    state: RefCell<BoardState>,
    variant: Variant,
    /// Fired after every successful mutation (move, takeback,
    /// orientation change).
    pub e_board_model_updated: Event,
}

impl BoardModel {
    /// Creates a board for the given variant, starting from `fen` if
    /// provided or the variant's default starting position otherwise.
    pub fn new(
        variant: Variant,
        fen: Option<&str>,
        orientation: Color,
    ) -> Result<Self, ModelError> {
        let position = match fen {
            Some(fen_str) => {
                let fen: Fen = fen_str
                    .parse()
                    .map_err(|e| ModelError::InvalidFen(format!("{fen_str}: {e}")))?;
                VariantPosition::from_setup(variant, fen.into_setup(), CastlingMode::Standard)
                    .map_err(|e| ModelError::InvalidPosition(e.to_string()))?
            }
            None => VariantPosition::new(variant),
        };

        Ok(BoardModel {
            state: RefCell::new(BoardState {
                initial: position.clone(),
                position,
                move_stack: Vec::new(),
                orientation,
            }),
            variant,
            e_board_model_updated: Event::new(),
        })
    }

    /// Creates a standard-chess board from the default starting position.
    pub fn standard() -> Self {
        // The default start is always a valid position.
        Self::new(Variant::Chess, None, Color::White)
            .unwrap_or_else(|_| unreachable!("default starting position is valid"))
    }

    /// Applies a move to the board and notifies listeners.
    ///
    /// Fails with [`ModelError::IllegalMove`] if the move is not legal in
    /// the current position; the board is unchanged and no notification
    /// fires in that case. Errors returned by listeners propagate to the
    /// caller.
    pub fn push(&self, m: Move) -> Result<(), ModelError> {
        {
            let mut state = self.state.borrow_mut();
            if !state.position.is_legal(&m) {
                warn!(mv = %m, "rejected illegal move");
                return Err(ModelError::IllegalMove(m.to_string()));
            }
            state.position.play_unchecked(&m);
            debug!(mv = %m, ply = state.move_stack.len(), "move applied");
            state.move_stack.push(m);
        }
        self.e_board_model_updated.notify()
    }

    /// Parses a SAN move string against the current position and applies
    /// it.
    pub fn push_san(&self, san_str: &str) -> Result<(), ModelError> {
        let m = {
            let state = self.state.borrow();
            let san = San::from_ascii(san_str.as_bytes())
                .map_err(|e| ModelError::InvalidSan(format!("{san_str}: {e}")))?;
            san.to_move(&state.position)
                .map_err(|e| ModelError::InvalidSan(format!("{san_str}: {e}")))?
        };
        self.push(m)
    }

    /// Takes back the most recent move and notifies listeners.
    ///
    /// The position is rebuilt by replaying the shortened move stack
    /// from the initial position, so variant side state (remaining
    /// checks, pockets) stays consistent.
    pub fn takeback(&self) -> Result<(), ModelError> {
        {
            let mut state = self.state.borrow_mut();
            if state.move_stack.pop().is_none() {
                return Err(ModelError::EmptyMoveStack);
            }
            let mut position = state.initial.clone();
            for m in &state.move_stack {
                position.play_unchecked(m);
            }
            debug!(plies = state.move_stack.len(), "takeback");
            state.position = position;
        }
        self.e_board_model_updated.notify()
    }

    /// Returns a copy of the move stack.
    pub fn move_stack(&self) -> Vec<Move> {
        self.state.borrow().move_stack.clone()
    }

    /// Returns the number of plies played.
    pub fn ply_count(&self) -> usize {
        self.state.borrow().move_stack.len()
    }

    /// Returns a snapshot of the current position.
    pub fn position(&self) -> VariantPosition {
        self.state.borrow().position.clone()
    }

    /// Returns a snapshot of the game's starting position.
    pub fn initial_position(&self) -> VariantPosition {
        self.state.borrow().initial.clone()
    }

    /// Returns a copy of the current piece placement.
    pub fn piece_placement(&self) -> Board {
        self.state.borrow().position.board().clone()
    }

    /// Returns the variant this game is played under.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.state.borrow().position.turn()
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.state.borrow().position.is_check()
    }

    /// Returns the current position as a FEN string.
    pub fn fen(&self) -> String {
        let state = self.state.borrow();
        Fen::from_position(state.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Returns how many more checks `color` must deliver to win at
    /// three-check.
    ///
    /// Read from the position itself, so counts encoded in a custom
    /// starting FEN (the `1+3` field) are honored and takebacks restore
    /// them. Returns the full count for variants without check scoring.
    pub fn remaining_checks(&self, color: Color) -> u32 {
        match self.state.borrow().position.remaining_checks() {
            Some(checks) => u32::from(match color {
                Color::White => checks.white,
                Color::Black => checks.black,
            }),
            None => CHECKS_TO_WIN,
        }
    }

    /// Returns which color is rendered at the bottom of the board.
    pub fn orientation(&self) -> Color {
        self.state.borrow().orientation
    }

    /// Sets the board orientation and notifies listeners.
    pub fn set_orientation(&self, color: Color) -> Result<(), ModelError> {
        self.state.borrow_mut().orientation = color;
        self.e_board_model_updated.notify()
    }
}

impl std::fmt::Debug for BoardModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardModel")
            .field("variant", &variant_display_name(self.variant))
            .field("fen", &self.fen())
            .field("plies", &self.ply_count())
            .finish()
    }
}
