//! Move history derivation.
//!
//! [`MoveListModel`] turns the board's move stack into display-ready SAN
//! with per-ply metadata. It never trusts its own previous output: every
//! update replays the whole stack on a private board cloned from the
//! game's initial position, so the list is deterministic no matter how
//! many times the board changed in between.

use client_board::BoardModel;
use client_core::{Event, ModelError};
use shakmaty::san::SanPlus;
use shakmaty::variant::VariantPosition;
use shakmaty::{Color, Move, Position, Role};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// One ply of the move list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveListEntry {
    /// The side that made the move.
    pub turn: Color,
    /// The move in SAN, including check/mate suffixes.
    pub san: String,
    /// The piece that moved, or the dropped piece for a drop move.
    pub role: Role,
    /// Lowercase letter for the piece ('p', 'n', 'b', 'r', 'q', 'k').
    pub symbol: char,
    /// True for castling moves.
    pub is_castling: bool,
    /// True for pawn promotions.
    pub is_promotion: bool,
}

/// Derives the move list from the board's move stack.
///
/// Entry *i* always describes ply *i* relative to the game's starting
/// position, and after every update the list length equals the move stack
/// length. Subscribe to
/// [`e_move_list_model_updated`](Self::e_move_list_model_updated) to be
/// told when to re-read [`move_list_data`](Self::move_list_data).
pub struct MoveListModel {
    board: Rc<BoardModel>,
    /// The game's starting position; the replay board is cloned from
    /// this on every update.
    initial: VariantPosition,
    entries: RefCell<Vec<MoveListEntry>>,
    /// Fired after every rebuild.
    pub e_move_list_model_updated: Event,
}

impl MoveListModel {
    /// Creates the model, subscribes it to the board's update event, and
    /// runs one synchronous update so the list is valid immediately.
    pub fn new(board: &Rc<BoardModel>) -> Result<Rc<Self>, ModelError> {
        let model = Rc::new(MoveListModel {
            board: Rc::clone(board),
            initial: board.initial_position(),
            entries: RefCell::new(Vec::new()),
            e_move_list_model_updated: Event::new(),
        });

        let weak = Rc::downgrade(&model);
        board.e_board_model_updated.add_listener(move || match weak.upgrade() {
            Some(model) => model.update(),
            None => Ok(()),
        });

        model.update()?;
        Ok(model)
    }

    /// Rebuilds the move list from the board's current move stack and
    /// notifies listeners.
    ///
    /// Fails with [`ModelError::InvalidMove`] if a non-drop move in the
    /// stack has no piece on its origin square, which cannot happen with
    /// a well-behaved board model.
    pub fn update(&self) -> Result<(), ModelError> {
        {
            let mut entries = self.entries.borrow_mut();
            entries.clear();

            let mut replay = self.initial.clone();
            for (ply, m) in self.board.move_stack().into_iter().enumerate() {
                let turn = replay.turn();
                let role = match &m {
                    // A drop places a piece from the reserve; there is
                    // nothing on an origin square to look up.
                    Move::Put { role, .. } => *role,
                    _ => {
                        let from = m.from().ok_or(ModelError::InvalidMove { ply })?;
                        replay
                            .board()
                            .role_at(from)
                            .ok_or(ModelError::InvalidMove { ply })?
                    }
                };
                let is_castling = matches!(m, Move::Castle { .. });
                let is_promotion = m.promotion().is_some();

                // SAN depends on the pre-move position (disambiguation,
                // check suffix), so derive it and advance the replay
                // board in one step.
                let san = SanPlus::from_move_and_play_unchecked(&mut replay, &m).to_string();

                entries.push(MoveListEntry {
                    turn,
                    san,
                    role,
                    symbol: role.char(),
                    is_castling,
                    is_promotion,
                });
            }
            debug!(plies = entries.len(), "move list rebuilt");
        }
        self.e_move_list_model_updated.notify()
    }

    /// Returns a copy of the derived move list.
    pub fn move_list_data(&self) -> Vec<MoveListEntry> {
        self.entries.borrow().clone()
    }

    /// Returns the number of plies in the list.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if no moves have been played.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::variant::Variant;

    fn standard_board() -> Rc<BoardModel> {
        Rc::new(BoardModel::standard())
    }

    #[test]
    fn empty_game_has_empty_move_list() {
        let board = standard_board();
        let model = MoveListModel::new(&board).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn opening_moves_produce_san_and_metadata() {
        let board = standard_board();
        let model = MoveListModel::new(&board).unwrap();

        for san in ["e4", "e5", "Nf3"] {
            board.push_san(san).unwrap();
        }

        let data = model.move_list_data();
        assert_eq!(data.len(), 3);
        assert_eq!(
            data[0],
            MoveListEntry {
                turn: Color::White,
                san: "e4".to_string(),
                role: Role::Pawn,
                symbol: 'p',
                is_castling: false,
                is_promotion: false,
            }
        );
        assert_eq!(data[1].turn, Color::Black);
        assert_eq!(data[1].san, "e5");
        assert_eq!(data[1].role, Role::Pawn);
        assert_eq!(data[2].turn, Color::White);
        assert_eq!(data[2].san, "Nf3");
        assert_eq!(data[2].role, Role::Knight);
        assert_eq!(data[2].symbol, 'n');
    }

    #[test]
    fn castling_is_flagged() {
        let board = Rc::new(
            BoardModel::new(Variant::Chess, Some("4k3/8/8/8/8/8/8/4K2R w K - 0 1"), Color::White)
                .unwrap(),
        );
        let model = MoveListModel::new(&board).unwrap();

        board.push_san("O-O").unwrap();

        let data = model.move_list_data();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].san, "O-O");
        assert_eq!(data[0].role, Role::King);
        assert!(data[0].is_castling);
        assert!(!data[0].is_promotion);
    }

    #[test]
    fn promotion_is_flagged() {
        let board = Rc::new(
            BoardModel::new(Variant::Chess, Some("8/P4k2/8/8/8/8/8/4K3 w - - 0 1"), Color::White)
                .unwrap(),
        );
        let model = MoveListModel::new(&board).unwrap();

        board.push_san("a8=Q").unwrap();

        let data = model.move_list_data();
        assert_eq!(data[0].san, "a8=Q");
        assert_eq!(data[0].role, Role::Pawn);
        assert!(data[0].is_promotion);
        assert!(!data[0].is_castling);
    }

    #[test]
    fn update_is_deterministic() {
        let board = standard_board();
        let model = MoveListModel::new(&board).unwrap();
        for san in ["d4", "d5", "c4", "e6", "Nc3"] {
            board.push_san(san).unwrap();
        }

        let first = model.move_list_data();
        model.update().unwrap();
        assert_eq!(model.move_list_data(), first);
    }

    #[test]
    fn new_move_appends_without_rewriting_history() {
        let board = standard_board();
        let model = MoveListModel::new(&board).unwrap();
        for san in ["e4", "c5", "Nf3"] {
            board.push_san(san).unwrap();
        }

        let before = model.move_list_data();
        board.push_san("d6").unwrap();
        let after = model.move_list_data();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after[3].san, "d6");
    }

    #[test]
    fn takeback_shrinks_the_list() {
        let board = standard_board();
        let model = MoveListModel::new(&board).unwrap();
        board.push_san("e4").unwrap();
        board.push_san("e5").unwrap();

        board.takeback().unwrap();
        let data = model.move_list_data();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].san, "e4");
    }

    #[test]
    fn check_suffix_appears_in_san() {
        let board = standard_board();
        let model = MoveListModel::new(&board).unwrap();
        // Scholar's mate: 1.e4 e5 2.Qh5 Nc6 3.Bc4 Nf6 4.Qxf7#
        for san in ["e4", "e5", "Qh5", "Nc6", "Bc4", "Nf6", "Qxf7"] {
            board.push_san(san).unwrap();
        }

        let data = model.move_list_data();
        assert_eq!(data[6].san, "Qxf7#");
    }
}
