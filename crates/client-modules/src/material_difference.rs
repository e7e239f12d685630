//! Captured-material accounting.
//!
//! [`MaterialDifferenceModel`] derives, from the current piece placement
//! alone, which pieces each side has won and a single zero-sum advantage
//! score. Counting starts from the symmetric full army: a surplus of some
//! piece kind for one side is exactly a deficit for the other, so a piece
//! found on the board first cancels any count recorded against its owner
//! before accruing to its owner's side.

use client_board::{color_index, BoardModel};
use client_core::{Event, ModelError};
use shakmaty::variant::Variant;
use shakmaty::{Color, Role};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Fixed piece values, indexed by [`role_index`].
const PIECE_VALUES: [u32; 6] = [1, 3, 3, 5, 9, 0];

/// Returns the table index for a piece kind (pawn 0 .. king 5).
#[inline]
fn role_index(role: Role) -> usize {
    match role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    }
}

/// Derived material state, fully recomputed on every update.
#[derive(Default)]
struct MaterialState {
    /// Captured-piece counts indexed by (color, role). For any role, at
    /// most one color's count is non-zero.
    difference: [[u8; 6]; 2],
    /// Net advantage per color. At most one side is non-zero.
    score: [u32; 2],
}

/// Derives captured material and the net advantage score from the board.
///
/// The model recomputes from scratch on every board update, except for
/// the horde variant where material counting is meaningless (one side
/// starts with an asymmetric army): there the values freeze and no
/// update event fires. For three-check the king slot is repurposed to
/// show checks delivered, since kings are never captured.
pub struct MaterialDifferenceModel {
    board: Rc<BoardModel>,
    state: RefCell<MaterialState>,
    /// Fired after every recomputation.
    pub e_material_difference_model_updated: Event,
}

impl MaterialDifferenceModel {
    /// Creates the model, subscribes it to the board's update event, and
    /// runs one synchronous update.
    pub fn new(board: &Rc<BoardModel>) -> Result<Rc<Self>, ModelError> {
        let model = Rc::new(MaterialDifferenceModel {
            board: Rc::clone(board),
            state: RefCell::new(MaterialState::default()),
            e_material_difference_model_updated: Event::new(),
        });

        let weak = Rc::downgrade(&model);
        board.e_board_model_updated.add_listener(move || match weak.upgrade() {
            Some(model) => model.update(),
            None => Ok(()),
        });

        model.update()?;
        Ok(model)
    }

    /// Recomputes the difference tables and score from the current piece
    /// placement, then notifies listeners.
    pub fn update(&self) -> Result<(), ModelError> {
        let variant = self.board.variant();
        if variant == Variant::Horde {
            // Deliberate freeze, not a bug: horde armies are asymmetric,
            // so captured-count bookkeeping has no meaning. Listeners
            // are not notified either.
            return Ok(());
        }

        {
            let mut state = self.state.borrow_mut();
            *state = MaterialState::default();

            let placement = self.board.piece_placement();
            for square in placement.occupied() {
                if let Some(piece) = placement.piece_at(square) {
                    let owner = color_index(piece.color);
                    let opponent = color_index(!piece.color);
                    let kind = role_index(piece.role);

                    // Cancellation: this piece first pays off any count
                    // recorded against its owner before counting as a
                    // surplus for its owner.
                    if state.difference[opponent][kind] > 0 {
                        state.difference[opponent][kind] -= 1;
                    } else {
                        state.difference[owner][kind] += 1;
                    }

                    // Normalize the score after every piece: the side
                    // with the strictly higher total keeps the
                    // difference, the other side drops to zero.
                    state.score[owner] += PIECE_VALUES[kind];
                    let advantage = if state.score[0] > state.score[1] { 0 } else { 1 };
                    state.score[advantage] = state.score[0].abs_diff(state.score[1]);
                    state.score[1 - advantage] = 0;
                }
            }

            if variant == Variant::ThreeCheck {
                // Kings are never captured; show checks delivered in the
                // king slot instead.
                for color in [Color::White, Color::Black] {
                    state.difference[color_index(color)][role_index(Role::King)] =
                        (3 - self.board.remaining_checks(color)) as u8;
                }
            }

            debug!(
                white_score = state.score[0],
                black_score = state.score[1],
                "material difference recomputed"
            );
        }
        self.e_material_difference_model_updated.notify()
    }

    /// Returns the captured-piece counts for `color`, indexed pawn,
    /// knight, bishop, rook, queen, king.
    pub fn material_difference(&self, color: Color) -> [u8; 6] {
        self.state.borrow().difference[color_index(color)]
    }

    /// Returns the captured count of one piece kind for `color`.
    pub fn count(&self, color: Color, role: Role) -> u8 {
        self.state.borrow().difference[color_index(color)][role_index(role)]
    }

    /// Returns the net advantage score for `color`. Zero unless `color`
    /// is materially ahead.
    pub fn score(&self, color: Color) -> u32 {
        self.state.borrow().score[color_index(color)]
    }

    /// Returns the board orientation; passthrough, not derived state.
    pub fn board_orientation(&self) -> Color {
        self.board.orientation()
    }
}
