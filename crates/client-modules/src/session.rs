//! Game session wiring.
//!
//! [`GameSession`] is the composition root for one game: it builds the
//! board from the requested parameters, attaches both derived models, and
//! carries the display metadata (who plays which side). Presenters hold a
//! session and subscribe to the individual model events.

use crate::{MaterialDifferenceModel, MoveListModel};
use client_board::{variant_display_name, BoardModel};
use client_core::{ModelError, PlayerConfig};
use shakmaty::variant::Variant;
use shakmaty::Color;
use std::rc::Rc;
use tracing::info;

/// Parameters collected from the game-setup flow.
#[derive(Debug, Clone)]
pub struct GameParameters {
    /// Variant to play.
    pub variant: Variant,
    /// Custom starting FEN, or `None` for the variant's default start.
    pub fen: Option<String>,
    /// Which side the human player takes.
    pub player_color: Color,
    /// Engine strength level, shown in the opponent's display name.
    pub engine_level: u8,
}

impl Default for GameParameters {
    fn default() -> Self {
        GameParameters {
            variant: Variant::Chess,
            fen: None,
            player_color: Color::White,
            engine_level: 1,
        }
    }
}

/// Display metadata for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMetadata {
    /// Variant display name (Lichess naming).
    pub variant: &'static str,
    /// The human player's side.
    pub player_color: Color,
    /// Display name of the white player.
    pub white_name: String,
    /// Display name of the black player.
    pub black_name: String,
}

/// One game's board plus its derived models.
pub struct GameSession {
    board: Rc<BoardModel>,
    move_list: Rc<MoveListModel>,
    material_difference: Rc<MaterialDifferenceModel>,
    metadata: GameMetadata,
}

impl GameSession {
    /// Builds the board and both derived models for a new game.
    ///
    /// The board is oriented to the player's side when the config asks
    /// for it, white-side-up otherwise.
    pub fn new(params: GameParameters, config: &PlayerConfig) -> Result<Self, ModelError> {
        let orientation = if config.orient_board_to_player {
            params.player_color
        } else {
            Color::White
        };
        let board = Rc::new(BoardModel::new(
            params.variant,
            params.fen.as_deref(),
            orientation,
        )?);

        let move_list = MoveListModel::new(&board)?;
        let material_difference = MaterialDifferenceModel::new(&board)?;

        let engine_name = format!("Fairy-Stockfish Lvl {}", params.engine_level);
        let (white_name, black_name) = match params.player_color {
            Color::White => (config.player_name.clone(), engine_name),
            Color::Black => (engine_name, config.player_name.clone()),
        };
        let metadata = GameMetadata {
            variant: variant_display_name(params.variant),
            player_color: params.player_color,
            white_name,
            black_name,
        };
        info!(
            variant = metadata.variant,
            white = %metadata.white_name,
            black = %metadata.black_name,
            "game session started"
        );

        Ok(GameSession {
            board,
            move_list,
            material_difference,
            metadata,
        })
    }

    /// Applies a SAN move to the board; all derived models update before
    /// this returns.
    pub fn make_move(&self, san: &str) -> Result<(), ModelError> {
        self.board.push_san(san)
    }

    /// Takes back the last move.
    pub fn takeback(&self) -> Result<(), ModelError> {
        self.board.takeback()
    }

    /// The authoritative board.
    pub fn board(&self) -> &Rc<BoardModel> {
        &self.board
    }

    /// The derived move list.
    pub fn move_list(&self) -> &Rc<MoveListModel> {
        &self.move_list
    }

    /// The derived material difference.
    pub fn material_difference(&self) -> &Rc<MaterialDifferenceModel> {
        &self.material_difference
    }

    /// The game's display metadata.
    pub fn metadata(&self) -> &GameMetadata {
        &self.metadata
    }
}
