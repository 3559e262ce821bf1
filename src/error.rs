// Domain errors for the rules engine
// Every variant is recoverable: the game state is left exactly as it was

use crate::board::{Color, Square};
use crate::game::GameResult;

/// Reasons a command is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("square ({0}, {1}) is off the board")]
    InvalidSquare(u8, u8),

    #[error("no piece on {0:?}")]
    EmptySquare(Square),

    #[error("piece on {square:?} does not belong to {turn}, the side to move")]
    OutOfTurn { square: Square, turn: Color },

    #[error("illegal move: {from:?} -> {to:?}")]
    IllegalMove { from: Square, to: Square },

    #[error("no piece selected")]
    NothingSelected,

    #[error("game is already over: {0}")]
    GameOver(GameResult),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("invalid FEN string: {0}")]
    InvalidFen(String),

    #[error("invalid promotion piece: {0}")]
    InvalidPromotion(String),
}
