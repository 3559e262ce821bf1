use serde::{Deserialize, Serialize};

/// Plies without a pawn move or capture that end the game by default
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Rule switches for one game (plain Rust, loadable from JSON).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Halfmove clock value that ends the game as a fifty-move draw.
    pub fifty_move_plies: u32,

    /// Also refuse castling across an attacked square.
    /// Off by default: castling then only needs an unmoved king that is not
    /// in check, an unmoved rook and an empty path.
    pub strict_castling: bool,
}

impl GameConfig {
    pub fn new(fifty_move_plies: u32, strict_castling: bool) -> Self {
        Self {
            fifty_move_plies,
            strict_castling,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(FIFTY_MOVE_PLIES, false)
    }
}
