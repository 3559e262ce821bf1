/// Knight move generation
/// Jumps in an L-shape (2+1); intervening pieces do not block it
use crate::board::{offset, Board, Square};

pub struct KnightMoves;

/// Knight offsets: (±2, ±1) and (±1, ±2)
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    ( 1, -2), ( 1, 2), ( 2, -1), ( 2, 1),
];

impl KnightMoves {
    /// Every on-board L square, occupied or not
    pub fn generate_moves(board: &Board, from: Square) -> Vec<Square> {
        if board.get_piece(from).is_none() {
            return Vec::new();
        }

        KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| offset(from, dr, dc))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
