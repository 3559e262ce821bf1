/// Rook move generation
/// Moves horizontally and vertically (orthogonally)
use crate::board::{Board, Square};
use crate::pieces::{generate_sliding_moves, ORTHOGONAL};

pub struct RookMoves;

impl RookMoves {
    /// Generate all pseudo-legal moves for a Rook
    pub fn generate_moves(board: &Board, from: Square) -> Vec<Square> {
        let mut moves = Vec::with_capacity(14);

        if board.get_piece(from).is_none() {
            return moves; // No piece at 'from', return empty
        }

        generate_sliding_moves(&mut moves, board, from, &ORTHOGONAL);

        moves
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
