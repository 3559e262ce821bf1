/// Bishop move generation
/// Slides along the four diagonals
use crate::board::{Board, Square};
use crate::pieces::{generate_sliding_moves, DIAGONAL};

pub struct BishopMoves;

impl BishopMoves {
    pub fn generate_moves(board: &Board, from: Square) -> Vec<Square> {
        let mut moves = Vec::with_capacity(13);

        if board.get_piece(from).is_none() {
            return moves;
        }

        generate_sliding_moves(&mut moves, board, from, &DIAGONAL);

        moves
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
