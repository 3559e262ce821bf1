/// Queen move generation
/// Rook and Bishop sliding combined
use crate::board::{Board, Square};
use crate::pieces::{generate_sliding_moves, DIAGONAL, ORTHOGONAL};

pub struct QueenMoves;

impl QueenMoves {
    pub fn generate_moves(board: &Board, from: Square) -> Vec<Square> {
        let mut moves = Vec::with_capacity(27);

        if board.get_piece(from).is_none() {
            return moves;
        }

        generate_sliding_moves(&mut moves, board, from, &ORTHOGONAL);
        generate_sliding_moves(&mut moves, board, from, &DIAGONAL);

        moves
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
