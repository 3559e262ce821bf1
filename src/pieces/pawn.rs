/// Pawn move generation
/// Forward pushes, diagonal captures and en passant
use crate::board::{offset, Board, Side, Square};

pub struct PawnMoves;

impl PawnMoves {
    pub fn generate_moves(board: &Board, from: Square) -> Vec<Square> {
        let mut moves = Vec::with_capacity(4);

        let pawn = match board.get_piece(from) {
            Some(p) => p,
            None => return moves, // No piece at 'from', return empty
        };
        let direction = pawn.color.forward();

        // Diagonal captures: an enemy piece, or the en passant side flag
        for side in [Side::Left, Side::Right] {
            if let Some(to) = offset(from, direction, side.column_delta()) {
                let enemy = matches!(board.get_piece(to), Some(p) if p.color != pawn.color);
                if enemy || pawn.en_passant == Some(side) {
                    moves.push(to);
                }
            }
        }

        // Forward: never a capture, and a blocked first step blocks the second
        let one_step = match offset(from, direction, 0) {
            Some(to) if board.is_empty(to) => to,
            _ => return moves,
        };
        moves.push(one_step);

        if !pawn.has_moved {
            if let Some(two_step) = offset(from, 2 * direction, 0) {
                if board.is_empty(two_step) {
                    moves.push(two_step);
                }
            }
        }

        moves
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
