// Pseudo-legal move generation
// One unit struct per piece type; `possible_moves` dispatches on the type tag.
// Nothing here checks whether the mover's own king ends up attacked:
// that filtering lives in `legality`.

pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;

use crate::board::{offset, Board, PieceType, Square};

use bishop::BishopMoves;
use king::KingMoves;
use knight::KnightMoves;
use pawn::PawnMoves;
use queen::QueenMoves;
use rook::RookMoves;

/// 4 orthogonal directions: up, down, left, right
pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 4 diagonal directions
pub const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Pseudo-legal destinations for whatever piece stands on `from`.
/// Empty when the square is empty.
pub fn possible_moves(board: &Board, from: Square) -> Vec<Square> {
    let piece = match board.get_piece(from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    match piece.piece_type {
        PieceType::King => KingMoves::generate_moves(board, from),
        PieceType::Queen => QueenMoves::generate_moves(board, from),
        PieceType::Rook => RookMoves::generate_moves(board, from),
        PieceType::Bishop => BishopMoves::generate_moves(board, from),
        PieceType::Knight => KnightMoves::generate_moves(board, from),
        PieceType::Pawn => PawnMoves::generate_moves(board, from),
    }
}

/// Helper: slide along each direction until the edge or the first piece.
/// The first occupied square is included whatever its color; own-color
/// squares are dropped later by the legality filter.
pub(crate) fn generate_sliding_moves(
    moves: &mut Vec<Square>,
    board: &Board,
    from: Square,
    directions: &[(i8, i8)],
) {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(to) = offset(current, dr, dc) {
            moves.push(to);
            if board.get_piece(to).is_some() {
                break; // Blocked by a piece, stop this direction
            }
            current = to;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
