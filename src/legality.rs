// Legality filter
// Narrows pseudo-legal moves to the ones that keep the mover's own king safe

use crate::board::{is_valid, Board, Color, PieceType, Square};
use crate::check::{is_in_check, is_square_attacked, Simulation};
use crate::pieces::king::KingMoves;
use crate::pieces::possible_moves;

/// Drop candidates that land on a friendly piece or leave the mover's king
/// attacked.
///
/// `king` is where the mover's king stands before the move; `None` means the
/// side has no king on this board and only the friendly-piece rule applies.
/// Each candidate is played on a scratch copy and undone before the next
/// one, so `board` itself is never touched.
pub fn remove_moves_causing_check(
    board: &Board,
    from: Square,
    king: Option<Square>,
    candidates: Vec<Square>,
) -> Vec<Square> {
    let piece = match board.get_piece(from) {
        Some(p) => p,
        None => return Vec::new(),
    };
    let enemy = piece.color.opposite();
    let mut scratch = *board;

    candidates
        .into_iter()
        .filter(|&to| is_valid(to) && to != from)
        .filter(|&to| board.get_piece(to).map_or(true, |p| p.color != piece.color))
        .filter(|&to| {
            let king_square = if piece.piece_type == PieceType::King {
                Some(to)
            } else {
                king
            };
            match king_square {
                Some(square) => !Simulation::new(&mut scratch, from, to)
                    .run(|b| is_square_attacked(b, square, enemy)),
                None => true,
            }
        })
        .collect()
}

/// Legal destinations for the piece on `from`, locating its king by scanning
pub fn legal_moves_from(board: &Board, from: Square) -> Vec<Square> {
    let piece = match board.get_piece(from) {
        Some(p) => p,
        None => return Vec::new(),
    };
    let king = board.find_king(piece.color);
    remove_moves_causing_check(board, from, king, possible_moves(board, from))
}

/// Whether a king move from `from` to `to` is a castle whose passed-through
/// square is attacked.
///
/// The king is stood on the passed square first: pawns only list a diagonal
/// when something stands on it.
pub fn castles_through_attack(board: &Board, from: Square, to: Square) -> bool {
    let king = match board.get_piece(from) {
        Some(p) if p.piece_type == PieceType::King => p,
        _ => return false,
    };
    if from.0 != to.0 || from.1.abs_diff(to.1) != 2 {
        return false;
    }
    let passed = (from.0, (from.1 + to.1) / 2);
    let enemy = king.color.opposite();
    let mut scratch = *board;
    Simulation::new(&mut scratch, from, passed).run(|b| is_square_attacked(b, passed, enemy))
}

/// Whether any piece of `color` has at least one legal move
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    let king = board.find_king(color);
    board.pieces_of(color).any(|(from, _)| {
        !remove_moves_causing_check(board, from, king, possible_moves(board, from)).is_empty()
    })
}

/// Checkmate: in check, the king has nowhere to step, and no friendly move
/// (king included) gets out of check
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    let king = match board.find_king(color) {
        Some(square) => square,
        None => return false,
    };

    is_in_check(board, color)
        && KingMoves::generate_moves(board, king).is_empty()
        && !has_legal_move(board, color)
}

/// Stalemate for one side: not in check and no legal move anywhere
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_in_check(board, color) && !has_legal_move(board, color)
}

// =============================================================================
// Unit Tests
// =============================================================================
