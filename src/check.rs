// Check detection
// Attack queries over a board snapshot, plus the scoped make/unmake used by
// every "what if this move were played" question.

use crate::board::{Board, Color, Piece, PieceType, Square};
use crate::pieces::possible_moves;

// =============================================================================
// Scoped Simulation
// =============================================================================

/// A move played on a board for the lifetime of this value.
///
/// The move is undone on drop, so the board is restored even when the caller
/// returns early or panics. An en passant capture also lifts the captured
/// pawn off its square while the simulation lives.
pub struct Simulation<'a> {
    board: &'a mut Board,
    from: Square,
    to: Square,
    moved: Option<Piece>,
    captured: Option<Piece>,
    en_passant_victim: Option<(Square, Piece)>,
}

impl<'a> Simulation<'a> {
    /// Make the move from `from` to `to` on `board`
    pub fn new(board: &'a mut Board, from: Square, to: Square) -> Self {
        let moved = board.get_piece(from);

        let mut en_passant_victim = None;
        if let Some(pawn) = moved {
            // Diagonal pawn step onto an empty square
            if pawn.piece_type == PieceType::Pawn && from.1 != to.1 && board.is_empty(to) {
                let victim_square = (from.0, to.1);
                if let Some(victim) = board.get_piece(victim_square) {
                    if victim.is(PieceType::Pawn, pawn.color.opposite()) {
                        board.set_piece(victim_square, None);
                        en_passant_victim = Some((victim_square, victim));
                    }
                }
            }
        }

        let captured = board.move_piece(from, to);

        Simulation {
            board,
            from,
            to,
            moved,
            captured,
            en_passant_victim,
        }
    }

    /// The board with the move applied
    pub fn board(&self) -> &Board {
        &*self.board
    }

    /// Evaluate `f` on the simulated position, then undo the move
    pub fn run<T>(self, f: impl FnOnce(&Board) -> T) -> T {
        f(&*self.board)
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.set_piece(self.to, self.captured);
        self.board.set_piece(self.from, self.moved);
        if let Some((square, pawn)) = self.en_passant_victim {
            self.board.set_piece(square, Some(pawn));
        }
    }
}

// =============================================================================
// Check Oracle
// =============================================================================

/// Check if a square is attacked by any non-king piece of the given color.
/// Kings are left out: they cannot give check, and their own move generation
/// asks this question.
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .filter(|(_, piece)| piece.piece_type != PieceType::King)
        .any(|(from, _)| possible_moves(board, from).contains(&square))
}

/// Check if the King of the given color is in check
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king_square) => is_square_attacked(board, king_square, color.opposite()),
        None => false, // No king found (shouldn't happen in valid game)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
