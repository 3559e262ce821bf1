/// Here we define associated movements, captures or
/// other traits with this piece, the almighty King !!
use crate::board::{offset, Board, Color, PieceType, Square};
use crate::check::{is_square_attacked, Simulation};

/// KingMoves is an Unit Struct, namespace to group related functions together.
pub struct KingMoves;

// King's 8 directions
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

impl KingMoves {
    /// Adjacent squares the king can step to without walking into an attack,
    /// plus castling destinations.
    ///
    /// Castling only needs an unmoved king that is not in check, an unmoved
    /// rook in the corner and empty squares between them. Whether the king
    /// crosses an attacked square is not looked at here.
    pub fn generate_moves(board: &Board, from: Square) -> Vec<Square> {
        let mut moves = Vec::new();

        // Get the color of the piece that's moving
        let king = match board.get_piece(from) {
            Some(p) => p,
            None => return moves, // No piece at 'from', return empty
        };
        let enemy = king.color.opposite();

        // Scratch copy for the "would this square be attacked" simulation
        let mut scratch = *board;

        for (dr, dc) in DIRECTIONS {
            // Check 1: Is the square on the board?
            let to = match offset(from, dr, dc) {
                Some(to) => to,
                None => continue,
            };

            // Check 2: Own pieces and the enemy king are never targets
            if let Some(p) = board.get_piece(to) {
                if p.color == king.color || p.piece_type == PieceType::King {
                    continue;
                }
            }

            // Check 3: Kings may never stand next to each other
            if Self::touches_king(board, to, enemy) {
                continue;
            }

            // Check 4: Would the king be attacked there?
            let attacked = Simulation::new(&mut scratch, from, to)
                .run(|b| is_square_attacked(b, to, enemy));
            if !attacked {
                moves.push(to);
            }
        }

        // Castling if it is his first move
        if !king.has_moved
            && from == (king.color.home_row(), 4)
            && !is_square_attacked(board, from, enemy)
        {
            let row = from.0;
            if Self::rook_ready(board, (row, 0), king.color)
                && (1..4).all(|col| board.is_empty((row, col)))
            {
                moves.push((row, 2)); // Queen side
            }
            if Self::rook_ready(board, (row, 7), king.color)
                && (5..7).all(|col| board.is_empty((row, col)))
            {
                moves.push((row, 6)); // King side
            }
        }

        moves // Return all valid squares
    }

    /// Whether `square` is next to the king of `color`
    fn touches_king(board: &Board, square: Square, color: Color) -> bool {
        DIRECTIONS.iter().any(|&(dr, dc)| {
            offset(square, dr, dc)
                .and_then(|sq| board.get_piece(sq))
                .map_or(false, |p| p.is(PieceType::King, color))
        })
    }

    /// An unmoved rook of `color` stands on `square`
    pub(crate) fn rook_ready(board: &Board, square: Square, color: Color) -> bool {
        board
            .get_piece(square)
            .map_or(false, |p| p.is(PieceType::Rook, color) && !p.has_moved)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    #[test]
    fn test_king_moves_center() {
        let mut board = Board::new();
        // Place King on e4 (row 4, col 4)
        board.set_piece((4, 4), Some(Piece::new(PieceType::King, Color::White).moved()));

        let moves = KingMoves::generate_moves(&board, (4, 4));

        // King in center should have 8 moves
        assert_eq!(moves.len(), 8, "King in center should have 8 moves");

        // Check all 8 directions
        assert!(moves.contains(&(3, 3)), "Should move to d5");
        assert!(moves.contains(&(3, 4)), "Should move to e5");
        assert!(moves.contains(&(3, 5)), "Should move to f5");
        assert!(moves.contains(&(4, 3)), "Should move to d4");
        assert!(moves.contains(&(4, 5)), "Should move to f4");
        assert!(moves.contains(&(5, 3)), "Should move to d3");
        assert!(moves.contains(&(5, 4)), "Should move to e3");
        assert!(moves.contains(&(5, 5)), "Should move to f3");
    }

    #[test]
    fn test_king_moves_corner() {
        let mut board = Board::new();
        // Place King on a8 (row 0, col 0)
        board.set_piece((0, 0), Some(Piece::new(PieceType::King, Color::White).moved()));

        let moves = KingMoves::generate_moves(&board, (0, 0));

        // King in corner should have 3 moves
        assert_eq!(moves.len(), 3, "King in corner should have 3 moves");
    }

    #[test]
    fn test_king_blocked_by_own_piece() {
        let mut board = Board::new();
        // Place King on e4
        board.set_piece((4, 4), Some(Piece::new(PieceType::King, Color::White).moved()));
        // Place own piece on e5
        board.set_piece((3, 4), Some(Piece::new(PieceType::Knight, Color::White)));

        let moves = KingMoves::generate_moves(&board, (4, 4));

        // Should NOT include e5 (blocked by own piece)
        assert!(!moves.contains(&(3, 4)), "Should not capture own piece");
        assert_eq!(moves.len(), 7, "King should have 7 moves (one blocked)");
    }

    #[test]
    fn test_king_can_capture_undefended_enemy() {
        let mut board = Board::new();
        board.set_piece((4, 4), Some(Piece::new(PieceType::King, Color::White).moved()));
        // Undefended enemy knight on e5
        board.set_piece((3, 4), Some(Piece::new(PieceType::Knight, Color::Black)));

        let moves = KingMoves::generate_moves(&board, (4, 4));

        assert!(moves.contains(&(3, 4)), "Should be able to capture enemy piece");
    }

    #[test]
    fn test_king_avoids_attacked_squares() {
        let mut board = Board::new();
        board.set_piece((4, 4), Some(Piece::new(PieceType::King, Color::White).moved()));
        // Black rook on the d-file covers d5, d4, d3
        board.set_piece((0, 3), Some(Piece::new(PieceType::Rook, Color::Black)));

        let moves = KingMoves::generate_moves(&board, (4, 4));

        assert!(!moves.contains(&(3, 3)), "d5 is covered by the rook");
        assert!(!moves.contains(&(4, 3)), "d4 is covered by the rook");
        assert!(!moves.contains(&(5, 3)), "d3 is covered by the rook");
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_king_cannot_take_defended_piece() {
        let mut board = Board::new();
        board.set_piece((4, 4), Some(Piece::new(PieceType::King, Color::White).moved()));
        board.set_piece((3, 4), Some(Piece::new(PieceType::Knight, Color::Black)));
        // Rook on e8 defends the knight once the king stands on e5
        board.set_piece((0, 4), Some(Piece::new(PieceType::Rook, Color::Black)));

        let moves = KingMoves::generate_moves(&board, (4, 4));

        assert!(!moves.contains(&(3, 4)), "Knight on e5 is defended");
    }

    #[test]
    fn test_kings_never_adjacent() {
        let mut board = Board::new();
        board.set_piece((4, 4), Some(Piece::new(PieceType::King, Color::White).moved()));
        board.set_piece((2, 4), Some(Piece::new(PieceType::King, Color::Black).moved()));

        let moves = KingMoves::generate_moves(&board, (4, 4));

        assert!(!moves.contains(&(3, 3)), "d5 touches the black king");
        assert!(!moves.contains(&(3, 4)), "e5 touches the black king");
        assert!(!moves.contains(&(3, 5)), "f5 touches the black king");
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_king_generation_leaves_board_untouched() {
        let mut board = Board::new();
        board.set_piece((4, 4), Some(Piece::new(PieceType::King, Color::White).moved()));
        board.set_piece((3, 4), Some(Piece::new(PieceType::Knight, Color::Black)));
        board.set_piece((0, 3), Some(Piece::new(PieceType::Rook, Color::Black)));
        let before = board;

        KingMoves::generate_moves(&board, (4, 4));

        assert_eq!(board, before);
    }

    #[test]
    fn test_castling_both_sides() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R").expect("FEN should parse");

        let moves = KingMoves::generate_moves(&board, (7, 4));

        assert!(moves.contains(&(7, 6)), "King side castle should be listed");
        assert!(moves.contains(&(7, 2)), "Queen side castle should be listed");
    }

    #[test]
    fn test_castling_needs_empty_path_and_unmoved_rook() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/RN2K2R").expect("FEN should parse");
        if let Some(rook) = board.piece_mut((7, 7)) {
            rook.has_moved = true;
        }

        let moves = KingMoves::generate_moves(&board, (7, 4));

        assert!(!moves.contains(&(7, 2)), "Knight on b1 blocks the queen side");
        assert!(!moves.contains(&(7, 6)), "Moved rook cannot castle");
    }

    #[test]
    fn test_no_castling_out_of_check() {
        // Black rook on e-file gives check
        let board = Board::from_fen("4r2k/8/8/8/8/8/8/4K2R").expect("FEN should parse");

        let moves = KingMoves::generate_moves(&board, (7, 4));

        assert!(!moves.contains(&(7, 6)), "Cannot castle while in check");
    }

    #[test]
    fn test_castling_through_attacked_square_is_not_checked_here() {
        // Black rook on f8 covers f1, the square the king passes
        let board = Board::from_fen("5r1k/8/8/8/8/8/8/4K2R").expect("FEN should parse");

        let moves = KingMoves::generate_moves(&board, (7, 4));

        assert!(!moves.contains(&(7, 5)), "King may not step onto f1");
        assert!(moves.contains(&(7, 6)), "Castling only looks at occupancy");
    }

    #[test]
    fn test_king_no_piece_returns_empty() {
        let board = Board::new();
        let moves = KingMoves::generate_moves(&board, (4, 4));
        assert!(moves.is_empty(), "No piece at square should return empty moves");
    }
}
