// Board representation and piece data
// Using Mailbox (8x8 array) approach: the grid is the single owner of every piece

use serde::{Deserialize, Serialize};

use crate::error::ChessError;

// =============================================================================
// Type Definitions
// =============================================================================

/// Square coordinate (row, col) where 0-7
/// Row 0 = rank 8 (black's back rank)
/// Row 7 = rank 1 (white's back rank)
/// Col 0 = file a, Col 7 = file h
pub type Square = (u8, u8);

/// Whether both coordinates of a square lie on the 8x8 board
pub fn is_valid(square: Square) -> bool {
    square.0 < 8 && square.1 < 8
}

/// Step from a square by (dr, dc), returning None when the result leaves the board
pub fn offset(square: Square, dr: i8, dc: i8) -> Option<Square> {
    let row = square.0 as i8 + dr;
    let col = square.1 as i8 + dc;
    if (0..8).contains(&row) && (0..8).contains(&col) {
        Some((row as u8, col as u8))
    } else {
        None
    }
}

/// Convert a square to its file/rank name (e.g., (7, 4) -> "e1")
pub fn square_name(square: Square) -> String {
    let col = (b'a' + square.1) as char;
    let row = (b'8' - square.0) as char;
    format!("{}{}", col, row)
}

/// Parse a file/rank name to a square (e.g., "e1" -> (7, 4))
pub fn parse_square(s: &str) -> Option<Square> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let col = bytes[0].to_ascii_lowercase().checked_sub(b'a')?;
    let row = b'8'.checked_sub(bytes[1])?;
    if col > 7 || row > 7 {
        return None;
    }
    Some((row, col))
}

/// Color of a piece or side to move
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row direction pawns of this color advance in
    /// White moves toward row 0, Black toward row 7
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Back rank holding this color's king and rooks at the start
    pub fn home_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank this color's pawns start on
    pub fn pawn_row(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Rank where this color's pawns promote
    pub fn promotion_row(&self) -> u8 {
        self.opposite().home_row()
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Type of a chess piece
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    /// Uppercase letter used in diagrams and FEN
    pub fn symbol(&self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Knight => 'N',
            PieceType::Pawn => 'P',
        }
    }

    fn from_symbol(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceType::King),
            'Q' => Some(PieceType::Queen),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }
}

/// Side of a pawn on which an en passant capture is available
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Toward column - 1
    Left,
    /// Toward column + 1
    Right,
}

impl Side {
    pub fn column_delta(&self) -> i8 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }
}

/// A chess piece with type, color and the flags the special moves depend on
///
/// The piece's square is its position in the grid, so it can never disagree
/// with where the board holds it.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    /// Meaningful for King, Rook (castling) and Pawn (double step)
    pub has_moved: bool,
    /// Pawn only: an adjacent enemy pawn just advanced two squares
    pub en_passant: Option<Side>,
}

impl Piece {
    /// Create a new, unmoved piece
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Piece {
            piece_type,
            color,
            has_moved: false,
            en_passant: None,
        }
    }

    /// Same piece with `has_moved` set
    pub fn moved(mut self) -> Self {
        self.has_moved = true;
        self
    }

    pub fn is(&self, piece_type: PieceType, color: Color) -> bool {
        self.piece_type == piece_type && self.color == color
    }

    fn symbol(&self) -> char {
        let c = self.piece_type.symbol();
        // Lowercase for black pieces
        if self.color == Color::Black {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }
}

// =============================================================================
// Board Structure
// =============================================================================

/// Chess board using Mailbox representation (8x8 array)
///
/// Coordinate system:
/// - squares[0][0] = a8 (top-left from white's perspective)
/// - squares[7][7] = h1 (bottom-right from white's perspective)
/// - squares[row][col] where row = 7 - rank, col = file
///
/// Pieces are plain values, so copying a board is cheap and simulations can
/// run on a scratch copy.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Board {
    /// 8x8 array of squares, each containing an optional piece
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard chess starting position
    pub fn standard() -> Self {
        let mut board = Board::new();
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for color in [Color::White, Color::Black] {
            for (col, piece_type) in back_rank.iter().enumerate() {
                let col = col as u8;
                board.set_piece((color.home_row(), col), Some(Piece::new(*piece_type, color)));
                board.set_piece((color.pawn_row(), col), Some(Piece::new(PieceType::Pawn, color)));
            }
        }

        board
    }

    /// Get the piece at a given square
    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        let (row, col) = square;
        if row < 8 && col < 8 {
            self.squares[row as usize][col as usize]
        } else {
            None
        }
    }

    /// Set a piece at a given square
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        let (row, col) = square;
        if row < 8 && col < 8 {
            self.squares[row as usize][col as usize] = piece;
        }
    }

    /// Get a mutable reference to the piece at a given square
    pub fn piece_mut(&mut self, square: Square) -> Option<&mut Piece> {
        let (row, col) = square;
        if row < 8 && col < 8 {
            self.squares[row as usize][col as usize].as_mut()
        } else {
            None
        }
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get_piece(square).is_none()
    }

    /// Move whatever stands on `from` to `to`, returning the displaced piece.
    /// No validation: legality is decided before this is called.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.get_piece(from);
        let captured = self.get_piece(to);

        self.set_piece(from, None);
        self.set_piece(to, piece);

        captured
    }

    /// Find the position of a King of the given color
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(PieceType::King, color))
            .map(|(square, _)| square)
    }

    /// All occupied squares, row by row
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8u8).flat_map(move |row| {
            (0..8u8).filter_map(move |col| {
                self.squares[row as usize][col as usize].map(|p| ((row, col), p))
            })
        })
    }

    /// All pieces of one color
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Clear the en passant flag on every pawn of the given color
    pub fn clear_en_passant(&mut self, color: Color) {
        for row in self.squares.iter_mut() {
            for piece in row.iter_mut().flatten() {
                if piece.piece_type == PieceType::Pawn && piece.color == color {
                    piece.en_passant = None;
                }
            }
        }
    }

    /// Build a board from the piece-placement field of a FEN string.
    ///
    /// Flags are inferred: kings, rooks and pawns count as unmoved only on
    /// their starting squares. Any fields after the placement are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let placement = fen
            .split_whitespace()
            .next()
            .ok_or_else(|| ChessError::InvalidFen("empty string".to_string()))?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut board = Board::new();
        for (row, rank) in ranks.iter().enumerate() {
            let row = row as u8;
            let mut col: u8 = 0;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col = col
                        .checked_add(skip as u8)
                        .filter(|&n| n <= 8)
                        .ok_or_else(|| {
                            ChessError::InvalidFen(format!("rank {} is too long", 8 - row))
                        })?;
                    continue;
                }
                let piece_type = PieceType::from_symbol(c)
                    .ok_or_else(|| ChessError::InvalidFen(format!("unknown piece '{}'", c)))?;
                if col >= 8 {
                    return Err(ChessError::InvalidFen(format!("rank {} is too long", 8 - row)));
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let mut piece = Piece::new(piece_type, color);
                piece.has_moved = !Self::is_start_square(piece_type, color, (row, col));
                board.set_piece((row, col), Some(piece));
                col += 1;
            }
            if col != 8 {
                return Err(ChessError::InvalidFen(format!(
                    "rank {} has {} files",
                    8 - row,
                    col
                )));
            }
        }

        Ok(board)
    }

    /// Whether a piece of this type could still be on a square it started on
    fn is_start_square(piece_type: PieceType, color: Color, square: Square) -> bool {
        match piece_type {
            PieceType::King => square == (color.home_row(), 4),
            PieceType::Rook => square.0 == color.home_row() && (square.1 == 0 || square.1 == 7),
            PieceType::Pawn => square.0 == color.pawn_row(),
            _ => false,
        }
    }
}

// =============================================================================
// Default Implementation
// =============================================================================

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

// =============================================================================
// Display Implementation (for debugging)
// =============================================================================

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        writeln!(f, "  +-+-+-+-+-+-+-+")?;

        for row in 0..8 {
            let rank = 8 - row; // Convert row to chess rank (8 to 1)
            write!(f, "{} ", rank)?;

            for col in 0..8 {
                let piece_char = match self.squares[row][col] {
                    None => '.',
                    Some(piece) => piece.symbol(),
                };
                write!(f, "{} ", piece_char)?;
            }
            writeln!(f, "| {}", rank)?;
        }

        writeln!(f, "  +-+-+-+-+-+-+-+")?;
        writeln!(f, "  a b c d e f g h")?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
