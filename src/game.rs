// Game state machine
// Turn order, move application with its side effects, and terminal outcomes

use serde::{Deserialize, Serialize};

use crate::board::{is_valid, offset, Board, Color, Piece, PieceType, Side, Square};
use crate::check::is_square_attacked;
use crate::config::GameConfig;
use crate::error::ChessError;
use crate::legality::{castles_through_attack, has_legal_move, is_checkmate, remove_moves_causing_check};
use crate::pieces::king::KingMoves;
use crate::pieces::possible_moves;

// =============================================================================
// Type Definitions
// =============================================================================

/// How a finished game ended
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Stalemate,
    FiftyMove,
    /// Dead position: nobody can win
    NormalDraw,
}

impl GameResult {
    pub fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "checkmate, white wins"),
            GameResult::BlackWins => write!(f, "checkmate, black wins"),
            GameResult::Stalemate => write!(f, "stalemate"),
            GameResult::FiftyMove => write!(f, "draw by the fifty-move rule"),
            GameResult::NormalDraw => write!(f, "draw, no possible way to win"),
        }
    }
}

/// Pieces a pawn may become on the last rank
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Promotion {
    Queen,
    Bishop,
    Knight,
    Rook,
}

impl From<Promotion> for PieceType {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => PieceType::Queen,
            Promotion::Bishop => PieceType::Bishop,
            Promotion::Knight => PieceType::Knight,
            Promotion::Rook => PieceType::Rook,
        }
    }
}

impl TryFrom<PieceType> for Promotion {
    type Error = ChessError;

    fn try_from(piece_type: PieceType) -> Result<Self, Self::Error> {
        match piece_type {
            PieceType::Queen => Ok(Promotion::Queen),
            PieceType::Bishop => Ok(Promotion::Bishop),
            PieceType::Knight => Ok(Promotion::Knight),
            PieceType::Rook => Ok(Promotion::Rook),
            other => Err(ChessError::InvalidPromotion(format!("{:?}", other))),
        }
    }
}

impl std::str::FromStr for Promotion {
    type Err = ChessError;

    /// Accepts "q", "queen", "N", "knight", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q" | "queen" => Ok(Promotion::Queen),
            "b" | "bishop" => Ok(Promotion::Bishop),
            "n" | "knight" => Ok(Promotion::Knight),
            "r" | "rook" => Ok(Promotion::Rook),
            _ => Err(ChessError::InvalidPromotion(s.trim().to_string())),
        }
    }
}

/// Decision point for pawn promotion.
///
/// Called synchronously in the middle of a move; the move does not finish
/// until a choice is returned.
pub trait PromotionChooser {
    fn choose_promotion(&mut self, square: Square, color: Color) -> Promotion;
}

impl<F> PromotionChooser for F
where
    F: FnMut(Square, Color) -> Promotion,
{
    fn choose_promotion(&mut self, square: Square, color: Color) -> Promotion {
        self(square, color)
    }
}

/// Where the game is in its turn cycle
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    AwaitingSelection,
    AwaitingDestination(Square),
    GameOver(GameResult),
}

/// What an applied move did, for the caller to animate or announce
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MoveReport {
    pub from: Square,
    pub to: Square,
    /// The piece as it stood before moving
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub en_passant: bool,
    pub castling: bool,
    pub promotion: Option<Promotion>,
}

/// Result of an accepted move
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    Applied(MoveReport),
    GameOver { report: MoveReport, result: GameResult },
}

impl MoveOutcome {
    pub fn report(&self) -> &MoveReport {
        match self {
            MoveOutcome::Applied(report) => report,
            MoveOutcome::GameOver { report, .. } => report,
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        match self {
            MoveOutcome::Applied(_) => None,
            MoveOutcome::GameOver { result, .. } => Some(*result),
        }
    }
}

// =============================================================================
// Game State
// =============================================================================

/// One game: the board, whose turn it is, the halfmove clock and the
/// cached king squares.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    turn: Color,
    /// Plies since the last pawn move or capture
    halfmove_clock: u32,
    /// King squares indexed by `Color::index`, kept in step with every king move
    kings: [Square; 2],
    phase: Phase,
    config: GameConfig,
}

impl GameState {
    /// Standard starting position, White to move
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        GameState {
            board: Board::standard(),
            turn: Color::White,
            halfmove_clock: 0,
            kings: [(7, 4), (0, 4)],
            phase: Phase::AwaitingSelection,
            config,
        }
    }

    /// Start from an arbitrary position. Each side needs exactly one king.
    pub fn from_board(board: Board, turn: Color, config: GameConfig) -> Result<Self, ChessError> {
        let mut kings = [(0, 0); 2];
        for color in [Color::White, Color::Black] {
            let mut found = board
                .pieces_of(color)
                .filter(|(_, p)| p.piece_type == PieceType::King)
                .map(|(square, _)| square);
            match (found.next(), found.next()) {
                (Some(square), None) => kings[color.index()] = square,
                (None, _) => {
                    return Err(ChessError::InvalidPosition(format!("{} has no king", color)))
                }
                (Some(_), Some(_)) => {
                    return Err(ChessError::InvalidPosition(format!(
                        "{} has more than one king",
                        color
                    )))
                }
            }
        }

        Ok(GameState {
            board,
            turn,
            halfmove_clock: 0,
            kings,
            phase: Phase::AwaitingSelection,
            config,
        })
    }

    /// Start from a FEN string: placement, then optionally the active color
    /// and (fifth field) the halfmove clock. Castling and en passant fields
    /// are ignored; those flags are inferred from the placement.
    pub fn from_fen(fen: &str, config: GameConfig) -> Result<Self, ChessError> {
        let board = Board::from_fen(fen)?;
        let fields: Vec<&str> = fen.split_whitespace().collect();

        let turn = match fields.get(1) {
            None | Some(&"w") => Color::White,
            Some(&"b") => Color::Black,
            Some(other) => {
                return Err(ChessError::InvalidFen(format!("bad active color '{}'", other)))
            }
        };

        let mut game = Self::from_board(board, turn, config)?;
        if let Some(clock) = fields.get(4) {
            game.halfmove_clock = clock
                .parse()
                .map_err(|_| ChessError::InvalidFen(format!("bad halfmove clock '{}'", clock)))?;
        }
        Ok(game)
    }

    /// Throw the current game away and start a fresh one with the same config
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Cached square of the king of `color`
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::GameOver(result) => Some(result),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Move queries
    // -------------------------------------------------------------------------

    /// Legal destinations for the piece on `square`.
    /// Empty for an off-board or empty square, or a piece of the side not to move.
    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        match self.board.get_piece(square) {
            Some(piece) if is_valid(square) && piece.color == self.turn => self.moves_for(square),
            _ => Vec::new(),
        }
    }

    /// Legal destinations regardless of whose turn it is
    fn moves_for(&self, from: Square) -> Vec<Square> {
        let piece = match self.board.get_piece(from) {
            Some(p) => p,
            None => return Vec::new(),
        };
        let king = self.king_square(piece.color);
        debug_assert!(
            matches!(self.board.get_piece(king), Some(k) if k.is(PieceType::King, piece.color)),
            "king cache out of step with the board"
        );

        let mut moves =
            remove_moves_causing_check(&self.board, from, Some(king), possible_moves(&self.board, from));
        if self.config.strict_castling && piece.piece_type == PieceType::King {
            moves.retain(|&to| !castles_through_attack(&self.board, from, to));
        }
        moves
    }

    fn color_has_legal_move(&self, color: Color) -> bool {
        if self.config.strict_castling {
            self.board
                .pieces_of(color)
                .any(|(from, _)| !self.moves_for(from).is_empty())
        } else {
            has_legal_move(&self.board, color)
        }
    }

    // -------------------------------------------------------------------------
    // Status queries
    // -------------------------------------------------------------------------

    pub fn is_check(&self, color: Color) -> bool {
        is_square_attacked(&self.board, self.king_square(color), color.opposite())
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        is_checkmate(&self.board, color)
    }

    /// Either side is out of legal moves without being in check
    pub fn is_stalemate(&self) -> bool {
        self.stalemated_king().is_some()
    }

    /// Only the two kings remain, or either side has no legal move while not
    /// in check
    pub fn is_draw(&self) -> bool {
        self.board.pieces().count() == 2 || self.is_stalemate()
    }

    /// Square of a king currently in check, for highlighting
    pub fn checked_king(&self) -> Option<Square> {
        [Color::White, Color::Black]
            .into_iter()
            .find(|&color| self.is_check(color))
            .map(|color| self.king_square(color))
    }

    /// Square of the king whose side cannot move and is not in check
    pub fn stalemated_king(&self) -> Option<Square> {
        [self.turn, self.turn.opposite()]
            .into_iter()
            .find(|&color| !self.is_check(color) && !self.color_has_legal_move(color))
            .map(|color| self.king_square(color))
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Pick the piece to move. Picking another friendly piece while one is
    /// already selected switches the selection.
    pub fn select(&mut self, square: Square) -> Result<Vec<Square>, ChessError> {
        self.check_playable(square)?;
        let moves = self.moves_for(square);
        self.phase = Phase::AwaitingDestination(square);
        Ok(moves)
    }

    pub fn deselect(&mut self) {
        if let Phase::AwaitingDestination(_) = self.phase {
            self.phase = Phase::AwaitingSelection;
        }
    }

    /// Move the selected piece to `to`
    pub fn choose_destination(
        &mut self,
        to: Square,
        chooser: &mut impl PromotionChooser,
    ) -> Result<MoveOutcome, ChessError> {
        match self.phase {
            Phase::AwaitingDestination(from) => self.apply_move(from, to, chooser),
            Phase::GameOver(result) => Err(ChessError::GameOver(result)),
            Phase::AwaitingSelection => Err(ChessError::NothingSelected),
        }
    }

    /// Play a move. A rejected move leaves the game exactly as it was.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        chooser: &mut impl PromotionChooser,
    ) -> Result<MoveOutcome, ChessError> {
        let piece = self.check_playable(from)?;
        if !is_valid(to) {
            return Err(ChessError::InvalidSquare(to.0, to.1));
        }
        if !self.moves_for(from).contains(&to) {
            return Err(ChessError::IllegalMove { from, to });
        }

        let mover = piece.color;
        let target = self.board.get_piece(to);
        let mut report = MoveReport {
            from,
            to,
            piece,
            captured: target,
            en_passant: false,
            castling: false,
            promotion: None,
        };

        // Capturing a king only happens if a position was set up with the
        // side not to move already in check. End the game without touching
        // the board so each side keeps its king.
        if matches!(target, Some(t) if t.piece_type == PieceType::King) {
            return Ok(self.finish(report, GameResult::win_for(mover)));
        }

        // Ask for the promotion piece before anything changes
        if piece.piece_type == PieceType::Pawn && to.0 == mover.promotion_row() {
            report.promotion = Some(chooser.choose_promotion(to, mover));
        }

        // Fifty-move clock
        self.halfmove_clock += 1;
        if piece.piece_type == PieceType::Pawn || target.is_some() {
            self.halfmove_clock = 0;
        }
        let fifty_moves = self.halfmove_clock >= self.config.fifty_move_plies;

        let mut moving = piece;
        match piece.piece_type {
            PieceType::Pawn => self.pawn_side_effects(&mut report),
            PieceType::King => self.king_side_effects(&mut report),
            _ => {}
        }
        if let Some(promotion) = report.promotion {
            moving = Piece::new(promotion.into(), mover);
        }
        if matches!(
            piece.piece_type,
            PieceType::King | PieceType::Rook | PieceType::Pawn
        ) {
            moving.has_moved = true;
        }
        moving.en_passant = None;

        self.board.move_piece(from, to);
        self.board.set_piece(to, Some(moving));
        if piece.piece_type == PieceType::King {
            self.kings[mover.index()] = to;
        }

        // Flags live for one opponent ply; the ones just set sit on enemy pawns
        self.board.clear_en_passant(mover);

        self.turn = mover.opposite();
        self.phase = Phase::AwaitingSelection;

        let result = if fifty_moves {
            Some(GameResult::FiftyMove)
        } else if self.is_checkmate(self.turn) {
            Some(GameResult::win_for(mover))
        } else if self.is_draw() {
            if self.is_stalemate() {
                Some(GameResult::Stalemate)
            } else {
                Some(GameResult::NormalDraw)
            }
        } else {
            None
        };

        Ok(match result {
            Some(result) => self.finish(report, result),
            None => MoveOutcome::Applied(report),
        })
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// The game is running and `square` holds a piece of the side to move
    fn check_playable(&self, square: Square) -> Result<Piece, ChessError> {
        if let Phase::GameOver(result) = self.phase {
            return Err(ChessError::GameOver(result));
        }
        if !is_valid(square) {
            return Err(ChessError::InvalidSquare(square.0, square.1));
        }
        let piece = self
            .board
            .get_piece(square)
            .ok_or(ChessError::EmptySquare(square))?;
        if piece.color != self.turn {
            return Err(ChessError::OutOfTurn {
                square,
                turn: self.turn,
            });
        }
        Ok(piece)
    }

    fn finish(&mut self, report: MoveReport, result: GameResult) -> MoveOutcome {
        self.phase = Phase::GameOver(result);
        MoveOutcome::GameOver { report, result }
    }

    /// En passant capture and granting en passant to neighbours after a double step
    fn pawn_side_effects(&mut self, report: &mut MoveReport) {
        let (from, to, pawn) = (report.from, report.to, report.piece);
        let column_step = to.1 as i8 - from.1 as i8;

        if let Some(side) = pawn.en_passant {
            if report.captured.is_none() && column_step == side.column_delta() {
                // The captured pawn sits beside the origin, one rank behind `to`
                let victim = (from.0, to.1);
                report.captured = self.board.get_piece(victim);
                self.board.set_piece(victim, None);
                report.en_passant = true;
            }
        }

        if !pawn.has_moved && from.0.abs_diff(to.0) == 2 {
            // A neighbour to the left captures toward its right, and vice versa
            for (dc, side) in [(-1, Side::Right), (1, Side::Left)] {
                if let Some(square) = offset(to, 0, dc) {
                    if let Some(neighbour) = self.board.piece_mut(square) {
                        if neighbour.is(PieceType::Pawn, pawn.color.opposite()) {
                            neighbour.en_passant = Some(side);
                        }
                    }
                }
            }
        }
    }

    /// Rook relocation when the king castles
    fn king_side_effects(&mut self, report: &mut MoveReport) {
        let (from, to, king) = (report.from, report.to, report.piece);
        if king.has_moved || from.0 != to.0 || from.1.abs_diff(to.1) != 2 {
            return;
        }

        let (corner, beside) = if to.1 > from.1 { (3, 1) } else { (-4, -1) };
        if let (Some(rook_from), Some(rook_to)) = (offset(from, 0, corner), offset(from, 0, beside)) {
            if KingMoves::rook_ready(&self.board, rook_from, king.color) {
                self.board.move_piece(rook_from, rook_to);
                if let Some(rook) = self.board.piece_mut(rook_to) {
                    rook.has_moved = true;
                }
                report.castling = true;
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
