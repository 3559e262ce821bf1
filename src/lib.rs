// Chess Rules Library
// Board representation using Mailbox (8x8 array) approach
// Move generation, check detection and the game state machine for two players

pub mod board;
pub mod check;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod legality;
pub mod pieces;

pub use board::{Board, Color, Piece, PieceType, Side, Square};
pub use config::GameConfig;
pub use error::ChessError;
pub use game::{GameResult, GameState, MoveOutcome, MoveReport, Phase, Promotion, PromotionChooser};
