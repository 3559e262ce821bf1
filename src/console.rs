// Console front end
// A line-based stand-in for the graphical board: it reads commands, calls into
// the rules engine and prints what the engine decided.

use std::io::{self, BufRead, Write};

use crate::board::{parse_square, square_name, Color, Square};
use crate::game::{GameState, MoveOutcome, Promotion, PromotionChooser};

const HELP: &str = "\
commands:
  moves <square>         list legal destinations, e.g. 'moves e2'
  move <from> <to>       play a move, e.g. 'move e2 e4'
  board                  show the board
  status                 show check / draw status
  new                    start a new game
  quit                   leave";

/// Parse "e2 e4" or "e2e4" style input to (from, to) squares
fn parse_move_args(args: &[&str]) -> Option<(Square, Square)> {
    match args {
        [joined] => Some((parse_square(joined.get(0..2)?)?, parse_square(joined.get(2..)?)?)),
        [from, to] => Some((parse_square(from)?, parse_square(to)?)),
        _ => None,
    }
}

fn format_squares(squares: &[Square]) -> String {
    squares
        .iter()
        .map(|&sq| square_name(sq))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Asks the player on the console which piece a pawn becomes.
/// Falls back to a queen when input runs out or the prompt cannot be written.
struct ConsolePromotion<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> ConsolePromotion<'_, R, W> {
    /// Prompt until a valid answer arrives; `Ok(None)` once input runs out
    fn ask(&mut self, square: Square, color: Color) -> io::Result<Option<Promotion>> {
        let mut line = String::new();
        loop {
            write!(
                self.output,
                "{} pawn promotes on {}: queen, bishop, knight or rook? ",
                color,
                square_name(square)
            )?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.parse::<Promotion>() {
                Ok(choice) => return Ok(Some(choice)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }
}

impl<R: BufRead, W: Write> PromotionChooser for ConsolePromotion<'_, R, W> {
    fn choose_promotion(&mut self, square: Square, color: Color) -> Promotion {
        match self.ask(square, color) {
            Ok(Some(choice)) => choice,
            Ok(None) => Promotion::Queen,
            Err(e) => {
                eprintln!("promotion prompt failed ({}), promoting to a queen", e);
                Promotion::Queen
            }
        }
    }
}

/// Main console loop - reads commands from `input` and responds on `output`
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let mut game = GameState::new();
    writeln!(output, "{}", game.board())?;
    writeln!(output, "{}", HELP)?;

    let mut line = String::new();
    loop {
        write!(output, "{}> ", game.turn())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "moves" => {
                let square = match parts.get(1).and_then(|s| parse_square(s)) {
                    Some(sq) => sq,
                    None => {
                        writeln!(output, "usage: moves <square>")?;
                        continue;
                    }
                };
                let moves = game.legal_moves(square);
                if moves.is_empty() {
                    writeln!(output, "no legal moves from {}", square_name(square))?;
                } else {
                    writeln!(output, "{}", format_squares(&moves))?;
                }
            }

            "move" => {
                let (from, to) = match parse_move_args(&parts[1..]) {
                    Some(squares) => squares,
                    None => {
                        writeln!(output, "usage: move <from> <to>")?;
                        continue;
                    }
                };

                let outcome = {
                    let mut chooser = ConsolePromotion {
                        input: &mut input,
                        output: &mut output,
                    };
                    game.apply_move(from, to, &mut chooser)
                };

                match outcome {
                    Ok(MoveOutcome::Applied(_)) => {
                        writeln!(output, "{}", game.board())?;
                        if let Some(king) = game.checked_king() {
                            writeln!(output, "check! king on {}", square_name(king))?;
                        }
                    }
                    Ok(MoveOutcome::GameOver { result, .. }) => {
                        writeln!(output, "{}", game.board())?;
                        writeln!(output, "game over: {}", result)?;
                        writeln!(output, "type 'new' to play again")?;
                    }
                    Err(e) => writeln!(output, "rejected: {}", e)?,
                }
            }

            "board" | "d" => {
                writeln!(output, "{}", game.board())?;
            }

            "status" => {
                match game.result() {
                    Some(result) => writeln!(output, "game over: {}", result)?,
                    None => writeln!(
                        output,
                        "{} to move, halfmove clock {}",
                        game.turn(),
                        game.halfmove_clock()
                    )?,
                }
                if let Some(king) = game.checked_king() {
                    writeln!(output, "king on {} is in check", square_name(king))?;
                }
            }

            "new" => {
                game.reset();
                writeln!(output, "{}", game.board())?;
            }

            "help" => {
                writeln!(output, "{}", HELP)?;
            }

            "quit" => {
                break;
            }

            other => {
                writeln!(output, "unknown command '{}', try 'help'", other)?;
            }
        }
    }

    Ok(())
}
