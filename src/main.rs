use std::io;

use chess_rules_engine::console;

fn main() {
    println!("=== Rust Chess ===");
    println!("Board Representation: Mailbox (8x8 array)");
    println!();
    println!("Legend:");
    println!("  K Q R B N P = White pieces");
    println!("  k q r b n p = Black pieces");
    println!("  .           = Empty square");
    println!();

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = console::run(stdin.lock(), stdout.lock()) {
        eprintln!("console error: {}", e);
        std::process::exit(1);
    }
}
