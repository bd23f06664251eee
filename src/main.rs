use std::io;

use checkers::checkers::MarkerSet;
use checkers::Engine;
use clap::Parser;

/// Reads commands from stdin and answers on stdout. Set `RUST_LOG` to see what
/// the engine does.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Rendered markers containing this text are pieces of the active side.
    #[arg(long, default_value = "you")]
    active_marker: String,
    /// Rendered markers containing this text are pieces of the opponent.
    #[arg(long, default_value = "me")]
    opponent_marker: String,
    /// Rendered markers containing this text are kings.
    #[arg(long, default_value = "king")]
    king_marker: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let markers = MarkerSet::new(&args.active_marker, &args.opponent_marker, &args.king_marker)?;

    checkers::print_engine_info();
    checkers::print_binary_info();

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut engine = Engine::new(&mut input, &mut output, markers);
    engine.run()
}
