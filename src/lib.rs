//! Rules engine for 8×8 checkers as played on a rendered board: reconstructs
//! the board out of rendered squares, classifies the pieces and generates
//! legal moves of the active side, including mandatory capture chains. For
//! more information, see [README].
//!
//! The crate never touches the outside world on its own: it is driven through
//! the [`source::BoardSource`] and [`source::MoveExecutor`] capabilities.
//!
//! ```
//! use checkers::checkers::Board;
//!
//! let board = Board::starting();
//! assert_eq!(board.generate_moves().len(), 7);
//! ```
//!
//! [README]: https://github.com/kirillbobyrev/checkers/blob/main/README.md

pub mod checkers;
pub mod source;
pub mod turn;

mod engine;
pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Build type and target. Produced by `build.rs`.
const TARGET: &str = include_str!(concat!(env!("OUT_DIR"), "/target"));

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the engine version and repository on startup.
pub fn print_engine_info() {
    println!("Checkers rules engine {}", engine_version());
    println!("<https://github.com/kirillbobyrev/checkers>");
}

/// Prints the build type, target and whether the build is clean on startup.
pub fn print_binary_info() {
    println!("Release build: {}", !shadow_rs::is_debug());
    println!("Target: {TARGET}");
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!();
}
