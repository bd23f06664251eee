use std::time::Duration;

use checkers::checkers::core::{Occupant, Square};
use checkers::checkers::{Board, BoardError, MarkerSet};
use checkers::source::{
    BoardSource, PollingSource, ReadPolicy, RenderedSquare, Sandbox, SquareFeed,
};
use checkers::turn::{play_turn, Policy};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn marker(occupant: Occupant) -> &'static str {
    match occupant {
        Occupant::Active => "you1.gif",
        Occupant::ActiveKing => "you1king.gif",
        Occupant::Opponent => "me1.gif",
        Occupant::OpponentKing => "me1king.gif",
        Occupant::Empty | Occupant::Unknown => "gray.gif",
    }
}

/// Renders the board the way the page does: one `spaceRC` element per square.
fn render(board: &Board) -> Vec<RenderedSquare> {
    board
        .iter()
        .map(|(square, occupant)| {
            let name = format!("space{}{}", square.row(), square.col());
            RenderedSquare::from_element(&name, marker(occupant)).expect("valid element name")
        })
        .collect()
}

/// Plays back the snapshots in order and then keeps repeating the last one.
struct ScriptedFeed {
    snapshots: Vec<Vec<RenderedSquare>>,
    calls: usize,
}

impl ScriptedFeed {
    fn new(snapshots: Vec<Vec<RenderedSquare>>) -> Self {
        Self {
            snapshots,
            calls: 0,
        }
    }
}

impl SquareFeed for ScriptedFeed {
    fn snapshot(&mut self) -> anyhow::Result<Vec<RenderedSquare>> {
        let index = self.calls.min(self.snapshots.len() - 1);
        self.calls += 1;
        Ok(self.snapshots[index].clone())
    }
}

/// Renders whatever is currently on the table.
struct RenderedTable(Sandbox);

impl SquareFeed for RenderedTable {
    fn snapshot(&mut self) -> anyhow::Result<Vec<RenderedSquare>> {
        Ok(render(&self.0.board()))
    }
}

fn quick_policy() -> ReadPolicy {
    ReadPolicy::new(Duration::from_secs(2), Duration::from_millis(1))
}

#[test]
fn partial_board_is_never_returned() {
    init_logging();
    let partial = render(&Board::starting())[..40].to_vec();
    let mut source = PollingSource::new(
        ScriptedFeed::new(vec![partial]),
        MarkerSet::default(),
        ReadPolicy::immediate(),
    );
    let error = source.read_board().unwrap_err();
    assert_eq!(
        error.downcast_ref::<BoardError>(),
        Some(&BoardError::NotReady {
            squares: 40,
            attempts: 1
        })
    );
}

#[test]
fn gives_up_after_timeout() {
    init_logging();
    let partial = render(&Board::starting())[..40].to_vec();
    let mut source = PollingSource::new(
        ScriptedFeed::new(vec![partial]),
        MarkerSet::default(),
        ReadPolicy::new(Duration::from_millis(30), Duration::from_millis(5)),
    );
    match source.read_board().unwrap_err().downcast_ref::<BoardError>() {
        Some(BoardError::NotReady { squares, attempts }) => {
            assert_eq!(*squares, 40);
            assert!(*attempts > 1);
        },
        other => panic!("expected NotReady, got {other:?}"),
    }
    assert!(source.feed_mut().calls > 1);
}

#[test]
fn waits_for_rendering() {
    init_logging();
    let full = render(&Board::starting());
    let mut shuffled = full.clone();
    shuffled.reverse();
    let mut source = PollingSource::new(
        ScriptedFeed::new(vec![vec![], full[..20].to_vec(), full[..63].to_vec(), shuffled]),
        MarkerSet::default(),
        quick_policy(),
    );
    assert_eq!(source.read_board().unwrap(), Board::starting());
    assert_eq!(source.feed_mut().calls, 4);
    assert_eq!(source.fingerprint().unwrap(), Board::starting().fingerprint());
}

#[test]
fn unbounded_wait() {
    init_logging();
    let full = render(&Board::starting());
    let mut source = PollingSource::new(
        ScriptedFeed::new(vec![vec![], full[..10].to_vec(), full]),
        MarkerSet::default(),
        ReadPolicy::new(Duration::MAX, Duration::ZERO),
    );
    assert_eq!(source.read_board().unwrap(), Board::starting());
    assert_eq!(source.feed_mut().calls, 3);
}

#[test]
fn duplicate_squares() {
    init_logging();
    let mut squares = render(&Board::starting());
    squares[63] = RenderedSquare::new(Square::new(0, 0).unwrap(), "gray.gif");
    let mut source = PollingSource::new(
        ScriptedFeed::new(vec![squares]),
        MarkerSet::default(),
        quick_policy(),
    );
    assert_eq!(
        source.read_board().unwrap_err().downcast_ref::<BoardError>(),
        Some(&BoardError::Malformed { squares: 63 })
    );
}

#[test]
fn custom_markers() {
    let markers = MarkerSet::new("orange", "blue", "crown").unwrap();
    let mut squares: Vec<RenderedSquare> = Square::iter()
        .map(|square| RenderedSquare::new(square, "empty.png"))
        .collect();
    squares[19] = RenderedSquare::new(squares[19].square(), "orange.gif");
    squares[28] = RenderedSquare::new(squares[28].square(), "blue_crown.png");
    let mut source = PollingSource::new(ScriptedFeed::new(vec![squares]), markers, quick_policy());
    assert_eq!(
        source.read_board().unwrap().to_string(),
        "8/8/3a4/4B3/8/8/8/8"
    );
}

#[test]
fn turn_over_rendered_table() {
    init_logging();
    let mut table = Sandbox::new(Board::try_from("8/8/3a4/4b3/8/4b3/8/8").unwrap());
    let mut source = PollingSource::new(
        RenderedTable(table.clone()),
        MarkerSet::default(),
        quick_policy(),
    );
    let played = play_turn(&mut source, &mut table, Policy::Central).unwrap();
    assert_eq!(
        played.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["19x37", "37x51"]
    );
    assert_eq!(source.read_board().unwrap().to_string(), "8/8/8/8/8/8/3a4/8");

    // Nothing left to capture: the next turn is a single step.
    let played = play_turn(&mut source, &mut table, Policy::Central).unwrap();
    assert_eq!(played.len(), 1);
    assert!(!played[0].is_capture());
}

#[test]
fn no_legal_moves() {
    let mut table = Sandbox::new(Board::try_from("8/8/8/8/8/8/8/1b6").unwrap());
    let played = play_turn(&mut table.clone(), &mut table, Policy::First).unwrap();
    assert!(played.is_empty());
}

#[test]
fn restart_restores_fingerprint() {
    init_logging();
    let mut table = Sandbox::default();
    let mut source = PollingSource::new(
        RenderedTable(table.clone()),
        MarkerSet::default(),
        quick_policy(),
    );
    let initial = source.fingerprint().unwrap();
    let _ = play_turn(&mut source, &mut table, Policy::First).unwrap();
    let _ = play_turn(&mut source, &mut table, Policy::Central).unwrap();
    assert_ne!(source.fingerprint().unwrap(), initial);
    table.restart();
    assert_eq!(source.fingerprint().unwrap(), initial);
}
